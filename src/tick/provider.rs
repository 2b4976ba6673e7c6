use super::{tick_list, Tick};
use crate::error::{Error, SwapError};
use futures::future::ready;
use std::future::Future;
use std::sync::Arc;

/// Source of initialized tick data for the swap loop.
///
/// Lookups are asynchronous so a provider can fetch words or ticks from a
/// node on demand; the swap loop awaits one lookup at a time.
pub trait TickDataProvider: Send + Sync {
    /// The initialized tick at exactly `index`.
    fn get_tick(&self, index: i32) -> impl Future<Output = Result<Tick, Error>> + Send;

    /// The next initialized tick within the current bitmap word, searching
    /// left (inclusive) when `lte` is set and right (exclusive) otherwise.
    fn next_initialized_tick_within_one_word(
        &self,
        tick: i32,
        lte: bool,
        tick_spacing: i32,
    ) -> impl Future<Output = Result<(i32, bool), Error>> + Send;
}

impl<T: TickDataProvider> TickDataProvider for Arc<T> {
    fn get_tick(&self, index: i32) -> impl Future<Output = Result<Tick, Error>> + Send {
        self.as_ref().get_tick(index)
    }

    fn next_initialized_tick_within_one_word(
        &self,
        tick: i32,
        lte: bool,
        tick_spacing: i32,
    ) -> impl Future<Output = Result<(i32, bool), Error>> + Send {
        self.as_ref()
            .next_initialized_tick_within_one_word(tick, lte, tick_spacing)
    }
}

/// A validated, sorted, in-memory tick list.
///
/// Cloning shares the underlying slice.
#[derive(Clone, Debug)]
pub struct TickListDataProvider {
    ticks: Arc<[Tick]>,
    tick_spacing: i32,
}

impl TickListDataProvider {
    pub fn new(ticks: Vec<Tick>, tick_spacing: i32) -> Result<Self, Error> {
        tick_list::validate_list(&ticks, tick_spacing)?;
        Ok(Self {
            ticks: ticks.into(),
            tick_spacing,
        })
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    pub fn tick_spacing(&self) -> i32 {
        self.tick_spacing
    }
}

impl TickDataProvider for TickListDataProvider {
    fn get_tick(&self, index: i32) -> impl Future<Output = Result<Tick, Error>> + Send {
        ready(tick_list::get_tick(&self.ticks, index).copied())
    }

    fn next_initialized_tick_within_one_word(
        &self,
        tick: i32,
        lte: bool,
        tick_spacing: i32,
    ) -> impl Future<Output = Result<(i32, bool), Error>> + Send {
        ready(tick_list::next_initialized_tick_within_one_word(
            &self.ticks,
            tick,
            lte,
            tick_spacing,
        ))
    }
}

/// A provider for pools whose ticks were never loaded; every lookup fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTickDataProvider;

impl TickDataProvider for NoTickDataProvider {
    fn get_tick(&self, _index: i32) -> impl Future<Output = Result<Tick, Error>> + Send {
        ready(Err::<Tick, Error>(SwapError::NoTickData.into()))
    }

    fn next_initialized_tick_within_one_word(
        &self,
        _tick: i32,
        _lte: bool,
        _tick_spacing: i32,
    ) -> impl Future<Output = Result<(i32, bool), Error>> + Send {
        ready(Err::<(i32, bool), Error>(SwapError::NoTickData.into()))
    }
}
