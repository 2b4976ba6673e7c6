//! Initialized ticks and the sources a swap reads them from.

pub mod bitmap;
mod provider;
pub mod tick_list;

pub use bitmap::TickBitmapDataProvider;
pub use provider::{NoTickDataProvider, TickDataProvider, TickListDataProvider};

use crate::error::{Error, StateError};
use crate::math::tick_math::{MAX_TICK, MIN_TICK};

/// An initialized tick and the liquidity that changes when it is crossed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tick {
    pub index: i32,
    pub liquidity_gross: u128,
    /// Added to active liquidity when crossed left to right, subtracted otherwise.
    pub liquidity_net: i128,
}

impl Tick {
    pub fn new(index: i32, liquidity_gross: u128, liquidity_net: i128) -> Result<Self, Error> {
        if !(MIN_TICK..=MAX_TICK).contains(&index) {
            return Err(StateError::TickOutOfBounds.into());
        }
        Ok(Self {
            index,
            liquidity_gross,
            liquidity_net,
        })
    }
}
