//! A path of pools from an input currency to an output currency.

use crate::currency::Currency;
use crate::error::{Error, RouteError};
use crate::fractions::{Fraction, Price};
use crate::pool::AmmPool;
use crate::tick::NoTickDataProvider;

#[derive(Clone, Debug)]
pub struct Route<P = NoTickDataProvider> {
    pools: Vec<AmmPool<P>>,
    path: Vec<Currency>,
    input: Currency,
    output: Currency,
    mid_price: Price,
}

impl<P> Route<P> {
    /// Walks `pools` from `input`, each pool paying out the currency the next
    /// one takes in, and prices the whole path at the pools' spot prices.
    pub fn new(pools: Vec<AmmPool<P>>, input: Currency, output: Currency) -> Result<Self, Error> {
        let first = pools.first().ok_or(RouteError::NoPools)?;
        let chain_id = first.chain_id();
        if pools.iter().any(|pool| pool.chain_id() != chain_id) {
            return Err(RouteError::ChainIds.into());
        }
        if !first.involves(&input) {
            return Err(RouteError::Input.into());
        }

        let mut path = Vec::with_capacity(pools.len() + 1);
        path.push(input.clone());
        let mut price = Fraction::from_integer(1);
        for pool in &pools {
            let current = path.last().ok_or(RouteError::Path)?;
            if !pool.involves(current) {
                return Err(RouteError::Path.into());
            }
            price = price.multiply(pool.price_of(current)?.as_fraction());
            let next = pool.other_currency(current)?.clone();
            path.push(next);
        }

        let reaches_output = path.last().is_some_and(|last| last.equivalent(&output));
        if !reaches_output {
            return Err(RouteError::Output.into());
        }

        let mid_price = Price::new(
            input.clone(),
            output.clone(),
            price.denominator().clone(),
            price.numerator().clone(),
        )?;
        Ok(Self {
            pools,
            path,
            input,
            output,
            mid_price,
        })
    }

    pub fn pools(&self) -> &[AmmPool<P>] {
        &self.pools
    }

    /// Currencies visited, starting with the input.
    pub fn path(&self) -> &[Currency] {
        &self.path
    }

    pub fn input(&self) -> &Currency {
        &self.input
    }

    pub fn output(&self) -> &Currency {
        &self.output
    }

    pub fn chain_id(&self) -> u64 {
        self.input.chain_id()
    }

    /// Output per unit of input at the pools' current prices.
    pub fn mid_price(&self) -> &Price {
        &self.mid_price
    }
}
