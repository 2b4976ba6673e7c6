//! Immutable pool values and the swap loop that quotes against them.

mod concentrated;
mod hooked;
mod pair;
pub mod swap;

pub use concentrated::{compute_pool_address, tick_spacing_for_fee, ConcentratedPool};
pub use hooked::{compute_pool_id, HookPermissions, HookedPool, DYNAMIC_FEE_FLAG, MAX_TICK_SPACING};
pub use pair::{compute_pair_address, Pair};
pub use swap::{PoolState, SwapParams, SwapResult};

use crate::currency::Currency;
use crate::error::{Error, Quote, SwapError};
use crate::fractions::{CurrencyAmount, Price};
use crate::math::u256_to_big_int;
use crate::tick::{NoTickDataProvider, TickDataProvider};
use crate::Q192;
use alloy_primitives::{Address, B256, U256};
use tracing::trace;

fn encode_address(address: Address) -> [u8; 32] {
    address.into_word().0
}

/// `currency0` in `currency1` at a Q64.96 sqrt price: `sqrt^2 / 2^192`.
pub(crate) fn sqrt_price_to_price(
    currency0: &Currency,
    currency1: &Currency,
    sqrt_price_x96: U256,
) -> Result<Price, Error> {
    let sqrt = u256_to_big_int(sqrt_price_x96);
    Price::new(
        currency0.clone(),
        currency1.clone(),
        u256_to_big_int(Q192),
        &sqrt * &sqrt,
    )
}

/// Read access to the price state of a concentrated-liquidity pool, enough
/// to value a position in it.
pub trait ConcentratedLiquidity {
    fn currency0(&self) -> &Currency;
    fn currency1(&self) -> &Currency;
    fn tick_spacing(&self) -> i32;
    fn sqrt_price_x96(&self) -> U256;
    fn tick_current(&self) -> i32;
    fn liquidity(&self) -> u128;

    fn token0_price(&self) -> Result<Price, Error> {
        sqrt_price_to_price(self.currency0(), self.currency1(), self.sqrt_price_x96())
    }
}

impl<P> ConcentratedLiquidity for ConcentratedPool<P> {
    fn currency0(&self) -> &Currency {
        ConcentratedPool::currency0(self)
    }

    fn currency1(&self) -> &Currency {
        ConcentratedPool::currency1(self)
    }

    fn tick_spacing(&self) -> i32 {
        ConcentratedPool::tick_spacing(self)
    }

    fn sqrt_price_x96(&self) -> U256 {
        ConcentratedPool::sqrt_price_x96(self)
    }

    fn tick_current(&self) -> i32 {
        ConcentratedPool::tick_current(self)
    }

    fn liquidity(&self) -> u128 {
        ConcentratedPool::liquidity(self)
    }
}

impl<P> ConcentratedLiquidity for HookedPool<P> {
    fn currency0(&self) -> &Currency {
        HookedPool::currency0(self)
    }

    fn currency1(&self) -> &Currency {
        HookedPool::currency1(self)
    }

    fn tick_spacing(&self) -> i32 {
        HookedPool::tick_spacing(self)
    }

    fn sqrt_price_x96(&self) -> U256 {
        HookedPool::sqrt_price_x96(self)
    }

    fn tick_current(&self) -> i32 {
        HookedPool::tick_current(self)
    }

    fn liquidity(&self) -> u128 {
        HookedPool::liquidity(self)
    }
}

/// Every pool kind a route can pass through.
#[derive(Clone, Debug)]
pub enum AmmPool<P = NoTickDataProvider> {
    Pair(Pair),
    Concentrated(ConcentratedPool<P>),
    Hooked(HookedPool<P>),
}

impl<P> AmmPool<P> {
    pub fn chain_id(&self) -> u64 {
        match self {
            AmmPool::Pair(pair) => pair.chain_id(),
            AmmPool::Concentrated(pool) => pool.chain_id(),
            AmmPool::Hooked(pool) => pool.chain_id(),
        }
    }

    pub fn currency0(&self) -> &Currency {
        match self {
            AmmPool::Pair(pair) => pair.currency0(),
            AmmPool::Concentrated(pool) => pool.currency0(),
            AmmPool::Hooked(pool) => pool.currency0(),
        }
    }

    pub fn currency1(&self) -> &Currency {
        match self {
            AmmPool::Pair(pair) => pair.currency1(),
            AmmPool::Concentrated(pool) => pool.currency1(),
            AmmPool::Hooked(pool) => pool.currency1(),
        }
    }

    /// The side of the pool that trades `currency`: an exact match first,
    /// then the side `currency` wraps into or is wrapped from.
    ///
    /// The wrapped fallback applies to hooked pools too, so a route may hop
    /// from a wrapped-token pool into a native one. Quoting a [`HookedPool`]
    /// directly still requires the exact currency.
    pub fn pool_currency_for(&self, currency: &Currency) -> Option<&Currency> {
        let (c0, c1) = (self.currency0(), self.currency1());
        if currency == c0 {
            Some(c0)
        } else if currency == c1 {
            Some(c1)
        } else if currency.equivalent(c0) {
            Some(c0)
        } else if currency.equivalent(c1) {
            Some(c1)
        } else {
            None
        }
    }

    pub fn involves(&self, currency: &Currency) -> bool {
        self.pool_currency_for(currency).is_some()
    }

    /// The currency received when paying in `currency`.
    pub fn other_currency(&self, currency: &Currency) -> Result<&Currency, Error> {
        let side = self
            .pool_currency_for(currency)
            .ok_or(SwapError::CurrencyNotInPool)?;
        Ok(if side == self.currency0() {
            self.currency1()
        } else {
            self.currency0()
        })
    }

    /// Spot price of `currency` in the other side of the pool.
    pub fn price_of(&self, currency: &Currency) -> Result<Price, Error> {
        let side = self
            .pool_currency_for(currency)
            .ok_or(SwapError::CurrencyNotInPool)?;
        match self {
            AmmPool::Pair(pair) => pair.price_of(side.wrapped()),
            AmmPool::Concentrated(pool) => pool.price_of(side.wrapped()),
            AmmPool::Hooked(pool) => pool.price_of(side),
        }
    }

    /// Identity of the pool for de-duplicating routes of one trade.
    pub fn pool_key(&self) -> B256 {
        match self {
            AmmPool::Pair(pair) => pair.pool_key(),
            AmmPool::Concentrated(pool) => pool.pool_key(),
            AmmPool::Hooked(pool) => pool.pool_id(),
        }
    }

    pub fn supports_quoting(&self) -> bool {
        match self {
            AmmPool::Hooked(pool) => pool.supports_quoting(),
            _ => true,
        }
    }

    fn pool_amount(&self, amount: &CurrencyAmount) -> Result<CurrencyAmount, Error> {
        let side = self
            .pool_currency_for(amount.currency())
            .ok_or(SwapError::CurrencyNotInPool)?;
        Ok(amount.with_currency(side.clone()))
    }
}

impl<P: TickDataProvider + Clone> AmmPool<P> {
    /// Output for an exact input and the pool after the swap.
    ///
    /// `sqrt_price_limit_x96` applies to concentrated pools only.
    pub async fn get_output_amount(
        &self,
        input_amount: &CurrencyAmount,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Result<Quote<(CurrencyAmount, AmmPool<P>)>, Error> {
        let input_amount = self.pool_amount(input_amount)?;
        let quote = match self {
            AmmPool::Pair(pair) => pair
                .get_output_amount(&input_amount)?
                .map(|(out, next)| (out, AmmPool::Pair(next))),
            AmmPool::Concentrated(pool) => pool
                .get_output_amount(&input_amount, sqrt_price_limit_x96)
                .await?
                .map(|(out, next)| (out, AmmPool::Concentrated(next))),
            AmmPool::Hooked(pool) => pool
                .get_output_amount(&input_amount, sqrt_price_limit_x96)
                .await?
                .map(|(out, next)| (out, AmmPool::Hooked(next))),
        };
        if let Err(reason) = &quote {
            trace!(pool = %self.pool_key(), %reason, "exact input quote pruned");
        }
        Ok(quote)
    }

    /// Input needed for an exact output and the pool after the swap.
    pub async fn get_input_amount(
        &self,
        output_amount: &CurrencyAmount,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Result<Quote<(CurrencyAmount, AmmPool<P>)>, Error> {
        let output_amount = self.pool_amount(output_amount)?;
        let quote = match self {
            AmmPool::Pair(pair) => pair
                .get_input_amount(&output_amount)?
                .map(|(input, next)| (input, AmmPool::Pair(next))),
            AmmPool::Concentrated(pool) => pool
                .get_input_amount(&output_amount, sqrt_price_limit_x96)
                .await?
                .map(|(input, next)| (input, AmmPool::Concentrated(next))),
            AmmPool::Hooked(pool) => pool
                .get_input_amount(&output_amount, sqrt_price_limit_x96)
                .await?
                .map(|(input, next)| (input, AmmPool::Hooked(next))),
        };
        if let Err(reason) = &quote {
            trace!(pool = %self.pool_key(), %reason, "exact output quote pruned");
        }
        Ok(quote)
    }
}

impl<P> From<Pair> for AmmPool<P> {
    fn from(pair: Pair) -> Self {
        AmmPool::Pair(pair)
    }
}

impl<P> From<ConcentratedPool<P>> for AmmPool<P> {
    fn from(pool: ConcentratedPool<P>) -> Self {
        AmmPool::Concentrated(pool)
    }
}

impl<P> From<HookedPool<P>> for AmmPool<P> {
    fn from(pool: HookedPool<P>) -> Self {
        AmmPool::Hooked(pool)
    }
}
