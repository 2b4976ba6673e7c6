//! Liquidity positions over a tick range of a concentrated-liquidity pool.

use crate::error::{Error, PositionError, TradeError};
use crate::fractions::{CurrencyAmount, Percent, Price};
use crate::math::liquidity_math::{max_liquidity_for_amounts, to_liquidity};
use crate::math::price_tick_conversions::{encode_sqrt_ratio_x96, tick_to_price};
use crate::math::sqrt_price_math::{get_amount_0_delta, get_amount_1_delta};
use crate::math::tick_math::{
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO,
    MIN_TICK,
};
use crate::pool::ConcentratedLiquidity;
use crate::U256_1;
use alloy_primitives::U256;
use num_traits::Signed;

/// Token amounts held by `liquidity` between two ticks while the pool sits
/// at `(sqrt_price_x96, tick_current)`.
fn token_amounts(
    sqrt_price_x96: U256,
    tick_current: i32,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
    round_up: bool,
) -> Result<(U256, U256), Error> {
    let sqrt_lower = get_sqrt_ratio_at_tick(tick_lower)?;
    let sqrt_upper = get_sqrt_ratio_at_tick(tick_upper)?;
    if tick_current < tick_lower {
        Ok((
            get_amount_0_delta(sqrt_lower, sqrt_upper, liquidity, round_up)?,
            U256::ZERO,
        ))
    } else if tick_current < tick_upper {
        Ok((
            get_amount_0_delta(sqrt_price_x96, sqrt_upper, liquidity, round_up)?,
            get_amount_1_delta(sqrt_lower, sqrt_price_x96, liquidity, round_up)?,
        ))
    } else {
        Ok((
            U256::ZERO,
            get_amount_1_delta(sqrt_lower, sqrt_upper, liquidity, round_up)?,
        ))
    }
}

#[derive(Clone, Debug)]
pub struct Position<T> {
    pool: T,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
    amount0: CurrencyAmount,
    amount1: CurrencyAmount,
    mint_amounts: (U256, U256),
}

impl<T: ConcentratedLiquidity> Position<T> {
    /// Both ticks must be multiples of the pool's spacing with
    /// `MIN_TICK <= tick_lower < tick_upper <= MAX_TICK`.
    pub fn new(pool: T, liquidity: u128, tick_lower: i32, tick_upper: i32) -> Result<Self, Error> {
        if tick_lower >= tick_upper {
            return Err(PositionError::TickOrder.into());
        }
        let spacing = pool.tick_spacing();
        if tick_lower < MIN_TICK || tick_lower % spacing != 0 {
            return Err(PositionError::TickLower.into());
        }
        if tick_upper > MAX_TICK || tick_upper % spacing != 0 {
            return Err(PositionError::TickUpper.into());
        }

        let (sqrt_price, tick) = (pool.sqrt_price_x96(), pool.tick_current());
        let (raw0, raw1) = token_amounts(sqrt_price, tick, tick_lower, tick_upper, liquidity, false)?;
        let mint_amounts = token_amounts(sqrt_price, tick, tick_lower, tick_upper, liquidity, true)?;
        let amount0 = CurrencyAmount::from_u256(pool.currency0().clone(), raw0)?;
        let amount1 = CurrencyAmount::from_u256(pool.currency1().clone(), raw1)?;

        Ok(Self {
            pool,
            tick_lower,
            tick_upper,
            liquidity,
            amount0,
            amount1,
            mint_amounts,
        })
    }

    /// The largest position `amount0` and `amount1` can mint at the pool's
    /// current price.
    ///
    /// `use_full_precision` selects the exact token0 formula; without it the
    /// router's truncating formula is used.
    pub fn from_amounts(
        pool: T,
        tick_lower: i32,
        tick_upper: i32,
        amount0: U256,
        amount1: U256,
        use_full_precision: bool,
    ) -> Result<Self, Error> {
        let liquidity = max_liquidity_for_amounts(
            pool.sqrt_price_x96(),
            get_sqrt_ratio_at_tick(tick_lower)?,
            get_sqrt_ratio_at_tick(tick_upper)?,
            amount0,
            amount1,
            use_full_precision,
        )?;
        Self::new(pool, to_liquidity(&liquidity)?, tick_lower, tick_upper)
    }

    /// Largest position backed by `amount0` alone, as if token1 were unlimited.
    pub fn from_amount0(
        pool: T,
        tick_lower: i32,
        tick_upper: i32,
        amount0: U256,
        use_full_precision: bool,
    ) -> Result<Self, Error> {
        Self::from_amounts(pool, tick_lower, tick_upper, amount0, U256::MAX, use_full_precision)
    }

    /// Largest position backed by `amount1` alone, as if token0 were unlimited.
    pub fn from_amount1(pool: T, tick_lower: i32, tick_upper: i32, amount1: U256) -> Result<Self, Error> {
        Self::from_amounts(pool, tick_lower, tick_upper, U256::MAX, amount1, true)
    }

    pub fn pool(&self) -> &T {
        &self.pool
    }

    pub fn tick_lower(&self) -> i32 {
        self.tick_lower
    }

    pub fn tick_upper(&self) -> i32 {
        self.tick_upper
    }

    pub fn liquidity(&self) -> u128 {
        self.liquidity
    }

    /// Token0 the position is worth now, rounded down.
    pub fn amount0(&self) -> &CurrencyAmount {
        &self.amount0
    }

    /// Token1 the position is worth now, rounded down.
    pub fn amount1(&self) -> &CurrencyAmount {
        &self.amount1
    }

    /// Token amounts that must be paid to mint the position, rounded up.
    pub fn mint_amounts(&self) -> (U256, U256) {
        self.mint_amounts
    }

    pub fn token0_price_lower(&self) -> Result<Price, Error> {
        tick_to_price(
            self.pool.currency0().clone(),
            self.pool.currency1().clone(),
            self.tick_lower,
        )
    }

    pub fn token0_price_upper(&self) -> Result<Price, Error> {
        tick_to_price(
            self.pool.currency0().clone(),
            self.pool.currency1().clone(),
            self.tick_upper,
        )
    }

    /// Sqrt prices bounding a move of the pool price by `slippage_tolerance`
    /// either way, kept strictly inside the valid ratio range.
    pub fn ratios_after_slippage(&self, slippage_tolerance: &Percent) -> Result<(U256, U256), Error> {
        if slippage_tolerance.is_negative() {
            return Err(TradeError::SlippageTolerance.into());
        }
        let price = self.pool.token0_price()?;
        let one = Percent::one();
        let lower = price
            .as_fraction()
            .multiply(one.subtract(slippage_tolerance).as_fraction());
        let upper = price
            .as_fraction()
            .multiply(slippage_tolerance.add(&one).as_fraction());

        let mut sqrt_lower = if lower.numerator().is_positive() {
            encode_sqrt_ratio_x96(lower.numerator().clone(), lower.denominator().clone())?
        } else {
            MIN_SQRT_RATIO
        };
        if sqrt_lower <= MIN_SQRT_RATIO {
            sqrt_lower = MIN_SQRT_RATIO + U256_1;
        }
        let mut sqrt_upper =
            encode_sqrt_ratio_x96(upper.numerator().clone(), upper.denominator().clone())?;
        if sqrt_upper >= MAX_SQRT_RATIO {
            sqrt_upper = MAX_SQRT_RATIO - U256_1;
        }
        Ok((sqrt_lower, sqrt_upper))
    }

    /// Worst-case amounts to pay when minting, assuming the price may move
    /// by `slippage_tolerance` before the mint lands.
    pub fn mint_amounts_with_slippage(&self, slippage_tolerance: &Percent) -> Result<(U256, U256), Error> {
        let (sqrt_lower, sqrt_upper) = self.ratios_after_slippage(slippage_tolerance)?;

        // liquidity the router would actually mint for the rounded-up amounts
        let (mint0, mint1) = self.mint_amounts;
        let liquidity = to_liquidity(&max_liquidity_for_amounts(
            self.pool.sqrt_price_x96(),
            get_sqrt_ratio_at_tick(self.tick_lower)?,
            get_sqrt_ratio_at_tick(self.tick_upper)?,
            mint0,
            mint1,
            false,
        )?)?;

        let (amount0, _) = self.amounts_at(sqrt_upper, liquidity, true)?;
        let (_, amount1) = self.amounts_at(sqrt_lower, liquidity, true)?;
        Ok((amount0, amount1))
    }

    /// Least amounts received when burning all liquidity, assuming the price
    /// may move by `slippage_tolerance` before the burn lands.
    pub fn burn_amounts_with_slippage(&self, slippage_tolerance: &Percent) -> Result<(U256, U256), Error> {
        let (sqrt_lower, sqrt_upper) = self.ratios_after_slippage(slippage_tolerance)?;
        let (amount0, _) = self.amounts_at(sqrt_upper, self.liquidity, false)?;
        let (_, amount1) = self.amounts_at(sqrt_lower, self.liquidity, false)?;
        Ok((amount0, amount1))
    }

    fn amounts_at(&self, sqrt_price_x96: U256, liquidity: u128, round_up: bool) -> Result<(U256, U256), Error> {
        token_amounts(
            sqrt_price_x96,
            get_tick_at_sqrt_ratio(sqrt_price_x96)?,
            self.tick_lower,
            self.tick_upper,
            liquidity,
            round_up,
        )
    }
}
