use crate::error::{Error, MathError, PruneReason, Quote, StateError, SwapError};
use crate::math::liquidity_math::add_delta_saturating;
use crate::math::swap_math::compute_swap_step;
use crate::math::tick_math::{
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO,
    MIN_TICK,
};
use crate::tick::TickDataProvider;
use crate::{MAX_FEE, U256_1};
use alloy_primitives::{I256, U256};
use tracing::{debug, trace};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SwapParams {
    /// Swap direction: `true` for token0 → token1, `false` for token1 → token0.
    pub zero_for_one: bool,
    /// Signed amount being swapped. Positive means “exact in”, negative means “exact out”.
    pub amount_specified: I256,
    /// Sqrt‑price limit in Q96 that bounds how far the price is allowed to move.
    ///
    /// `None` lets the swap run to one above `MIN_SQRT_RATIO` or one below
    /// `MAX_SQRT_RATIO`.
    pub sqrt_price_limit_x96: Option<U256>,
}

impl SwapParams {
    #[inline]
    pub fn new(
        zero_for_one: bool,
        amount_specified: I256,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Self {
        Self {
            zero_for_one,
            amount_specified,
            sqrt_price_limit_x96,
        }
    }

    /// The effective limit, defaulting to the far end of the price range.
    pub fn resolved_limit(&self) -> U256 {
        self.sqrt_price_limit_x96.unwrap_or(if self.zero_for_one {
            MIN_SQRT_RATIO + U256_1
        } else {
            MAX_SQRT_RATIO - U256_1
        })
    }
}

/// Terminal state of a simulated swap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SwapResult {
    /// Part of the specified amount left unfilled when the price limit was hit.
    pub amount_specified_remaining: I256,
    /// Negative output for exact-in swaps, positive input for exact-out swaps.
    pub amount_calculated: I256,
    pub sqrt_price_x96: U256,
    pub liquidity: u128,
    pub tick_current: i32,
    pub fees_paid: U256,
}

// running state of the swap loop
struct SwapState {
    // the amount remaining to be swapped in/out of the input/output asset
    amount_specified_remaining: I256,
    // the amount already swapped out/in of the output/input asset
    amount_calculated: I256,
    sqrt_price_x96: U256,
    // the tick associated with the current price
    tick: i32,
    // the current liquidity in range
    liquidity: u128,
    swap_fee: U256,
}

#[derive(Default)]
struct StepComputations {
    // the price at the beginning of the step
    sqrt_price_start_x96: U256,
    // the next tick to swap to from the current tick in the swap direction
    tick_next: i32,
    // whether tick_next is initialized or not
    initialized: bool,
    // sqrt(price) for the next tick (1/0)
    sqrt_price_next_x96: U256,
    amount_in: U256,
    amount_out: U256,
    fee_amount: U256,
}

/// Price, liquidity and tick data of a concentrated-liquidity pool.
///
/// Shared by plain and hook-enabled pools. Values are never mutated; a swap
/// reports the state it ends in and the caller builds the next pool from it.
#[derive(Clone, Debug)]
pub struct PoolState<P> {
    pub sqrt_price_x96: U256,
    pub tick_current: i32,
    pub liquidity: u128,
    pub tick_spacing: i32,
    /// Swap fee in hundredths of a bip.
    pub fee: u32,
    pub tick_data_provider: P,
}

impl<P> PoolState<P> {
    /// Checks that `tick_current` is the tick of `sqrt_price_x96`.
    pub fn new(
        sqrt_price_x96: U256,
        tick_current: i32,
        liquidity: u128,
        tick_spacing: i32,
        fee: u32,
        tick_data_provider: P,
    ) -> Result<Self, Error> {
        if fee >= MAX_FEE {
            return Err(StateError::Fee(fee).into());
        }
        if tick_spacing <= 0 {
            return Err(StateError::TickSpacing.into());
        }
        if !(MIN_TICK..MAX_TICK).contains(&tick_current) {
            return Err(StateError::TickOutOfBounds.into());
        }
        let lower = get_sqrt_ratio_at_tick(tick_current)?;
        let upper = get_sqrt_ratio_at_tick(tick_current + 1)?;
        if sqrt_price_x96 < lower || sqrt_price_x96 > upper {
            return Err(StateError::PriceBounds {
                sqrt_price: sqrt_price_x96.to_string(),
                tick: tick_current,
            }
            .into());
        }
        Ok(Self {
            sqrt_price_x96,
            tick_current,
            liquidity,
            tick_spacing,
            fee,
            tick_data_provider,
        })
    }

    /// Same pool after a swap, sharing the tick data.
    pub(crate) fn advanced(&self, result: &SwapResult) -> Self
    where
        P: Clone,
    {
        Self {
            sqrt_price_x96: result.sqrt_price_x96,
            tick_current: result.tick_current,
            liquidity: result.liquidity,
            tick_spacing: self.tick_spacing,
            fee: self.fee,
            tick_data_provider: self.tick_data_provider.clone(),
        }
    }
}

impl<P: TickDataProvider> PoolState<P> {
    /// Simulates a swap across initialized ticks until the specified amount
    /// is filled or the price reaches its limit.
    ///
    /// Each iteration awaits one tick lookup; nothing about `self` changes.
    pub async fn swap(&self, params: SwapParams) -> Result<SwapResult, Error> {
        let amount_specified = params.amount_specified;
        if amount_specified.is_zero() {
            return Err(SwapError::AmountSpecifiedIsZero.into());
        }

        let zero_for_one = params.zero_for_one;
        let sqrt_price_limit_x96 = params.resolved_limit();
        if zero_for_one {
            if sqrt_price_limit_x96 <= MIN_SQRT_RATIO {
                return Err(SwapError::SqrtPriceLimitOutOfBounds.into());
            }
            if sqrt_price_limit_x96 >= self.sqrt_price_x96 {
                return Err(SwapError::SqrtPriceLimitCurrent.into());
            }
        } else {
            if sqrt_price_limit_x96 >= MAX_SQRT_RATIO {
                return Err(SwapError::SqrtPriceLimitOutOfBounds.into());
            }
            if sqrt_price_limit_x96 <= self.sqrt_price_x96 {
                return Err(SwapError::SqrtPriceLimitCurrent.into());
            }
        }

        let exact_input = amount_specified.is_positive();

        let mut state = SwapState {
            amount_specified_remaining: amount_specified,
            amount_calculated: I256::ZERO,
            sqrt_price_x96: self.sqrt_price_x96,
            tick: self.tick_current,
            liquidity: self.liquidity,
            swap_fee: U256::ZERO,
        };

        while !state.amount_specified_remaining.is_zero()
            && state.sqrt_price_x96 != sqrt_price_limit_x96
        {
            let mut step = StepComputations {
                sqrt_price_start_x96: state.sqrt_price_x96,
                ..Default::default()
            };

            (step.tick_next, step.initialized) = self
                .tick_data_provider
                .next_initialized_tick_within_one_word(state.tick, zero_for_one, self.tick_spacing)
                .await?;

            step.tick_next = step.tick_next.clamp(MIN_TICK, MAX_TICK);
            step.sqrt_price_next_x96 = get_sqrt_ratio_at_tick(step.tick_next)?;

            let target = if zero_for_one {
                step.sqrt_price_next_x96.max(sqrt_price_limit_x96)
            } else {
                step.sqrt_price_next_x96.min(sqrt_price_limit_x96)
            };

            (
                state.sqrt_price_x96,
                step.amount_in,
                step.amount_out,
                step.fee_amount,
            ) = compute_swap_step(
                state.sqrt_price_x96,
                target,
                state.liquidity,
                state.amount_specified_remaining,
                self.fee,
            )?;

            state.swap_fee += step.fee_amount;

            if exact_input {
                state.amount_specified_remaining -= I256::from_raw(step.amount_in + step.fee_amount);
                state.amount_calculated -= I256::from_raw(step.amount_out);
            } else {
                state.amount_specified_remaining += I256::from_raw(step.amount_out);
                state.amount_calculated += I256::from_raw(step.amount_in + step.fee_amount);
            }

            trace!(
                tick_next = step.tick_next,
                initialized = step.initialized,
                sqrt_price = %state.sqrt_price_x96,
                amount_in = %step.amount_in,
                amount_out = %step.amount_out,
                fee = %step.fee_amount,
                "swap step"
            );

            if state.sqrt_price_x96 == step.sqrt_price_next_x96 {
                if step.initialized {
                    let mut liquidity_net = self
                        .tick_data_provider
                        .get_tick(step.tick_next)
                        .await?
                        .liquidity_net;
                    if zero_for_one {
                        liquidity_net = -liquidity_net;
                    }
                    state.liquidity = add_delta_saturating(state.liquidity, liquidity_net)?;
                }
                state.tick = if zero_for_one {
                    step.tick_next - 1
                } else {
                    step.tick_next
                };
            } else if state.sqrt_price_x96 != step.sqrt_price_start_x96 {
                state.tick = get_tick_at_sqrt_ratio(state.sqrt_price_x96)?;
            }
        }

        debug!(
            zero_for_one,
            amount_specified = %amount_specified,
            remaining = %state.amount_specified_remaining,
            calculated = %state.amount_calculated,
            tick = state.tick,
            "swap finished"
        );

        Ok(SwapResult {
            amount_specified_remaining: state.amount_specified_remaining,
            amount_calculated: state.amount_calculated,
            sqrt_price_x96: state.sqrt_price_x96,
            liquidity: state.liquidity,
            tick_current: state.tick,
            fees_paid: state.swap_fee,
        })
    }

    /// Output of swapping exactly `amount_in`, or why the pool can't fill it.
    pub(crate) async fn quote_exact_input(
        &self,
        zero_for_one: bool,
        amount_in: U256,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Result<Quote<(U256, SwapResult)>, Error> {
        if amount_in.is_zero() {
            return Ok(Err(PruneReason::InsufficientInputAmount));
        }
        let amount_specified = I256::try_from(amount_in).map_err(|_| MathError::Overflow)?;
        let result = self
            .swap(SwapParams::new(zero_for_one, amount_specified, sqrt_price_limit_x96))
            .await?;
        if !result.amount_specified_remaining.is_zero() {
            return Ok(Err(unfilled(sqrt_price_limit_x96)));
        }
        let amount_out = result.amount_calculated.unsigned_abs();
        if amount_out.is_zero() {
            return Ok(Err(PruneReason::InsufficientInputAmount));
        }
        Ok(Ok((amount_out, result)))
    }

    /// Input needed to receive exactly `amount_out`, or why the pool can't fill it.
    pub(crate) async fn quote_exact_output(
        &self,
        zero_for_one: bool,
        amount_out: U256,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Result<Quote<(U256, SwapResult)>, Error> {
        if amount_out.is_zero() {
            return Ok(Err(PruneReason::InsufficientInputAmount));
        }
        let amount_specified = -I256::try_from(amount_out).map_err(|_| MathError::Overflow)?;
        let result = self
            .swap(SwapParams::new(zero_for_one, amount_specified, sqrt_price_limit_x96))
            .await?;
        if !result.amount_specified_remaining.is_zero() {
            return Ok(Err(unfilled(sqrt_price_limit_x96)));
        }
        Ok(Ok((result.amount_calculated.unsigned_abs(), result)))
    }
}

// a swap that stopped short either hit the caller's limit or ran out of liquidity
fn unfilled(sqrt_price_limit_x96: Option<U256>) -> PruneReason {
    if sqrt_price_limit_x96.is_some() {
        PruneReason::PriceLimitReached
    } else {
        PruneReason::InsufficientReserves
    }
}
