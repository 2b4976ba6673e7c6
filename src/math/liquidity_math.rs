use crate::error::MathError;
use crate::math::u256_to_big_uint;
use crate::Q96;
use alloy_primitives::U256;
use num_bigint::BigUint;

/// Adds a signed liquidity delta, failing on overflow or underflow.
pub fn add_delta(x: u128, y: i128) -> Result<u128, MathError> {
    if y < 0 {
        x.checked_sub(y.unsigned_abs()).ok_or(MathError::Underflow)
    } else {
        x.checked_add(y as u128).ok_or(MathError::Overflow)
    }
}

/// Adds a signed liquidity delta while crossing a tick, clamping at zero.
///
/// Tick data fetched off-chain can be slightly stale, so a crossing that
/// would drive liquidity negative leaves the pool empty instead of failing.
pub fn add_delta_saturating(x: u128, y: i128) -> Result<u128, MathError> {
    if y < 0 {
        Ok(x.saturating_sub(y.unsigned_abs()))
    } else {
        x.checked_add(y as u128).ok_or(MathError::Overflow)
    }
}

fn ordered(a: U256, b: U256) -> Result<(BigUint, BigUint), MathError> {
    let (a, b) = if a > b { (b, a) } else { (a, b) };
    if a == b {
        return Err(MathError::DivisionByZero);
    }
    Ok((u256_to_big_uint(a), u256_to_big_uint(b)))
}

/// Liquidity for `amount0` between two prices, using the router's cheaper
/// formula (`amount0 * (a * b / Q96) / (b - a)`), which truncates early.
pub fn max_liquidity_for_amount0_imprecise(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
) -> Result<BigUint, MathError> {
    let (a, b) = ordered(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;
    let intermediate = &a * &b / u256_to_big_uint(Q96);
    Ok(u256_to_big_uint(amount0) * intermediate / (b - a))
}

/// Liquidity for `amount0` between two prices without intermediate truncation.
pub fn max_liquidity_for_amount0_precise(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
) -> Result<BigUint, MathError> {
    let (a, b) = ordered(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;
    let numerator = u256_to_big_uint(amount0) * &a * &b;
    let denominator = u256_to_big_uint(Q96) * (b - a);
    Ok(numerator / denominator)
}

/// Liquidity for `amount1` between two prices.
pub fn max_liquidity_for_amount1(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount1: U256,
) -> Result<BigUint, MathError> {
    let (a, b) = ordered(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;
    Ok(u256_to_big_uint(amount1) * u256_to_big_uint(Q96) / (b - a))
}

/// Maximum liquidity mintable from `amount0` and `amount1` at the current price.
///
/// Below the range only token0 binds, above it only token1; inside the range
/// the smaller of the two single-sided liquidities wins.
pub fn max_liquidity_for_amounts(
    sqrt_ratio_current_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
    amount1: U256,
    use_full_precision: bool,
) -> Result<BigUint, MathError> {
    let (a, b) = if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    };
    let for_amount0: fn(U256, U256, U256) -> Result<BigUint, MathError> = if use_full_precision {
        max_liquidity_for_amount0_precise
    } else {
        max_liquidity_for_amount0_imprecise
    };

    if sqrt_ratio_current_x96 <= a {
        for_amount0(a, b, amount0)
    } else if sqrt_ratio_current_x96 < b {
        let liquidity0 = for_amount0(sqrt_ratio_current_x96, b, amount0)?;
        let liquidity1 = max_liquidity_for_amount1(a, sqrt_ratio_current_x96, amount1)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        max_liquidity_for_amount1(a, b, amount1)
    }
}

/// Narrows a liquidity value to `u128`.
pub fn to_liquidity(x: &BigUint) -> Result<u128, MathError> {
    u128::try_from(x).map_err(|_| MathError::Overflow)
}
