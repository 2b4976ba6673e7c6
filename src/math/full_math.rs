use crate::error::MathError;
use alloy_primitives::{U256, U512};

#[inline(always)]
fn widen(x: U256) -> U512 {
    let l = x.as_limbs();
    U512::from_limbs([l[0], l[1], l[2], l[3], 0, 0, 0, 0])
}

#[inline(always)]
fn narrow(x: U512) -> Result<U256, MathError> {
    let l = x.as_limbs();
    if l[4] | l[5] | l[6] | l[7] != 0 {
        return Err(MathError::Overflow);
    }
    Ok(U256::from_limbs([l[0], l[1], l[2], l[3]]))
}

/// Computes `floor(a * b / denominator)` with a 512-bit intermediate product,
/// returning a `MathError` on overflow or division by zero.
///
/// Mirrors `FullMath.mulDiv`.
#[inline(always)]
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let product = widen(a) * widen(b);
    narrow(product / widen(denominator))
}

/// Like [`mul_div`], but rounds up when `a * b` is not a multiple of
/// `denominator`, returning an overflow error if the result would exceed
/// `U256::MAX`.
#[inline(always)]
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let (quotient, remainder) = (widen(a) * widen(b)).div_rem(widen(denominator));
    let result = narrow(quotient)?;
    if remainder.is_zero() {
        Ok(result)
    } else {
        result.checked_add(U256::ONE).ok_or(MathError::Overflow)
    }
}

/// Divides `a` by `b`, rounding up on a non-zero remainder.
#[inline(always)]
pub fn div_rounding_up(a: U256, b: U256) -> Result<U256, MathError> {
    if b.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let (quotient, remainder) = a.div_rem(b);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256::ONE)
    }
}
