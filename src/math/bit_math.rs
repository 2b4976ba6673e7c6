use crate::error::MathError;
use alloy_primitives::U256;

/// Power-of-two thresholds scanned from the widest down, paired with their shift.
const MSB_LADDER: [(usize, U256); 8] = [
    (128, U256::from_limbs([u64::MAX, u64::MAX, 0, 0])),
    (64, U256::from_limbs([u64::MAX, 0, 0, 0])),
    (32, U256::from_limbs([u32::MAX as u64, 0, 0, 0])),
    (16, U256::from_limbs([u16::MAX as u64, 0, 0, 0])),
    (8, U256::from_limbs([u8::MAX as u64, 0, 0, 0])),
    (4, U256::from_limbs([15, 0, 0, 0])),
    (2, U256::from_limbs([3, 0, 0, 0])),
    (1, U256::from_limbs([1, 0, 0, 0])),
];

/// Returns the index (0–255) of the most significant set bit in a `U256`,
/// or `MathError::ZeroValue` if the input is zero.
///
/// Mirrors `BitMath.mostSignificantBit`: eight threshold tests, each
/// shifting the value right when it exceeds `2^k - 1`.
pub fn most_significant_bit(x: U256) -> Result<u8, MathError> {
    if x.is_zero() {
        return Err(MathError::ZeroValue);
    }
    let mut r = x;
    let mut msb: usize = 0;
    for (shift, threshold) in MSB_LADDER {
        if r > threshold {
            r >>= shift;
            msb += shift;
        }
    }
    Ok(msb as u8)
}

/// Returns the index (0–255) of the least significant set bit in a `U256`,
/// or `MathError::ZeroValue` if the input is zero.
pub fn least_significant_bit(x: U256) -> Result<u8, MathError> {
    if x.is_zero() {
        return Err(MathError::ZeroValue);
    }
    Ok(x.trailing_zeros() as u8)
}
