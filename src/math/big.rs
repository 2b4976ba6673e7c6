use crate::error::MathError;
use alloy_primitives::U256;
use num_bigint::{BigInt, BigUint, Sign};

pub fn u256_to_big_uint(x: U256) -> BigUint {
    BigUint::from_bytes_be(&x.to_be_bytes::<32>())
}

pub fn u256_to_big_int(x: U256) -> BigInt {
    BigInt::from_biguint(Sign::Plus, u256_to_big_uint(x))
}

/// Fails with `Overflow` when the value needs more than 256 bits.
pub fn big_uint_to_u256(x: &BigUint) -> Result<U256, MathError> {
    U256::try_from_be_slice(&x.to_bytes_be()).ok_or(MathError::Overflow)
}

/// Fails with `Negative` below zero and `Overflow` above `U256::MAX`.
pub fn big_int_to_u256(x: &BigInt) -> Result<U256, MathError> {
    match x.to_biguint() {
        Some(unsigned) => big_uint_to_u256(&unsigned),
        None => Err(MathError::Negative),
    }
}
