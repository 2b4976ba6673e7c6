pub mod bit_math;
pub mod full_math;
pub mod liquidity_math;
pub mod price_tick_conversions;
pub mod sqrt_price_math;
pub mod swap_math;
pub mod tick_math;

mod big;

pub use big::{big_int_to_u256, big_uint_to_u256, u256_to_big_int, u256_to_big_uint};
