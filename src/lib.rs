//! Bit-exact off-chain AMM math, swap simulation and route search.
//!
//! This crate exposes:
//! - Fixed-point primitives (`math::*`) for ticks, sqrt prices, mul-div and swap steps.
//! - Arbitrary-precision value types (`fractions::*`) for amounts, prices and percents.
//! - Immutable pool values (`pool::*`): constant-product pairs, concentrated-liquidity
//!   pools and hook-enabled pools, plus the cross-tick swap loop.
//! - Liquidity positions, multi-hop routes and best-trade search.
//!
//! # Examples
//!
//! ## Pure math
//! ```no_run
//! use clmm_route_engine::{math::tick_math, RESOLUTION, U256};
//!
//! let sqrt_price = tick_math::get_sqrt_ratio_at_tick(0).unwrap();
//! assert_eq!(sqrt_price, U256::from(1u8) << RESOLUTION);
//! ```
//!
//! ## Quoting a swap against an in-memory pool
//! ```no_run
//! use clmm_route_engine::{
//!     currency::{Currency, Token},
//!     fractions::CurrencyAmount,
//!     math::tick_math::get_sqrt_ratio_at_tick,
//!     pool::ConcentratedPool,
//!     tick::{Tick, TickListDataProvider},
//!     Address,
//! };
//!
//! # async fn run() -> Result<(), clmm_route_engine::error::Error> {
//! let usdc = Token::new(1, Address::repeat_byte(0x11), 6, Some("USDC".into()), None)?;
//! let weth = Token::new(1, Address::repeat_byte(0x22), 18, Some("WETH".into()), None)?;
//! let ticks = TickListDataProvider::new(
//!     vec![Tick::new(-887220, 10u128.pow(18), 10i128.pow(18))?, Tick::new(887220, 10u128.pow(18), -10i128.pow(18))?],
//!     60,
//! )?;
//! let pool = ConcentratedPool::new(usdc.clone(), weth, 3000, 60, get_sqrt_ratio_at_tick(0)?, 10u128.pow(18), 0, ticks)?;
//!
//! let amount_in = CurrencyAmount::from_raw_amount(Currency::Token(usdc), 1_000_000)?;
//! match pool.get_output_amount(&amount_in, None).await? {
//!     Ok((amount_out, _next_pool)) => println!("out: {}", amount_out.to_exact()),
//!     Err(reason) => println!("pruned: {reason}"),
//! }
//! # Ok(())
//! # }
//! ```

pub use alloy_primitives::{Address, B256, I256, U256};

pub mod currency;
pub mod error;
pub mod fractions;
mod hash;
pub mod math;
pub mod pool;
pub mod position;
pub mod route;
pub mod tick;
pub mod trade;

pub use hash::{FastMap, FastSet};

pub use currency::{Currency, NativeCurrency, Token};
pub use error::{Error, PruneReason, Quote};
pub use fractions::{CurrencyAmount, Fraction, Percent, Price, Rounding};
pub use pool::{AmmPool, ConcentratedPool, HookedPool, Pair};
pub use position::Position;
pub use route::Route;
pub use trade::{BestTradeOptions, Trade, TradeType};

const U256_1: U256 = U256::from_limbs([1, 0, 0, 0]);

/// `2^160 - 1`, the bound of a `uint160` sqrt price.
const U160_MAX: U256 = U256::from_limbs([u64::MAX, u64::MAX, 4294967295, 0]);
/// Fee denominator, fees are expressed in hundredths of a bip.
const U256_E6: U256 = U256::from_limbs([1000000, 0, 0, 0]);

pub const RESOLUTION: u8 = 96;
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);
pub const Q192: U256 = U256::from_limbs([0, 0, 0, 1]);

/// Upper bound (exclusive) on a static fee, in hundredths of a bip.
pub const MAX_FEE: u32 = 1_000_000;
