//! Exact rational arithmetic for amounts, prices and percentages.

mod currency_amount;
mod fraction;
mod percent;
mod price;

pub use currency_amount::CurrencyAmount;
pub use fraction::{Fraction, Rounding};
pub use percent::Percent;
pub use price::Price;
