use super::fraction::{format_scaled, pow10, trim_fraction_zeros};
use super::{Fraction, Rounding};
use crate::currency::Currency;
use crate::error::{CurrencyError, Error};
use crate::math::{big_int_to_u256, u256_to_big_int};
use alloy_primitives::U256;
use num_bigint::BigInt;

/// An amount of a currency in its smallest unit, possibly fractional.
///
/// The integer part never exceeds `MaxUint256`.
#[derive(Clone, Debug)]
pub struct CurrencyAmount {
    currency: Currency,
    fraction: Fraction,
}

impl CurrencyAmount {
    pub fn from_raw_amount(currency: Currency, raw_amount: impl Into<BigInt>) -> Result<Self, Error> {
        Self::new(currency, Fraction::from_integer(raw_amount))
    }

    pub fn from_fractional_amount(
        currency: Currency,
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self, Error> {
        Self::new(currency, Fraction::new(numerator, denominator)?)
    }

    pub fn from_u256(currency: Currency, raw_amount: U256) -> Result<Self, Error> {
        Self::from_raw_amount(currency, u256_to_big_int(raw_amount))
    }

    fn new(currency: Currency, fraction: Fraction) -> Result<Self, Error> {
        if fraction.quotient() > u256_to_big_int(U256::MAX) {
            return Err(CurrencyError::AmountExceedsMax.into());
        }
        Ok(Self { currency, fraction })
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn as_fraction(&self) -> &Fraction {
        &self.fraction
    }

    pub fn numerator(&self) -> &BigInt {
        self.fraction.numerator()
    }

    pub fn denominator(&self) -> &BigInt {
        self.fraction.denominator()
    }

    pub fn quotient(&self) -> BigInt {
        self.fraction.quotient()
    }

    /// Integer part as a `U256`, failing for negative amounts.
    pub fn quotient_u256(&self) -> Result<U256, Error> {
        Ok(big_int_to_u256(&self.quotient())?)
    }

    pub fn decimal_scale(&self) -> BigInt {
        pow10(self.currency.decimals() as u32)
    }

    pub fn add(&self, other: &CurrencyAmount) -> Result<Self, Error> {
        self.ensure_same_currency(other)?;
        Self::new(self.currency.clone(), self.fraction.add(&other.fraction))
    }

    pub fn subtract(&self, other: &CurrencyAmount) -> Result<Self, Error> {
        self.ensure_same_currency(other)?;
        Self::new(self.currency.clone(), self.fraction.subtract(&other.fraction))
    }

    pub fn multiply(&self, other: &Fraction) -> Result<Self, Error> {
        Self::new(self.currency.clone(), self.fraction.multiply(other))
    }

    pub fn divide(&self, other: &Fraction) -> Result<Self, Error> {
        Self::new(self.currency.clone(), self.fraction.divide(other)?)
    }

    /// Compares raw values only; the currencies are not checked, so a native
    /// amount and its wrapped twin compare by value.
    pub fn less_than(&self, other: &CurrencyAmount) -> bool {
        self.fraction.less_than(&other.fraction)
    }

    /// Value equality, currencies ignored as in [`CurrencyAmount::less_than`].
    pub fn equal_to(&self, other: &CurrencyAmount) -> bool {
        self.fraction.equal_to(&other.fraction)
    }

    /// Value comparison, currencies ignored as in [`CurrencyAmount::less_than`].
    pub fn greater_than(&self, other: &CurrencyAmount) -> bool {
        self.fraction.greater_than(&other.fraction)
    }

    fn ensure_same_currency(&self, other: &CurrencyAmount) -> Result<(), Error> {
        if self.currency != other.currency {
            return Err(CurrencyError::CurrencyMismatch.into());
        }
        Ok(())
    }

    fn in_whole_units(&self) -> Result<Fraction, Error> {
        self.fraction
            .divide(&Fraction::from_integer(self.decimal_scale()))
    }

    pub fn to_significant(&self, significant_digits: u32, rounding: Rounding) -> Result<String, Error> {
        self.in_whole_units()?
            .to_significant(significant_digits, rounding)
    }

    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> Result<String, Error> {
        if decimal_places > self.currency.decimals() as u32 {
            return Err(CurrencyError::TooManyDecimals(decimal_places as u8).into());
        }
        Ok(self.in_whole_units()?.to_fixed(decimal_places, rounding))
    }

    /// The integer amount in whole units with every significant decimal kept.
    pub fn to_exact(&self) -> String {
        trim_fraction_zeros(format_scaled(
            &self.quotient(),
            self.currency.decimals() as u32,
        ))
    }

    /// Re-denominates a native amount in its wrapped token.
    pub fn wrapped(&self) -> CurrencyAmount {
        match &self.currency {
            Currency::Token(_) => self.clone(),
            Currency::Native(native) => Self {
                currency: Currency::Token(native.wrapped.clone()),
                fraction: self.fraction.clone(),
            },
        }
    }

    /// Same value in another (equivalent) currency.
    pub(crate) fn with_currency(&self, currency: Currency) -> CurrencyAmount {
        Self {
            currency,
            fraction: self.fraction.clone(),
        }
    }
}
