use super::fraction::pow10;
use super::{CurrencyAmount, Fraction, Rounding};
use crate::currency::Currency;
use crate::error::{CurrencyError, Error};
use num_bigint::BigInt;

/// Units of `quote_currency` per unit of `base_currency`, in raw amounts.
///
/// `scalar` converts the raw ratio into a human ratio by adjusting for the
/// two currencies' decimals.
#[derive(Clone, Debug)]
pub struct Price {
    base_currency: Currency,
    quote_currency: Currency,
    fraction: Fraction,
    scalar: Fraction,
}

impl Price {
    pub fn new(
        base_currency: Currency,
        quote_currency: Currency,
        denominator: impl Into<BigInt>,
        numerator: impl Into<BigInt>,
    ) -> Result<Self, Error> {
        let fraction = Fraction::new(numerator, denominator)?;
        let scalar = Fraction::new(
            pow10(base_currency.decimals() as u32),
            pow10(quote_currency.decimals() as u32),
        )?;
        Ok(Self {
            base_currency,
            quote_currency,
            fraction,
            scalar,
        })
    }

    /// The price implied by exchanging `base_amount` for `quote_amount`.
    pub fn from_amounts(
        base_amount: &CurrencyAmount,
        quote_amount: &CurrencyAmount,
    ) -> Result<Self, Error> {
        let ratio = quote_amount.as_fraction().divide(base_amount.as_fraction())?;
        Price::new(
            base_amount.currency().clone(),
            quote_amount.currency().clone(),
            ratio.denominator().clone(),
            ratio.numerator().clone(),
        )
    }

    pub fn base_currency(&self) -> &Currency {
        &self.base_currency
    }

    pub fn quote_currency(&self) -> &Currency {
        &self.quote_currency
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

    pub fn invert(&self) -> Result<Price, Error> {
        Price::new(
            self.quote_currency.clone(),
            self.base_currency.clone(),
            self.fraction.numerator().clone(),
            self.fraction.denominator().clone(),
        )
    }

    /// Chains `self` (A in B) with `other` (B in C) into A in C.
    pub fn multiply(&self, other: &Price) -> Result<Price, Error> {
        if self.quote_currency != other.base_currency {
            return Err(CurrencyError::CurrencyMismatch.into());
        }
        let fraction = self.fraction.multiply(&other.fraction);
        Price::new(
            self.base_currency.clone(),
            other.quote_currency.clone(),
            fraction.denominator().clone(),
            fraction.numerator().clone(),
        )
    }

    /// Converts an amount of the base currency into the quote currency.
    pub fn quote(&self, base_amount: &CurrencyAmount) -> Result<CurrencyAmount, Error> {
        if base_amount.currency() != &self.base_currency {
            return Err(CurrencyError::CurrencyMismatch.into());
        }
        let result = self.fraction.multiply(base_amount.as_fraction());
        CurrencyAmount::from_fractional_amount(
            self.quote_currency.clone(),
            result.numerator().clone(),
            result.denominator().clone(),
        )
    }

    pub fn adjusted_for_decimals(&self) -> Fraction {
        self.fraction.multiply(&self.scalar)
    }

    pub fn to_significant(&self, significant_digits: u32, rounding: Rounding) -> Result<String, Error> {
        self.adjusted_for_decimals()
            .to_significant(significant_digits, rounding)
    }

    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> String {
        self.adjusted_for_decimals()
            .to_fixed(decimal_places, rounding)
    }

    pub fn less_than(&self, other: &Price) -> bool {
        self.fraction.less_than(&other.fraction)
    }

    pub fn equal_to(&self, other: &Price) -> bool {
        self.fraction.equal_to(&other.fraction)
    }

    pub fn greater_than(&self, other: &Price) -> bool {
        self.fraction.greater_than(&other.fraction)
    }
}
