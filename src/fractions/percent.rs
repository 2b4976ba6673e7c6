use super::{Fraction, Rounding};
use crate::error::Error;
use num_bigint::BigInt;

/// A fraction displayed as a percentage.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percent(Fraction);

impl Percent {
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Result<Self, Error> {
        Ok(Self(Fraction::new(numerator, denominator)?))
    }

    pub fn zero() -> Self {
        Self(Fraction::from_integer(0))
    }

    pub fn one() -> Self {
        Self(Fraction::from_integer(1))
    }

    pub fn as_fraction(&self) -> &Fraction {
        &self.0
    }

    pub fn add(&self, other: &Percent) -> Percent {
        Self(self.0.add(&other.0))
    }

    pub fn subtract(&self, other: &Percent) -> Percent {
        Self(self.0.subtract(&other.0))
    }

    pub fn multiply(&self, other: &Percent) -> Percent {
        Self(self.0.multiply(&other.0))
    }

    pub fn divide(&self, other: &Percent) -> Result<Percent, Error> {
        Ok(Self(self.0.divide(&other.0)?))
    }

    pub fn is_negative(&self) -> bool {
        self.0.less_than(&Fraction::from_integer(0))
    }

    pub fn to_significant(&self, significant_digits: u32, rounding: Rounding) -> Result<String, Error> {
        self.0
            .multiply(&Fraction::from_integer(100))
            .to_significant(significant_digits, rounding)
    }

    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> String {
        self.0
            .multiply(&Fraction::from_integer(100))
            .to_fixed(decimal_places, rounding)
    }
}

impl From<Fraction> for Percent {
    fn from(fraction: Fraction) -> Self {
        Self(fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(n: i64, d: i64) -> Percent {
        Percent::new(n, d).unwrap()
    }

    #[test]
    fn arithmetic_stays_percent() {
        assert_eq!(p(1, 100).add(&p(2, 100)), p(3, 100));
        assert_eq!(p(1, 25).add(&p(2, 100)), p(150, 2500));
        assert_eq!(p(1, 100).subtract(&p(2, 100)), p(-1, 100));
        assert_eq!(p(1, 100).multiply(&p(2, 100)), p(2, 10000));
        assert_eq!(p(1, 100).divide(&p(2, 100)).unwrap(), p(100, 200));
    }

    #[test]
    fn renders_scaled_by_one_hundred() {
        assert_eq!(p(154, 10_000).to_significant(3, Rounding::RoundHalfUp).unwrap(), "1.54");
        assert_eq!(p(154, 10_000).to_fixed(2, Rounding::RoundHalfUp), "1.54");
        assert_eq!(p(1, 3).to_fixed(1, Rounding::RoundDown), "33.3");
    }

    #[test]
    fn sign_checks() {
        assert!(p(-1, 100).is_negative());
        assert!(!Percent::zero().is_negative());
    }
}
