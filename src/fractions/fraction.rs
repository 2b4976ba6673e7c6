use crate::error::{Error, MathError};
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;

/// Rounding applied when a rational is rendered as a decimal string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rounding {
    /// Toward zero.
    RoundDown,
    /// Nearest, ties away from zero.
    #[default]
    RoundHalfUp,
    /// Away from zero.
    RoundUp,
}

/// An arbitrary-precision rational, not necessarily reduced.
///
/// The denominator is kept positive so comparisons can cross-multiply.
#[derive(Clone, Debug)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl Fraction {
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Result<Self, Error> {
        let (numerator, denominator) = (numerator.into(), denominator.into());
        if denominator.is_zero() {
            return Err(MathError::DivisionByZero.into());
        }
        if denominator.is_negative() {
            return Ok(Self {
                numerator: -numerator,
                denominator: -denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            numerator: value.into(),
            denominator: BigInt::one(),
        }
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// Integer part, truncated toward zero.
    pub fn quotient(&self) -> BigInt {
        &self.numerator / &self.denominator
    }

    /// What is left after removing the quotient, over the same denominator.
    pub fn remainder(&self) -> Fraction {
        Self {
            numerator: &self.numerator % &self.denominator,
            denominator: self.denominator.clone(),
        }
    }

    pub fn invert(&self) -> Result<Fraction, Error> {
        Fraction::new(self.denominator.clone(), self.numerator.clone())
    }

    pub fn add(&self, other: &Fraction) -> Fraction {
        if self.denominator == other.denominator {
            return Self {
                numerator: &self.numerator + &other.numerator,
                denominator: self.denominator.clone(),
            };
        }
        Self {
            numerator: &self.numerator * &other.denominator + &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    pub fn subtract(&self, other: &Fraction) -> Fraction {
        if self.denominator == other.denominator {
            return Self {
                numerator: &self.numerator - &other.numerator,
                denominator: self.denominator.clone(),
            };
        }
        Self {
            numerator: &self.numerator * &other.denominator - &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    pub fn multiply(&self, other: &Fraction) -> Fraction {
        Self {
            numerator: &self.numerator * &other.numerator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    /// Fails when `other` is zero.
    pub fn divide(&self, other: &Fraction) -> Result<Fraction, Error> {
        Fraction::new(
            &self.numerator * &other.denominator,
            &self.denominator * &other.numerator,
        )
    }

    pub fn less_than(&self, other: &Fraction) -> bool {
        self.cmp(other) == Ordering::Less
    }

    pub fn equal_to(&self, other: &Fraction) -> bool {
        self.cmp(other) == Ordering::Equal
    }

    pub fn greater_than(&self, other: &Fraction) -> bool {
        self.cmp(other) == Ordering::Greater
    }

    /// Renders with `significant_digits` significant digits, trailing zeros dropped.
    pub fn to_significant(
        &self,
        significant_digits: u32,
        rounding: Rounding,
    ) -> Result<String, Error> {
        if significant_digits == 0 {
            return Err(MathError::ZeroValue.into());
        }
        if self.numerator.is_zero() {
            return Ok("0".to_string());
        }

        let exponent = decimal_exponent(&self.numerator.abs(), &self.denominator);
        let shift = significant_digits as i64 - 1 - exponent;
        let rendered = if shift >= 0 {
            let scaled = round_div(
                &(&self.numerator * pow10(shift as u32)),
                &self.denominator,
                rounding,
            );
            format_scaled(&scaled, shift as u32)
        } else {
            let factor = pow10((-shift) as u32);
            let scaled = round_div(&self.numerator, &(&self.denominator * &factor), rounding);
            (scaled * factor).to_string()
        };
        Ok(trim_fraction_zeros(rendered))
    }

    /// Renders with exactly `decimal_places` digits after the point.
    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> String {
        let scaled = round_div(
            &(&self.numerator * pow10(decimal_places)),
            &self.denominator,
            rounding,
        );
        format_scaled(&scaled, decimal_places)
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl From<BigInt> for Fraction {
    fn from(value: BigInt) -> Self {
        Fraction::from_integer(value)
    }
}

pub(crate) fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u8).pow(exp)
}

/// `n / d` rounded per `rounding`; `d` must be positive.
fn round_div(n: &BigInt, d: &BigInt, rounding: Rounding) -> BigInt {
    let (q, r) = n.div_rem(d);
    if r.is_zero() {
        return q;
    }
    let away = match n.sign() {
        Sign::Minus => -BigInt::one(),
        _ => BigInt::one(),
    };
    match rounding {
        Rounding::RoundDown => q,
        Rounding::RoundUp => q + away,
        Rounding::RoundHalfUp => {
            if r.abs() * 2u8 >= *d {
                q + away
            } else {
                q
            }
        }
    }
}

/// Largest `e` with `10^e <= a / d`, for positive `a` and `d`.
fn decimal_exponent(a: &BigInt, d: &BigInt) -> i64 {
    let integer = a / d;
    if !integer.is_zero() {
        return integer.to_string().len() as i64 - 1;
    }
    let mut k: i64 = 0;
    let mut scaled = a.clone();
    while &scaled < d {
        scaled *= 10u8;
        k += 1;
    }
    -k
}

/// Inserts a decimal point `places` digits from the right of `scaled`.
pub(crate) fn format_scaled(scaled: &BigInt, places: u32) -> String {
    let sign = if scaled.is_negative() { "-" } else { "" };
    let digits = scaled.abs().to_string();
    if places == 0 {
        return format!("{sign}{digits}");
    }
    let places = places as usize;
    let padded = format!("{digits:0>width$}", width = places + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - places);
    format!("{sign}{int_part}.{frac_part}")
}

pub(crate) fn trim_fraction_zeros(rendered: String) -> String {
    if !rendered.contains('.') {
        return rendered;
    }
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    #[test]
    fn rejects_zero_denominator() {
        assert!(matches!(
            Fraction::new(1, 0),
            Err(Error::MathError(MathError::DivisionByZero))
        ));
        assert!(f(0, 5).invert().is_err());
        assert!(f(1, 5).divide(&f(0, 3)).is_err());
    }

    #[test]
    fn quotient_truncates_toward_zero() {
        assert_eq!(f(8, 3).quotient(), BigInt::from(2));
        assert_eq!(f(12, 4).quotient(), BigInt::from(3));
        assert_eq!(f(16, 5).quotient(), BigInt::from(3));
        assert_eq!(f(-8, 3).quotient(), BigInt::from(-2));
    }

    #[test]
    fn remainder_keeps_denominator() {
        let r = f(8, 3).remainder();
        assert_eq!((r.numerator(), r.denominator()), (&BigInt::from(2), &BigInt::from(3)));
        assert_eq!(f(12, 4).remainder().numerator(), &BigInt::from(0));
    }

    #[test]
    fn arithmetic_is_exact_and_unreduced() {
        let sum = f(1, 10).add(&f(4, 12));
        assert_eq!((sum.numerator(), sum.denominator()), (&BigInt::from(52), &BigInt::from(120)));
        let same_den = f(1, 5).add(&f(2, 5));
        assert_eq!(same_den.numerator(), &BigInt::from(3));
        let diff = f(1, 10).subtract(&f(4, 12));
        assert_eq!(diff.numerator(), &BigInt::from(-28));
        let prod = f(1, 10).multiply(&f(4, 12));
        assert_eq!((prod.numerator(), prod.denominator()), (&BigInt::from(4), &BigInt::from(120)));
        let quot = f(1, 10).divide(&f(4, 12)).unwrap();
        assert_eq!((quot.numerator(), quot.denominator()), (&BigInt::from(12), &BigInt::from(40)));
    }

    #[test]
    fn comparisons_cross_multiply() {
        assert!(f(1, 10).less_than(&f(4, 12)));
        assert!(f(1, 3).equal_to(&f(4, 12)));
        assert!(f(5, 12).greater_than(&f(4, 12)));
        assert_eq!(f(1, -2), f(-1, 2));
        assert!(f(1, -2).less_than(&f(0, 1)));
    }

    #[test]
    fn to_significant_rounds() {
        assert_eq!(f(1, 3).to_significant(5, Rounding::RoundHalfUp).unwrap(), "0.33333");
        assert_eq!(f(2, 3).to_significant(3, Rounding::RoundHalfUp).unwrap(), "0.667");
        assert_eq!(f(2, 3).to_significant(3, Rounding::RoundDown).unwrap(), "0.666");
        assert_eq!(f(1, 3).to_significant(2, Rounding::RoundUp).unwrap(), "0.34");
        assert_eq!(f(123456, 1).to_significant(2, Rounding::RoundHalfUp).unwrap(), "120000");
        assert_eq!(f(5, 2).to_significant(6, Rounding::RoundHalfUp).unwrap(), "2.5");
        assert_eq!(f(999, 1000).to_significant(2, Rounding::RoundHalfUp).unwrap(), "1");
        assert_eq!(f(0, 7).to_significant(4, Rounding::RoundHalfUp).unwrap(), "0");
        assert!(f(1, 3).to_significant(0, Rounding::RoundHalfUp).is_err());
    }

    #[test]
    fn to_fixed_pads_and_rounds() {
        assert_eq!(f(1, 3).to_fixed(2, Rounding::RoundHalfUp), "0.33");
        assert_eq!(f(2, 3).to_fixed(2, Rounding::RoundHalfUp), "0.67");
        assert_eq!(f(2, 3).to_fixed(2, Rounding::RoundDown), "0.66");
        assert_eq!(f(5, 1).to_fixed(3, Rounding::RoundHalfUp), "5.000");
        assert_eq!(f(-7, 4).to_fixed(1, Rounding::RoundHalfUp), "-1.8");
        assert_eq!(f(7, 4).to_fixed(0, Rounding::RoundDown), "1");
        assert_eq!(f(1, 200).to_fixed(4, Rounding::RoundHalfUp), "0.0050");
    }
}
