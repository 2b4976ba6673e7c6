use crate::currency::Currency;
use crate::error::{Error, MathError, StateError};
use crate::fractions::Price;
use crate::math::tick_math::{get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, MAX_TICK, MIN_TICK};
use crate::math::{big_uint_to_u256, u256_to_big_int};
use crate::Q192;
use alloy_primitives::U256;
use num_bigint::BigInt;
use num_traits::Zero;

/// `floor(sqrt(amount1 / amount0) * 2^96)`, the sqrt price of a reserve ratio.
pub fn encode_sqrt_ratio_x96(amount1: BigInt, amount0: BigInt) -> Result<U256, Error> {
    if amount0.is_zero() {
        return Err(MathError::DivisionByZero.into());
    }
    let ratio_x192: BigInt = (amount1 << 192usize) / amount0;
    let ratio_x192 = ratio_x192.to_biguint().ok_or(MathError::Negative)?;
    Ok(big_uint_to_u256(&ratio_x192.sqrt())?)
}

/// Price of `base` in `quote` at `tick`.
pub fn tick_to_price(base: Currency, quote: Currency, tick: i32) -> Result<Price, Error> {
    let sqrt_ratio_x96 = u256_to_big_int(get_sqrt_ratio_at_tick(tick)?);
    let ratio_x192 = &sqrt_ratio_x96 * &sqrt_ratio_x96;
    let q192 = u256_to_big_int(Q192);
    if base.sorts_before(&quote)? {
        Price::new(base, quote, q192, ratio_x192)
    } else {
        Price::new(base, quote, ratio_x192, q192)
    }
}

/// The tick whose price is closest to, and not above, `price` (for sorted
/// currencies; mirrored otherwise).
pub fn price_to_closest_tick(price: &Price) -> Result<i32, Error> {
    let sorted = price.base_currency().sorts_before(price.quote_currency())?;
    let sqrt_ratio_x96 = if sorted {
        encode_sqrt_ratio_x96(price.numerator().clone(), price.denominator().clone())?
    } else {
        encode_sqrt_ratio_x96(price.denominator().clone(), price.numerator().clone())?
    };

    let tick = get_tick_at_sqrt_ratio(sqrt_ratio_x96)?;
    let next_tick_price = tick_to_price(
        price.base_currency().clone(),
        price.quote_currency().clone(),
        tick + 1,
    )?;
    let bump = if sorted {
        !price.less_than(&next_tick_price)
    } else {
        !price.greater_than(&next_tick_price)
    };
    Ok(if bump { tick + 1 } else { tick })
}

/// Rounds `tick` to the nearest multiple of `tick_spacing`, halves rounding
/// up, keeping the result inside `[MIN_TICK, MAX_TICK]`.
pub fn nearest_usable_tick(tick: i32, tick_spacing: i32) -> Result<i32, Error> {
    if tick_spacing <= 0 {
        return Err(StateError::TickSpacing.into());
    }
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(StateError::TickOutOfBounds.into());
    }
    let (tick, spacing) = (tick as i64, tick_spacing as i64);
    let rounded = (2 * tick + spacing).div_euclid(2 * spacing) * spacing;
    let rounded = if rounded < MIN_TICK as i64 {
        rounded + spacing
    } else if rounded > MAX_TICK as i64 {
        rounded - spacing
    } else {
        rounded
    };
    Ok(rounded as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::tests::token;
    use crate::fractions::Rounding;
    use crate::Q96;

    fn enc(amount1: u64, amount0: u64) -> U256 {
        encode_sqrt_ratio_x96(amount1.into(), amount0.into()).unwrap()
    }

    #[test]
    fn encode_sqrt_ratio() {
        assert_eq!(enc(1, 1), Q96);
        assert_eq!(enc(100, 1), U256::from(792281625142643375935439503360u128));
        assert_eq!(enc(1, 100), U256::from(7922816251426433759354395033u128));
        assert_eq!(enc(111, 333), U256::from(45742400955009932534161870629u128));
        assert_eq!(enc(333, 111), U256::from(137227202865029797602485611888u128));
        assert!(encode_sqrt_ratio_x96(1.into(), 0.into()).is_err());
        assert!(encode_sqrt_ratio_x96((-1).into(), 1.into()).is_err());
    }

    #[test]
    fn tick_to_price_both_orders() {
        let t0 = Currency::Token(token(1, 18));
        let t1 = Currency::Token(token(2, 18));
        let p = tick_to_price(t1.clone(), t0.clone(), -74959).unwrap();
        assert_eq!(p.to_significant(5, Rounding::RoundHalfUp).unwrap(), "1800");
        let p = tick_to_price(t0, t1, -74959).unwrap();
        assert_eq!(p.to_significant(5, Rounding::RoundHalfUp).unwrap(), "0.00055556");
    }

    #[test]
    fn tick_to_price_mixed_decimals() {
        let t0 = Currency::Token(token(1, 18));
        let t6 = Currency::Token(token(3, 6));
        let p = tick_to_price(t0.clone(), t6.clone(), -276225).unwrap();
        assert_eq!(p.to_significant(5, Rounding::RoundHalfUp).unwrap(), "1.01");
        let p = tick_to_price(t6, t0, -276225).unwrap();
        assert_eq!(p.to_significant(5, Rounding::RoundHalfUp).unwrap(), "0.99015");
    }

    #[test]
    fn closest_tick_from_price() {
        let t0 = Currency::Token(token(1, 18));
        let t1 = Currency::Token(token(2, 18));
        let p = Price::new(t1.clone(), t0.clone(), 1, 1800).unwrap();
        assert_eq!(price_to_closest_tick(&p).unwrap(), -74960);
        let p = Price::new(t0.clone(), t1.clone(), 1800, 1).unwrap();
        assert_eq!(price_to_closest_tick(&p).unwrap(), -74960);

        for tick in [-74959, -1, 0, 1, 12345, 276225] {
            let forward = tick_to_price(t0.clone(), t1.clone(), tick).unwrap();
            assert_eq!(price_to_closest_tick(&forward).unwrap(), tick);
            let backward = tick_to_price(t1.clone(), t0.clone(), tick).unwrap();
            assert_eq!(price_to_closest_tick(&backward).unwrap(), tick);
        }
    }

    #[test]
    fn usable_tick_rounding() {
        assert_eq!(nearest_usable_tick(5, 10).unwrap(), 10);
        assert_eq!(nearest_usable_tick(4, 10).unwrap(), 0);
        assert_eq!(nearest_usable_tick(-5, 10).unwrap(), 0);
        assert_eq!(nearest_usable_tick(-6, 10).unwrap(), -10);
        assert_eq!(nearest_usable_tick(10, 1).unwrap(), 10);

        let spacing = MAX_TICK / 2 + 100;
        assert_eq!(nearest_usable_tick(MIN_TICK, spacing).unwrap(), -spacing);
        assert_eq!(nearest_usable_tick(MAX_TICK, spacing).unwrap(), spacing);
    }

    #[test]
    fn usable_tick_rejects_bad_input() {
        assert!(nearest_usable_tick(0, 0).is_err());
        assert!(nearest_usable_tick(MAX_TICK + 1, 1).is_err());
        assert!(nearest_usable_tick(MIN_TICK - 1, 1).is_err());
    }
}
