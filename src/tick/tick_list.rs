//! Queries over a sorted slice of initialized ticks.
//!
//! Every function assumes the slice passed [`validate_list`].

use super::Tick;
use crate::error::{Error, MathError, TickListError};

/// Tick spacing is positive, every index is aligned to it, net liquidity
/// sums to zero and indices are strictly increasing.
pub fn validate_list(ticks: &[Tick], tick_spacing: i32) -> Result<(), Error> {
    if tick_spacing <= 0 {
        return Err(TickListError::ZeroTickSpacing.into());
    }
    if let Some(tick) = ticks.iter().find(|t| t.index % tick_spacing != 0) {
        return Err(TickListError::NotAligned(tick.index).into());
    }

    let mut net: i128 = 0;
    for tick in ticks {
        net = net
            .checked_add(tick.liquidity_net)
            .ok_or(MathError::Overflow)?;
    }
    if net != 0 {
        return Err(TickListError::NonZeroNet.into());
    }

    if ticks.windows(2).any(|pair| pair[0].index >= pair[1].index) {
        return Err(TickListError::NotSorted.into());
    }
    Ok(())
}

/// An empty list counts as below-smallest for every tick.
pub fn is_below_smallest(ticks: &[Tick], tick: i32) -> bool {
    ticks.first().map_or(true, |first| tick < first.index)
}

/// An empty list counts as at-or-above-largest for every tick.
pub fn is_at_or_above_largest(ticks: &[Tick], tick: i32) -> bool {
    ticks.last().map_or(true, |last| tick >= last.index)
}

pub fn get_tick(ticks: &[Tick], index: i32) -> Result<&Tick, Error> {
    ticks
        .binary_search_by_key(&index, |t| t.index)
        .map(|i| &ticks[i])
        .map_err(|_| TickListError::NotFound(index).into())
}

/// Position of the largest tick whose index is `<= tick`.
fn binary_search(ticks: &[Tick], tick: i32) -> Result<usize, Error> {
    match ticks.partition_point(|t| t.index <= tick) {
        0 => Err(TickListError::BelowSmallest.into()),
        n => Ok(n - 1),
    }
}

/// The nearest initialized tick at or left of `tick` (`lte`), or strictly
/// right of it.
pub fn next_initialized_tick(ticks: &[Tick], tick: i32, lte: bool) -> Result<&Tick, Error> {
    if lte {
        if is_below_smallest(ticks, tick) {
            return Err(TickListError::BelowSmallest.into());
        }
        if is_at_or_above_largest(ticks, tick) {
            return ticks.last().ok_or_else(|| TickListError::BelowSmallest.into());
        }
        Ok(&ticks[binary_search(ticks, tick)?])
    } else {
        if is_at_or_above_largest(ticks, tick) {
            return Err(TickListError::AtOrAboveLargest.into());
        }
        if is_below_smallest(ticks, tick) {
            return ticks.first().ok_or_else(|| TickListError::AtOrAboveLargest.into());
        }
        Ok(&ticks[binary_search(ticks, tick)? + 1])
    }
}

/// Next initialized tick bounded by the 256-tick word that holds
/// `tick / tick_spacing`; returns the word edge and `false` when the word has
/// no initialized tick on the requested side.
pub fn next_initialized_tick_within_one_word(
    ticks: &[Tick],
    tick: i32,
    lte: bool,
    tick_spacing: i32,
) -> Result<(i32, bool), Error> {
    if tick_spacing <= 0 {
        return Err(TickListError::ZeroTickSpacing.into());
    }
    let compressed = tick.div_euclid(tick_spacing);

    if lte {
        let word_pos = compressed >> 8;
        let minimum = (word_pos << 8) * tick_spacing;
        if is_below_smallest(ticks, tick) {
            return Ok((minimum, false));
        }
        let index = next_initialized_tick(ticks, tick, true)?.index;
        let next = minimum.max(index);
        Ok((next, next == index))
    } else {
        let word_pos = (compressed + 1) >> 8;
        let maximum = (((word_pos + 1) << 8) - 1) * tick_spacing;
        if is_at_or_above_largest(ticks, tick) {
            return Ok((maximum, false));
        }
        let index = next_initialized_tick(ticks, tick, false)?.index;
        let next = maximum.min(index);
        Ok((next, next == index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::tick_math::{MAX_TICK, MIN_TICK};

    fn tick(index: i32, gross: u128, net: i128) -> Tick {
        Tick::new(index, gross, net).unwrap()
    }

    fn low_mid_high() -> Vec<Tick> {
        vec![
            tick(MIN_TICK + 1, 10, 10),
            tick(0, 5, -5),
            tick(MAX_TICK - 1, 5, -5),
        ]
    }

    #[test]
    fn validation_failures() {
        let ticks = low_mid_high();
        let (low, mid, high) = (ticks[0], ticks[1], ticks[2]);
        assert!(matches!(
            validate_list(&[low], 1),
            Err(Error::TickListError(TickListError::NonZeroNet))
        ));
        assert!(matches!(
            validate_list(&[high, low, mid], 1),
            Err(Error::TickListError(TickListError::NotSorted))
        ));
        assert!(matches!(
            validate_list(&[tick(-1, 1, 1), tick(2, 1, -1)], 2),
            Err(Error::TickListError(TickListError::NotAligned(-1)))
        ));
        assert!(matches!(
            validate_list(&[], 0),
            Err(Error::TickListError(TickListError::ZeroTickSpacing))
        ));
        // duplicates are not strictly sorted
        assert!(validate_list(&[tick(0, 1, 1), tick(0, 1, -1)], 1).is_err());
        assert!(validate_list(&low_mid_high(), 1).is_ok());
        assert!(validate_list(&[], 60).is_ok());
    }

    #[test]
    fn smallest_and_largest() {
        let ticks = low_mid_high();
        assert!(is_below_smallest(&ticks, MIN_TICK));
        assert!(!is_below_smallest(&ticks, MIN_TICK + 1));
        assert!(is_at_or_above_largest(&ticks, MAX_TICK - 1));
        assert!(!is_at_or_above_largest(&ticks, MAX_TICK - 2));
    }

    #[test]
    fn get_tick_exact_match_only() {
        let ticks = low_mid_high();
        assert_eq!(get_tick(&ticks, 0).unwrap().liquidity_net, -5);
        assert!(matches!(
            get_tick(&ticks, 1),
            Err(Error::TickListError(TickListError::NotFound(1)))
        ));
    }

    #[test]
    fn next_initialized_tick_lte() {
        let ticks = low_mid_high();
        assert!(matches!(
            next_initialized_tick(&ticks, MIN_TICK, true),
            Err(Error::TickListError(TickListError::BelowSmallest))
        ));
        assert_eq!(next_initialized_tick(&ticks, MIN_TICK + 1, true).unwrap().index, MIN_TICK + 1);
        assert_eq!(next_initialized_tick(&ticks, MIN_TICK + 2, true).unwrap().index, MIN_TICK + 1);
        assert_eq!(next_initialized_tick(&ticks, 0, true).unwrap().index, 0);
        assert_eq!(next_initialized_tick(&ticks, 1, true).unwrap().index, 0);
        assert_eq!(next_initialized_tick(&ticks, MAX_TICK - 1, true).unwrap().index, MAX_TICK - 1);
        assert_eq!(next_initialized_tick(&ticks, MAX_TICK, true).unwrap().index, MAX_TICK - 1);
    }

    #[test]
    fn next_initialized_tick_gt() {
        let ticks = low_mid_high();
        assert_eq!(next_initialized_tick(&ticks, MIN_TICK, false).unwrap().index, MIN_TICK + 1);
        assert_eq!(next_initialized_tick(&ticks, MIN_TICK + 1, false).unwrap().index, 0);
        assert_eq!(next_initialized_tick(&ticks, -1, false).unwrap().index, 0);
        assert_eq!(next_initialized_tick(&ticks, 1, false).unwrap().index, MAX_TICK - 1);
        assert_eq!(next_initialized_tick(&ticks, MAX_TICK - 2, false).unwrap().index, MAX_TICK - 1);
        assert!(matches!(
            next_initialized_tick(&ticks, MAX_TICK - 1, false),
            Err(Error::TickListError(TickListError::AtOrAboveLargest))
        ));
    }

    #[test]
    fn within_one_word_around_zero_lte() {
        let ticks = low_mid_high();
        let cases = [
            (-257, (-512, false)),
            (-256, (-256, false)),
            (-1, (-256, false)),
            (0, (0, true)),
            (1, (0, true)),
            (255, (0, true)),
            (256, (256, false)),
            (257, (256, false)),
        ];
        for (tick, expected) in cases {
            assert_eq!(
                next_initialized_tick_within_one_word(&ticks, tick, true, 1).unwrap(),
                expected,
                "tick {tick}"
            );
        }
    }

    #[test]
    fn within_one_word_around_zero_gt() {
        let ticks = low_mid_high();
        let cases = [
            (-258, (-257, false)),
            (-257, (-1, false)),
            (-256, (-1, false)),
            (-2, (-1, false)),
            (-1, (0, true)),
            (0, (255, false)),
            (1, (255, false)),
            (254, (255, false)),
            (255, (511, false)),
            (256, (511, false)),
        ];
        for (tick, expected) in cases {
            assert_eq!(
                next_initialized_tick_within_one_word(&ticks, tick, false, 1).unwrap(),
                expected,
                "tick {tick}"
            );
        }
    }

    #[test]
    fn within_one_word_scales_with_spacing() {
        let ticks = vec![tick(0, 0, 0), tick(511, 0, 0)];
        assert_eq!(next_initialized_tick_within_one_word(&ticks, 0, false, 1).unwrap(), (255, false));
        assert_eq!(next_initialized_tick_within_one_word(&ticks, 0, false, 2).unwrap(), (510, false));
    }

    #[test]
    fn empty_list_stops_at_word_edges() {
        assert_eq!(next_initialized_tick_within_one_word(&[], 0, true, 60).unwrap(), (0, false));
        assert_eq!(next_initialized_tick_within_one_word(&[], 0, false, 60).unwrap(), (15300, false));
        assert_eq!(next_initialized_tick_within_one_word(&[], -1, true, 60).unwrap(), (-15360, false));
    }
}
