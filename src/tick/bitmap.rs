//! The on-chain tick layout: one bit per compressed tick, 256 per word.

use super::{tick_list, Tick, TickDataProvider};
use crate::error::{Error, StateError, TickListError};
use crate::math::bit_math::{least_significant_bit, most_significant_bit};
use crate::{FastMap, U256_1};
use alloy_primitives::U256;
use futures::future::ready;
use std::future::Future;

/// Word index and bit position of a compressed tick.
pub fn position(compressed: i32) -> (i16, u8) {
    ((compressed >> 8) as i16, compressed.rem_euclid(256) as u8)
}

pub fn get_word(bitmap: &FastMap<i16, U256>, word_pos: i16) -> U256 {
    bitmap.get(&word_pos).copied().unwrap_or(U256::ZERO)
}

/// Toggles the initialized bit of `tick`, which must be a multiple of `tick_spacing`.
pub fn flip_tick(
    bitmap: &mut FastMap<i16, U256>,
    tick: i32,
    tick_spacing: i32,
) -> Result<(), Error> {
    if tick_spacing <= 0 {
        return Err(TickListError::ZeroTickSpacing.into());
    }
    if tick % tick_spacing != 0 {
        return Err(TickListError::NotAligned(tick).into());
    }
    let (word_pos, bit_pos) = position(tick / tick_spacing);
    *bitmap.entry(word_pos).or_insert(U256::ZERO) ^= U256_1 << bit_pos;
    Ok(())
}

/// Scans the word holding `tick` for the nearest set bit at or left of it
/// (`lte`) or strictly right of it.
///
/// Without a hit the result is the word edge and `initialized` is `false`.
pub fn next_initialized_tick_within_one_word(
    bitmap: &FastMap<i16, U256>,
    tick: i32,
    tick_spacing: i32,
    lte: bool,
) -> Result<(i32, bool), Error> {
    if tick_spacing <= 0 {
        return Err(TickListError::ZeroTickSpacing.into());
    }
    let compressed = tick.div_euclid(tick_spacing);

    if lte {
        let (word_pos, bit_pos) = position(compressed);
        // bits at or below bit_pos
        let mask = (U256_1 << bit_pos) - U256_1 + (U256_1 << bit_pos);
        let masked = get_word(bitmap, word_pos) & mask;

        let initialized = !masked.is_zero();
        let next = if initialized {
            (compressed - (bit_pos - most_significant_bit(masked)?) as i32) * tick_spacing
        } else {
            (compressed - bit_pos as i32) * tick_spacing
        };
        Ok((next, initialized))
    } else {
        let (word_pos, bit_pos) = position(compressed + 1);
        // bits at or above bit_pos
        let mask = !((U256_1 << bit_pos) - U256_1);
        let masked = get_word(bitmap, word_pos) & mask;

        let initialized = !masked.is_zero();
        let next = if initialized {
            (compressed + 1 + (least_significant_bit(masked)? - bit_pos) as i32) * tick_spacing
        } else {
            (compressed + 1 + (u8::MAX - bit_pos) as i32) * tick_spacing
        };
        Ok((next, initialized))
    }
}

/// Ticks stored as the pool contract stores them: a sparse word bitmap plus
/// per-tick liquidity.
#[derive(Clone, Debug)]
pub struct TickBitmapDataProvider {
    bitmap: FastMap<i16, U256>,
    ticks: FastMap<i32, Tick>,
    tick_spacing: i32,
}

impl TickBitmapDataProvider {
    /// Builds the bitmap from ticks in any order, under the same validation
    /// as a tick list.
    pub fn new(ticks: impl IntoIterator<Item = Tick>, tick_spacing: i32) -> Result<Self, Error> {
        let mut sorted: Vec<Tick> = ticks.into_iter().collect();
        sorted.sort_unstable_by_key(|t| t.index);
        tick_list::validate_list(&sorted, tick_spacing)?;

        let mut bitmap = FastMap::default();
        for tick in &sorted {
            flip_tick(&mut bitmap, tick.index, tick_spacing)?;
        }
        Ok(Self {
            bitmap,
            ticks: sorted.into_iter().map(|t| (t.index, t)).collect(),
            tick_spacing,
        })
    }

    pub fn word(&self, word_pos: i16) -> U256 {
        get_word(&self.bitmap, word_pos)
    }

    pub fn tick_spacing(&self) -> i32 {
        self.tick_spacing
    }
}

impl TickDataProvider for TickBitmapDataProvider {
    fn get_tick(&self, index: i32) -> impl Future<Output = Result<Tick, Error>> + Send {
        ready(
            self.ticks
                .get(&index)
                .copied()
                .ok_or_else(|| TickListError::NotFound(index).into()),
        )
    }

    fn next_initialized_tick_within_one_word(
        &self,
        tick: i32,
        lte: bool,
        tick_spacing: i32,
    ) -> impl Future<Output = Result<(i32, bool), Error>> + Send {
        let result = if tick_spacing != self.tick_spacing {
            Err(StateError::TickSpacing.into())
        } else {
            next_initialized_tick_within_one_word(&self.bitmap, tick, tick_spacing, lte)
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEST_TICKS: [i32; 9] = [-200, -55, -4, 70, 78, 84, 139, 240, 535];

    fn init_test_ticks() -> FastMap<i16, U256> {
        let mut bitmap = FastMap::default();
        for t in TEST_TICKS {
            flip_tick(&mut bitmap, t, 1).unwrap();
        }
        bitmap
    }

    fn next(bitmap: &FastMap<i16, U256>, tick: i32, lte: bool) -> (i32, bool) {
        next_initialized_tick_within_one_word(bitmap, tick, 1, lte).unwrap()
    }

    #[test]
    fn position_of_compressed_ticks() {
        assert_eq!(position(0), (0, 0));
        assert_eq!(position(255), (0, 255));
        assert_eq!(position(256), (1, 0));
        assert_eq!(position(300), (1, 44));
        assert_eq!(position(-1), (-1, 255));
        assert_eq!(position(-256), (-1, 0));
        assert_eq!(position(-257), (-2, 255));
    }

    #[test]
    fn flip_twice_clears() {
        let mut bitmap = FastMap::default();
        flip_tick(&mut bitmap, -230, 1).unwrap();
        let (word, bit) = position(-230);
        assert_eq!(get_word(&bitmap, word), U256_1 << bit);
        flip_tick(&mut bitmap, -230, 1).unwrap();
        assert_eq!(get_word(&bitmap, word), U256::ZERO);
        assert!(matches!(
            flip_tick(&mut bitmap, 7, 5),
            Err(Error::TickListError(TickListError::NotAligned(7)))
        ));
    }

    #[test]
    fn flip_rejects_non_positive_spacing() {
        let mut bitmap = FastMap::default();
        for spacing in [0, -60] {
            assert!(matches!(
                flip_tick(&mut bitmap, 10, spacing),
                Err(Error::TickListError(TickListError::ZeroTickSpacing))
            ));
        }
        assert!(bitmap.is_empty());
    }

    #[test]
    fn search_rejects_non_positive_spacing() {
        let bitmap = init_test_ticks();
        for lte in [true, false] {
            assert!(matches!(
                next_initialized_tick_within_one_word(&bitmap, 10, 0, lte),
                Err(Error::TickListError(TickListError::ZeroTickSpacing))
            ));
        }
    }

    #[test]
    fn search_right() {
        let bitmap = init_test_ticks();
        assert_eq!(next(&bitmap, 78, false), (84, true));
        assert_eq!(next(&bitmap, 77, false), (78, true));
        assert_eq!(next(&bitmap, -56, false), (-55, true));
        assert_eq!(next(&bitmap, -55, false), (-4, true));
        assert_eq!(next(&bitmap, 255, false), (511, false));
        assert_eq!(next(&bitmap, 383, false), (511, false));
    }

    #[test]
    fn search_right_into_populated_word() {
        let mut bitmap = init_test_ticks();
        flip_tick(&mut bitmap, 340, 1).unwrap();
        assert_eq!(next(&bitmap, 328, false), (340, true));
        assert_eq!(next(&bitmap, 340, false), (511, false));
    }

    #[test]
    fn search_left() {
        let bitmap = init_test_ticks();
        assert_eq!(next(&bitmap, 78, true), (78, true));
        assert_eq!(next(&bitmap, 79, true), (78, true));
        assert_eq!(next(&bitmap, -55, true), (-55, true));
        assert_eq!(next(&bitmap, -54, true), (-55, true));
        assert_eq!(next(&bitmap, 258, true), (256, false));
        assert_eq!(next(&bitmap, -257, true), (-512, false));
        assert_eq!(next(&bitmap, 1023, true), (768, false));
    }

    #[tokio::test]
    async fn provider_lookups() {
        let ticks = TEST_TICKS
            .iter()
            .enumerate()
            .map(|(i, &index)| {
                let net = if i == TEST_TICKS.len() - 1 { 0 } else if i % 2 == 0 { 5 } else { -5 };
                Tick::new(index, 5, net).unwrap()
            })
            .rev();
        let provider = TickBitmapDataProvider::new(ticks, 1).unwrap();
        assert_eq!(provider.get_tick(-55).await.unwrap().liquidity_net, -5);
        assert!(provider.get_tick(-54).await.is_err());
        assert_eq!(
            provider.next_initialized_tick_within_one_word(-56, false, 1).await.unwrap(),
            (-55, true)
        );
        assert!(matches!(
            provider.next_initialized_tick_within_one_word(0, false, 60).await,
            Err(Error::StateError(StateError::TickSpacing))
        ));
    }

    #[test]
    fn provider_validates_like_a_list() {
        let unbalanced = [Tick::new(60, 1, 1).unwrap()];
        assert!(TickBitmapDataProvider::new(unbalanced, 60).is_err());
        let dup = [Tick::new(60, 1, 1).unwrap(), Tick::new(60, 1, -1).unwrap()];
        assert!(TickBitmapDataProvider::new(dup, 60).is_err());
    }

    proptest! {
        #[test]
        fn agrees_with_sorted_list(
            compressed in proptest::collection::btree_set(-2000i32..2000, 2..40),
            spacing in prop::sample::select(vec![1i32, 10, 60, 200]),
            probe in -2_000i32..2_000,
            lte in any::<bool>(),
        ) {
            let indices: Vec<i32> = compressed.iter().map(|c| c * spacing).collect();
            let half = indices.len() / 2;
            let ticks: Vec<Tick> = indices
                .iter()
                .enumerate()
                .map(|(i, &index)| {
                    let net = if i < half { 1 } else if i < 2 * half { -1 } else { 0 };
                    Tick::new(index, 1, net).unwrap()
                })
                .collect();

            let bitmap = TickBitmapDataProvider::new(ticks.clone(), spacing).unwrap();
            let tick = probe * spacing + probe.rem_euclid(spacing);
            let from_bitmap =
                next_initialized_tick_within_one_word(&bitmap.bitmap, tick, spacing, lte).unwrap();
            let from_list =
                tick_list::next_initialized_tick_within_one_word(&ticks, tick, lte, spacing).unwrap();
            prop_assert_eq!(from_bitmap, from_list);
        }
    }
}
