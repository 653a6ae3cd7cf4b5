//! Single-channel reads and writes in percent units.
//!
//! Callers hold the [`crate::AnimStateLock`] guard for the whole of any
//! multi-step sequence; these functions take the already-locked state.

use crate::channels::{ChannelKind, MOOD_NEUTRAL};
use crate::error::ChannelError;
use crate::handle::FaceChannels;
use crate::percent::{normalized_to_percent, percent_to_normalized};

/// Write one channel. `percent` is clamped to 0..=200 before normalizing.
///
/// Expression writes go through the override: the flag is cleared, the mood's
/// override value written, then the flag set again, so the host takes the new
/// value as an explicit override rather than blending from a stale one.
pub fn set_channel(
    channels: &mut dyn FaceChannels,
    kind: ChannelKind,
    id: u32,
    percent: i32,
) -> Result<(), ChannelError> {
    let max = kind.max_id();
    if id > max {
        return Err(ChannelError::OutOfRange {
            kind,
            id,
            max,
            value: percent,
        });
    }
    let value = percent_to_normalized(percent);
    match kind {
        ChannelKind::Phoneme => channels.set_phoneme(id as usize, value),
        ChannelKind::Modifier => channels.set_modifier(id as usize, value),
        ChannelKind::Expression => {
            channels.set_expression_override_enabled(false);
            channels.set_expression_override(id, value);
            channels.set_expression_override_enabled(true);
        }
    }
    Ok(())
}

/// Read one channel as a percent. Ids past the live count read as 0.
pub fn get_channel(channels: &dyn FaceChannels, kind: ChannelKind, id: u32) -> i32 {
    channels
        .values(kind)
        .get(id as usize)
        .map_or(0, |v| normalized_to_percent(*v))
}

/// Write only when the rounded target differs from the current rounded value.
///
/// Returns `Ok(true)` when a write happened.
pub fn set_channel_if_changed(
    channels: &mut dyn FaceChannels,
    kind: ChannelKind,
    id: u32,
    percent: i32,
) -> Result<bool, ChannelError> {
    if get_channel(channels, kind, id) == percent {
        return Ok(false);
    }
    set_channel(channels, kind, id, percent)?;
    Ok(true)
}

/// Mood with the highest weight. Ties go to the lowest index; an empty
/// expression array reports [`MOOD_NEUTRAL`].
pub fn active_expression(channels: &dyn FaceChannels) -> u32 {
    let weights = channels.values(ChannelKind::Expression);
    let Some(first) = weights.first() else {
        return MOOD_NEUTRAL;
    };
    let mut best = 0usize;
    let mut best_weight = *first;
    for (i, w) in weights.iter().enumerate().skip(1) {
        if *w > best_weight {
            best = i;
            best_weight = *w;
        }
    }
    best as u32
}

/// Zero every id of a kind up to its fixed capacity.
pub fn zero_channels(
    channels: &mut dyn FaceChannels,
    kind: ChannelKind,
) -> Result<(), ChannelError> {
    for id in 0..=kind.max_id() {
        set_channel(channels, kind, id, 0)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::{EXPRESSION_COUNT, MODIFIER_COUNT, PHONEME_COUNT};
    use crate::memory::InMemoryChannels;

    #[test]
    fn set_then_get_returns_clamped_percent() {
        let mut ch = InMemoryChannels::new();
        for p in [-50, 0, 1, 37, 99, 100, 150, 199, 200, 201, 1000] {
            set_channel(&mut ch, ChannelKind::Phoneme, 4, p).unwrap();
            set_channel(&mut ch, ChannelKind::Modifier, 9, p).unwrap();
            assert_eq!(get_channel(&ch, ChannelKind::Phoneme, 4), p.clamp(0, 200));
            assert_eq!(get_channel(&ch, ChannelKind::Modifier, 9), p.clamp(0, 200));
        }
    }

    #[test]
    fn out_of_range_ids_fail_without_touching_state() {
        let mut ch = InMemoryChannels::new();
        set_channel(&mut ch, ChannelKind::Phoneme, 15, 80).unwrap();
        let before = ch.clone();

        let err = set_channel(&mut ch, ChannelKind::Phoneme, 16, 50).unwrap_err();
        assert_eq!(
            err,
            ChannelError::OutOfRange {
                kind: ChannelKind::Phoneme,
                id: 16,
                max: 15,
                value: 50
            }
        );
        assert!(set_channel(&mut ch, ChannelKind::Modifier, 14, 50).is_err());
        assert!(set_channel(&mut ch, ChannelKind::Expression, 17, 50).is_err());
        assert_eq!(ch, before);
        assert_eq!(get_channel(&ch, ChannelKind::Phoneme, 15), 80);
    }

    #[test]
    fn expression_write_leaves_override_enabled() {
        let mut ch = InMemoryChannels::new();
        set_channel(&mut ch, ChannelKind::Expression, 16, 120).unwrap();
        assert!(ch.expression_override_enabled());
        assert_eq!(ch.expression_override(), Some((16, 1.2)));
        assert_eq!(get_channel(&ch, ChannelKind::Expression, 16), 120);
    }

    #[test]
    fn reads_past_live_count_are_zero() {
        let mut ch = InMemoryChannels::with_counts(PHONEME_COUNT, MODIFIER_COUNT, 3);
        ch.set_expression_weights(&[0.1, 0.2, 0.3]);
        assert_eq!(get_channel(&ch, ChannelKind::Expression, 2), 30);
        assert_eq!(get_channel(&ch, ChannelKind::Expression, 3), 0);
        assert_eq!(get_channel(&ch, ChannelKind::Phoneme, 400), 0);
    }

    #[test]
    fn reads_do_not_reclamp() {
        let mut ch = InMemoryChannels::new();
        ch.set_modifier(0, 3.5);
        assert_eq!(get_channel(&ch, ChannelKind::Modifier, 0), 350);
    }

    #[test]
    fn active_expression_prefers_lowest_index_on_ties() {
        let mut ch = InMemoryChannels::new();
        ch.set_expression_weights(&[0.4; EXPRESSION_COUNT]);
        assert_eq!(active_expression(&ch), 0);

        ch.set_expression_weights(&[0.0, 0.5, 0.2, 0.5]);
        assert_eq!(active_expression(&ch), 1);
    }

    #[test]
    fn active_expression_of_empty_rig_is_neutral() {
        let ch = InMemoryChannels::with_counts(PHONEME_COUNT, MODIFIER_COUNT, 0);
        assert_eq!(active_expression(&ch), MOOD_NEUTRAL);
    }

    #[test]
    fn unchanged_targets_are_skipped() {
        let mut ch = InMemoryChannels::new();
        assert!(!set_channel_if_changed(&mut ch, ChannelKind::Modifier, 2, 0).unwrap());
        assert!(set_channel_if_changed(&mut ch, ChannelKind::Modifier, 2, 40).unwrap());
        assert!(!set_channel_if_changed(&mut ch, ChannelKind::Modifier, 2, 40).unwrap());
        assert!(set_channel_if_changed(&mut ch, ChannelKind::Phoneme, 16, 40).is_err());
    }

    #[test]
    fn zero_channels_clears_one_kind_only() {
        let mut ch = InMemoryChannels::new();
        ch.set_phoneme(1, 0.7);
        ch.set_modifier(1, 0.7);
        zero_channels(&mut ch, ChannelKind::Phoneme).unwrap();
        assert_eq!(get_channel(&ch, ChannelKind::Phoneme, 1), 0);
        assert_eq!(get_channel(&ch, ChannelKind::Modifier, 1), 70);
    }
}
