//! Channel kinds, script mode codes and the fixed channel layout.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ChannelError;

/// Number of phoneme (mouth) channels.
pub const PHONEME_COUNT: usize = 16;
/// Number of modifier (blink, brow, eye, squint) channels.
pub const MODIFIER_COUNT: usize = 14;
/// Number of addressable moods; expression writes accept ids 0..=16.
pub const EXPRESSION_COUNT: usize = 17;
/// Mood reported as active when the host has no expression weights populated.
pub const MOOD_NEUTRAL: u32 = 7;

/// One of the three value arrays of a face animation state.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    Phoneme,
    Modifier,
    Expression,
}

impl ChannelKind {
    /// Highest id accepted by a write to this kind.
    #[inline]
    pub const fn max_id(self) -> u32 {
        match self {
            ChannelKind::Phoneme => PHONEME_COUNT as u32 - 1,
            ChannelKind::Modifier => MODIFIER_COUNT as u32 - 1,
            ChannelKind::Expression => EXPRESSION_COUNT as u32 - 1,
        }
    }

    /// Fixed capacity of the kind. Reads use the live count reported by the host instead.
    #[inline]
    pub const fn capacity(self) -> usize {
        match self {
            ChannelKind::Phoneme => PHONEME_COUNT,
            ChannelKind::Modifier => MODIFIER_COUNT,
            ChannelKind::Expression => EXPRESSION_COUNT,
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelKind::Phoneme => "phoneme",
            ChannelKind::Modifier => "modifier",
            ChannelKind::Expression => "mood",
        };
        f.write_str(name)
    }
}

/// Mode code shared by the set/get/reset script functions.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum Mode {
    Reset = -1,
    Phoneme = 0,
    Modifier = 1,
    ExpressionValue = 2,
    /// Get-only: report the active mood instead of a channel value.
    ExpressionId = 3,
}

impl Mode {
    /// Channel addressed by a value mode. `Reset` and `ExpressionId` address no single channel.
    #[inline]
    pub const fn channel_kind(self) -> Option<ChannelKind> {
        match self {
            Mode::Phoneme => Some(ChannelKind::Phoneme),
            Mode::Modifier => Some(ChannelKind::Modifier),
            Mode::ExpressionValue => Some(ChannelKind::Expression),
            Mode::Reset | Mode::ExpressionId => None,
        }
    }
}

impl TryFrom<i32> for Mode {
    type Error = ChannelError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(Mode::Reset),
            0 => Ok(Mode::Phoneme),
            1 => Ok(Mode::Modifier),
            2 => Ok(Mode::ExpressionValue),
            3 => Ok(Mode::ExpressionId),
            other => Err(ChannelError::UnknownMode(other)),
        }
    }
}

/// What a batch reset clears. Uses the same codes as [`Mode`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ResetScope {
    /// Modifiers, phonemes and the active mood, plus the host's own reset.
    Full,
    PhonemesOnly,
    ModifiersOnly,
}

impl TryFrom<i32> for ResetScope {
    type Error = ChannelError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(ResetScope::Full),
            0 => Ok(ResetScope::PhonemesOnly),
            1 => Ok(ResetScope::ModifiersOnly),
            other => Err(ChannelError::UnknownMode(other)),
        }
    }
}
