//! 32-value expression preset.
//!
//! Layout: `[0..16)` phoneme targets, `[16..30)` modifier targets, `[30]` mood
//! id (truncated), `[31]` mood strength. All values normalized (1.0 = 100%).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::channels::{MODIFIER_COUNT, PHONEME_COUNT};
use crate::error::ChannelError;
use crate::percent::scaled_percent;

/// Number of values in a preset.
pub const PRESET_LEN: usize = 32;

const MODIFIER_START: usize = PHONEME_COUNT;
const MOOD_INDEX: usize = MODIFIER_START + MODIFIER_COUNT;
const STRENGTH_INDEX: usize = MOOD_INDEX + 1;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct ExpressionPreset {
    values: [f32; PRESET_LEN],
}

impl ExpressionPreset {
    pub fn from_slice(values: &[f32]) -> Result<Self, ChannelError> {
        let values: [f32; PRESET_LEN] =
            values.try_into().map_err(|_| ChannelError::PresetShape {
                len: values.len(),
                expected: PRESET_LEN,
            })?;
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f32; PRESET_LEN] {
        &self.values
    }

    pub fn phonemes(&self) -> &[f32] {
        &self.values[..MODIFIER_START]
    }

    pub fn modifiers(&self) -> &[f32] {
        &self.values[MODIFIER_START..MOOD_INDEX]
    }

    /// Mood id, truncated toward zero. May be negative or out of range; the write validates it.
    pub fn mood(&self) -> i32 {
        self.values[MOOD_INDEX] as i32
    }

    pub fn strength(&self) -> f32 {
        self.values[STRENGTH_INDEX]
    }

    /// Mood strength in percent after scaling.
    ///
    /// A preset that names a mood but carries zero strength means "use the
    /// caller's default intensity", not "silence the mood".
    pub fn expression_percent(&self, scale: f32, default_percent: i32) -> i32 {
        let percent = scaled_percent(self.strength(), scale);
        if self.mood() > 0 && percent == 0 {
            default_percent
        } else {
            percent
        }
    }
}

impl TryFrom<Vec<f32>> for ExpressionPreset {
    type Error = ChannelError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl From<ExpressionPreset> for Vec<f32> {
    fn from(preset: ExpressionPreset) -> Self {
        preset.values.to_vec()
    }
}

impl fmt::Display for ExpressionPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v:.2}")?;
        }
        f.write_str("}")
    }
}
