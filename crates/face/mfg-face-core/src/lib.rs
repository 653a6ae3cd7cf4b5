//! MFG face core (host-agnostic)
//!
//! Bounded access to the facial animation channels of one actor: 16 phoneme
//! targets, 14 modifier targets and the per-mood expression weights. Scripts
//! speak in integer percents (0..=200); the host stores normalized floats
//! (0.0..=2.0). This crate owns that conversion, the id range checks, the
//! expression override write sequence and the lock wrapper every access goes
//! through. Scheduling and actor lookup live in `mfg-console`.

pub mod accessor;
pub mod channels;
pub mod error;
pub mod handle;
pub mod memory;
pub mod percent;
pub mod preset;

// Re-exports for consumers (dispatchers and host adapters)
pub use accessor::{
    active_expression, get_channel, set_channel, set_channel_if_changed, zero_channels,
};
pub use channels::{
    ChannelKind, Mode, ResetScope, EXPRESSION_COUNT, MODIFIER_COUNT, MOOD_NEUTRAL, PHONEME_COUNT,
};
pub use error::ChannelError;
pub use handle::{AnimStateGuard, AnimStateLock, FaceChannels};
pub use memory::InMemoryChannels;
pub use percent::{normalized_to_percent, percent_to_normalized, scaled_percent};
pub use preset::{ExpressionPreset, PRESET_LEN};
