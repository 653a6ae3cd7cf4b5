//! Errors raised by channel access.

use thiserror::Error;

use crate::channels::ChannelKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("{kind} id out of range 0-{max}: id {id}, value {value}")]
    OutOfRange {
        kind: ChannelKind,
        id: u32,
        max: u32,
        value: i32,
    },
    #[error("unknown mode value {0}")]
    UnknownMode(i32),
    /// A known mode used by the wrong operation, e.g. reset (-1) on a get.
    #[error("mode {mode} is not valid for {operation}")]
    ModeNotSupported { mode: i32, operation: &'static str },
    #[error("expression preset has {len} values, expected {expected}")]
    PresetShape { len: usize, expected: usize },
    #[error("animation state lock poisoned")]
    LockPoisoned,
}
