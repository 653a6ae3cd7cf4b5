use mfg_face_core::ChannelError;
use thiserror::Error;

/// Failures of a console operation. None of these cross the script boundary:
/// entry points log them and return `false`, `-1` or `None`.
#[derive(Debug, Error)]
pub enum MfgError {
    #[error("No actor selected")]
    NoActor,
    #[error("No animData found for actor {actor}")]
    MissingAnimState { actor: String },
    #[error(transparent)]
    Channel(#[from] ChannelError),
    #[error("main thread task queue is full ({capacity} pending)")]
    QueueFull { capacity: usize },
    #[error("script host refused to register {namespace}.{name}")]
    Registration {
        namespace: &'static str,
        name: &'static str,
    },
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}
