//! mfg-console
//!
//! Operations scripts call to drive an actor's face: set or read a phoneme,
//! modifier or mood, reset groups of channels, apply a 32-value expression
//! preset, and find who the player is talking to.
//!
//! Mutations are normally deferred onto the host's main-thread task queue as
//! plain task records ([`FaceTask`]); the host drains that queue between
//! frames, so a write never interleaves with the host's own per-frame update.
//! Reads run on the calling thread under the animation state lock.

pub mod actor;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod exports;
pub mod queue;
pub mod task;

pub use crate::actor::{display_name, Actor, ActorRef, ConversationContextProvider, SceneObject};
pub use crate::config::Config;
pub use crate::dispatcher::{Execution, FaceDispatcher, PresetOptions};
pub use crate::error::MfgError;
pub use crate::exports::{register_exports, FunctionRegistrar, ScriptFunction};
pub use crate::queue::{LocalTaskQueue, MainThreadTaskQueue};
pub use crate::task::{ApplyPresetTask, FaceTask, ResetTask, SetChannelTask, SetTarget};
