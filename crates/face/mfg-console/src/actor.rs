//! Host capabilities the console depends on.
//!
//! The engine's actor and conversation types stay on the host side; adapters
//! implement these traits over them and hand them to the dispatcher.

use std::sync::Arc;

use mfg_face_core::AnimStateLock;

/// Name logged when an actor's base record cannot be resolved.
pub const UNKNOWN_ACTOR: &str = "<Unknown>";

/// An actor as far as face animation is concerned.
pub trait Actor: Send + Sync {
    /// Full name of the actor's base record, if resolvable.
    fn base_name(&self) -> Option<String>;

    /// Face animation state. `None` while no facial animation resource is
    /// loaded; re-query on every use, never cache the result.
    fn face_anim_state(&self) -> Option<Arc<AnimStateLock>>;

    /// Playback speed the host uses to blend toward newly set targets.
    fn set_expression_speed(&self, speed: f32);
}

pub type ActorRef = Arc<dyn Actor>;

/// Any object that can appear as a dialogue speaker.
pub trait SceneObject: Send + Sync {
    /// Downcast to an actor; `None` for furniture, activators and the like.
    fn as_actor(&self) -> Option<ActorRef>;
}

/// Read access to the host's current dialogue topic state.
pub trait ConversationContextProvider: Send + Sync {
    /// The object currently speaking to the player, if any.
    fn speaker(&self) -> Option<Arc<dyn SceneObject>>;
}

/// Base name or [`UNKNOWN_ACTOR`].
pub fn display_name(actor: &dyn Actor) -> String {
    actor
        .base_name()
        .unwrap_or_else(|| UNKNOWN_ACTOR.to_string())
}
