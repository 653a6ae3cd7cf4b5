//! Task records for deferred face mutations.
//!
//! Each record owns everything it needs (an `Arc` to the actor plus plain
//! values), so it can sit on the main-thread queue for any length of time.
//! The actor's animation state is resolved again when the task executes: the
//! face may have unloaded in between, in which case the task is logged and
//! dropped.

use std::fmt;
use std::sync::Arc;

use log::{debug, error};
use mfg_face_core::{
    active_expression, scaled_percent, set_channel, set_channel_if_changed, zero_channels,
    AnimStateLock, ChannelKind, ExpressionPreset, FaceChannels, ResetScope,
};

use crate::actor::{display_name, Actor, ActorRef};
use crate::error::MfgError;

/// What a single-channel set writes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SetTarget {
    /// Clear the expression override and let the host reset the whole face.
    FullReset,
    Channel(ChannelKind),
}

/// Deferred `SetPhonemeModifier(Smooth)`.
#[derive(Clone)]
pub struct SetChannelTask {
    pub actor: ActorRef,
    pub target: SetTarget,
    pub id: u32,
    pub percent: i32,
    pub speed: f32,
}

/// Deferred `ResetMFG(Smooth)`.
#[derive(Clone)]
pub struct ResetTask {
    pub actor: ActorRef,
    pub scope: ResetScope,
    pub speed: f32,
}

/// Deferred `ApplyExpressionPreset`. The mood comes from the preset; its
/// strength is resolved on the calling thread.
#[derive(Clone)]
pub struct ApplyPresetTask {
    pub actor: ActorRef,
    pub preset: ExpressionPreset,
    pub open_mouth: bool,
    pub expression_percent: i32,
    pub modifier_scale: f32,
    pub phoneme_scale: f32,
    pub speed: f32,
}

#[derive(Clone, Debug)]
pub enum FaceTask {
    SetChannel(SetChannelTask),
    Reset(ResetTask),
    ApplyPreset(ApplyPresetTask),
}

impl FaceTask {
    /// Script operation that produced the task, for log lines.
    pub fn operation(&self) -> &'static str {
        match self {
            FaceTask::SetChannel(_) => "SetPhonemeModifierSmooth",
            FaceTask::Reset(_) => "ResetMFGSmooth",
            FaceTask::ApplyPreset(_) => "ApplyExpressionPreset",
        }
    }

    pub fn actor(&self) -> &ActorRef {
        match self {
            FaceTask::SetChannel(t) => &t.actor,
            FaceTask::Reset(t) => &t.actor,
            FaceTask::ApplyPreset(t) => &t.actor,
        }
    }

    /// Perform the mutation on the current thread.
    pub fn execute(&self) -> Result<(), MfgError> {
        match self {
            FaceTask::SetChannel(t) => t.execute(),
            FaceTask::Reset(t) => t.execute(),
            FaceTask::ApplyPreset(t) => t.execute(self.operation()),
        }
    }

    /// Main-thread entry point. Nobody is waiting on the result, so failures
    /// end here as log lines.
    pub fn run(self) {
        let op = self.operation();
        match self.execute() {
            Ok(()) => debug!(
                "{op} [UITask] :: applied for {}",
                display_name(&**self.actor())
            ),
            Err(err) => error!("{op} [UITask] :: {err}"),
        }
    }
}

/// Resolve the face state, then apply the blend speed. Speed is only touched
/// once the face is known to be loaded.
fn prepare(actor: &dyn Actor, speed: f32) -> Result<Arc<AnimStateLock>, MfgError> {
    let state = actor
        .face_anim_state()
        .ok_or_else(|| MfgError::MissingAnimState {
            actor: display_name(actor),
        })?;
    actor.set_expression_speed(speed);
    Ok(state)
}

/// Override-clear plus the host's own reset.
fn host_reset(channels: &mut dyn FaceChannels) {
    channels.clear_expression_override();
    channels.reset();
}

/// Zero the channels a reset scope covers. For a full reset the active mood
/// is read here, under the caller's guard, not when the reset was requested.
pub(crate) fn reset_channels(
    channels: &mut dyn FaceChannels,
    scope: ResetScope,
) -> Result<(), MfgError> {
    match scope {
        ResetScope::Full => {
            zero_channels(channels, ChannelKind::Modifier)?;
            zero_channels(channels, ChannelKind::Phoneme)?;
            let mood = active_expression(channels);
            // Rigs may report more moods than are addressable; the host reset still runs.
            if let Err(err) = set_channel(channels, ChannelKind::Expression, mood, 0) {
                error!("ResetMFGSmooth :: {err}");
            }
            host_reset(channels);
        }
        ResetScope::PhonemesOnly => zero_channels(channels, ChannelKind::Phoneme)?,
        ResetScope::ModifiersOnly => zero_channels(channels, ChannelKind::Modifier)?,
    }
    Ok(())
}

impl SetChannelTask {
    pub fn execute(&self) -> Result<(), MfgError> {
        let state = prepare(&*self.actor, self.speed)?;
        let mut guard = state.lock()?;
        match self.target {
            SetTarget::FullReset => host_reset(&mut *guard),
            SetTarget::Channel(kind) => set_channel(&mut *guard, kind, self.id, self.percent)?,
        }
        Ok(())
    }
}

impl ResetTask {
    pub fn execute(&self) -> Result<(), MfgError> {
        let state = prepare(&*self.actor, self.speed)?;
        let mut guard = state.lock()?;
        reset_channels(&mut *guard, self.scope)
    }
}

impl ApplyPresetTask {
    /// Expression first, then phonemes (closed mouth only), then modifiers.
    /// A rejected write is logged and its siblings still apply.
    pub fn execute(&self, op: &str) -> Result<(), MfgError> {
        let state = prepare(&*self.actor, self.speed)?;
        let mut guard = state.lock()?;
        let channels: &mut dyn FaceChannels = &mut *guard;

        let mood = u32::try_from(self.preset.mood()).unwrap_or(u32::MAX);
        let expression = set_channel(
            channels,
            ChannelKind::Expression,
            mood,
            self.expression_percent,
        );
        if let Err(err) = expression {
            error!("{op} :: {err}");
        }

        if !self.open_mouth {
            let targets = self.preset.phonemes();
            apply_scaled(op, channels, ChannelKind::Phoneme, targets, self.phoneme_scale);
        }
        let targets = self.preset.modifiers();
        apply_scaled(op, channels, ChannelKind::Modifier, targets, self.modifier_scale);
        Ok(())
    }
}

fn apply_scaled(
    op: &str,
    channels: &mut dyn FaceChannels,
    kind: ChannelKind,
    targets: &[f32],
    scale: f32,
) {
    for (id, value) in (0u32..).zip(targets) {
        let percent = scaled_percent(*value, scale);
        if let Err(err) = set_channel_if_changed(channels, kind, id, percent) {
            error!("{op} :: {err}");
        }
    }
}

impl fmt::Debug for SetChannelTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetChannelTask")
            .field("actor", &display_name(&*self.actor))
            .field("target", &self.target)
            .field("id", &self.id)
            .field("percent", &self.percent)
            .field("speed", &self.speed)
            .finish()
    }
}

impl fmt::Debug for ResetTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetTask")
            .field("actor", &display_name(&*self.actor))
            .field("scope", &self.scope)
            .field("speed", &self.speed)
            .finish()
    }
}

impl fmt::Debug for ApplyPresetTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplyPresetTask")
            .field("actor", &display_name(&*self.actor))
            .field("mood", &self.preset.mood())
            .field("expression_percent", &self.expression_percent)
            .field("open_mouth", &self.open_mouth)
            .field("speed", &self.speed)
            .finish_non_exhaustive()
    }
}
