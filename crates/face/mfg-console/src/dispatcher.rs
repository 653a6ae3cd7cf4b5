//! Script-facing face operations.
//!
//! Every call follows the same path: resolve the actor's face state, then
//! either queue a [`FaceTask`] for the main thread or run it here, under the
//! state lock. Entry points never return errors; failures are logged with the
//! operation name and collapse to `false`, `-1` or `None`.

use std::sync::Arc;

use log::{debug, error, info, warn};
use mfg_face_core::{
    active_expression, get_channel, AnimStateLock, ChannelError, ChannelKind, ExpressionPreset,
    Mode, ResetScope,
};

use crate::actor::{display_name, ActorRef, ConversationContextProvider};
use crate::config::Config;
use crate::error::MfgError;
use crate::queue::MainThreadTaskQueue;
use crate::task::{ApplyPresetTask, FaceTask, ResetTask, SetChannelTask, SetTarget};

/// Where a mutation runs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Execution {
    /// Queue for the main thread and return once queued.
    Deferred,
    /// Run on the calling thread before returning.
    Immediate,
}

/// Strength options for [`FaceDispatcher::apply_expression_preset`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PresetOptions {
    /// Leave the mouth alone (phoneme targets are skipped).
    pub open_mouth: bool,
    /// Mood percent used when the preset names a mood but its strength rounds to 0.
    pub default_expression_percent: i32,
    pub expression_scale: f32,
    pub modifier_scale: f32,
    pub phoneme_scale: f32,
}

impl Default for PresetOptions {
    fn default() -> Self {
        Self {
            open_mouth: false,
            default_expression_percent: 0,
            expression_scale: 1.0,
            modifier_scale: 1.0,
            phoneme_scale: 1.0,
        }
    }
}

pub struct FaceDispatcher {
    cfg: Config,
    tasks: Arc<dyn MainThreadTaskQueue>,
    conversation: Arc<dyn ConversationContextProvider>,
}

impl FaceDispatcher {
    pub fn new(
        cfg: Config,
        tasks: Arc<dyn MainThreadTaskQueue>,
        conversation: Arc<dyn ConversationContextProvider>,
    ) -> Self {
        Self {
            cfg,
            tasks,
            conversation,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    // ---- core operations -------------------------------------------------

    /// Set one channel, or reset the face when `mode` is -1.
    ///
    /// With [`Execution::Deferred`] the result only says the task was queued.
    pub fn set_single_channel(
        &self,
        actor: Option<&ActorRef>,
        mode: i32,
        id: u32,
        percent: i32,
        speed: f32,
        execution: Execution,
    ) -> bool {
        let op = "SetPhonemeModifierSmooth";
        let result = self.try_set_single_channel(actor, mode, id, percent, speed, execution);
        report(op, result).is_some()
    }

    /// Read one channel in percent, or the active mood for mode 3. Always
    /// synchronous; returns -1 on any failure.
    pub fn get_single_channel(&self, actor: Option<&ActorRef>, mode: i32, id: u32) -> i32 {
        report("GetPhonemeModifier", self.try_get_single_channel(actor, mode, id)).unwrap_or(-1)
    }

    /// Zero a group of channels. An unknown scope code is a logged no-op that
    /// still reports success.
    pub fn reset_all(
        &self,
        actor: Option<&ActorRef>,
        scope: i32,
        speed: f32,
        execution: Execution,
    ) -> bool {
        report("ResetMFGSmooth", self.try_reset_all(actor, scope, speed, execution)).is_some()
    }

    /// Apply a 32-value expression preset. The shape is checked before the
    /// actor is looked at; a bad preset has no side effect at all.
    pub fn apply_expression_preset(
        &self,
        actor: Option<&ActorRef>,
        preset: &[f32],
        options: PresetOptions,
        speed: f32,
        execution: Execution,
    ) -> bool {
        let result = self.try_apply_expression_preset(actor, preset, options, speed, execution);
        report("ApplyExpressionPreset", result).is_some()
    }

    /// The actor the player is currently in dialogue with.
    pub fn resolve_conversation_target(&self) -> Option<ActorRef> {
        let actor = self.conversation.speaker()?.as_actor()?;
        info!(
            "GetPlayerSpeechTarget :: Player speech target is '{}'",
            display_name(&*actor)
        );
        Some(actor)
    }

    // ---- script entry points ---------------------------------------------

    /// Queue a single-channel set. Returns `false` without queuing when the
    /// mode or id is invalid, rather than reporting success and failing later.
    pub fn set_phoneme_modifier_smooth(
        &self,
        actor: Option<&ActorRef>,
        mode: i32,
        id: u32,
        value: i32,
        speed: f32,
    ) -> bool {
        self.set_single_channel(actor, mode, id, value, speed, Execution::Deferred)
    }

    /// Same as the smooth variant at speed 0: still one hop through the main-thread queue.
    pub fn set_phoneme_modifier(
        &self,
        actor: Option<&ActorRef>,
        mode: i32,
        id: u32,
        value: i32,
    ) -> bool {
        self.set_phoneme_modifier_smooth(actor, mode, id, value, 0.0)
    }

    pub fn get_phoneme_modifier(&self, actor: Option<&ActorRef>, mode: i32, id: u32) -> i32 {
        self.get_single_channel(actor, mode, id)
    }

    pub fn reset_mfg_smooth(&self, actor: Option<&ActorRef>, mode: i32, speed: f32) -> bool {
        self.reset_all(actor, mode, speed, Execution::Deferred)
    }

    pub fn reset_mfg(&self, actor: Option<&ActorRef>, mode: i32) -> bool {
        self.reset_mfg_smooth(actor, mode, 0.0)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn apply_expression_preset_script(
        &self,
        actor: Option<&ActorRef>,
        expression: &[f32],
        open_mouth: bool,
        expr_power: i32,
        expr_str_mod: f32,
        mod_str_mod: f32,
        ph_str_mod: f32,
        speed: f32,
    ) -> bool {
        let options = PresetOptions {
            open_mouth,
            default_expression_percent: expr_power,
            expression_scale: expr_str_mod,
            modifier_scale: mod_str_mod,
            phoneme_scale: ph_str_mod,
        };
        self.apply_expression_preset(actor, expression, options, speed, Execution::Deferred)
    }

    pub fn get_player_speech_target(&self) -> Option<ActorRef> {
        self.resolve_conversation_target()
    }

    // ---- internals ---------------------------------------------------------

    fn try_set_single_channel(
        &self,
        actor: Option<&ActorRef>,
        mode: i32,
        id: u32,
        percent: i32,
        speed: f32,
        execution: Execution,
    ) -> Result<(), MfgError> {
        let actor = actor.ok_or(MfgError::NoActor)?;
        let target = set_target(mode)?;
        if let SetTarget::Channel(kind) = target {
            let max = kind.max_id();
            if id > max {
                let value = percent;
                return Err(ChannelError::OutOfRange { kind, id, max, value }.into());
            }
        }
        resolve_state(actor)?;
        let task = FaceTask::SetChannel(SetChannelTask {
            actor: Arc::clone(actor),
            target,
            id,
            percent,
            speed,
        });
        self.dispatch(task, execution)
    }

    fn try_get_single_channel(
        &self,
        actor: Option<&ActorRef>,
        mode: i32,
        id: u32,
    ) -> Result<i32, MfgError> {
        let actor = actor.ok_or(MfgError::NoActor)?;
        let kind = get_target(mode)?;
        let state = resolve_state(actor)?;
        let guard = state.lock()?;
        Ok(match kind {
            Some(kind) => get_channel(&*guard, kind, id),
            None => active_expression(&*guard) as i32,
        })
    }

    fn try_reset_all(
        &self,
        actor: Option<&ActorRef>,
        scope: i32,
        speed: f32,
        execution: Execution,
    ) -> Result<(), MfgError> {
        let actor = actor.ok_or(MfgError::NoActor)?;
        let scope = match ResetScope::try_from(scope) {
            Ok(scope) => scope,
            Err(err) => {
                warn!("ResetMFGSmooth :: unexpected mode value: {err}");
                return Ok(());
            }
        };
        resolve_state(actor)?;
        let task = FaceTask::Reset(ResetTask {
            actor: Arc::clone(actor),
            scope,
            speed,
        });
        self.dispatch(task, execution)
    }

    fn try_apply_expression_preset(
        &self,
        actor: Option<&ActorRef>,
        values: &[f32],
        options: PresetOptions,
        speed: f32,
        execution: Execution,
    ) -> Result<(), MfgError> {
        let preset = ExpressionPreset::from_slice(values)?;
        let actor = actor.ok_or(MfgError::NoActor)?;
        resolve_state(actor)?;

        let expression_percent = preset.expression_percent(
            options.expression_scale,
            options.default_expression_percent,
        );
        if self.cfg.log_presets {
            debug!(
                "ApplyExpressionPreset :: Expression Vector for '{}': {preset}",
                display_name(&**actor)
            );
        }

        let task = FaceTask::ApplyPreset(ApplyPresetTask {
            actor: Arc::clone(actor),
            preset,
            open_mouth: options.open_mouth,
            expression_percent,
            modifier_scale: options.modifier_scale,
            phoneme_scale: options.phoneme_scale,
            speed,
        });
        self.dispatch(task, execution)
    }

    fn dispatch(&self, task: FaceTask, execution: Execution) -> Result<(), MfgError> {
        match execution {
            Execution::Deferred => {
                debug!("{} :: queued for main thread", task.operation());
                self.tasks.add_task(task)
            }
            Execution::Immediate => task.execute(),
        }
    }
}

fn set_target(mode: i32) -> Result<SetTarget, ChannelError> {
    match Mode::try_from(mode)? {
        Mode::Reset => Ok(SetTarget::FullReset),
        other => other
            .channel_kind()
            .map(SetTarget::Channel)
            .ok_or(ChannelError::ModeNotSupported {
                mode,
                operation: "set",
            }),
    }
}

/// Channel a get reads; `None` means the active mood id.
fn get_target(mode: i32) -> Result<Option<ChannelKind>, ChannelError> {
    match Mode::try_from(mode)? {
        Mode::ExpressionId => Ok(None),
        other => other
            .channel_kind()
            .map(Some)
            .ok_or(ChannelError::ModeNotSupported {
                mode,
                operation: "get",
            }),
    }
}

fn resolve_state(actor: &ActorRef) -> Result<Arc<AnimStateLock>, MfgError> {
    actor
        .face_anim_state()
        .ok_or_else(|| MfgError::MissingAnimState {
            actor: display_name(&**actor),
        })
}

/// Log a failed operation at the level its kind calls for.
fn report<T>(op: &str, result: Result<T, MfgError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(MfgError::Channel(
            err @ (ChannelError::UnknownMode(_) | ChannelError::ModeNotSupported { .. }),
        )) => {
            warn!("{op} :: {err}");
            None
        }
        Err(err) => {
            error!("{op} :: {err}");
            None
        }
    }
}
