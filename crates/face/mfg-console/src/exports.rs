//! Script functions exported to the host VM.
//!
//! Names and namespaces are the public script API and must not change. The
//! host adapter implements [`FunctionRegistrar`] and binds each
//! [`ScriptFunction`] to the matching [`crate::FaceDispatcher`] method.

use serde::Serialize;

use crate::error::MfgError;

/// Namespace of the first-generation set/get pair.
pub const NAMESPACE_BASE: &str = "MfgConsoleFunc";
/// Namespace of the extended API (smooth variants, presets, speech target).
pub const NAMESPACE_EXT: &str = "MfgConsoleFuncExt";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum ScriptFunction {
    SetPhonemeModifierSmooth,
    SetPhonemeModifier,
    GetPhonemeModifier,
    ResetMFGSmooth,
    ApplyExpressionPreset,
    GetPlayerSpeechTarget,
}

impl ScriptFunction {
    /// Registration order.
    pub const ALL: [ScriptFunction; 6] = [
        ScriptFunction::SetPhonemeModifierSmooth,
        ScriptFunction::SetPhonemeModifier,
        ScriptFunction::GetPhonemeModifier,
        ScriptFunction::ResetMFGSmooth,
        ScriptFunction::ApplyExpressionPreset,
        ScriptFunction::GetPlayerSpeechTarget,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ScriptFunction::SetPhonemeModifierSmooth => "SetPhonemeModifierSmooth",
            ScriptFunction::SetPhonemeModifier => "SetPhonemeModifier",
            ScriptFunction::GetPhonemeModifier => "GetPhonemeModifier",
            ScriptFunction::ResetMFGSmooth => "ResetMFGSmooth",
            ScriptFunction::ApplyExpressionPreset => "ApplyExpressionPreset",
            ScriptFunction::GetPlayerSpeechTarget => "GetPlayerSpeechTarget",
        }
    }

    pub const fn namespace(self) -> &'static str {
        match self {
            ScriptFunction::SetPhonemeModifier | ScriptFunction::GetPhonemeModifier => {
                NAMESPACE_BASE
            }
            _ => NAMESPACE_EXT,
        }
    }

    pub fn from_name(namespace: &str, name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.namespace() == namespace && f.name() == name)
    }
}

/// Host side of function registration.
pub trait FunctionRegistrar {
    /// Bind one function; `false` if the VM refused it.
    fn register(&mut self, namespace: &'static str, function: ScriptFunction) -> bool;
}

/// Register every export in order. Stops at the first refusal.
pub fn register_exports(registrar: &mut dyn FunctionRegistrar) -> Result<usize, MfgError> {
    for function in ScriptFunction::ALL {
        let namespace = function.namespace();
        if !registrar.register(namespace, function) {
            return Err(MfgError::Registration {
                namespace,
                name: function.name(),
            });
        }
    }
    Ok(ScriptFunction::ALL.len())
}
