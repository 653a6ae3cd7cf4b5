//! Console configuration.

use serde::{Deserialize, Serialize};

use crate::error::MfgError;

/// Runtime options for the dispatcher and the bundled task queue.
/// Missing JSON fields fall back to [`Config::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dump every applied expression preset at debug level.
    pub log_presets: bool,
    /// Bound for [`crate::LocalTaskQueue`]; scheduling fails once this many tasks are pending.
    pub task_queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_presets: false,
            task_queue_capacity: 256,
        }
    }
}

impl Config {
    pub fn from_json_str(text: &str) -> Result<Self, MfgError> {
        Ok(serde_json::from_str(text)?)
    }
}
