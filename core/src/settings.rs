use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Tunables for a [`Session`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Delay between auto-play reveals, in milliseconds.
    pub auto_interval_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            auto_interval_ms: 400,
        }
    }
}

impl EngineSettings {
    pub fn auto_interval(&self) -> Duration {
        Duration::from_millis(self.auto_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.auto_interval_ms == 0 {
            return Err(GameError::InvalidSettings("auto_interval_ms must be positive"));
        }
        Ok(())
    }
}
