use crate::session::SessionError;
use inkflow_ai::AVAILABLE_AIS;
use inkflow_engine::rules::RuleSet;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_CPU_DELAY_MS: u64 = 1500;

/// Longest pause allowed before the CPU acts.
pub const MAX_CPU_DELAY_MS: u64 = 60_000;

/// Settings a session is created with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionSettings {
    /// Pause before each CPU turn, for presentation pacing
    pub cpu_delay_ms: u64,
    /// Seed for the first shuffle; later games continue the same stream
    pub seed: Option<u64>,
    /// Registered CPU opponent name
    pub ai: String,
    pub rules: RuleSet,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cpu_delay_ms: DEFAULT_CPU_DELAY_MS,
            seed: None,
            ai: "baseline".to_string(),
            rules: RuleSet::default(),
        }
    }
}

impl SessionSettings {
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.cpu_delay_ms > MAX_CPU_DELAY_MS {
            return Err(SessionError::InvalidSettings(format!(
                "cpu_delay_ms must be at most {}",
                MAX_CPU_DELAY_MS
            )));
        }
        if !AVAILABLE_AIS.contains(&self.ai.as_str()) {
            return Err(SessionError::UnknownAi(self.ai.clone()));
        }
        self.rules
            .validate()
            .map_err(|e| SessionError::InvalidSettings(e.to_string()))
    }

    pub fn cpu_delay(&self) -> Duration {
        Duration::from_millis(self.cpu_delay_ms)
    }
}
