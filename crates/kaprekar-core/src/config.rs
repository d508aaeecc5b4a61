//! Routine Config: step budget shared by every run
use serde::{Deserialize, Serialize};

/// Step budget used when the caller does not pick one.
pub const DEFAULT_MAX_STEPS: usize = 50;

/// Environment variable overriding [`RoutineConfig::max_steps`].
pub const MAX_STEPS_ENV: &str = "KAPREKAR_MAX_STEPS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineConfig {
    pub max_steps: usize,
}

impl Default for RoutineConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl RoutineConfig {
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Reads `KAPREKAR_MAX_STEPS`, keeping the default when unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(MAX_STEPS_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(max_steps) => config.max_steps = max_steps,
                Err(e) => tracing::warn!(
                    value = %raw,
                    error = %e,
                    "ignoring invalid {}, using {}",
                    MAX_STEPS_ENV,
                    DEFAULT_MAX_STEPS
                ),
            }
        }
        config
    }
}
