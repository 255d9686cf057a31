use crate::error::SchemaError;
use serde::Deserialize;
use std::fs;
use std::time::Duration;

/// Tunables for a [`Session`](crate::interpreter::Session).
///
/// Every field has a default, so a config file only needs the values it changes:
///
/// ```json
/// { "variantSeed": 7, "resultsDelayMs": 0 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Seed for landing-variant draws. `None` seeds from OS entropy.
    pub variant_seed: Option<u64>,
    /// How long a results step shows its loading screen.
    pub results_delay_ms: u64,
    /// Consecutive router/flow_ref steps allowed before the session halts.
    pub max_pass_through: usize,
    /// Deepest `and`/`or` nesting a route condition may use.
    pub max_condition_depth: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            variant_seed: None,
            results_delay_ms: 800,
            max_pass_through: 64,
            max_condition_depth: 32,
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &str) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn results_delay(&self) -> Duration {
        Duration::from_millis(self.results_delay_ms)
    }
}
