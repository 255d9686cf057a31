pub mod conversion;
pub mod definition;

pub use conversion::*;
pub use definition::*;

use crate::error::SchemaError;
use std::fs;

impl Funnel {
    /// Parses a funnel from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let funnel: Funnel = serde_json::from_str(json)?;
        funnel.log_summary();
        Ok(funnel)
    }

    /// Builds a funnel from an already parsed JSON document.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SchemaError> {
        let funnel: Funnel = serde_json::from_value(value)?;
        funnel.log_summary();
        Ok(funnel)
    }

    /// Loads a funnel from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn flow(&self, flow_id: &str) -> Option<&Flow> {
        self.flows.get(flow_id)
    }

    fn log_summary(&self) {
        log::info!(
            "Loaded funnel: {} top-level steps, {} flows, starting at '{}'",
            self.steps.len(),
            self.flows.len(),
            self.start
        );
        let unsupported = self
            .steps
            .iter()
            .chain(self.flows.values().flat_map(|flow| flow.steps.iter()))
            .filter(|(_, step)| step.kind().is_none());
        for (id, step) in unsupported {
            log::warn!(
                "Step '{}' has unsupported type '{}'; reaching it will halt the session",
                id,
                step.kind_name()
            );
        }
    }
}
