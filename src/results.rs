//! The boundary to whatever computes a funnel's final results.
//!
//! Entering a `results` step puts the session into a loading view that carries
//! a [`ResultsTicket`]. The collaborator waits out the loading delay, asks an
//! [`OutcomeProvider`] for the outcome, and hands it back together with the
//! ticket. A ticket only stays valid while the session is still on the step
//! that issued it, so a late completion can never overwrite a newer screen.

use crate::context::{Context, Value};
use serde::{Deserialize, Serialize};

/// Handle for one pending results computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsTicket {
    step_id: String,
    epoch: u64,
}

impl ResultsTicket {
    pub(crate) fn new(step_id: &str, epoch: u64) -> Self {
        Self {
            step_id: step_id.to_string(),
            epoch,
        }
    }

    pub fn step_id(&self) -> &str {
        &self.step_id
    }
}

/// The screen shown once results are available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub headline: String,
    #[serde(default)]
    pub body: String,
    /// Provider-specific payload, e.g. the matched items.
    #[serde(default)]
    pub data: Value,
}

/// Computes results from the accumulated context.
pub trait OutcomeProvider {
    fn fetch(&self, context: &Context) -> Outcome;
}

/// Stand-in provider that always returns the same placeholder screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockOutcomeProvider;

impl OutcomeProvider for MockOutcomeProvider {
    fn fetch(&self, _context: &Context) -> Outcome {
        Outcome {
            headline: "Your best matches".to_string(),
            body: "(API integration goes here)".to_string(),
            data: Value::Null,
        }
    }
}
