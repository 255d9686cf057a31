use itertools::Itertools;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while loading a funnel definition or session configuration.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to parse funnel JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Could not read file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Errors that can occur when converting a custom user format into an annai `Funnel`.
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

/// Structural faults in the funnel graph.
///
/// These are terminal for the current interaction: the session settles into a
/// halted view carrying the error and refuses to advance until it is redirected
/// or restarted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Unknown flow '{flow_id}'")]
    UnknownFlow { flow_id: String },

    #[error("Unknown step: {step_id}")]
    UnresolvedStep { step_id: String },

    #[error("Unsupported step type '{kind}' for step '{step_id}'")]
    UnsupportedStepKind { step_id: String, kind: String },

    #[error("Step '{step_id}' has no transition target")]
    MissingTarget { step_id: String },

    #[error(
        "Gave up after {limit} consecutive pass-through steps (last was '{step_id}'), the funnel probably loops"
    )]
    PassThroughLimit { step_id: String, limit: usize },
}

/// A single required form field that was submitted empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    pub id: String,
    pub label: String,
}

/// A blocked form submission. Nothing was written and no transition happened.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub missing: Vec<MissingField>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Required: {}",
            self.missing.iter().map(|field| field.label.as_str()).join(", ")
        )
    }
}

/// Errors returned when an intent cannot be applied to the active step.
/// The session state is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntentError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("The session is halted ({0}); redirect or restart it")]
    Halted(FlowError),

    #[error("The session has finished; restart it to begin again")]
    Finished,

    #[error("Intent '{intent}' does not apply to step '{step_id}' of type '{kind}'")]
    UnexpectedIntent {
        intent: &'static str,
        step_id: String,
        kind: &'static str,
    },

    #[error("Step '{step_id}' has no option '{option_id}'")]
    UnknownOption { step_id: String, option_id: String },
}

/// Errors raised by the renderer registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("No renderer registered for step type '{0}'")]
    NoRenderer(&'static str),
}
