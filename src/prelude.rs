//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the annai crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! // Use the prelude to get easy access to all the core types.
//! use annai::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let funnel = Funnel::from_file("path/to/funnel.json")?;
//! let config = SessionConfig::from_file("path/to/config.json")?;
//!
//! let mut session = Session::builder(funnel).config(config).build();
//! if let View::Landing { .. } = session.view() {
//!     session.dispatch(Intent::Continue)?;
//! }
//! println!("Now at: {}", session.current_step_id());
//! # Ok(())
//! # }
//! ```

// Interpreter
pub use crate::interpreter::{ExecutionState, FlowStack, Intent, ScopeFrame, Session, View};

// Funnel definition
pub use crate::funnel::{
    ChoiceOption, EndStep, Flow, FormField, FormStep, Funnel, IntoFunnel, LandingStep,
    MultiChoiceStep, Route, RouterStep, SingleChoiceStep, Step, StepKind, Variant,
};

// Context and conditions
pub use crate::condition::{Condition, ConditionTrace, Evaluator};
pub use crate::context::{Context, Value, is_set};

// Collaborators
pub use crate::render::{RendererRegistry, StepRenderer};
pub use crate::results::{MockOutcomeProvider, Outcome, OutcomeProvider, ResultsTicket};

// Configuration and errors
pub use crate::config::SessionConfig;
pub use crate::error::{FlowError, IntentError, SchemaError, ValidationFailure};

// Trace formatting
pub use crate::trace::TraceFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
