use crate::error::FlowError;
use crate::funnel::{
    EndStep, FormStep, LandingStep, MultiChoiceStep, SingleChoiceStep, StepKind, Variant,
};
use crate::results::{Outcome, ResultsTicket};

/// What the presentation layer must show for the active step.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Landing {
        step_id: String,
        step: LandingStep,
        /// The memoized variant, `None` if the step defines no variants.
        variant: Option<Variant>,
    },
    SingleChoice {
        step_id: String,
        step: SingleChoiceStep,
    },
    MultiChoice {
        step_id: String,
        step: MultiChoiceStep,
        /// Currently toggled option ids, in the order they were selected.
        selected: Vec<String>,
    },
    Form {
        step_id: String,
        step: FormStep,
    },
    /// A results step waiting for its outcome.
    Loading {
        step_id: String,
        headline: String,
        ticket: ResultsTicket,
    },
    Results {
        step_id: String,
        outcome: Outcome,
    },
    End {
        step_id: String,
        step: EndStep,
    },
    /// The top-level flow was exited and no `done` step is defined.
    Done,
    /// A structural fault stopped the session.
    Halted(FlowError),
}

impl View {
    /// The step kind this view presents. `None` for `Done` and `Halted`.
    pub fn kind(&self) -> Option<StepKind> {
        match self {
            View::Landing { .. } => Some(StepKind::Landing),
            View::SingleChoice { .. } => Some(StepKind::QuestionSingle),
            View::MultiChoice { .. } => Some(StepKind::QuestionMulti),
            View::Form { .. } => Some(StepKind::Form),
            View::Loading { .. } | View::Results { .. } => Some(StepKind::Results),
            View::End { .. } => Some(StepKind::End),
            View::Done | View::Halted(_) => None,
        }
    }

    pub fn step_id(&self) -> Option<&str> {
        match self {
            View::Landing { step_id, .. }
            | View::SingleChoice { step_id, .. }
            | View::MultiChoice { step_id, .. }
            | View::Form { step_id, .. }
            | View::Loading { step_id, .. }
            | View::Results { step_id, .. }
            | View::End { step_id, .. } => Some(step_id),
            View::Done | View::Halted(_) => None,
        }
    }

    /// Whether the interaction is over (an `end` step or the done state).
    pub fn is_terminal(&self) -> bool {
        matches!(self, View::End { .. } | View::Done)
    }
}
