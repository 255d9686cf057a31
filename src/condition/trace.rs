use crate::context::Value;

/// A record of how a condition was evaluated, including the values observed.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionTrace {
    Eq {
        path: String,
        expected: Value,
        found: Option<Value>,
        outcome: bool,
    },
    Contains {
        path: String,
        expected: Value,
        found: Option<Value>,
        outcome: bool,
    },
    NotSet {
        path: String,
        found: Option<Value>,
        outcome: bool,
    },
    All {
        children: Vec<ConditionTrace>,
        outcome: bool,
    },
    Any {
        children: Vec<ConditionTrace>,
        outcome: bool,
    },
    /// Skipped because an earlier sibling already decided the group.
    NotEvaluated,
    Unrecognized,
    DepthExceeded,
}

impl ConditionTrace {
    pub fn outcome(&self) -> bool {
        match self {
            ConditionTrace::Eq { outcome, .. }
            | ConditionTrace::Contains { outcome, .. }
            | ConditionTrace::NotSet { outcome, .. }
            | ConditionTrace::All { outcome, .. }
            | ConditionTrace::Any { outcome, .. } => *outcome,
            ConditionTrace::NotEvaluated
            | ConditionTrace::Unrecognized
            | ConditionTrace::DepthExceeded => false,
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            ConditionTrace::Any { .. } => 1,
            ConditionTrace::All { .. } => 2,
            _ => 9,
        }
    }
}
