use super::{Condition, ConditionTrace};
use crate::context::{Context, Value, is_set};

/// Evaluates [`Condition`]s against a session context.
///
/// Evaluation never fails. Unrecognized shapes and conditions nested deeper
/// than the configured limit are simply false.
pub struct Evaluator<'a> {
    context: &'a Context,
    max_depth: usize,
}

impl<'a> Evaluator<'a> {
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    pub fn new(context: &'a Context) -> Self {
        Self {
            context,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn evaluate(&self, condition: &Condition) -> bool {
        self.explain(condition).outcome()
    }

    /// Evaluates `condition` and returns the full trace of the decision.
    pub fn explain(&self, condition: &Condition) -> ConditionTrace {
        self.trace(condition, 0)
    }

    fn trace(&self, condition: &Condition, depth: usize) -> ConditionTrace {
        if depth >= self.max_depth {
            log::warn!(
                "Condition nested deeper than {} levels, treating it as false",
                self.max_depth
            );
            return ConditionTrace::DepthExceeded;
        }

        match condition {
            Condition::Eq { path, value } => {
                let found = self.context.get(path);
                ConditionTrace::Eq {
                    path: path.clone(),
                    expected: value.clone(),
                    outcome: found == Some(value),
                    found: found.cloned(),
                }
            }
            Condition::Contains { path, value } => {
                let found = self.context.get(path);
                let outcome = matches!(found, Some(Value::List(items)) if items.contains(value));
                ConditionTrace::Contains {
                    path: path.clone(),
                    expected: value.clone(),
                    found: found.cloned(),
                    outcome,
                }
            }
            Condition::NotSet { path } => {
                let found = self.context.get(path);
                ConditionTrace::NotSet {
                    path: path.clone(),
                    outcome: !is_set(found),
                    found: found.cloned(),
                }
            }
            Condition::And(items) => {
                let (children, outcome) = self.short_circuit(items, depth, false);
                ConditionTrace::All { children, outcome }
            }
            Condition::Or(items) => {
                let (children, outcome) = self.short_circuit(items, depth, true);
                ConditionTrace::Any { children, outcome }
            }
            Condition::Unrecognized(_) => ConditionTrace::Unrecognized,
        }
    }

    /// Evaluates children in order until one yields `decisive`.
    /// Returns the child traces and the group outcome.
    fn short_circuit(
        &self,
        items: &[Condition],
        depth: usize,
        decisive: bool,
    ) -> (Vec<ConditionTrace>, bool) {
        let mut children = Vec::with_capacity(items.len());
        let mut decided = false;
        for item in items {
            if decided {
                children.push(ConditionTrace::NotEvaluated);
                continue;
            }
            let child = self.trace(item, depth + 1);
            decided = child.outcome() == decisive;
            children.push(child);
        }
        // `and` is true unless a child was false; `or` is false unless a child was true.
        (children, if decided { decisive } else { !decisive })
    }
}
