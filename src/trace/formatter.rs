use crate::condition::ConditionTrace;
use crate::context::Value;

/// Formats condition traces into human-readable strings
pub struct TraceFormatter;

impl TraceFormatter {
    /// Format a condition trace into a human-readable explanation.
    pub fn format_trace(trace: &ConditionTrace) -> String {
        // Start the recursive formatting with the lowest possible parent precedence.
        Self::format_recursive(trace, 0)
    }

    /// Recursively formats the trace, adding parentheses only when necessary.
    fn format_recursive(trace: &ConditionTrace, parent_precedence: u8) -> String {
        let current_precedence = trace.precedence();

        match trace {
            ConditionTrace::Eq {
                path,
                expected,
                found,
                ..
            } => format!(
                "{} == {} (was {})",
                path,
                expected,
                Self::format_found(found.as_ref())
            ),
            ConditionTrace::Contains {
                path,
                expected,
                found,
                ..
            } => format!(
                "{} contains {} (was {})",
                path,
                expected,
                Self::format_found(found.as_ref())
            ),
            ConditionTrace::NotSet { path, found, .. } => format!(
                "{} is not set (was {})",
                path,
                Self::format_found(found.as_ref())
            ),
            ConditionTrace::All { children, .. } => Self::format_group(
                children,
                "AND",
                "always",
                current_precedence,
                parent_precedence,
            ),
            ConditionTrace::Any { children, .. } => Self::format_group(
                children,
                "OR",
                "never",
                current_precedence,
                parent_precedence,
            ),
            ConditionTrace::Unrecognized => "<unrecognized condition>".to_string(),
            ConditionTrace::DepthExceeded => "<condition nested too deep>".to_string(),
            // Skipped by format_group; only reachable when formatted on its own.
            ConditionTrace::NotEvaluated => String::new(),
        }
    }

    fn format_group(
        children: &[ConditionTrace],
        op_symbol: &str,
        empty: &str,
        current_precedence: u8,
        parent_precedence: u8,
    ) -> String {
        // Short-circuited branches did not contribute to the result.
        let parts: Vec<String> = children
            .iter()
            .filter(|child| !matches!(child, ConditionTrace::NotEvaluated))
            .map(|child| Self::format_recursive(child, current_precedence))
            .collect();

        match parts.len() {
            0 => empty.to_string(),
            1 => parts.into_iter().next().unwrap_or_default(),
            _ => {
                let joined = parts.join(&format!(" {} ", op_symbol));
                if current_precedence < parent_precedence {
                    format!("({})", joined)
                } else {
                    joined
                }
            }
        }
    }

    /// Format an observed value for display.
    fn format_found(value: Option<&Value>) -> String {
        match value {
            Some(v) => v.to_string(),
            None => "unset".to_string(),
        }
    }
}
