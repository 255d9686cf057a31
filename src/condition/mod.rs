//! Boolean conditions used by router steps.
//!
//! Conditions arrive as loosely shaped JSON objects (`{"eq": [path, literal]}`,
//! `{"and": [...]}`, ...). They are converted once, at load time, into the
//! closed [`Condition`] type. Anything that does not match a known shape is
//! kept as [`Condition::Unrecognized`] and always evaluates to `false`, so a
//! malformed schema can never produce an always-true route.

mod evaluator;
mod trace;

pub use evaluator::Evaluator;
pub use trace::ConditionTrace;

use crate::context::Value;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Condition {
    /// The value at `path` equals `value`, with no coercion between types.
    Eq { path: String, value: Value },
    /// The value at `path` is a list containing `value`.
    Contains { path: String, value: Value },
    /// The value at `path` is not set.
    NotSet { path: String },
    And(Vec<Condition>),
    Or(Vec<Condition>),
    /// A shape that is not understood. Never true.
    Unrecognized(serde_json::Value),
}

impl Condition {
    pub fn eq(path: &str, value: impl Into<Value>) -> Self {
        Condition::Eq {
            path: path.to_string(),
            value: value.into(),
        }
    }

    pub fn contains(path: &str, value: impl Into<Value>) -> Self {
        Condition::Contains {
            path: path.to_string(),
            value: value.into(),
        }
    }

    pub fn not_set(path: &str) -> Self {
        Condition::NotSet {
            path: path.to_string(),
        }
    }

    /// Parses a `[path, literal]` argument pair.
    fn path_and_literal(args: &serde_json::Value) -> Option<(String, Value)> {
        match args.as_array()?.as_slice() {
            [path, literal, ..] => Some((path.as_str()?.to_string(), literal.clone().into())),
            _ => None,
        }
    }

    /// Parses the `notSet` argument, either `[path]` or a bare `path`.
    fn single_path(args: &serde_json::Value) -> Option<String> {
        match args {
            serde_json::Value::String(path) => Some(path.clone()),
            serde_json::Value::Array(items) => items.first()?.as_str().map(str::to_string),
            _ => None,
        }
    }

    fn list(args: &serde_json::Value) -> Option<Vec<Condition>> {
        args.as_array()
            .map(|items| items.iter().cloned().map(Condition::from).collect())
    }
}

impl From<serde_json::Value> for Condition {
    fn from(raw: serde_json::Value) -> Self {
        let parsed = raw.as_object().and_then(|obj| {
            if let Some(args) = obj.get("eq") {
                Self::path_and_literal(args).map(|(path, value)| Condition::Eq { path, value })
            } else if let Some(args) = obj.get("contains") {
                Self::path_and_literal(args)
                    .map(|(path, value)| Condition::Contains { path, value })
            } else if let Some(args) = obj.get("notSet") {
                Self::single_path(args).map(|path| Condition::NotSet { path })
            } else if let Some(args) = obj.get("and") {
                Self::list(args).map(Condition::And)
            } else if let Some(args) = obj.get("or") {
                Self::list(args).map(Condition::Or)
            } else {
                None
            }
        });

        parsed.unwrap_or_else(|| {
            log::debug!("Unrecognized condition shape: {}", raw);
            Condition::Unrecognized(raw)
        })
    }
}

impl From<Condition> for serde_json::Value {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::Eq { path, value } => {
                json!({ "eq": [path, serde_json::Value::from(value)] })
            }
            Condition::Contains { path, value } => {
                json!({ "contains": [path, serde_json::Value::from(value)] })
            }
            Condition::NotSet { path } => json!({ "notSet": [path] }),
            Condition::And(items) => json!({
                "and": items.into_iter().map(serde_json::Value::from).collect::<Vec<_>>()
            }),
            Condition::Or(items) => json!({
                "or": items.into_iter().map(serde_json::Value::from).collect::<Vec<_>>()
            }),
            Condition::Unrecognized(raw) => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_shapes() {
        let cond = Condition::from(json!({
            "and": [
                { "eq": ["answers.color", "b"] },
                { "or": [{ "contains": ["answers.tags", 3] }, { "notSet": ["lead.email"] }] }
            ]
        }));
        assert_eq!(
            cond,
            Condition::And(vec![
                Condition::eq("answers.color", "b"),
                Condition::Or(vec![
                    Condition::contains("answers.tags", 3.0),
                    Condition::not_set("lead.email"),
                ]),
            ])
        );
    }

    #[test]
    fn malformed_arguments_are_unrecognized() {
        assert!(matches!(
            Condition::from(json!({ "eq": "answers.color" })),
            Condition::Unrecognized(_)
        ));
        assert!(matches!(
            Condition::from(json!({ "and": { "eq": ["a", 1] } })),
            Condition::Unrecognized(_)
        ));
        assert!(matches!(
            Condition::from(json!({ "gt": ["a", 1] })),
            Condition::Unrecognized(_)
        ));
        assert!(matches!(
            Condition::from(json!("eq")),
            Condition::Unrecognized(_)
        ));
    }

    #[test]
    fn not_set_accepts_a_bare_path() {
        assert_eq!(
            Condition::from(json!({ "notSet": "lead.phone" })),
            Condition::not_set("lead.phone")
        );
    }
}
