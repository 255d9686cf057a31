//! Tests for router condition semantics.
mod common;
use annai::prelude::*;
use serde_json::json;

fn context() -> Context {
    Context::from(json!({
        "answers": {
            "color": "b",
            "count": 3,
            "tags": ["red", 7, true],
            "empty": [],
            "blank": "   ",
            "zero": 0,
            "off": false
        },
        "lead": { "email": "ada@example.com" }
    }))
}

fn eval(condition: serde_json::Value) -> bool {
    let ctx = context();
    Evaluator::new(&ctx).evaluate(&Condition::from(condition))
}

#[test]
fn test_eq_is_strict() {
    assert!(eval(json!({ "eq": ["answers.color", "b"] })));
    assert!(eval(json!({ "eq": ["answers.count", 3] })));
    assert!(eval(json!({ "eq": ["answers.off", false] })));

    // No coercion between strings, numbers and booleans.
    assert!(!eval(json!({ "eq": ["answers.count", "3"] })));
    assert!(!eval(json!({ "eq": ["answers.zero", false] })));
    assert!(!eval(json!({ "eq": ["answers.color", "B"] })));
}

#[test]
fn test_eq_against_unset_paths() {
    assert!(!eval(json!({ "eq": ["answers.missing", "b"] })));
    assert!(!eval(json!({ "eq": ["answers.missing", null] })));
}

#[test]
fn test_eq_compares_structures() {
    assert!(eval(json!({ "eq": ["answers.tags", ["red", 7, true]] })));
    assert!(!eval(json!({ "eq": ["answers.tags", ["red", 7]] })));
}

#[test]
fn test_contains() {
    assert!(eval(json!({ "contains": ["answers.tags", "red"] })));
    assert!(eval(json!({ "contains": ["answers.tags", 7] })));
    assert!(eval(json!({ "contains": ["answers.tags", true] })));
    assert!(!eval(json!({ "contains": ["answers.tags", "7"] })));
    assert!(!eval(json!({ "contains": ["answers.empty", "red"] })));

    // Only lists contain anything; substrings do not count.
    assert!(!eval(json!({ "contains": ["answers.color", "b"] })));
    assert!(!eval(json!({ "contains": ["answers.missing", "red"] })));
}

#[test]
fn test_not_set() {
    assert!(eval(json!({ "notSet": ["answers.missing"] })));
    assert!(eval(json!({ "notSet": ["answers.empty"] })));
    assert!(eval(json!({ "notSet": ["answers.blank"] })));
    assert!(eval(json!({ "notSet": "answers.missing" })));

    assert!(!eval(json!({ "notSet": ["answers.zero"] })));
    assert!(!eval(json!({ "notSet": ["answers.off"] })));
    assert!(!eval(json!({ "notSet": ["lead.email"] })));
}

#[test]
fn test_and_or() {
    assert!(eval(json!({ "and": [
        { "eq": ["answers.color", "b"] },
        { "contains": ["answers.tags", "red"] }
    ] })));
    assert!(!eval(json!({ "and": [
        { "eq": ["answers.color", "b"] },
        { "notSet": ["lead.email"] }
    ] })));
    assert!(eval(json!({ "or": [
        { "notSet": ["lead.email"] },
        { "eq": ["answers.count", 3] }
    ] })));
    assert!(!eval(json!({ "or": [
        { "notSet": ["lead.email"] },
        { "eq": ["answers.count", 4] }
    ] })));
}

#[test]
fn test_empty_groups() {
    assert!(eval(json!({ "and": [] })));
    assert!(!eval(json!({ "or": [] })));
}

#[test]
fn test_unrecognized_shapes_fail_closed() {
    assert!(!eval(json!({ "gt": ["answers.count", 1] })));
    assert!(!eval(json!({})));
    assert!(!eval(json!("answers.color")));
    assert!(!eval(json!(null)));
    assert!(!eval(json!({ "eq": "answers.color" })));
    assert!(!eval(json!({ "eq": [5, "b"] })));
    assert!(!eval(json!({ "and": "nope" })));

    // An unrecognized child makes an `and` false but leaves an `or` to its siblings.
    assert!(!eval(json!({ "and": [{ "eq": ["answers.color", "b"] }, { "xor": [] }] })));
    assert!(eval(json!({ "or": [{ "xor": [] }, { "eq": ["answers.color", "b"] }] })));
}

#[test]
fn test_unrecognized_condition_keeps_raw_shape() {
    let raw = json!({ "gt": ["answers.count", 1] });
    let condition = Condition::from(raw.clone());
    assert_eq!(condition, Condition::Unrecognized(raw.clone()));
    assert_eq!(serde_json::Value::from(condition), raw);
}

#[test]
fn test_short_circuit_skips_remaining_children() {
    let ctx = context();
    let trace = Evaluator::new(&ctx).explain(&Condition::And(vec![
        Condition::not_set("lead.email"),
        Condition::eq("answers.color", "b"),
    ]));

    let ConditionTrace::All { children, outcome } = trace else {
        panic!("expected an AND trace");
    };
    assert!(!outcome);
    assert!(matches!(children[1], ConditionTrace::NotEvaluated));
}

#[test]
fn test_depth_limit_is_false() {
    let ctx = context();
    let nested = Condition::And(vec![Condition::And(vec![Condition::eq("answers.color", "b")])]);

    assert!(Evaluator::new(&ctx).evaluate(&nested));
    assert!(!Evaluator::new(&ctx).with_max_depth(2).evaluate(&nested));
}

#[test]
fn test_condition_deserializes_inside_routes() {
    let route: Route = serde_json::from_value(json!({
        "when": { "or": [{ "eq": ["answers.color", "b"] }, { "nope": 1 }] },
        "to": "end1"
    }))
    .expect("route should deserialize");

    assert_eq!(route.to, "end1");
    assert!(Evaluator::new(&context()).evaluate(&route.when));
}
