//! Property-based tests for the context accessor and the session.
mod common;
use annai::prelude::*;
use common::*;
use proptest::prelude::*;

/// Dotted paths of one to four alphabetic segments.
fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,6}", 1..=4).prop_map(|segments| segments.join("."))
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::from),
        "[ a-z]{0,8}".prop_map(Value::from),
    ]
}

fn is_falsy_scalar(value: &Value) -> bool {
    match value {
        Value::Number(n) => *n == 0.0,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn intent_strategy() -> impl Strategy<Value = Intent> {
    let option_ids = prop::sample::select(vec!["basic", "pro", "api", "low", "high", "zzz"]);
    let steps = prop::sample::select(vec!["land", "check", "budget", "pro_ref", "nowhere"]);
    prop_oneof![
        Just(Intent::Continue),
        Just(Intent::Confirm),
        option_ids.clone().prop_map(Intent::select),
        option_ids.prop_map(Intent::toggle),
        steps.prop_map(Intent::redirect),
        ("[a-z ]{0,5}", "[a-z@.]{0,8}")
            .prop_map(|(name, email)| Intent::submit([("name", name), ("email", email)])),
    ]
}

proptest! {
    #[test]
    fn test_set_then_get_returns_value(
        earlier in prop::collection::vec((path_strategy(), scalar_strategy()), 0..6),
        path in path_strategy(),
        value in scalar_strategy(),
    ) {
        let mut context = Context::new();
        for (p, v) in earlier {
            context.set(&p, v);
        }
        // A truthy scalar on the way to `path` blocks the write.
        let segments: Vec<&str> = path.split('.').collect();
        prop_assume!((1..segments.len()).all(|n| {
            let prefix = segments[..n].join(".");
            !matches!(
                context.get(&prefix),
                Some(Value::Bool(true)) | Some(Value::Number(_)) | Some(Value::String(_))
            ) || context.get(&prefix).is_some_and(is_falsy_scalar)
        }));
        context.set(&path, value.clone());
        prop_assert_eq!(context.get(&path), Some(&value));
    }

    #[test]
    fn test_eq_and_not_set_agree_with_context(path in path_strategy(), value in scalar_strategy()) {
        let mut context = Context::new();
        context.set(&path, value.clone());
        let evaluator = Evaluator::new(&context);

        prop_assert!(evaluator.evaluate(&Condition::eq(&path, value.clone())));
        prop_assert_eq!(
            evaluator.evaluate(&Condition::not_set(&path)),
            !is_set(Some(&value))
        );
    }

    #[test]
    fn test_failed_intents_leave_session_unchanged(
        intents in prop::collection::vec(intent_strategy(), 1..24),
    ) {
        let mut session = seeded_session(lead_funnel());
        for intent in intents {
            let state_before = session.state().clone();
            let view_before = session.view().clone();
            if session.dispatch(intent).is_err() {
                prop_assert_eq!(session.state(), &state_before);
                prop_assert_eq!(session.view(), &view_before);
            }
        }
    }
}
