//! Per-kind step logic that does not need the whole session.

use crate::condition::Evaluator;
use crate::context::Context;
use crate::error::{MissingField, ValidationFailure};
use crate::funnel::{FormStep, LandingStep, MultiChoiceStep, RouterStep, Variant};
use crate::trace::TraceFormatter;
use ahash::AHashMap;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Picks a landing variant: uniformly under the `"random"` strategy, the
/// first one otherwise.
pub(super) fn draw_variant<'a, R: Rng + ?Sized>(
    landing: &'a LandingStep,
    rng: &mut R,
) -> Option<&'a Variant> {
    match landing.variant_strategy.as_deref() {
        Some("random") => landing.variants.choose(rng),
        _ => landing.variants.first(),
    }
}

/// Returns the target of the first route whose condition holds, falling back
/// to the router's default.
pub(super) fn route(
    step_id: &str,
    router: &RouterStep,
    context: &Context,
    max_depth: usize,
) -> Option<String> {
    let evaluator = Evaluator::new(context).with_max_depth(max_depth);
    for (index, route) in router.routes.iter().enumerate() {
        let trace = evaluator.explain(&route.when);
        log::trace!(
            "Router '{}' route #{} -> '{}': {}",
            step_id,
            index,
            route.to,
            TraceFormatter::format_trace(&trace)
        );
        if trace.outcome() {
            log::debug!(
                "Router '{}' took route #{} to '{}' because {}",
                step_id,
                index,
                route.to,
                TraceFormatter::format_trace(&trace)
            );
            return Some(route.to.clone());
        }
    }
    log::debug!(
        "Router '{}' matched no route, using default {:?}",
        step_id,
        router.default_next
    );
    router.default_next.clone()
}

/// Initial multi-choice selection, seeded from `preselect` without duplicates.
pub(super) fn initial_selection(step: &MultiChoiceStep) -> Vec<String> {
    let mut selected: Vec<String> = Vec::with_capacity(step.preselect.len());
    for id in &step.preselect {
        if !selected.contains(id) {
            selected.push(id.clone());
        }
    }
    selected
}

pub(super) fn toggle(selected: &mut Vec<String>, option_id: &str) {
    if let Some(pos) = selected.iter().position(|id| id == option_id) {
        selected.remove(pos);
    } else {
        selected.push(option_id.to_string());
    }
}

/// Checks every required field before anything is written. A required field
/// is missing when it was not submitted or is the empty string.
pub(super) fn validate_form(
    form: &FormStep,
    values: &AHashMap<String, String>,
) -> Result<(), ValidationFailure> {
    let missing: Vec<MissingField> = form
        .fields
        .iter()
        .filter(|field| field.required)
        .filter(|field| values.get(&field.id).is_none_or(|v| v.is_empty()))
        .map(|field| MissingField {
            id: field.id.clone(),
            label: field.label.clone(),
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure { missing })
    }
}

/// Writes every bound field. Fields that were not submitted bind as `""`.
pub(super) fn bind_form(form: &FormStep, values: &AHashMap<String, String>, context: &mut Context) {
    for field in &form.fields {
        if let Some(path) = &field.bind {
            let value = values.get(&field.id).cloned().unwrap_or_default();
            context.set(path, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Value;
    use crate::funnel::FormField;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn field(id: &str, required: bool) -> FormField {
        FormField {
            id: id.to_string(),
            label: id.to_uppercase(),
            placeholder: None,
            required,
            bind: Some(format!("lead.{}", id)),
        }
    }

    fn form() -> FormStep {
        FormStep {
            question: "Contact".to_string(),
            fields: vec![field("name", true), field("email", true), field("note", false)],
            cta: None,
            on_submit: None,
            next: Some("thanks".to_string()),
        }
    }

    #[test]
    fn validation_lists_every_missing_field() {
        let values: AHashMap<String, String> =
            [("name".to_string(), String::new())].into_iter().collect();
        let failure = validate_form(&form(), &values).unwrap_err();
        let ids: Vec<_> = failure.missing.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["name", "email"]);
        assert_eq!(failure.to_string(), "Required: NAME, EMAIL");
    }

    #[test]
    fn whitespace_counts_as_a_value() {
        let values: AHashMap<String, String> = [
            ("name".to_string(), "   ".to_string()),
            ("email".to_string(), " ".to_string()),
        ]
        .into_iter()
        .collect();
        assert!(validate_form(&form(), &values).is_ok());
    }

    #[test]
    fn optional_fields_bind_empty_strings() {
        let values: AHashMap<String, String> = [
            ("name".to_string(), "Ada".to_string()),
            ("email".to_string(), "ada@example.com".to_string()),
        ]
        .into_iter()
        .collect();
        assert!(validate_form(&form(), &values).is_ok());

        let mut context = Context::new();
        bind_form(&form(), &values, &mut context);
        assert_eq!(context.get("lead.name"), Some(&Value::from("Ada")));
        assert_eq!(context.get("lead.note"), Some(&Value::from("")));
    }

    #[test]
    fn toggling_twice_removes_the_option() {
        let mut selected = vec!["a".to_string()];
        toggle(&mut selected, "b");
        toggle(&mut selected, "a");
        assert_eq!(selected, vec!["b".to_string()]);
    }

    #[test]
    fn non_random_strategy_picks_the_first_variant() {
        let landing = LandingStep {
            next: "q1".to_string(),
            variants: vec![
                Variant {
                    headline: "A".to_string(),
                    ..Default::default()
                },
                Variant {
                    headline: "B".to_string(),
                    ..Default::default()
                },
            ],
            variant_strategy: Some("weighted".to_string()),
        };
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..5 {
            assert_eq!(draw_variant(&landing, &mut rng).unwrap().headline, "A");
        }
    }
}
