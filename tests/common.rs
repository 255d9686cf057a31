//! Common test utilities for building funnels and sessions.
use annai::prelude::*;

/// Landing page followed by one single-choice question with two end screens.
///
/// Picking "Blue" jumps straight to `end1`; "Red" falls back to the step's `next`.
#[allow(dead_code)]
pub const COLOR_FUNNEL_JSON: &str = r#"{
    "start": "land",
    "steps": {
        "land": {
            "type": "landing",
            "next": "q1",
            "variants": [
                { "headline": "Find your color", "cta": { "label": "Go" } }
            ]
        },
        "q1": {
            "type": "question_single",
            "question": "Which color?",
            "bind": "answers.color",
            "next": "end0",
            "options": [
                { "id": "r", "label": "Red" },
                { "id": "b", "label": "Blue", "next": "end1" }
            ]
        },
        "end0": { "type": "end", "title": "Red it is" },
        "end1": { "type": "end", "title": "Blue it is" }
    }
}"#;

/// A lead-capture funnel exercising every step kind.
///
/// ```text
/// land -> interests (multi) -> check (router)
///   check: interests contains "pro"         -> pro_ref (flow_ref contact) -> score
///          answers.budget not set           -> budget (single) -> check
///          otherwise                        -> score
/// contact flow: details (form, onSubmit "__end__")
/// score (router): lead.email set & budget == "high" -> results, else -> bye
/// ```
#[allow(dead_code)]
pub const LEAD_FUNNEL_JSON: &str = r#"{
    "start": "land",
    "steps": {
        "land": {
            "type": "landing",
            "next": "interests",
            "variantStrategy": "random",
            "variants": [
                { "headline": "A", "description": "first" },
                { "headline": "B", "lowerTip": "second" },
                { "headline": "C" }
            ]
        },
        "interests": {
            "type": "question_multi",
            "question": "What are you into?",
            "bind": "answers.interests",
            "preselect": ["basic"],
            "next": "check",
            "options": [
                { "id": "basic", "label": "Basics" },
                { "id": "pro", "label": "Pro features" },
                { "id": "api", "label": "API access" }
            ]
        },
        "check": {
            "type": "router",
            "routes": [
                { "when": { "contains": ["answers.interests", "pro"] }, "to": "pro_ref" },
                { "when": { "notSet": ["answers.budget"] }, "to": "budget" }
            ],
            "defaultNext": "score"
        },
        "budget": {
            "type": "question_single",
            "question": "Budget?",
            "bind": "answers.budget",
            "next": "check",
            "options": [
                { "id": "low", "label": "Small" },
                { "id": "high", "label": "Large", "value": "high" }
            ]
        },
        "pro_ref": { "type": "flow_ref", "flowId": "contact", "next": "score" },
        "score": {
            "type": "router",
            "routes": [
                {
                    "when": { "and": [
                        { "eq": ["answers.budget", "high"] },
                        { "or": [{ "notSet": ["lead.email"] }, { "eq": ["lead.vip", "yes"] }] }
                    ] },
                    "to": "bye"
                }
            ],
            "defaultNext": "matches"
        },
        "matches": { "type": "results", "loading": { "headline": "Crunching numbers" } },
        "bye": { "type": "end", "title": "Thanks", "body": "We will be in touch." }
    },
    "flows": {
        "contact": {
            "start": "details",
            "steps": {
                "details": {
                    "type": "form",
                    "question": "How can we reach you?",
                    "cta": "Send",
                    "fields": [
                        { "id": "name", "label": "Name", "bind": "lead.name", "required": true },
                        { "id": "email", "label": "Email", "bind": "lead.email", "required": true },
                        { "id": "company", "label": "Company", "placeholder": "optional" }
                    ],
                    "onSubmit": { "next": "__end__" }
                }
            }
        }
    }
}"#;

#[allow(dead_code)]
pub fn color_funnel() -> Funnel {
    Funnel::from_json(COLOR_FUNNEL_JSON).expect("color funnel fixture should parse")
}

#[allow(dead_code)]
pub fn lead_funnel() -> Funnel {
    Funnel::from_json(LEAD_FUNNEL_JSON).expect("lead funnel fixture should parse")
}

/// A session with a fixed variant seed and no results delay.
#[allow(dead_code)]
pub fn seeded_session(funnel: Funnel) -> Session {
    let config = SessionConfig {
        variant_seed: Some(42),
        results_delay_ms: 0,
        ..Default::default()
    };
    Session::builder(funnel).config(config).build()
}

/// Builds a funnel from an inline `steps` object, starting at `start`.
#[allow(dead_code)]
pub fn funnel_from(start: &str, steps: serde_json::Value) -> Funnel {
    Funnel::from_value(serde_json::json!({ "start": start, "steps": steps }))
        .expect("inline funnel should parse")
}
