use crate::condition::Condition;
use crate::context::Value;
use ahash::AHashMap;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transition target that leaves the current sub-flow instead of naming a step.
pub const EXIT_FLOW: &str = "__end__";

/// Step the session moves to when a flow is exited with an empty flow stack.
pub const DONE_STEP: &str = "done";

/// The complete, immutable definition of a funnel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Funnel {
    /// Identifier of the first step.
    pub start: String,
    /// Top-level (global) steps.
    pub steps: AHashMap<String, Step>,
    /// Named sub-flows, each with its own local steps.
    #[serde(default)]
    pub flows: AHashMap<String, Flow>,
}

/// A named sub-graph of steps that can be entered and returned from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Flow {
    pub start: String,
    #[serde(default)]
    pub steps: AHashMap<String, Step>,
}

/// The known step kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Landing,
    QuestionSingle,
    QuestionMulti,
    Form,
    Router,
    FlowRef,
    Results,
    End,
}

impl StepKind {
    pub const ALL: [StepKind; 8] = [
        StepKind::Landing,
        StepKind::QuestionSingle,
        StepKind::QuestionMulti,
        StepKind::Form,
        StepKind::Router,
        StepKind::FlowRef,
        StepKind::Results,
        StepKind::End,
    ];

    /// The tag used for this kind in funnel JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Landing => "landing",
            StepKind::QuestionSingle => "question_single",
            StepKind::QuestionMulti => "question_multi",
            StepKind::Form => "form",
            StepKind::Router => "router",
            StepKind::FlowRef => "flow_ref",
            StepKind::Results => "results",
            StepKind::End => "end",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the funnel graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Landing(LandingStep),
    QuestionSingle(SingleChoiceStep),
    QuestionMulti(MultiChoiceStep),
    Form(FormStep),
    Router(RouterStep),
    FlowRef(FlowRefStep),
    Results(ResultsStep),
    End(EndStep),
    /// A step whose type tag is not one of the known kinds.
    Unsupported { kind: String },
}

impl Step {
    pub fn kind(&self) -> Option<StepKind> {
        Some(match self {
            Step::Landing(_) => StepKind::Landing,
            Step::QuestionSingle(_) => StepKind::QuestionSingle,
            Step::QuestionMulti(_) => StepKind::QuestionMulti,
            Step::Form(_) => StepKind::Form,
            Step::Router(_) => StepKind::Router,
            Step::FlowRef(_) => StepKind::FlowRef,
            Step::Results(_) => StepKind::Results,
            Step::End(_) => StepKind::End,
            Step::Unsupported { .. } => return None,
        })
    }

    /// The type tag, including unsupported ones.
    pub fn kind_name(&self) -> &str {
        match self {
            Step::Unsupported { kind } => kind,
            other => other.kind().map_or("", |k| k.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for Step {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        fn parse<T: DeserializeOwned, E: de::Error>(raw: serde_json::Value) -> Result<T, E> {
            serde_json::from_value(raw).map_err(E::custom)
        }

        let raw = serde_json::Value::deserialize(deserializer)?;
        let tag = raw
            .get("type")
            .or_else(|| raw.get("kind"))
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();

        let Some(kind) = StepKind::from_tag(&tag) else {
            return Ok(Step::Unsupported { kind: tag });
        };

        Ok(match kind {
            StepKind::Landing => Step::Landing(parse(raw)?),
            StepKind::QuestionSingle => Step::QuestionSingle(parse(raw)?),
            StepKind::QuestionMulti => Step::QuestionMulti(parse(raw)?),
            StepKind::Form => Step::Form(parse(raw)?),
            StepKind::Router => Step::Router(parse(raw)?),
            StepKind::FlowRef => Step::FlowRef(parse(raw)?),
            StepKind::Results => Step::Results(parse(raw)?),
            StepKind::End => Step::End(parse(raw)?),
        })
    }
}

/// Display-only entry step with A/B variants and a single call to action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingStep {
    pub next: String,
    #[serde(default)]
    pub variants: Vec<Variant>,
    /// `"random"` draws a variant uniformly; anything else picks the first.
    pub variant_strategy: Option<String>,
}

/// One alternative presentation of a landing step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    #[serde(default)]
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<CallToAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallToAction {
    #[serde(default)]
    pub label: String,
}

/// A selectable answer of a question step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// Written to the bound path instead of `id` when present.
    pub value: Option<Value>,
    /// Overrides the step's `next` for this option.
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SingleChoiceStep {
    #[serde(default)]
    pub question: String,
    pub tip: Option<String>,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    pub bind: Option<String>,
    pub next: Option<String>,
}

impl SingleChoiceStep {
    pub fn option(&self, option_id: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MultiChoiceStep {
    #[serde(default)]
    pub question: String,
    pub tip: Option<String>,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    /// Option ids selected when the step is entered.
    #[serde(default)]
    pub preselect: Vec<String>,
    pub bind: Option<String>,
    pub next: String,
}

impl MultiChoiceStep {
    pub fn option(&self, option_id: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FormField {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub bind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStep {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
    /// Label of the submit button.
    pub cta: Option<String>,
    pub on_submit: Option<OnSubmit>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OnSubmit {
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Route {
    pub when: Condition,
    pub to: String,
}

/// Pure decision step: picks the first route whose condition holds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterStep {
    #[serde(default)]
    pub routes: Vec<Route>,
    pub default_next: Option<String>,
}

/// Pass-through step that enters a named sub-flow and returns to `next`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowRefStep {
    pub flow_id: String,
    pub next: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResultsStep {
    pub loading: Option<LoadingScreen>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoadingScreen {
    pub headline: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EndStep {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Picks the first non-empty target. Empty identifiers count as absent.
pub fn first_target<'a>(preferred: Option<&'a str>, fallback: Option<&'a str>) -> Option<&'a str> {
    preferred
        .filter(|t| !t.is_empty())
        .or(fallback.filter(|t| !t.is_empty()))
}
