use super::StepRenderer;
use crate::context::Context;
use crate::funnel::StepKind;
use crate::interpreter::View;
use ahash::AHashMap;
use itertools::Itertools;

/// Defines the plain-text renderers and their registration in one place.
macro_rules! define_text_renderers {
    ( $( ($struct_name:ident, $kind:expr, $render_fn:ident) ),* $(,)? ) => {
        $(
            pub struct $struct_name;
            impl StepRenderer for $struct_name {
                fn step_kind(&self) -> StepKind { $kind }
                fn render(&self, view: &View, context: &Context) -> String {
                    $render_fn(view, context)
                }
            }
        )*

        pub(super) fn register_default_renderers(
            registry: &mut AHashMap<StepKind, Box<dyn StepRenderer>>,
        ) {
            $( registry.insert($kind, Box::new($struct_name)); )*
        }
    };
}

// Router and flow_ref steps are never displayed, so they get no renderer.
define_text_renderers! {
    (LandingText, StepKind::Landing, render_landing),
    (SingleChoiceText, StepKind::QuestionSingle, render_single_choice),
    (MultiChoiceText, StepKind::QuestionMulti, render_multi_choice),
    (FormText, StepKind::Form, render_form),
    (ResultsText, StepKind::Results, render_results),
    (EndText, StepKind::End, render_end),
}

fn heading(text: &str) -> String {
    format!("# {}", text)
}

fn render_landing(view: &View, _context: &Context) -> String {
    let View::Landing { variant, .. } = view else {
        return String::new();
    };
    let Some(variant) = variant else {
        return "[Start]".to_string();
    };

    let mut lines = vec![heading(&variant.headline)];
    if let Some(description) = &variant.description {
        lines.push(description.clone());
    }
    if let Some(tip) = &variant.lower_tip {
        lines.push(format!("({})", tip));
    }
    let label = variant.cta.as_ref().map_or("Start", |cta| cta.label.as_str());
    lines.push(format!("[{}]", label));
    lines.join("\n")
}

fn render_single_choice(view: &View, _context: &Context) -> String {
    let View::SingleChoice { step, .. } = view else {
        return String::new();
    };
    let mut lines = vec![heading(&step.question)];
    if let Some(tip) = &step.tip {
        lines.push(tip.clone());
    }
    lines.extend(
        step.options
            .iter()
            .enumerate()
            .map(|(i, option)| format!("  {}) {}", i + 1, option.label)),
    );
    lines.join("\n")
}

fn render_multi_choice(view: &View, _context: &Context) -> String {
    let View::MultiChoice { step, selected, .. } = view else {
        return String::new();
    };
    let mut lines = vec![heading(&step.question)];
    if let Some(tip) = &step.tip {
        lines.push(tip.clone());
    }
    lines.extend(step.options.iter().enumerate().map(|(i, option)| {
        let mark = if selected.contains(&option.id) { "x" } else { " " };
        format!("  [{}] {}) {}", mark, i + 1, option.label)
    }));
    lines.push("[Next]".to_string());
    lines.join("\n")
}

fn render_form(view: &View, context: &Context) -> String {
    let View::Form { step, .. } = view else {
        return String::new();
    };
    let mut lines = vec![heading(&step.question)];
    for field in &step.fields {
        let marker = if field.required { " *" } else { "" };
        // Show what is already bound so a revisit reads as a correction.
        let current = field
            .bind
            .as_deref()
            .and_then(|path| context.get(path))
            .and_then(|value| value.as_str())
            .filter(|s| !s.is_empty())
            .or(field.placeholder.as_deref())
            .map(|hint| format!(" ({})", hint))
            .unwrap_or_default();
        lines.push(format!("  {}{}{}", field.label, marker, current));
    }
    lines.push(format!("[{}]", step.cta.as_deref().unwrap_or("Next")));
    lines.join("\n")
}

fn render_results(view: &View, _context: &Context) -> String {
    match view {
        View::Loading { headline, .. } => heading(headline),
        View::Results { outcome, .. } => {
            let mut text = heading(&outcome.headline);
            if !outcome.body.is_empty() {
                text.push('\n');
                text.push_str(&outcome.body);
            }
            if let Some(items) = outcome.data.as_list() {
                text.push('\n');
                text.push_str(&items.iter().map(|item| format!("  - {}", item)).join("\n"));
            }
            text
        }
        _ => String::new(),
    }
}

fn render_end(view: &View, _context: &Context) -> String {
    let View::End { step, .. } = view else {
        return String::new();
    };
    let mut lines = vec![heading(step.title.as_deref().unwrap_or("Done"))];
    if let Some(body) = &step.body {
        lines.push(body.clone());
    }
    lines.join("\n")
}

/// Text for the views that belong to no step kind.
pub(super) fn render_terminal(view: &View) -> String {
    match view {
        View::Halted(error) => format!("Error: {}", error),
        _ => heading("Done"),
    }
}
