use ahash::AHashMap;

/// A user action reported by the presentation layer.
///
/// Intents are the only way a collaborator can change a session. They are
/// applied one at a time, either directly with
/// [`Session::dispatch`](super::Session::dispatch) or through the session's
/// FIFO queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Press the call to action of a landing step.
    Continue,
    /// Pick an option of a single-choice question.
    Select { option_id: String },
    /// Flip an option of a multi-choice question on or off.
    Toggle { option_id: String },
    /// Accept the current multi-choice selection.
    Confirm,
    /// Submit a form; `values` maps field ids to the entered text.
    Submit { values: AHashMap<String, String> },
    /// Jump to a step from outside the flow graph. Also clears a halted state.
    Redirect { step_id: String },
    /// Start over with an empty context.
    Restart,
}

impl Intent {
    pub fn select(option_id: &str) -> Self {
        Intent::Select {
            option_id: option_id.to_string(),
        }
    }

    pub fn toggle(option_id: &str) -> Self {
        Intent::Toggle {
            option_id: option_id.to_string(),
        }
    }

    pub fn redirect(step_id: &str) -> Self {
        Intent::Redirect {
            step_id: step_id.to_string(),
        }
    }

    pub fn submit<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Intent::Submit {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Intent::Continue => "continue",
            Intent::Select { .. } => "select",
            Intent::Toggle { .. } => "toggle",
            Intent::Confirm => "confirm",
            Intent::Submit { .. } => "submit",
            Intent::Redirect { .. } => "redirect",
            Intent::Restart => "restart",
        }
    }
}
