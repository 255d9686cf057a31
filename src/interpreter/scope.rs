use crate::funnel::{Funnel, Step};

/// Record of an active sub-flow and where to go when it exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFrame {
    pub flow_id: String,
    pub return_step_id: String,
}

/// Call stack of active sub-flows. The top is the innermost flow; an empty
/// stack means the session is in the funnel's top-level scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowStack {
    frames: Vec<ScopeFrame>,
}

impl FlowStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: ScopeFrame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<ScopeFrame> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&ScopeFrame> {
        self.frames.last()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Frames from outermost to innermost.
    pub fn frames(&self) -> &[ScopeFrame] {
        &self.frames
    }
}

impl Funnel {
    /// Finds the step named `step_id` for the scope described by `stack`.
    ///
    /// Only two scopes are consulted: the innermost active flow, then the
    /// top-level steps. Intermediate ancestor flows are never searched.
    pub fn resolve(&self, step_id: &str, stack: &FlowStack) -> Option<&Step> {
        stack
            .top()
            .and_then(|frame| self.flows.get(&frame.flow_id))
            .and_then(|flow| flow.steps.get(step_id))
            .or_else(|| self.steps.get(step_id))
    }
}
