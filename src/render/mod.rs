//! The presentation contract.
//!
//! The interpreter never draws anything itself. A presentation layer supplies
//! one [`StepRenderer`] per step kind and turns each [`View`] into output,
//! reading the context but never writing it. User actions go back to the
//! session as [`Intent`](crate::interpreter::Intent)s.

mod text;

pub use text::*;

use crate::context::Context;
use crate::error::RenderError;
use crate::funnel::StepKind;
use crate::interpreter::View;
use ahash::AHashMap;

/// Defines the contract for presenting the views of one step kind.
pub trait StepRenderer: Send + Sync {
    fn step_kind(&self) -> StepKind;
    fn render(&self, view: &View, context: &Context) -> String;
}

/// Maps step kinds to their renderers.
pub struct RendererRegistry {
    renderers: AHashMap<StepKind, Box<dyn StepRenderer>>,
}

pub struct RendererRegistryBuilder {
    renderers: AHashMap<StepKind, Box<dyn StepRenderer>>,
}

impl Default for RendererRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RendererRegistryBuilder {
    /// Starts from the plain-text renderers for every displayable kind.
    pub fn new() -> Self {
        let mut renderers: AHashMap<StepKind, Box<dyn StepRenderer>> = AHashMap::new();
        register_default_renderers(&mut renderers);
        Self { renderers }
    }

    /// Starts with no renderers at all.
    pub fn empty() -> Self {
        Self {
            renderers: AHashMap::new(),
        }
    }

    /// Registers `renderer` for its kind, replacing any previous one.
    pub fn with_renderer(mut self, renderer: Box<dyn StepRenderer>) -> Self {
        self.renderers.insert(renderer.step_kind(), renderer);
        self
    }

    pub fn build(self) -> RendererRegistry {
        RendererRegistry {
            renderers: self.renderers,
        }
    }
}

impl RendererRegistry {
    pub fn builder() -> RendererRegistryBuilder {
        RendererRegistryBuilder::new()
    }

    pub fn has_renderer(&self, kind: StepKind) -> bool {
        self.renderers.contains_key(&kind)
    }

    /// Renders `view`. Halted and done views are handled by the registry itself.
    pub fn render(&self, view: &View, context: &Context) -> Result<String, RenderError> {
        let Some(kind) = view.kind() else {
            return Ok(render_terminal(view));
        };
        let renderer = self
            .renderers
            .get(&kind)
            .ok_or(RenderError::NoRenderer(kind.as_str()))?;
        Ok(renderer.render(view, context))
    }
}
