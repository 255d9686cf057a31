//! The flow interpreter.
//!
//! A [`Session`] owns the execution state of one interaction and is its only
//! mutator. After every change it settles on the next step that needs the
//! user: pass-through steps (`router`, `flow_ref`) are followed immediately,
//! everything else becomes a [`View`] for the presentation layer, which
//! answers with [`Intent`]s.

mod handlers;
mod intent;
mod scope;
mod view;

pub use intent::Intent;
pub use scope::{FlowStack, ScopeFrame};
pub use view::View;

use crate::condition::{Condition, ConditionTrace, Evaluator};
use crate::config::SessionConfig;
use crate::context::{Context, Value};
use crate::error::{FlowError, IntentError, SchemaError};
use crate::funnel::{
    DONE_STEP, EXIT_FLOW, Funnel, IntoFunnel, LandingStep, Step, Variant, first_target,
};
use crate::results::{Outcome, OutcomeProvider, ResultsTicket};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::sync::Arc;

/// Context keys under which landing variants are memoized, per step id.
const VARIANT_REGION: [&str; 2] = ["system", "variant"];

/// The mutable state of one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionState {
    current_step_id: String,
    flow_stack: FlowStack,
    context: Context,
}

impl ExecutionState {
    fn new(start: &str) -> Self {
        Self {
            current_step_id: start.to_string(),
            flow_stack: FlowStack::new(),
            context: Context::new(),
        }
    }

    pub fn current_step_id(&self) -> &str {
        &self.current_step_id
    }

    pub fn flow_stack(&self) -> &FlowStack {
        &self.flow_stack
    }

    pub fn context(&self) -> &Context {
        &self.context
    }
}

/// What a handled intent asks of the session.
enum Advance {
    /// Stay on the current step (e.g. a multi-choice toggle).
    Stay,
    /// Move to the given target; `None` means the step defines none.
    To(Option<String>),
}

pub struct SessionBuilder {
    funnel: Funnel,
    config: SessionConfig,
}

impl SessionBuilder {
    pub fn new(funnel: Funnel) -> Self {
        Self {
            funnel,
            config: SessionConfig::default(),
        }
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Makes `"random"` variant draws reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.variant_seed = Some(seed);
        self
    }

    /// Creates the session and settles on the funnel's first interactive step.
    pub fn build(self) -> Session {
        let rng = match self.config.variant_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut session = Session {
            state: ExecutionState::new(&self.funnel.start),
            funnel: Arc::new(self.funnel),
            config: self.config,
            view: View::Done,
            epoch: 0,
            rng,
            queue: VecDeque::new(),
        };
        session.settle();
        session
    }
}

/// One interaction with a funnel.
pub struct Session {
    funnel: Arc<Funnel>,
    config: SessionConfig,
    state: ExecutionState,
    view: View,
    /// Bumped on every transition; stamps results tickets.
    epoch: u64,
    rng: StdRng,
    queue: VecDeque<Intent>,
}

impl Session {
    pub fn builder(funnel: Funnel) -> SessionBuilder {
        SessionBuilder::new(funnel)
    }

    /// Starts a session with the default configuration.
    pub fn new(funnel: Funnel) -> Self {
        SessionBuilder::new(funnel).build()
    }

    /// Loads a schema from any supported source and starts a session on it.
    pub fn from_schema(
        source: impl IntoFunnel,
        config: SessionConfig,
    ) -> Result<Self, SchemaError> {
        Ok(SessionBuilder::new(source.into_funnel()?)
            .config(config)
            .build())
    }

    pub fn funnel(&self) -> &Funnel {
        &self.funnel
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    pub fn context(&self) -> &Context {
        &self.state.context
    }

    pub fn current_step_id(&self) -> &str {
        &self.state.current_step_id
    }

    pub fn flow_stack(&self) -> &FlowStack {
        &self.state.flow_stack
    }

    /// What should currently be displayed.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Looks `step_id` up in the active scope, falling back to the top level.
    pub fn resolve(&self, step_id: &str) -> Option<&Step> {
        self.funnel.resolve(step_id, &self.state.flow_stack)
    }

    /// Evaluates a condition against the current context.
    pub fn evaluate(&self, condition: &Condition) -> bool {
        self.explain(condition).outcome()
    }

    pub fn explain(&self, condition: &Condition) -> ConditionTrace {
        Evaluator::new(&self.state.context)
            .with_max_depth(self.config.max_condition_depth)
            .explain(condition)
    }

    /// Enters `flow_id`, returning to `return_step_id` when it exits.
    ///
    /// Fails without touching the flow stack if the flow does not exist.
    pub fn enter_flow(&mut self, flow_id: &str, return_step_id: &str) -> Result<&View, FlowError> {
        self.push_flow(flow_id, return_step_id)?;
        self.settle();
        Ok(&self.view)
    }

    /// Leaves the innermost flow. With an empty stack the session moves to the
    /// reserved `done` step.
    pub fn exit_flow(&mut self) -> &View {
        self.pop_flow();
        self.settle();
        &self.view
    }

    /// Returns the variant shown for the landing step `step_id`.
    ///
    /// The first call draws a variant and stores it under
    /// `system.variant.<step_id>`; every later call returns the stored one.
    pub fn select_variant(&mut self, step_id: &str, landing: &LandingStep) -> Option<Variant> {
        let key = [VARIANT_REGION[0], VARIANT_REGION[1], step_id];
        if let Some(memo) = self
            .state
            .context
            .get_segments(&key)
            .filter(|v| !matches!(v, Value::Null))
        {
            match serde_json::from_value::<Variant>(memo.clone().into()) {
                Ok(variant) => return Some(variant),
                Err(e) => log::warn!(
                    "Ignoring unreadable variant memoized for '{}': {}",
                    step_id,
                    e
                ),
            }
        }

        let variant = handlers::draw_variant(landing, &mut self.rng)?.clone();
        match serde_json::to_value(&variant) {
            Ok(json) => self.state.context.set_segments(&key, Value::from(json)),
            Err(e) => log::warn!("Could not memoize variant for '{}': {}", step_id, e),
        }
        log::debug!("Variant '{}' selected for '{}'", variant.headline, step_id);
        Some(variant)
    }

    /// Applies one intent and returns the resulting view.
    ///
    /// On error the session is left exactly as it was.
    pub fn dispatch(&mut self, intent: Intent) -> Result<&View, IntentError> {
        log::debug!(
            "Intent '{}' at step '{}'",
            intent.name(),
            self.state.current_step_id
        );

        match intent {
            Intent::Restart => {
                self.restart();
                return Ok(&self.view);
            }
            Intent::Redirect { step_id } => {
                log::info!("Redirected to '{}'", step_id);
                self.transition(&step_id);
                self.settle();
                return Ok(&self.view);
            }
            _ => {}
        }

        match self.apply(intent)? {
            Advance::Stay => {}
            Advance::To(target) => self.advance(target),
        }
        Ok(&self.view)
    }

    /// Queues an intent for [`drain`](Self::drain).
    pub fn enqueue(&mut self, intent: Intent) {
        self.queue.push_back(intent);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Applies queued intents in order, one at a time. Intents that fail are
    /// skipped; their errors are returned in order.
    pub fn drain(&mut self) -> Vec<IntentError> {
        let mut errors = Vec::new();
        while let Some(intent) = self.queue.pop_front() {
            if let Err(e) = self.dispatch(intent) {
                log::debug!("Queued intent rejected: {}", e);
                errors.push(e);
            }
        }
        errors
    }

    /// Shows `outcome` for the results step that issued `ticket`.
    ///
    /// Returns `None` and changes nothing if the session has moved on since
    /// the ticket was issued.
    pub fn complete_results(&mut self, ticket: &ResultsTicket, outcome: Outcome) -> Option<&View> {
        let current = matches!(&self.view, View::Loading { ticket: active, .. } if active == ticket);
        if !current {
            log::debug!(
                "Discarding stale results for step '{}'",
                ticket.step_id()
            );
            return None;
        }
        self.view = View::Results {
            step_id: ticket.step_id().to_string(),
            outcome,
        };
        Some(&self.view)
    }

    /// Fetches results for the current loading view from `provider`.
    /// Does nothing unless a results step is loading.
    pub fn fetch_results(&mut self, provider: &dyn OutcomeProvider) -> Option<&View> {
        let View::Loading { ticket, .. } = &self.view else {
            return None;
        };
        let ticket = ticket.clone();
        let outcome = provider.fetch(&self.state.context);
        self.complete_results(&ticket, outcome)
    }

    fn restart(&mut self) {
        log::info!("Restarting session at '{}'", self.funnel.start);
        self.state = ExecutionState::new(&self.funnel.start);
        self.queue.clear();
        self.epoch += 1;
        self.settle();
    }

    /// Runs the handler for the active view.
    fn apply(&mut self, intent: Intent) -> Result<Advance, IntentError> {
        let context = &mut self.state.context;
        match (&mut self.view, intent) {
            (View::Halted(error), _) => Err(IntentError::Halted(error.clone())),
            (View::Done, _) | (View::End { .. }, _) => Err(IntentError::Finished),

            (View::Landing { step, .. }, Intent::Continue) => {
                Ok(Advance::To(Some(step.next.clone())))
            }

            (View::SingleChoice { step_id, step }, Intent::Select { option_id }) => {
                let option = step.option(&option_id).ok_or_else(|| IntentError::UnknownOption {
                    step_id: step_id.clone(),
                    option_id: option_id.clone(),
                })?;
                if let Some(path) = &step.bind {
                    let value = option
                        .value
                        .clone()
                        .unwrap_or_else(|| Value::String(option.id.clone()));
                    context.set(path, value);
                }
                Ok(Advance::To(
                    first_target(option.next.as_deref(), step.next.as_deref()).map(str::to_string),
                ))
            }

            (
                View::MultiChoice {
                    step_id,
                    step,
                    selected,
                },
                Intent::Toggle { option_id },
            ) => {
                if step.option(&option_id).is_none() {
                    return Err(IntentError::UnknownOption {
                        step_id: step_id.clone(),
                        option_id,
                    });
                }
                handlers::toggle(selected, &option_id);
                Ok(Advance::Stay)
            }

            (View::MultiChoice { step, selected, .. }, Intent::Confirm) => {
                if let Some(path) = &step.bind {
                    context.set(path, Value::from(selected.clone()));
                }
                Ok(Advance::To(Some(step.next.clone())))
            }

            (View::Form { step, .. }, Intent::Submit { values }) => {
                handlers::validate_form(step, &values)?;
                handlers::bind_form(step, &values, context);
                let on_submit = step.on_submit.as_ref().and_then(|s| s.next.as_deref());
                Ok(Advance::To(
                    first_target(on_submit, step.next.as_deref()).map(str::to_string),
                ))
            }

            (view, intent) => Err(IntentError::UnexpectedIntent {
                intent: intent.name(),
                step_id: view.step_id().unwrap_or_default().to_string(),
                kind: view.kind().map_or("", |k| k.as_str()),
            }),
        }
    }

    /// Follows `target`, or halts if the step named none.
    fn advance(&mut self, target: Option<String>) {
        match target.filter(|t| !t.is_empty()) {
            Some(target) => {
                self.transition(&target);
                self.settle();
            }
            None => {
                let error = FlowError::MissingTarget {
                    step_id: self.state.current_step_id.clone(),
                };
                self.halt(error);
            }
        }
    }

    /// Moves to `target`, treating the exit sentinel as "leave the current flow".
    fn transition(&mut self, target: &str) {
        if target == EXIT_FLOW {
            self.pop_flow();
        } else {
            self.move_to(target);
        }
    }

    fn move_to(&mut self, step_id: &str) {
        log::debug!(
            "Transition '{}' -> '{}'",
            self.state.current_step_id,
            step_id
        );
        self.state.current_step_id = step_id.to_string();
        self.epoch += 1;
    }

    fn push_flow(&mut self, flow_id: &str, return_step_id: &str) -> Result<(), FlowError> {
        let start = self
            .funnel
            .flow(flow_id)
            .map(|flow| flow.start.clone())
            .ok_or_else(|| FlowError::UnknownFlow {
                flow_id: flow_id.to_string(),
            })?;
        self.state.flow_stack.push(ScopeFrame {
            flow_id: flow_id.to_string(),
            return_step_id: return_step_id.to_string(),
        });
        log::info!(
            "Entered flow '{}' (depth {}), returning to '{}'",
            flow_id,
            self.state.flow_stack.depth(),
            return_step_id
        );
        self.move_to(&start);
        Ok(())
    }

    fn pop_flow(&mut self) {
        match self.state.flow_stack.pop() {
            Some(frame) => {
                log::info!(
                    "Exited flow '{}', returning to '{}'",
                    frame.flow_id,
                    frame.return_step_id
                );
                self.move_to(&frame.return_step_id);
            }
            None => {
                log::info!("Exited the top-level flow");
                self.move_to(DONE_STEP);
            }
        }
    }

    fn halt(&mut self, error: FlowError) {
        log::warn!("Session halted: {}", error);
        self.view = View::Halted(error);
    }

    /// Follows pass-through steps until one needs the user, then stores its view.
    fn settle(&mut self) {
        let funnel = Arc::clone(&self.funnel);
        let mut hops = 0;

        loop {
            let step_id = self.state.current_step_id.clone();
            let Some(step) = funnel.resolve(&step_id, &self.state.flow_stack) else {
                if step_id == DONE_STEP {
                    log::info!("Funnel finished");
                    self.view = View::Done;
                } else {
                    self.halt(FlowError::UnresolvedStep { step_id });
                }
                return;
            };

            let passes_through = matches!(step, Step::FlowRef(_) | Step::Router(_));
            if passes_through && hops >= self.config.max_pass_through {
                self.halt(FlowError::PassThroughLimit {
                    step_id,
                    limit: self.config.max_pass_through,
                });
                return;
            }

            self.view = match step {
                Step::FlowRef(flow_ref) => {
                    if let Err(e) = self.push_flow(&flow_ref.flow_id, &flow_ref.next) {
                        self.halt(e);
                        return;
                    }
                    hops += 1;
                    continue;
                }
                Step::Router(router) => {
                    let target = handlers::route(
                        &step_id,
                        router,
                        &self.state.context,
                        self.config.max_condition_depth,
                    );
                    match target.filter(|t| !t.is_empty()) {
                        Some(target) => self.transition(&target),
                        None => {
                            self.halt(FlowError::MissingTarget { step_id });
                            return;
                        }
                    }
                    hops += 1;
                    continue;
                }
                Step::Landing(landing) => {
                    let variant = self.select_variant(&step_id, landing);
                    View::Landing {
                        step_id,
                        step: landing.clone(),
                        variant,
                    }
                }
                Step::QuestionSingle(question) => View::SingleChoice {
                    step_id,
                    step: question.clone(),
                },
                Step::QuestionMulti(question) => View::MultiChoice {
                    selected: handlers::initial_selection(question),
                    step_id,
                    step: question.clone(),
                },
                Step::Form(form) => View::Form {
                    step_id,
                    step: form.clone(),
                },
                Step::Results(results) => {
                    let headline = results
                        .loading
                        .as_ref()
                        .and_then(|l| l.headline.clone())
                        .unwrap_or_else(|| "Loading…".to_string());
                    View::Loading {
                        ticket: ResultsTicket::new(&step_id, self.epoch),
                        step_id,
                        headline,
                    }
                }
                Step::End(end) => View::End {
                    step_id,
                    step: end.clone(),
                },
                Step::Unsupported { kind } => {
                    self.halt(FlowError::UnsupportedStepKind {
                        step_id,
                        kind: kind.clone(),
                    });
                    return;
                }
            };
            log::debug!("Settled on '{}'", self.state.current_step_id);
            return;
        }
    }
}
