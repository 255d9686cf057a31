//! # Annai - Funnel Flow Interpreter
//!
//! **Annai** interprets declarative, JSON-described branching questionnaires
//! ("funnels"). A funnel is a graph of steps (landing pages, questions, forms,
//! routers, results screens) plus named sub-flows that can be entered and
//! returned from. Exactly one step is active at a time; user input advances,
//! branches or ends the flow.
//!
//! ## Core Workflow
//!
//! The crate owns the flow logic and nothing else. Drawing screens, collecting
//! input and computing real results are left to the caller:
//!
//! 1.  **Load the Funnel**: Parse JSON with `Funnel::from_json`, or implement
//!     `IntoFunnel` for your own authoring format.
//! 2.  **Start a Session**: `Session::builder(funnel).build()` settles on the
//!     first step that needs the user and exposes it as a `View`.
//! 3.  **Render**: Turn the `View` into output, e.g. with a `RendererRegistry`.
//! 4.  **Dispatch Intents**: Report user actions back as `Intent`s. The session
//!     writes bound answers into its `Context`, evaluates router conditions,
//!     enters and leaves sub-flows, and settles on the next view.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use annai::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let funnel = Funnel::from_json(r#"{
//!         "start": "land",
//!         "steps": {
//!             "land": { "type": "landing", "next": "q1",
//!                       "variants": [{ "headline": "Find your color" }] },
//!             "q1": { "type": "question_single", "question": "Pick one",
//!                     "bind": "answers.color", "next": "end0",
//!                     "options": [{ "id": "r", "label": "Red" },
//!                                 { "id": "b", "label": "Blue", "next": "end1" }] },
//!             "end0": { "type": "end", "title": "Red it is" },
//!             "end1": { "type": "end", "title": "Blue it is" }
//!         }
//!     }"#)?;
//!
//!     let renderers = RendererRegistry::builder().build();
//!     let mut session = Session::builder(funnel).seed(7).build();
//!     println!("{}", renderers.render(session.view(), session.context())?);
//!
//!     session.dispatch(Intent::Continue)?;
//!     session.dispatch(Intent::select("b"))?;
//!
//!     assert_eq!(session.context().get("answers.color"), Some(&Value::from("b")));
//!     println!("{}", renderers.render(session.view(), session.context())?);
//!     Ok(())
//! }
//! ```

pub mod condition;
pub mod config;
pub mod context;
pub mod error;
pub mod funnel;
pub mod interpreter;
pub mod prelude;
pub mod render;
pub mod results;
pub mod trace;
