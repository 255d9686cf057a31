pub mod path;
pub mod value;

pub use path::is_set;
pub use value::Value;

use serde::{Deserialize, Serialize};

/// The session's mutable data tree, addressed by dotted paths.
///
/// Region names such as `lead`, `answers`, `api` and `system.variant` are a
/// convention of funnel authors; the accessor itself is generic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    root: Value,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Self { root: Value::map() }
    }

    /// The whole tree.
    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        path::get(&self.root, path)
    }

    pub fn get_segments(&self, segments: &[&str]) -> Option<&Value> {
        path::get_segments(&self.root, segments)
    }

    /// Writes `value` at `path`, creating intermediate maps as needed.
    /// See [`path::set`] for the cases where nothing is written.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        if !path::set(&mut self.root, path, value.into()) {
            log::warn!("Could not write context path '{}'", path);
        }
    }

    /// Writes under explicit segments, for keys that may themselves contain dots.
    pub fn set_segments(&mut self, segments: &[&str], value: impl Into<Value>) {
        if !path::set_segments(&mut self.root, segments, value.into()) {
            log::warn!("Could not write context path {:?}", segments);
        }
    }

    /// Whether the value at `path` counts as set. See [`is_set`].
    pub fn is_set_at(&self, path: &str) -> bool {
        is_set(self.get(path))
    }
}

impl From<serde_json::Value> for Context {
    fn from(value: serde_json::Value) -> Self {
        let mut root = Value::from(value);
        if !matches!(root, Value::Map(_)) {
            root = Value::map();
        }
        Self { root }
    }
}
