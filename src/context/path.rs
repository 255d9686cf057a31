//! Dotted-path access into a [`Value`] tree.
//!
//! A path such as `answers.color` is split on `.` and walked key by key.
//! Reads never fail: a missing key anywhere along the way yields `None`.
//! Writes create whatever structure is missing.

use super::Value;

/// Splits a dotted path into its segments. The empty path has no segments.
pub fn segments(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('.').collect()
    }
}

/// Reads the value at `path`, or `None` if any segment is absent.
pub fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    get_segments(root, &segments(path))
}

/// Segment-level read. Numeric segments index into lists.
pub fn get_segments<'a>(root: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    if segments.is_empty() {
        return None;
    }
    segments.iter().try_fold(root, |node, key| match node {
        Value::Map(map) => map.get(*key),
        Value::List(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Writes `value` at `path`, creating intermediate maps as needed.
///
/// An intermediate that is absent or falsy (`null`, `false`, `0`, `""`) is
/// replaced by an empty map. Lists are kept and indexed by numeric segments.
/// Returns `false` when nothing was written: the empty path, a list index out
/// of range, or a truthy scalar in the way.
pub fn set(root: &mut Value, path: &str, value: Value) -> bool {
    set_segments(root, &segments(path), value)
}

/// Segment-level write. See [`set`].
pub fn set_segments(root: &mut Value, segments: &[&str], value: Value) -> bool {
    let Some((last, parents)) = segments.split_last() else {
        return false;
    };

    let mut node = root;
    if is_falsy(node) {
        *node = Value::map();
    }
    for key in parents {
        let Some(child) = child_slot(node, key) else {
            return false;
        };
        if is_falsy(child) {
            *child = Value::map();
        }
        node = child;
    }

    match child_slot(node, last) {
        Some(slot) => {
            *slot = value;
            true
        }
        None => false,
    }
}

/// The slot `key` names inside `node`. Map keys are created on demand; list
/// slots must already exist.
fn child_slot<'a>(node: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    match node {
        Value::Map(map) => Some(map.entry(key.to_string()).or_insert(Value::Null)),
        Value::List(items) => key.parse::<usize>().ok().and_then(|i| items.get_mut(i)),
        _ => None,
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => *n == 0.0 || n.is_nan(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Whether a looked-up value counts as "set".
///
/// Absent values, `null`, empty lists and whitespace-only strings are unset.
/// Everything else, including `0`, `false` and an empty map, is set.
pub fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::List(items)) => !items.is_empty(),
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}
