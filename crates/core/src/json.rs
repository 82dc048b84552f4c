//! Structural JSON Path Helpers
//!
//! Read/write/remove at a dot-separated path inside a `serde_json::Value`
//! document. `set_path` creates missing intermediate objects and only ever
//! touches the addressed path, so sibling subsections of a free-form config
//! document survive a focused update.

use serde_json::{Map, Value};

/// Read the value at a dot-separated path. `None` when any segment is
/// missing or a non-object is hit mid-path.
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Write a value at a dot-separated path, creating intermediate objects as
/// needed. An intermediate that exists but is not an object is replaced by
/// one.
pub fn set_path(root: &mut Value, path: &str, value: Value) {
    if !root.is_object() {
        *root = Value::Object(Map::new());
    }
    let mut segments = path.split('.').peekable();
    let mut current = root;
    while let Some(segment) = segments.next() {
        let Some(object) = current.as_object_mut() else {
            return;
        };
        if segments.peek().is_none() {
            object.insert(segment.to_string(), value);
            return;
        }
        let child = object
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !child.is_object() {
            *child = Value::Object(Map::new());
        }
        current = child;
    }
}

/// Remove and return the value at a dot-separated path. Missing paths are a
/// no-op returning `None`; empty parent objects are left in place.
pub fn remove_path(root: &mut Value, path: &str) -> Option<Value> {
    let (parent_path, leaf) = match path.rsplit_once('.') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, path),
    };
    let parent = match parent_path {
        Some(p) => get_path_mut(root, p)?,
        None => root,
    };
    parent.as_object_mut()?.remove(leaf)
}

fn get_path_mut<'a>(root: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object_mut()?.get_mut(segment)?;
    }
    Some(current)
}
