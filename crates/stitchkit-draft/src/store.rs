//! The per-draft shared store.
//!
//! Parts never read each other's point or path maps; the store is the one
//! channel for cross-part data dependencies ("the back writes the armhole
//! length, the sleeve reads it"). It lives exactly as long as one draft and
//! is handed to each part in execution order, which makes it
//! single-writer-sequential without any locking.
//!
//! Reading an absent key is a normal condition - a later part probing
//! whether an earlier one ran - so `get` returns `Option` rather than
//! failing. Every miss is recorded with the part that caused it; the
//! orchestrator escalates recorded misses to a hard error in strict mode
//! and logs them otherwise.

use std::collections::BTreeMap;

use serde::Serialize;
use stitchkit_core::geometry::Path;

/// A value held by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Flag(bool),
    Text(String),
    Path(Path),
    List(Vec<Value>),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(f: bool) -> Self {
        Value::Flag(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Path> for Value {
    fn from(p: Path) -> Self {
        Value::Path(p)
    }
}

/// Key/value state scoped to a single draft.
#[derive(Debug, Default)]
pub struct Store {
    values: BTreeMap<String, Value>,
    reader: String,
    misses: Vec<(String, String)>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record which part subsequent reads should be attributed to.
    pub(crate) fn set_reader(&mut self, part: &str) {
        self.reader = part.to_string();
    }

    /// Write a value, overwriting any earlier write to the same key.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Append to the list at `key`, creating the list if absent. A scalar
    /// already stored under `key` becomes the list's first element.
    pub fn push(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.values.get_mut(key) {
            Some(Value::List(items)) => items.push(value),
            Some(existing) => {
                let first = existing.clone();
                *existing = Value::List(vec![first, value]);
            }
            None => {
                self.values.insert(key.to_string(), Value::List(vec![value]));
            }
        }
    }

    /// Read a value. Absence is normal and recorded, not an error.
    pub fn get(&mut self, key: &str) -> Option<&Value> {
        if !self.values.contains_key(key) {
            self.misses.push((self.reader.clone(), key.to_string()));
            return None;
        }
        self.values.get(key)
    }

    /// Read a numeric value, `None` on absence or kind mismatch.
    pub fn number(&mut self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_number)
    }

    /// Non-recording probe for presence.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Drain the misses recorded since the last call, as (part, key).
    pub(crate) fn take_misses(&mut self) -> Vec<(String, String)> {
        std::mem::take(&mut self.misses)
    }

    /// The stored values, deterministically ordered by key.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }
}
