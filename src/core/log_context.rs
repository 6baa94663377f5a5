//! Structured context for key-value fields
//!
//! This module provides:
//! - `LogContext`: Per-entry structured fields
//! - `LoggerContext`: Ambient fields shared by every logger of a registry
//! - `ContextGuard`: RAII guard for scoped ambient fields

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Key-value fields attached to a single entry
///
/// Fields are kept sorted by key so rendered output is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogContext {
    fields: BTreeMap<String, FieldValue>,
}

impl LogContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field to the context (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy in every field of `other` whose key is not already present
    pub fn merge_missing(&mut self, other: &LogContext) {
        for (key, value) in &other.fields {
            self.fields
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

/// Ambient fields merged into every entry dispatched through a registry
///
/// Cloning shares the underlying storage. Entry-level fields always win
/// over ambient ones.
///
/// # Example
///
/// ```
/// use logger_registry::LoggerContext;
///
/// let ctx = LoggerContext::new();
/// ctx.set("service", "checkout");
/// {
///     let _guard = ctx.scoped("request_id", "req-42");
///     assert_eq!(ctx.len(), 2);
/// }
/// assert_eq!(ctx.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoggerContext {
    fields: Arc<RwLock<BTreeMap<String, FieldValue>>>,
}

impl LoggerContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, overwriting any previous value
    pub fn set<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.write().insert(key.into(), value.into());
    }

    /// Set a field until the returned guard drops, then put back whatever
    /// value it shadowed (or remove it if there was none)
    #[must_use = "the field is reverted as soon as the guard is dropped"]
    pub fn scoped<K, V>(&self, key: K, value: V) -> ContextGuard
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        let previous = self.fields.write().insert(key.clone(), value.into());
        ContextGuard {
            fields: Arc::clone(&self.fields),
            key,
            previous,
        }
    }

    pub fn remove(&self, key: &str) {
        self.fields.write().remove(key);
    }

    pub fn clear(&self) {
        self.fields.write().clear();
    }

    pub fn get(&self, key: &str) -> Option<FieldValue> {
        self.fields.read().get(key).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.read().is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.read().len()
    }

    /// Merge ambient fields into an entry context without overriding it
    pub fn merge_into(&self, log_context: &mut LogContext) {
        let fields = self.fields.read();
        for (key, value) in fields.iter() {
            log_context
                .fields
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
}

/// Reverts its field in the owning `LoggerContext` on drop
///
/// Guards on the same key must drop in reverse creation order, which is
/// what lexical scoping gives.
pub struct ContextGuard {
    fields: Arc<RwLock<BTreeMap<String, FieldValue>>>,
    key: String,
    previous: Option<FieldValue>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let mut fields = self.fields.write();
        match self.previous.take() {
            Some(value) => {
                fields.insert(std::mem::take(&mut self.key), value);
            }
            None => {
                fields.remove(&self.key);
            }
        }
    }
}
