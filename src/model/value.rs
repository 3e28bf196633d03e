//! model::value
//!
//! Open-ended values carried alongside declared model fields.
//!
//! # Design
//!
//! Servers may send keys that the schema does not declare. They are kept
//! in an [`AdditionalProperties`] map so they survive a decode/encode
//! round-trip. Each value is classified into a [`PropertyValue`] variant
//! when decoded. An explicit `null` is kept as [`PropertyValue::Null`] and
//! written back as `null`.
//!
//! The map is ordered (`BTreeMap`) so encoding, display and hashing are
//! deterministic.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde_json::{Map, Number, Value};

use super::JsonKind;

/// A single additional-property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// JSON string
    String(String),
    /// JSON number (integer or float)
    Number(Number),
    /// JSON boolean
    Boolean(bool),
    /// JSON array, kept structurally
    Array(Vec<Value>),
    /// JSON object, kept structurally
    Object(Map<String, Value>),
    /// Explicit JSON `null`
    Null,
}

impl PropertyValue {
    /// Classify a raw JSON value.
    ///
    /// Every JSON value has a variant, so decoding never drops or rejects
    /// an additional property.
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::String(s) => PropertyValue::String(s.clone()),
            Value::Number(n) => PropertyValue::Number(n.clone()),
            Value::Bool(b) => PropertyValue::Boolean(*b),
            Value::Array(items) => PropertyValue::Array(items.clone()),
            Value::Object(map) => PropertyValue::Object(map.clone()),
            Value::Null => PropertyValue::Null,
        }
    }

    /// Build a number value from a float.
    ///
    /// Returns `None` for NaN and infinities, which JSON cannot carry.
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(PropertyValue::Number)
    }

    /// The JSON kind of this value.
    pub fn kind(&self) -> JsonKind {
        match self {
            PropertyValue::String(_) => JsonKind::String,
            PropertyValue::Number(_) => JsonKind::Number,
            PropertyValue::Boolean(_) => JsonKind::Boolean,
            PropertyValue::Array(_) => JsonKind::Array,
            PropertyValue::Object(_) => JsonKind::Object,
            PropertyValue::Null => JsonKind::Null,
        }
    }

    /// Whether this is an explicit `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Get the string if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the boolean if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as an `i64` if it is an integral number in range.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Convert into the generic JSON representation used on the wire.
    pub fn to_value(&self) -> Value {
        match self {
            PropertyValue::String(s) => Value::String(s.clone()),
            PropertyValue::Number(n) => Value::Number(n.clone()),
            PropertyValue::Boolean(b) => Value::Bool(*b),
            PropertyValue::Array(items) => Value::Array(items.clone()),
            PropertyValue::Object(map) => Value::Object(map.clone()),
            PropertyValue::Null => Value::Null,
        }
    }
}

impl Hash for PropertyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            PropertyValue::String(s) => s.hash(state),
            PropertyValue::Number(n) => n.hash(state),
            PropertyValue::Boolean(b) => b.hash(state),
            PropertyValue::Array(items) => {
                items.len().hash(state);
                for item in items {
                    hash_json(item, state);
                }
            }
            PropertyValue::Object(map) => hash_object(map, state),
            PropertyValue::Null => {}
        }
    }
}

/// Hash a generic JSON value consistently with its `Eq` implementation.
fn hash_json<H: Hasher>(value: &Value, state: &mut H) {
    std::mem::discriminant(value).hash(state);
    match value {
        Value::Null => {}
        Value::Bool(b) => b.hash(state),
        Value::Number(n) => n.hash(state),
        Value::String(s) => s.hash(state),
        Value::Array(items) => {
            items.len().hash(state);
            for item in items {
                hash_json(item, state);
            }
        }
        Value::Object(map) => hash_object(map, state),
    }
}

/// Entries are hashed in key order so the result does not depend on the
/// map's iteration order.
fn hash_object<H: Hasher>(map: &Map<String, Value>, state: &mut H) {
    map.len().hash(state);
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (key, value) in entries {
        key.hash(state);
        hash_json(value, state);
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other.to_value()),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Number(value.into())
    }
}

impl From<u64> for PropertyValue {
    fn from(value: u64) -> Self {
        PropertyValue::Number(value.into())
    }
}

impl From<Vec<Value>> for PropertyValue {
    fn from(value: Vec<Value>) -> Self {
        PropertyValue::Array(value)
    }
}

impl From<Map<String, Value>> for PropertyValue {
    fn from(value: Map<String, Value>) -> Self {
        PropertyValue::Object(value)
    }
}

impl From<PropertyValue> for Value {
    fn from(value: PropertyValue) -> Self {
        value.to_value()
    }
}

/// Keys and values a model received but does not declare.
///
/// Insertion is reserved to the model layer so a declared field name can
/// never land here; callers go through
/// [`Model::set_additional_property`](super::Model::set_additional_property).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AdditionalProperties(BTreeMap<String, PropertyValue>);

impl AdditionalProperties {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: String, value: PropertyValue) -> Option<PropertyValue> {
        self.0.insert(key, value)
    }

    /// Look up one entry.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    /// Remove one entry, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.0.remove(key)
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropertyValue)> {
        self.0.iter()
    }

    /// Iterate keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

impl fmt::Display for AdditionalProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        write!(f, "}}")
    }
}
