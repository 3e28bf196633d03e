//! model
//!
//! Typed JSON models for the lakeFS API.
//!
//! # Design
//!
//! Every model is a plain struct with one `Option` field per declared schema
//! property plus an [`AdditionalProperties`] map for keys the schema does not
//! declare. The [`Model`] trait supplies the shared behaviour:
//!
//! - [`Model::validate`] checks a generic JSON document against the model's
//!   [`FieldSpec`] table (required fields present, declared kinds matching)
//! - [`Model::from_value`] validates, then populates declared fields, then
//!   classifies every remaining key into the additional map
//! - [`Model::to_value`] writes declared fields and flattens the additional
//!   map into the same JSON object
//!
//! Validation runs at both wire boundaries: decoding rejects documents that
//! violate the schema, and encoding rejects instances whose required fields
//! are unset. In-memory mutation is unchecked.
//!
//! Declared field names and additional keys are disjoint. Decoding never
//! routes a declared key into the map, and
//! [`Model::set_additional_property`] refuses declared names.
//!
//! # Example
//!
//! ```
//! use lctl::model::{CopyPartSource, Model};
//!
//! let json = r#"{"repository":"repo","ref":"main","path":"a.csv","owner":"ops"}"#;
//! let source = CopyPartSource::from_json(json).unwrap();
//!
//! assert_eq!(source.repository.as_deref(), Some("repo"));
//! assert_eq!(source.additional_property("owner").and_then(|v| v.as_str()), Some("ops"));
//!
//! let back = CopyPartSource::from_json(&source.to_json().unwrap()).unwrap();
//! assert_eq!(source, back);
//! ```

/// Implement `serde::Serialize` and `serde::Deserialize` for a model by
/// delegating to [`Model::to_value`] and [`Model::from_value`].
macro_rules! impl_serde_via_model {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                use serde::ser::Error as _;
                let value = $crate::model::Model::to_value(self).map_err(S::Error::custom)?;
                serde::Serialize::serialize(&value, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                use serde::de::Error as _;
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                $crate::model::Model::from_value(&value).map_err(D::Error::custom)
            }
        }
    };
}

pub(crate) mod codec;
pub mod copy_part_source;
pub(crate) mod render;
pub mod repository;
pub mod value;
pub mod version_config;

pub use copy_part_source::CopyPartSource;
pub use repository::{Pagination, Repository, RepositoryList};
pub use value::{AdditionalProperties, PropertyValue};
pub use version_config::VersionConfig;

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Kind of a JSON value as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Classify a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Boolean,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonKind::Null => write!(f, "null"),
            JsonKind::Boolean => write!(f, "boolean"),
            JsonKind::Number => write!(f, "number"),
            JsonKind::String => write!(f, "string"),
            JsonKind::Array => write!(f, "array"),
            JsonKind::Object => write!(f, "object"),
        }
    }
}

/// Validates a nested JSON value against another model's schema.
pub type NestedValidator = fn(&Value) -> Result<(), ModelError>;

/// Expected JSON kind of a declared field.
#[derive(Clone, Copy)]
pub enum FieldKind {
    /// JSON string
    String,
    /// JSON number that fits in an `i64`
    Integer,
    /// Any JSON number
    Number,
    /// JSON boolean
    Boolean,
    /// JSON object validated as a nested model
    Object(NestedValidator),
    /// JSON array whose items are validated as a nested model
    Array(NestedValidator),
}

impl FieldKind {
    /// Human-readable label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Object(_) => "object",
            FieldKind::Array(_) => "array",
        }
    }

    /// Check `value` against this kind.
    ///
    /// Nested kinds also run the nested model's validation.
    fn check(&self, model: &'static str, field: &'static str, value: &Value) -> Result<(), ModelError> {
        let matches = match (self, value) {
            (FieldKind::String, Value::String(_)) => true,
            (FieldKind::Integer, Value::Number(n)) => n.as_i64().is_some(),
            (FieldKind::Number, Value::Number(_)) => true,
            (FieldKind::Boolean, Value::Bool(_)) => true,
            (FieldKind::Object(validate), Value::Object(_)) => {
                validate(value)?;
                true
            }
            (FieldKind::Array(validate), Value::Array(items)) => {
                for item in items {
                    validate(item)?;
                }
                true
            }
            _ => false,
        };

        if matches {
            Ok(())
        } else {
            Err(ModelError::TypeMismatch {
                model,
                field,
                expected: self.label(),
                found: JsonKind::of(value),
            })
        }
    }
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One declared field of a model schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Wire name (JSON key)
    pub name: &'static str,
    /// Expected JSON kind
    pub kind: FieldKind,
    /// Whether the field must be present
    pub required: bool,
}

impl FieldSpec {
    /// A field that must be present in every document.
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// A field that may be absent or `null`.
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Errors from model validation and (de)serialization.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    #[error("the required field(s) {required:?} in {model} are not found in the empty JSON document")]
    EmptyDocument {
        model: &'static str,
        required: Vec<&'static str>,
    },

    #[error("expected a JSON object for {model} but got {found}")]
    NotAnObject {
        model: &'static str,
        found: JsonKind,
    },

    #[error("the required field `{field}` of {model} is not found in the JSON document")]
    MissingRequiredField {
        model: &'static str,
        field: &'static str,
    },

    #[error("expected the field `{field}` of {model} to be {expected} but got {found}")]
    TypeMismatch {
        model: &'static str,
        field: &'static str,
        expected: &'static str,
        found: JsonKind,
    },

    /// An additional value outside the JSON data model. Nothing parsed by
    /// `serde_json` produces this.
    #[error("the field `{key}` of {model} has unknown primitive type: {found}")]
    UnknownPrimitiveKind {
        model: &'static str,
        key: String,
        found: JsonKind,
    },

    #[error("`{key}` is a declared field of {model} and cannot be an additional property")]
    ReservedKey { model: &'static str, key: String },

    #[error("invalid value for `{field}` of {model}: {message}")]
    InvalidValue {
        model: &'static str,
        field: &'static str,
        message: String,
    },

    #[error("failed to parse {model} JSON: {message}")]
    Parse {
        model: &'static str,
        message: String,
    },
}

/// Check a JSON document against a field table.
///
/// `None` and JSON `null` both mean "no document". That is only acceptable
/// when the table has no required fields.
pub fn validate_document(
    model: &'static str,
    fields: &[FieldSpec],
    document: Option<&Value>,
) -> Result<(), ModelError> {
    let document = match document {
        None | Some(Value::Null) => {
            let required: Vec<&'static str> = fields
                .iter()
                .filter(|f| f.required)
                .map(|f| f.name)
                .collect();
            if required.is_empty() {
                return Ok(());
            }
            return Err(ModelError::EmptyDocument { model, required });
        }
        Some(document) => document,
    };

    let object = document.as_object().ok_or(ModelError::NotAnObject {
        model,
        found: JsonKind::of(document),
    })?;

    for field in fields.iter().filter(|f| f.required) {
        if !object.contains_key(field.name) {
            return Err(ModelError::MissingRequiredField {
                model,
                field: field.name,
            });
        }
    }

    for field in fields {
        match object.get(field.name) {
            None => {}
            Some(Value::Null) if !field.required => {}
            Some(value) => field.kind.check(model, field.name, value)?,
        }
    }

    Ok(())
}

/// Validate `value` as a nested `M`.
///
/// Used as the [`NestedValidator`] of object and array fields, e.g.
/// `FieldKind::Object(validate_nested::<Pagination>)`.
pub fn validate_nested<M: Model>(value: &Value) -> Result<(), ModelError> {
    M::validate(Some(value))
}

/// Shared behaviour of every typed JSON model.
///
/// Implementors provide the schema table and the mapping of declared
/// fields; everything else has a default implementation.
pub trait Model: Sized {
    /// Schema name used in error messages and display.
    const NAME: &'static str;

    /// Declared fields in wire order.
    const FIELDS: &'static [FieldSpec];

    /// Build an instance from the declared fields of a validated object.
    fn decode_declared(object: &Map<String, Value>) -> Result<Self, ModelError>;

    /// Write the declared fields into `object`.
    ///
    /// Unset optional fields are omitted. Unset required fields are an error.
    fn encode_declared(&self, object: &mut Map<String, Value>) -> Result<(), ModelError>;

    /// The additional-property map.
    fn additional_properties(&self) -> &AdditionalProperties;

    /// Mutable access to the additional-property map.
    fn additional_properties_mut(&mut self) -> &mut AdditionalProperties;

    /// Whether `key` is a declared wire name.
    fn is_declared(key: &str) -> bool {
        Self::FIELDS.iter().any(|f| f.name == key)
    }

    /// Wire names of the required fields.
    fn required_fields() -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect()
    }

    /// Validate a generic JSON document against this model's schema.
    ///
    /// # Errors
    ///
    /// - `EmptyDocument` if there is no document but required fields exist
    /// - `NotAnObject` if the root is not a JSON object
    /// - `MissingRequiredField` if a required key is absent
    /// - `TypeMismatch` if a declared key holds the wrong JSON kind
    fn validate(document: Option<&Value>) -> Result<(), ModelError> {
        validate_document(Self::NAME, Self::FIELDS, document)
    }

    /// Decode from a generic JSON value.
    ///
    /// Validation runs first; population only starts once the whole
    /// document has been checked.
    fn from_value(value: &Value) -> Result<Self, ModelError> {
        Self::validate(Some(value))?;

        let object = value.as_object().ok_or(ModelError::NotAnObject {
            model: Self::NAME,
            found: JsonKind::of(value),
        })?;

        let mut instance = Self::decode_declared(object)?;
        for (key, raw) in object {
            if Self::is_declared(key) {
                continue;
            }
            instance
                .additional_properties_mut()
                .insert(key.clone(), PropertyValue::classify(raw));
        }

        debug!(
            model = Self::NAME,
            additional = instance.additional_properties().len(),
            "decoded model"
        );
        Ok(instance)
    }

    /// Decode from JSON text.
    fn from_json(text: &str) -> Result<Self, ModelError> {
        let value: Value = serde_json::from_str(text).map_err(|e| ModelError::Parse {
            model: Self::NAME,
            message: e.to_string(),
        })?;
        Self::from_value(&value)
    }

    /// Encode to a generic JSON object.
    ///
    /// Additional properties are flattened next to the declared fields.
    fn to_value(&self) -> Result<Value, ModelError> {
        let mut object = Map::new();
        self.encode_declared(&mut object)?;
        for (key, value) in self.additional_properties().iter() {
            object.insert(key.clone(), value.to_value());
        }
        Ok(Value::Object(object))
    }

    /// Encode to compact JSON text.
    fn to_json(&self) -> Result<String, ModelError> {
        Ok(self.to_value()?.to_string())
    }

    /// Encode to indented JSON text.
    fn to_json_pretty(&self) -> Result<String, ModelError> {
        let value = self.to_value()?;
        serde_json::to_string_pretty(&value).map_err(|e| ModelError::Parse {
            model: Self::NAME,
            message: e.to_string(),
        })
    }

    /// Look up one additional property.
    fn additional_property(&self, key: &str) -> Option<&PropertyValue> {
        self.additional_properties().get(key)
    }

    /// Insert or overwrite one additional property.
    ///
    /// Returns the previous value for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::ReservedKey` if `key` is a declared field name.
    fn set_additional_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Result<Option<PropertyValue>, ModelError> {
        let key = key.into();
        if Self::is_declared(&key) {
            return Err(ModelError::ReservedKey {
                model: Self::NAME,
                key,
            });
        }
        Ok(self.additional_properties_mut().insert(key, value.into()))
    }
}
