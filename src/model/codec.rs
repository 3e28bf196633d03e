//! model::codec
//!
//! Field-level helpers shared by the concrete models' `decode_declared` and
//! `encode_declared` implementations.
//!
//! Readers treat an absent key and JSON `null` alike (`Ok(None)`). A value
//! of the wrong kind is reported as `TypeMismatch` even though
//! [`Model::validate`](super::Model::validate) normally catches it first.

use serde_json::{Map, Value};

use super::{JsonKind, Model, ModelError};

fn mismatch(model: &'static str, field: &'static str, expected: &'static str, value: &Value) -> ModelError {
    ModelError::TypeMismatch {
        model,
        field,
        expected,
        found: JsonKind::of(value),
    }
}

/// Read an optional string field.
pub(crate) fn string(
    model: &'static str,
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ModelError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(mismatch(model, field, "string", other)),
    }
}

/// Read an optional integer field.
pub(crate) fn integer(
    model: &'static str,
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<i64>, ModelError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| mismatch(model, field, "integer", value)),
        Some(other) => Err(mismatch(model, field, "integer", other)),
    }
}

/// Read an optional boolean field.
pub(crate) fn boolean(
    model: &'static str,
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<bool>, ModelError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(mismatch(model, field, "boolean", other)),
    }
}

/// Read an optional nested model.
pub(crate) fn nested<M: Model>(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<M>, ModelError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => M::from_value(value).map(Some),
    }
}

/// Read an optional array of nested models.
pub(crate) fn nested_list<M: Model>(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<Vec<M>>, ModelError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(M::from_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(other) => Err(mismatch(M::NAME, field, "array", other)),
    }
}

/// Borrow a required field's value or fail with `MissingRequiredField`.
pub(crate) fn require<'a, T>(
    model: &'static str,
    field: &'static str,
    value: &'a Option<T>,
) -> Result<&'a T, ModelError> {
    value
        .as_ref()
        .ok_or(ModelError::MissingRequiredField { model, field })
}

/// Write a scalar field if set.
pub(crate) fn put<T>(object: &mut Map<String, Value>, field: &'static str, value: Option<&T>)
where
    T: Clone + Into<Value>,
{
    if let Some(value) = value {
        object.insert(field.to_string(), value.clone().into());
    }
}

/// Write a required scalar field.
pub(crate) fn put_required<T>(
    model: &'static str,
    object: &mut Map<String, Value>,
    field: &'static str,
    value: &Option<T>,
) -> Result<(), ModelError>
where
    T: Clone + Into<Value>,
{
    let value = require(model, field, value)?;
    put(object, field, Some(value));
    Ok(())
}

/// Write a nested model if set.
pub(crate) fn put_nested<M: Model>(
    object: &mut Map<String, Value>,
    field: &'static str,
    value: Option<&M>,
) -> Result<(), ModelError> {
    if let Some(value) = value {
        object.insert(field.to_string(), value.to_value()?);
    }
    Ok(())
}

/// Write an array of nested models if set.
pub(crate) fn put_nested_list<M: Model>(
    object: &mut Map<String, Value>,
    field: &'static str,
    value: Option<&[M]>,
) -> Result<(), ModelError> {
    if let Some(items) = value {
        let encoded = items
            .iter()
            .map(Model::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        object.insert(field.to_string(), Value::Array(encoded));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn absent_and_null_read_as_none() {
        let obj = object(json!({"a": null}));
        assert_eq!(string("M", &obj, "a").unwrap(), None);
        assert_eq!(string("M", &obj, "b").unwrap(), None);
        assert_eq!(integer("M", &obj, "a").unwrap(), None);
        assert_eq!(boolean("M", &obj, "a").unwrap(), None);
    }

    #[test]
    fn wrong_kind_is_mismatch() {
        let obj = object(json!({"a": [1], "n": 1.5}));
        assert!(matches!(
            string("M", &obj, "a"),
            Err(ModelError::TypeMismatch { found: JsonKind::Array, .. })
        ));
        assert!(matches!(
            integer("M", &obj, "n"),
            Err(ModelError::TypeMismatch { expected: "integer", .. })
        ));
    }

    #[test]
    fn put_skips_unset() {
        let mut obj = Map::new();
        put::<String>(&mut obj, "a", None);
        put(&mut obj, "b", Some(&3i64));
        assert_eq!(Value::Object(obj), json!({"b": 3}));
    }

    #[test]
    fn put_required_fails_when_unset() {
        let mut obj = Map::new();
        let err = put_required::<String>("M", &mut obj, "a", &None).unwrap_err();
        assert_eq!(
            err,
            ModelError::MissingRequiredField {
                model: "M",
                field: "a"
            }
        );
        assert!(obj.is_empty());
    }
}
