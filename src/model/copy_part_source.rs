//! model::copy_part_source
//!
//! Source location of a multipart upload part copy.

use std::fmt;

use serde_json::{Map, Value};

use super::render::ModelDisplay;
use super::{codec, AdditionalProperties, FieldKind, FieldSpec, Model, ModelError};
use crate::core::uri::LakeFsUri;

/// An object (or byte range of one) to copy into an upload part.
///
/// `repository`, `ref` and `path` are required on the wire; `range` is an
/// optional HTTP byte range such as `bytes=0-1023`.
///
/// # Example
///
/// ```
/// use lctl::model::{CopyPartSource, Model};
///
/// let source = CopyPartSource::new("repo", "main", "data/a.csv")
///     .with_byte_range(0, 1023)
///     .unwrap();
///
/// assert_eq!(source.range(), Some("bytes=0-1023"));
/// assert!(source.to_json().unwrap().contains(r#""ref":"main""#));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CopyPartSource {
    pub repository: Option<String>,
    /// Branch, tag or commit id. Serialized as `ref`.
    pub reference: Option<String>,
    pub path: Option<String>,
    pub range: Option<String>,
    additional: AdditionalProperties,
}

impl CopyPartSource {
    pub const REPOSITORY: &'static str = "repository";
    pub const REF: &'static str = "ref";
    pub const PATH: &'static str = "path";
    pub const RANGE: &'static str = "range";

    /// Create a source with every required field set.
    pub fn new(
        repository: impl Into<String>,
        reference: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            repository: Some(repository.into()),
            reference: Some(reference.into()),
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Create a source from a `lakefs://repo/ref/path` URI.
    ///
    /// The leading `/` of the URI path is dropped, since object paths are
    /// relative to the ref.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` if the URI has no ref or an empty path.
    pub fn from_uri(uri: &LakeFsUri) -> Result<Self, ModelError> {
        let reference = uri
            .reference
            .as_deref()
            .ok_or(ModelError::MissingRequiredField {
                model: Self::NAME,
                field: Self::REF,
            })?;

        let path = uri
            .path
            .as_deref()
            .map(|p| p.trim_start_matches('/'))
            .filter(|p| !p.is_empty())
            .ok_or(ModelError::MissingRequiredField {
                model: Self::NAME,
                field: Self::PATH,
            })?;

        Ok(Self::new(uri.repository.clone(), reference, path))
    }

    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn range(&self) -> Option<&str> {
        self.range.as_deref()
    }

    pub fn set_repository(&mut self, repository: impl Into<String>) {
        self.repository = Some(repository.into());
    }

    pub fn set_reference(&mut self, reference: impl Into<String>) {
        self.reference = Some(reference.into());
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = Some(path.into());
    }

    /// Set or clear the byte range.
    pub fn set_range(&mut self, range: Option<String>) {
        self.range = range;
    }

    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.set_repository(repository);
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.set_reference(reference);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.set_path(path);
        self
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// Set `range` to the inclusive byte range `bytes=start-end`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if `start > end`.
    pub fn with_byte_range(self, start: u64, end: u64) -> Result<Self, ModelError> {
        if start > end {
            return Err(ModelError::InvalidValue {
                model: Self::NAME,
                field: Self::RANGE,
                message: format!("range start {} is after end {}", start, end),
            });
        }
        Ok(self.with_range(format!("bytes={}-{}", start, end)))
    }
}

impl Model for CopyPartSource {
    const NAME: &'static str = "CopyPartSource";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required(Self::REPOSITORY, FieldKind::String),
        FieldSpec::required(Self::REF, FieldKind::String),
        FieldSpec::required(Self::PATH, FieldKind::String),
        FieldSpec::optional(Self::RANGE, FieldKind::String),
    ];

    fn decode_declared(object: &Map<String, Value>) -> Result<Self, ModelError> {
        Ok(Self {
            repository: codec::string(Self::NAME, object, Self::REPOSITORY)?,
            reference: codec::string(Self::NAME, object, Self::REF)?,
            path: codec::string(Self::NAME, object, Self::PATH)?,
            range: codec::string(Self::NAME, object, Self::RANGE)?,
            additional: AdditionalProperties::new(),
        })
    }

    fn encode_declared(&self, object: &mut Map<String, Value>) -> Result<(), ModelError> {
        codec::put_required(Self::NAME, object, Self::REPOSITORY, &self.repository)?;
        codec::put_required(Self::NAME, object, Self::REF, &self.reference)?;
        codec::put_required(Self::NAME, object, Self::PATH, &self.path)?;
        codec::put(object, Self::RANGE, self.range.as_ref());
        Ok(())
    }

    fn additional_properties(&self) -> &AdditionalProperties {
        &self.additional
    }

    fn additional_properties_mut(&mut self) -> &mut AdditionalProperties {
        &mut self.additional
    }
}

impl_serde_via_model!(CopyPartSource);

impl fmt::Display for CopyPartSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = ModelDisplay::new(Self::NAME)
            .field(Self::REPOSITORY, self.repository())
            .field(Self::REF, self.reference())
            .field(Self::PATH, self.path())
            .field(Self::RANGE, self.range())
            .finish(&self.additional);
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JsonKind, PropertyValue};
    use serde_json::json;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    mod decode {
        use super::*;

        #[test]
        fn full_document() {
            let source = CopyPartSource::from_value(&json!({
                "repository": "repo",
                "ref": "main",
                "path": "a/b.csv",
                "range": "bytes=0-99",
            }))
            .unwrap();

            assert_eq!(source.repository(), Some("repo"));
            assert_eq!(source.reference(), Some("main"));
            assert_eq!(source.path(), Some("a/b.csv"));
            assert_eq!(source.range(), Some("bytes=0-99"));
            assert!(source.additional_properties().is_empty());
        }

        #[test]
        fn range_is_optional() {
            let source =
                CopyPartSource::from_json(r#"{"repository":"r","ref":"main","path":"p"}"#).unwrap();
            assert_eq!(source.range(), None);
        }

        #[test]
        fn missing_path() {
            let err = CopyPartSource::from_json(r#"{"repository":"r","ref":"main"}"#).unwrap_err();
            assert_eq!(
                err,
                ModelError::MissingRequiredField {
                    model: "CopyPartSource",
                    field: "path",
                }
            );
        }

        #[test]
        fn object_in_string_field() {
            let err = CopyPartSource::from_value(&json!({
                "repository": {"name": "r"},
                "ref": "main",
                "path": "p",
            }))
            .unwrap_err();
            assert_eq!(
                err,
                ModelError::TypeMismatch {
                    model: "CopyPartSource",
                    field: "repository",
                    expected: "string",
                    found: JsonKind::Object,
                }
            );
        }

        #[test]
        fn array_in_optional_field() {
            let err = CopyPartSource::from_value(&json!({
                "repository": "r",
                "ref": "main",
                "path": "p",
                "range": ["bytes=0-1"],
            }))
            .unwrap_err();
            assert!(matches!(
                err,
                ModelError::TypeMismatch {
                    field: "range",
                    found: JsonKind::Array,
                    ..
                }
            ));
        }

        #[test]
        fn extra_keys_become_additional() {
            let source = CopyPartSource::from_value(&json!({
                "repository": "r",
                "ref": "main",
                "path": "p",
                "checksum": "abc",
                "size": 12,
                "tags": ["x"],
            }))
            .unwrap();

            assert_eq!(source.additional_properties().len(), 3);
            assert_eq!(source.additional_property("checksum").and_then(PropertyValue::as_str), Some("abc"));
            assert_eq!(source.additional_property("size").and_then(PropertyValue::as_i64), Some(12));
            assert_eq!(
                source.additional_property("tags").map(PropertyValue::kind),
                Some(JsonKind::Array)
            );
        }
    }

    mod encode {
        use super::*;

        #[test]
        fn omits_unset_range() {
            let value = CopyPartSource::new("r", "main", "p").to_value().unwrap();
            assert_eq!(value, json!({"repository": "r", "ref": "main", "path": "p"}));
        }

        #[test]
        fn flattens_additional() {
            let mut source = CopyPartSource::new("r", "main", "p").with_range("bytes=1-2");
            source.set_additional_property("owner", "ops").unwrap();

            assert_eq!(
                source.to_value().unwrap(),
                json!({
                    "repository": "r",
                    "ref": "main",
                    "path": "p",
                    "range": "bytes=1-2",
                    "owner": "ops",
                })
            );
        }

        #[test]
        fn empty_instance_fails() {
            let err = CopyPartSource::default().to_json().unwrap_err();
            assert!(matches!(
                err,
                ModelError::MissingRequiredField {
                    field: "repository",
                    ..
                }
            ));
        }

        #[test]
        fn roundtrip() {
            let mut source = CopyPartSource::new("r", "main", "p");
            source.set_additional_property("n", 1i64).unwrap();
            let back = CopyPartSource::from_json(&source.to_json().unwrap()).unwrap();
            assert_eq!(back, source);
        }
    }

    mod accessors {
        use super::*;

        #[test]
        fn setters_and_builders_agree() {
            let mut a = CopyPartSource::default();
            a.set_repository("r");
            a.set_reference("dev");
            a.set_path("p");
            a.set_range(Some("bytes=0-0".into()));

            let b = CopyPartSource::default()
                .with_repository("r")
                .with_reference("dev")
                .with_path("p")
                .with_range("bytes=0-0");

            assert_eq!(a, b);
        }

        #[test]
        fn byte_range() {
            let source = CopyPartSource::new("r", "m", "p").with_byte_range(5, 5).unwrap();
            assert_eq!(source.range(), Some("bytes=5-5"));

            let err = CopyPartSource::new("r", "m", "p")
                .with_byte_range(9, 1)
                .unwrap_err();
            assert!(matches!(err, ModelError::InvalidValue { field: "range", .. }));
        }

        #[test]
        fn ref_key_is_reserved() {
            let mut source = CopyPartSource::default();
            assert!(matches!(
                source.set_additional_property("ref", "x"),
                Err(ModelError::ReservedKey { .. })
            ));
        }
    }

    mod from_uri {
        use super::*;

        #[test]
        fn full_uri() {
            let uri = LakeFsUri::parse("lakefs://repo/main/data/a.csv").unwrap();
            let source = CopyPartSource::from_uri(&uri).unwrap();
            assert_eq!(source, CopyPartSource::new("repo", "main", "data/a.csv"));
        }

        #[test]
        fn requires_ref() {
            let uri = LakeFsUri::parse("lakefs://repo").unwrap();
            assert!(matches!(
                CopyPartSource::from_uri(&uri),
                Err(ModelError::MissingRequiredField { field: "ref", .. })
            ));
        }

        #[test]
        fn requires_path() {
            let uri = LakeFsUri::parse("lakefs://repo/main").unwrap();
            assert!(matches!(
                CopyPartSource::from_uri(&uri),
                Err(ModelError::MissingRequiredField { field: "path", .. })
            ));
        }
    }

    mod identity {
        use super::*;

        #[test]
        fn equal_instances_hash_equal() {
            let doc = json!({"repository": "r", "ref": "main", "path": "p", "x": {"y": 1}});
            let a = CopyPartSource::from_value(&doc).unwrap();
            let b = CopyPartSource::from_value(&doc).unwrap();
            assert_eq!(a, b);
            assert_eq!(hash_of(&a), hash_of(&b));
        }

        #[test]
        fn single_difference_breaks_equality() {
            let base = CopyPartSource::new("r", "main", "p");
            assert_ne!(base, base.clone().with_range("bytes=0-1"));
            assert_ne!(base, base.clone().with_path("q"));

            let mut extra = base.clone();
            extra.set_additional_property("k", true).unwrap();
            assert_ne!(base, extra);
        }

        #[test]
        fn display_form() {
            let mut source = CopyPartSource::new("r", "main", "p");
            source.set_additional_property("k", "v").unwrap();
            assert_eq!(
                source.to_string(),
                "class CopyPartSource {\n    repository: r\n    ref: main\n    path: p\n    range: null\n    additionalProperties: {k=v}\n}"
            );
        }
    }

    #[test]
    fn serde_delegates_to_model() {
        let source = CopyPartSource::new("r", "main", "p");
        let text = serde_json::to_string(&source).unwrap();
        let back: CopyPartSource = serde_json::from_str(&text).unwrap();
        assert_eq!(back, source);

        let err = serde_json::from_str::<CopyPartSource>(r#"{"repository":"r"}"#).unwrap_err();
        assert!(err.to_string().contains("`ref`"));
    }
}
