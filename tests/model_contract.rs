//! Contract tests for the typed JSON models.
//!
//! These go through the public API only: decode, encode, validate, the
//! additional-property accessors, and equality/hash/display.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde_json::{json, Value};

use lctl::model::{
    CopyPartSource, JsonKind, Model, ModelError, Pagination, PropertyValue, Repository,
    RepositoryList, VersionConfig,
};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn source_doc() -> Value {
    json!({
        "repository": "example-repo",
        "ref": "main",
        "path": "datasets/2024/part-0001.parquet",
        "range": "bytes=0-1048575"
    })
}

// =============================================================================
// Construction and accessors
// =============================================================================

mod construction {
    use super::*;

    #[test]
    fn empty_instance_has_nothing_set() {
        let source = CopyPartSource::default();
        assert_eq!(source.repository(), None);
        assert_eq!(source.reference(), None);
        assert_eq!(source.path(), None);
        assert_eq!(source.range(), None);
        assert!(source.additional_properties().is_empty());
        assert_eq!(source.additional_property("anything"), None);
    }

    #[test]
    fn setters_are_unchecked_until_encode() {
        let mut source = CopyPartSource::default();
        source.set_repository("repo");
        assert_eq!(source.repository(), Some("repo"));

        let err = source.to_value().unwrap_err();
        assert_eq!(
            err,
            ModelError::MissingRequiredField {
                model: "CopyPartSource",
                field: "ref"
            }
        );
    }

    #[test]
    fn additional_property_overwrites() {
        let mut source = CopyPartSource::new("r", "main", "p");
        assert_eq!(source.set_additional_property("owner", "ops").unwrap(), None);
        let previous = source.set_additional_property("owner", "data").unwrap();
        assert_eq!(previous, Some(PropertyValue::from("ops")));
        assert_eq!(
            source.additional_property("owner").and_then(|v| v.as_str()),
            Some("data")
        );
    }

    #[test]
    fn declared_name_is_not_an_additional_property() {
        let mut source = CopyPartSource::new("r", "main", "p");
        let err = source.set_additional_property("ref", "dev").unwrap_err();
        assert!(matches!(err, ModelError::ReservedKey { .. }));
        assert_eq!(source.reference(), Some("main"));
    }
}

// =============================================================================
// Validation
// =============================================================================

mod validation {
    use super::*;

    #[test]
    fn absent_document_with_required_fields() {
        let err = CopyPartSource::validate(None).unwrap_err();
        match err {
            ModelError::EmptyDocument { model, required } => {
                assert_eq!(model, "CopyPartSource");
                assert_eq!(required, vec!["repository", "ref", "path"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn absent_document_without_required_fields() {
        assert!(VersionConfig::validate(None).is_ok());
        assert!(VersionConfig::validate(Some(&Value::Null)).is_ok());
    }

    #[test]
    fn each_required_field_is_enforced() {
        for field in CopyPartSource::required_fields() {
            let mut doc = source_doc();
            doc.as_object_mut().unwrap().remove(field);
            assert_eq!(
                CopyPartSource::from_value(&doc).unwrap_err(),
                ModelError::MissingRequiredField {
                    model: "CopyPartSource",
                    field
                },
                "removing {}",
                field
            );
        }
    }

    #[test]
    fn structured_value_in_primitive_field() {
        let mut doc = source_doc();
        doc["path"] = json!({"nested": true});
        assert_eq!(
            CopyPartSource::from_value(&doc).unwrap_err(),
            ModelError::TypeMismatch {
                model: "CopyPartSource",
                field: "path",
                expected: "string",
                found: JsonKind::Object,
            }
        );

        doc["path"] = json!(["a", "b"]);
        assert!(matches!(
            CopyPartSource::from_value(&doc),
            Err(ModelError::TypeMismatch {
                found: JsonKind::Array,
                ..
            })
        ));
    }

    #[test]
    fn optional_field_with_wrong_kind() {
        let mut doc = source_doc();
        doc["range"] = json!(1024);
        assert!(matches!(
            CopyPartSource::from_value(&doc),
            Err(ModelError::TypeMismatch { field: "range", .. })
        ));
    }

    #[test]
    fn optional_field_may_be_null() {
        let mut doc = source_doc();
        doc["range"] = Value::Null;
        let source = CopyPartSource::from_value(&doc).unwrap();
        assert_eq!(source.range(), None);
    }

    #[test]
    fn root_must_be_an_object() {
        assert!(matches!(
            CopyPartSource::from_json("[1, 2]"),
            Err(ModelError::NotAnObject {
                found: JsonKind::Array,
                ..
            })
        ));
        assert!(matches!(
            VersionConfig::from_json("\"1.0\""),
            Err(ModelError::NotAnObject { .. })
        ));
    }

    #[test]
    fn validation_precedes_population() {
        let doc = json!({"repository": "r", "ref": "main", "extra": {"k": 1}});
        assert!(matches!(
            CopyPartSource::from_value(&doc),
            Err(ModelError::MissingRequiredField { field: "path", .. })
        ));
    }
}

// =============================================================================
// Decode / encode
// =============================================================================

mod wire {
    use super::*;

    #[test]
    fn optional_field_absent() {
        let mut doc = source_doc();
        doc.as_object_mut().unwrap().remove("range");
        let source = CopyPartSource::from_value(&doc).unwrap();
        assert_eq!(source.range(), None);
        assert!(source.to_value().unwrap().get("range").is_none());
    }

    #[test]
    fn additional_properties_preserved() {
        let mut doc = source_doc();
        let extras = json!({
            "x-request-id": "abc",
            "attempt": 3,
            "ratio": 0.5,
            "dry_run": false,
            "tags": ["a", 1, null],
            "meta": {"owner": "ops", "nested": {"k": null}}
        });
        for (key, value) in extras.as_object().unwrap() {
            doc[key] = value.clone();
        }

        let source = CopyPartSource::from_value(&doc).unwrap();
        assert_eq!(source.additional_properties().len(), 6);
        assert_eq!(source.path(), Some("datasets/2024/part-0001.parquet"));
        assert_eq!(
            source.additional_property("attempt").and_then(|v| v.as_i64()),
            Some(3)
        );
        assert_eq!(
            source.additional_property("tags").map(|v| v.kind()),
            Some(JsonKind::Array)
        );
        assert_eq!(source.to_value().unwrap(), doc);
    }

    #[test]
    fn null_additional_value_is_kept() {
        let text = r#"{"repository":"r","ref":"main","path":"p","deleted_at":null}"#;
        let source = CopyPartSource::from_json(text).unwrap();
        let value = source.additional_property("deleted_at").unwrap();
        assert!(value.is_null());
        assert_eq!(value.kind(), JsonKind::Null);
        assert_eq!(
            source.to_value().unwrap(),
            serde_json::from_str::<Value>(text).unwrap()
        );
        assert!(source.to_string().contains("additionalProperties: {deleted_at=null}"));
    }

    #[test]
    fn additional_properties_flatten_on_the_wire() {
        let mut source = CopyPartSource::new("r", "main", "p");
        source.set_additional_property("owner", "ops").unwrap();
        let value = source.to_value().unwrap();
        assert_eq!(
            value,
            json!({"repository": "r", "ref": "main", "path": "p", "owner": "ops"})
        );
    }

    #[test]
    fn serde_goes_through_validation() {
        let ok: CopyPartSource = serde_json::from_value(source_doc()).unwrap();
        assert_eq!(ok.reference(), Some("main"));

        let err = serde_json::from_value::<CopyPartSource>(json!({"repository": "r"}));
        assert!(err.is_err());

        assert!(serde_json::to_string(&CopyPartSource::default()).is_err());
    }

    #[test]
    fn nested_models_round_trip() {
        let doc = json!({
            "pagination": {
                "has_more": true,
                "next_offset": "beta",
                "results": 1,
                "max_per_page": 1,
                "x-cursor-version": 2
            },
            "results": [{
                "id": "alpha",
                "creation_date": 1700000000,
                "default_branch": "main",
                "storage_namespace": "s3://bucket/alpha",
                "read_only": false,
                "owner": "ops"
            }]
        });
        let list = RepositoryList::from_value(&doc).unwrap();
        let pagination = list.pagination.as_ref().unwrap();
        assert_eq!(pagination.next_cursor(), Some("beta"));
        assert!(pagination.additional_property("x-cursor-version").is_some());
        assert_eq!(list.repositories()[0].id(), Some("alpha"));
        assert_eq!(list.to_value().unwrap(), doc);
    }

    #[test]
    fn nested_model_errors_surface() {
        let doc = json!({
            "pagination": {"has_more": false, "next_offset": "", "results": 0, "max_per_page": 100},
            "results": [{"id": "alpha", "creation_date": "yesterday"}]
        });
        assert!(matches!(
            RepositoryList::from_value(&doc),
            Err(ModelError::MissingRequiredField { model: "Repository", .. })
                | Err(ModelError::TypeMismatch { model: "Repository", .. })
        ));
    }

    #[test]
    fn empty_version_config_round_trips() {
        let config = VersionConfig::from_json("{}").unwrap();
        assert_eq!(config, VersionConfig::default());
        assert_eq!(config.to_json().unwrap(), "{}");
    }
}

// =============================================================================
// Equality, hash and display
// =============================================================================

mod identity {
    use super::*;

    #[test]
    fn same_content_same_hash() {
        let a = CopyPartSource::from_value(&source_doc()).unwrap();
        let b = CopyPartSource::new("example-repo", "main", "datasets/2024/part-0001.parquet")
            .with_range("bytes=0-1048575");
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn any_single_difference_breaks_equality() {
        let base = CopyPartSource::new("r", "main", "p").with_range("bytes=0-1");
        let variants = [
            base.clone().with_repository("other"),
            base.clone().with_reference("dev"),
            base.clone().with_path("q"),
            base.clone().with_range("bytes=0-2"),
            {
                let mut v = base.clone();
                v.set_additional_property("k", true).unwrap();
                v
            },
        ];
        for variant in &variants {
            assert_ne!(&base, variant);
        }
    }

    #[test]
    fn display_is_deterministic() {
        let mut source = CopyPartSource::new("r", "main", "p");
        source.set_additional_property("z", 1i64).unwrap();
        source.set_additional_property("a", "x").unwrap();
        assert_eq!(
            source.to_string(),
            "class CopyPartSource {\n    repository: r\n    ref: main\n    path: p\n    range: null\n    additionalProperties: {a=x, z=1}\n}"
        );
        assert_eq!(source.to_string(), source.clone().to_string());
    }

    #[test]
    fn repository_created_at() {
        let repo = Repository::new("alpha", 86_400, "main", "local://alpha");
        assert_eq!(
            repo.created_at().map(|t| t.to_rfc3339()),
            Some("1970-01-02T00:00:00+00:00".to_string())
        );
        assert!(!repo.is_read_only());
        assert!(repo.with_read_only(true).is_read_only());
        assert_eq!(Pagination::default().next_cursor(), None);
    }
}
