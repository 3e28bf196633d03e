//! model::repository
//!
//! Repository listing models returned by `GET /repositories`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::render::{DisplaySlice, ModelDisplay};
use super::{
    codec, validate_nested, AdditionalProperties, FieldKind, FieldSpec, Model, ModelError,
};

/// A lakeFS repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Repository {
    pub id: Option<String>,
    /// Unix timestamp in seconds.
    pub creation_date: Option<i64>,
    pub default_branch: Option<String>,
    pub storage_namespace: Option<String>,
    pub read_only: Option<bool>,
    additional: AdditionalProperties,
}

impl Repository {
    pub fn new(
        id: impl Into<String>,
        creation_date: i64,
        default_branch: impl Into<String>,
        storage_namespace: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            creation_date: Some(creation_date),
            default_branch: Some(default_branch.into()),
            storage_namespace: Some(storage_namespace.into()),
            ..Self::default()
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn default_branch(&self) -> Option<&str> {
        self.default_branch.as_deref()
    }

    pub fn storage_namespace(&self) -> Option<&str> {
        self.storage_namespace.as_deref()
    }

    /// Whether the repository rejects writes. Absent means writable.
    pub fn is_read_only(&self) -> bool {
        self.read_only.unwrap_or(false)
    }

    /// Creation time, if set and representable.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.creation_date
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_creation_date(mut self, creation_date: i64) -> Self {
        self.creation_date = Some(creation_date);
        self
    }

    pub fn with_default_branch(mut self, branch: impl Into<String>) -> Self {
        self.default_branch = Some(branch.into());
        self
    }

    pub fn with_storage_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.storage_namespace = Some(namespace.into());
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = Some(read_only);
        self
    }
}

impl Model for Repository {
    const NAME: &'static str = "Repository";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::String),
        FieldSpec::required("creation_date", FieldKind::Integer),
        FieldSpec::required("default_branch", FieldKind::String),
        FieldSpec::required("storage_namespace", FieldKind::String),
        FieldSpec::optional("read_only", FieldKind::Boolean),
    ];

    fn decode_declared(object: &Map<String, Value>) -> Result<Self, ModelError> {
        Ok(Self {
            id: codec::string(Self::NAME, object, "id")?,
            creation_date: codec::integer(Self::NAME, object, "creation_date")?,
            default_branch: codec::string(Self::NAME, object, "default_branch")?,
            storage_namespace: codec::string(Self::NAME, object, "storage_namespace")?,
            read_only: codec::boolean(Self::NAME, object, "read_only")?,
            additional: AdditionalProperties::new(),
        })
    }

    fn encode_declared(&self, object: &mut Map<String, Value>) -> Result<(), ModelError> {
        codec::put_required(Self::NAME, object, "id", &self.id)?;
        codec::put_required(Self::NAME, object, "creation_date", &self.creation_date)?;
        codec::put_required(Self::NAME, object, "default_branch", &self.default_branch)?;
        codec::put_required(Self::NAME, object, "storage_namespace", &self.storage_namespace)?;
        codec::put(object, "read_only", self.read_only.as_ref());
        Ok(())
    }

    fn additional_properties(&self) -> &AdditionalProperties {
        &self.additional
    }

    fn additional_properties_mut(&mut self) -> &mut AdditionalProperties {
        &mut self.additional
    }
}

impl_serde_via_model!(Repository);

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = ModelDisplay::new(Self::NAME)
            .field("id", self.id())
            .field("creation_date", self.creation_date)
            .field("default_branch", self.default_branch())
            .field("storage_namespace", self.storage_namespace())
            .field("read_only", self.read_only)
            .finish(&self.additional);
        f.write_str(&text)
    }
}

/// Cursor information of a paginated listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub has_more: Option<bool>,
    /// Token to pass as `after` for the next page.
    pub next_offset: Option<String>,
    /// Number of results in this page.
    pub results: Option<i64>,
    pub max_per_page: Option<i64>,
    additional: AdditionalProperties,
}

impl Pagination {
    pub fn new(has_more: bool, next_offset: impl Into<String>, results: i64, max_per_page: i64) -> Self {
        Self {
            has_more: Some(has_more),
            next_offset: Some(next_offset.into()),
            results: Some(results),
            max_per_page: Some(max_per_page),
            additional: AdditionalProperties::new(),
        }
    }

    pub fn with_has_more(mut self, has_more: bool) -> Self {
        self.has_more = Some(has_more);
        self
    }

    pub fn with_next_offset(mut self, next_offset: impl Into<String>) -> Self {
        self.next_offset = Some(next_offset.into());
        self
    }

    pub fn with_results(mut self, results: i64) -> Self {
        self.results = Some(results);
        self
    }

    pub fn with_max_per_page(mut self, max_per_page: i64) -> Self {
        self.max_per_page = Some(max_per_page);
        self
    }

    pub fn has_more(&self) -> bool {
        self.has_more.unwrap_or(false)
    }

    /// The cursor for the next page, if there is one.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_more() {
            self.next_offset.as_deref().filter(|o| !o.is_empty())
        } else {
            None
        }
    }
}

impl Model for Pagination {
    const NAME: &'static str = "Pagination";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("has_more", FieldKind::Boolean),
        FieldSpec::required("next_offset", FieldKind::String),
        FieldSpec::required("results", FieldKind::Integer),
        FieldSpec::required("max_per_page", FieldKind::Integer),
    ];

    fn decode_declared(object: &Map<String, Value>) -> Result<Self, ModelError> {
        Ok(Self {
            has_more: codec::boolean(Self::NAME, object, "has_more")?,
            next_offset: codec::string(Self::NAME, object, "next_offset")?,
            results: codec::integer(Self::NAME, object, "results")?,
            max_per_page: codec::integer(Self::NAME, object, "max_per_page")?,
            additional: AdditionalProperties::new(),
        })
    }

    fn encode_declared(&self, object: &mut Map<String, Value>) -> Result<(), ModelError> {
        codec::put_required(Self::NAME, object, "has_more", &self.has_more)?;
        codec::put_required(Self::NAME, object, "next_offset", &self.next_offset)?;
        codec::put_required(Self::NAME, object, "results", &self.results)?;
        codec::put_required(Self::NAME, object, "max_per_page", &self.max_per_page)?;
        Ok(())
    }

    fn additional_properties(&self) -> &AdditionalProperties {
        &self.additional
    }

    fn additional_properties_mut(&mut self) -> &mut AdditionalProperties {
        &mut self.additional
    }
}

impl_serde_via_model!(Pagination);

impl fmt::Display for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = ModelDisplay::new(Self::NAME)
            .field("has_more", self.has_more)
            .field("next_offset", self.next_offset.as_deref())
            .field("results", self.results)
            .field("max_per_page", self.max_per_page)
            .finish(&self.additional);
        f.write_str(&text)
    }
}

/// One page of repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RepositoryList {
    pub pagination: Option<Pagination>,
    pub results: Option<Vec<Repository>>,
    additional: AdditionalProperties,
}

impl RepositoryList {
    pub fn new(pagination: Pagination, results: Vec<Repository>) -> Self {
        Self {
            pagination: Some(pagination),
            results: Some(results),
            additional: AdditionalProperties::new(),
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_results(mut self, results: Vec<Repository>) -> Self {
        self.results = Some(results);
        self
    }

    /// The repositories in this page; empty when unset.
    pub fn repositories(&self) -> &[Repository] {
        self.results.as_deref().unwrap_or_default()
    }
}

impl Model for RepositoryList {
    const NAME: &'static str = "RepositoryList";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("pagination", FieldKind::Object(validate_nested::<Pagination>)),
        FieldSpec::required("results", FieldKind::Array(validate_nested::<Repository>)),
    ];

    fn decode_declared(object: &Map<String, Value>) -> Result<Self, ModelError> {
        Ok(Self {
            pagination: codec::nested(object, "pagination")?,
            results: codec::nested_list(object, "results")?,
            additional: AdditionalProperties::new(),
        })
    }

    fn encode_declared(&self, object: &mut Map<String, Value>) -> Result<(), ModelError> {
        let pagination = codec::require(Self::NAME, "pagination", &self.pagination)?;
        codec::put_nested(object, "pagination", Some(pagination))?;
        let results = codec::require(Self::NAME, "results", &self.results)?;
        codec::put_nested_list(object, "results", Some(results.as_slice()))?;
        Ok(())
    }

    fn additional_properties(&self) -> &AdditionalProperties {
        &self.additional
    }

    fn additional_properties_mut(&mut self) -> &mut AdditionalProperties {
        &mut self.additional
    }
}

impl_serde_via_model!(RepositoryList);

impl fmt::Display for RepositoryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = ModelDisplay::new(Self::NAME)
            .field("pagination", self.pagination.as_ref())
            .field("results", self.results.as_deref().map(DisplaySlice))
            .finish(&self.additional);
        f.write_str(&text)
    }
}
