//! model::version_config
//!
//! Server version information returned by `GET /config/version`.

use std::fmt;

use serde_json::{Map, Value};

use super::render::ModelDisplay;
use super::{codec, AdditionalProperties, FieldKind, FieldSpec, Model, ModelError};

/// Version and upgrade details of a lakeFS server.
///
/// Every field is optional, so an empty document decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VersionConfig {
    pub version: Option<String>,
    pub version_context: Option<String>,
    pub latest_version: Option<String>,
    pub upgrade_recommended: Option<bool>,
    pub upgrade_url: Option<String>,
    additional: AdditionalProperties,
}

impl VersionConfig {
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_version_context(mut self, context: impl Into<String>) -> Self {
        self.version_context = Some(context.into());
        self
    }

    pub fn with_latest_version(mut self, latest: impl Into<String>) -> Self {
        self.latest_version = Some(latest.into());
        self
    }

    pub fn with_upgrade_recommended(mut self, recommended: bool) -> Self {
        self.upgrade_recommended = Some(recommended);
        self
    }

    pub fn with_upgrade_url(mut self, url: impl Into<String>) -> Self {
        self.upgrade_url = Some(url.into());
        self
    }

    pub fn upgrade_recommended(&self) -> bool {
        self.upgrade_recommended.unwrap_or(false)
    }
}

impl Model for VersionConfig {
    const NAME: &'static str = "VersionConfig";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("version", FieldKind::String),
        FieldSpec::optional("version_context", FieldKind::String),
        FieldSpec::optional("latest_version", FieldKind::String),
        FieldSpec::optional("upgrade_recommended", FieldKind::Boolean),
        FieldSpec::optional("upgrade_url", FieldKind::String),
    ];

    fn decode_declared(object: &Map<String, Value>) -> Result<Self, ModelError> {
        Ok(Self {
            version: codec::string(Self::NAME, object, "version")?,
            version_context: codec::string(Self::NAME, object, "version_context")?,
            latest_version: codec::string(Self::NAME, object, "latest_version")?,
            upgrade_recommended: codec::boolean(Self::NAME, object, "upgrade_recommended")?,
            upgrade_url: codec::string(Self::NAME, object, "upgrade_url")?,
            additional: AdditionalProperties::new(),
        })
    }

    fn encode_declared(&self, object: &mut Map<String, Value>) -> Result<(), ModelError> {
        codec::put(object, "version", self.version.as_ref());
        codec::put(object, "version_context", self.version_context.as_ref());
        codec::put(object, "latest_version", self.latest_version.as_ref());
        codec::put(object, "upgrade_recommended", self.upgrade_recommended.as_ref());
        codec::put(object, "upgrade_url", self.upgrade_url.as_ref());
        Ok(())
    }

    fn additional_properties(&self) -> &AdditionalProperties {
        &self.additional
    }

    fn additional_properties_mut(&mut self) -> &mut AdditionalProperties {
        &mut self.additional
    }
}

impl_serde_via_model!(VersionConfig);

impl fmt::Display for VersionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = ModelDisplay::new(Self::NAME)
            .field("version", self.version.as_deref())
            .field("version_context", self.version_context.as_deref())
            .field("latest_version", self.latest_version.as_deref())
            .field("upgrade_recommended", self.upgrade_recommended)
            .field("upgrade_url", self.upgrade_url.as_deref())
            .finish(&self.additional);
        f.write_str(&text)
    }
}
