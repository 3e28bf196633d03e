//! server command - Query server information

use anyhow::{Context as _, Result};

use crate::client::LakeFsApi;
use crate::cli::Session;
use crate::ui::output::Output;

/// Print the server version.
pub fn version(session: &Session) -> Result<()> {
    let config = session.load_config()?;
    let client = session.client(&config)?;
    let out = session.output(&config);

    let rt = tokio::runtime::Runtime::new()?;
    let rendered = rt.block_on(version_async(&client, &out))?;
    out.result(rendered);
    Ok(())
}

/// Fetch the version information and render it for `out`.
pub async fn version_async(api: &dyn LakeFsApi, out: &Output) -> Result<String> {
    let version = api
        .get_version_config()
        .await
        .context("Failed to get server version")?;

    if !out.is_text() {
        return Ok(out.render_model(&version)?);
    }

    let mut text = format!(
        "lakeFS version: {}",
        version.version.as_deref().unwrap_or("unknown")
    );
    if version.upgrade_recommended() {
        let latest = version.latest_version.as_deref().unwrap_or("a newer version");
        text.push_str(&format!("\nUpgrade recommended: {} is available", latest));
        if let Some(url) = &version.upgrade_url {
            text.push_str(&format!(" ({})", url));
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{FailOn, MockLakeFsClient};
    use crate::client::ClientError;
    use crate::core::config::OutputFormat;
    use crate::model::{Model, VersionConfig};
    use crate::ui::output::Verbosity;

    fn text() -> Output {
        Output::new(OutputFormat::Text, Verbosity::Normal)
    }

    #[tokio::test]
    async fn plain_version() {
        let api = MockLakeFsClient::new().with_version(VersionConfig::default().with_version("1.2.3"));
        assert_eq!(version_async(&api, &text()).await.unwrap(), "lakeFS version: 1.2.3");
    }

    #[tokio::test]
    async fn upgrade_hint() {
        let api = MockLakeFsClient::new().with_version(
            VersionConfig::default()
                .with_version("1.0.0")
                .with_latest_version("1.4.0")
                .with_upgrade_recommended(true)
                .with_upgrade_url("https://example.com/upgrade"),
        );
        let rendered = version_async(&api, &text()).await.unwrap();
        assert!(rendered.ends_with(
            "Upgrade recommended: 1.4.0 is available (https://example.com/upgrade)"
        ));
    }

    #[tokio::test]
    async fn unknown_version() {
        let api = MockLakeFsClient::new();
        assert_eq!(
            version_async(&api, &text()).await.unwrap(),
            "lakeFS version: unknown"
        );
    }

    #[tokio::test]
    async fn json_document() {
        let api = MockLakeFsClient::new().with_version(VersionConfig::default().with_version("1.2.3"));
        let out = Output::new(OutputFormat::Json, Verbosity::Normal);
        let rendered = version_async(&api, &out).await.unwrap();
        assert_eq!(
            VersionConfig::from_json(&rendered).unwrap().version.as_deref(),
            Some("1.2.3")
        );
    }

    #[tokio::test]
    async fn yaml_and_table_documents() {
        let api = MockLakeFsClient::new().with_version(
            VersionConfig::default()
                .with_version("1.2.3")
                .with_upgrade_recommended(false),
        );

        let yaml = Output::new(OutputFormat::Yaml, Verbosity::Normal);
        assert_eq!(
            version_async(&api, &yaml).await.unwrap(),
            "upgrade_recommended: false\nversion: 1.2.3"
        );

        let table = Output::new(OutputFormat::Table, Verbosity::Normal);
        assert_eq!(
            version_async(&api, &table).await.unwrap(),
            "UPGRADE_RECOMMENDED  VERSION\nfalse                1.2.3"
        );
    }

    #[tokio::test]
    async fn network_failure() {
        let api = MockLakeFsClient::new().fail_on(FailOn::GetVersionConfig(ClientError::Network(
            "connection refused".into(),
        )));
        assert!(version_async(&api, &text()).await.is_err());
    }
}
