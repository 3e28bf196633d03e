//! config command - Create, inspect and edit the lctl config file

use anyhow::{bail, Context as _, Result};
use serde_json::{Map, Value};
use tracing::debug;

use crate::cli::Session;
use crate::core::config::{Config, ConfigKey, Configuration, OutputFormat, ServerConfig};
use crate::ui::{output, prompts};

/// Write a new config file from the global flags.
pub fn init(session: &Session, default_format: Option<OutputFormat>, force: bool) -> Result<()> {
    let path = session.config_path.clone();
    if path.exists() && !force {
        bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    let mut settings = Configuration::default();
    if let Some(url) = &session.overrides.endpoint_url {
        settings.server = ServerConfig {
            endpoint_url: url.clone(),
        };
    }
    settings.credentials.access_key_id = session.overrides.access_key_id.clone();
    settings.credentials.secret_access_key = session.overrides.secret_access_key.clone();
    if let Some(format) = default_format {
        settings.output.default_format = format;
    }

    let config = Config::new(settings, path);
    config.save().context("Failed to write config")?;
    debug!(path = %config.path().display(), "initialized config");

    output::success(
        format!("Wrote config to {}", config.path().display()),
        session.verbosity,
    );
    if !config.settings.has_credentials() {
        output::warn(
            "no credentials set; run 'lctl config login' or 'lctl config set'",
            session.verbosity,
        );
    }
    Ok(())
}

/// Prompt for endpoint and credentials and save them.
///
/// Values given as global flags are used without prompting.
pub fn login(session: &Session) -> Result<()> {
    let mut config = session.load_config()?;
    let interactive = prompts::is_interactive();

    let endpoint = match &session.overrides.endpoint_url {
        Some(url) => url.clone(),
        None => prompts::input("lakeFS endpoint URL", Some(config.endpoint_url()), interactive)
            .context("Failed to read endpoint URL")?,
    };
    let access_key_id = match &session.overrides.access_key_id {
        Some(id) => id.clone(),
        None => prompts::input("Access key ID", None, interactive)
            .context("Failed to read access key ID")?,
    };
    let secret = match &session.overrides.secret_access_key {
        Some(secret) => secret.clone(),
        None => prompts::password("Secret access key", interactive)
            .context("Failed to read secret access key")?,
    };

    config.set(ConfigKey::EndpointUrl, &endpoint)?;
    config.set(ConfigKey::AccessKeyId, &access_key_id)?;
    config.set(ConfigKey::SecretAccessKey, &secret)?;
    config.save().context("Failed to write config")?;

    output::success(
        format!("Saved credentials to {}", config.path().display()),
        session.verbosity,
    );
    Ok(())
}

/// Print one configuration value.
pub fn get(session: &Session, key: &str) -> Result<()> {
    let key: ConfigKey = key.parse()?;
    let config = session.load_config()?;
    let value = config.get(key);

    let out = session.output(&config);
    if !out.is_text() {
        let mut object = Map::new();
        object.insert(key.to_string(), Value::String(value));
        out.result(out.render_value(&Value::Object(object))?);
    } else if !value.is_empty() {
        println!("{}", value);
    }
    Ok(())
}

/// Change one configuration value and save.
pub fn set(session: &Session, key: &str, value: &str) -> Result<()> {
    let key: ConfigKey = key.parse()?;
    let mut config = session.load_config()?;
    config
        .set(key, value)
        .with_context(|| format!("Cannot set {}", key))?;
    config.save().context("Failed to write config")?;

    let shown = if key.is_secret() { "****" } else { value };
    output::success(format!("Set {} = {}", key, shown), session.verbosity);
    Ok(())
}

/// Print every configuration value, with the secret masked.
pub fn list(session: &Session) -> Result<()> {
    let config = session.load_config()?;
    let entries = config.entries();

    let out = session.output(&config);
    match out.format {
        OutputFormat::Text => {
            for (key, value) in entries {
                println!("{} = {}", key, value);
            }
        }
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = entries
                .into_iter()
                .map(|(key, value)| vec![key.to_string(), value])
                .collect();
            out.result(output::format_table(&["KEY", "VALUE"], &rows));
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            let object: Map<String, Value> = entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), Value::String(value)))
                .collect();
            out.result(out.render_value(&Value::Object(object))?);
        }
    }
    Ok(())
}

/// Print the config file path.
pub fn show_path(session: &Session) -> Result<()> {
    println!("{}", session.config_path.display());
    if !session.config_path.exists() {
        output::warn("config file does not exist yet", session.verbosity);
    }
    Ok(())
}
