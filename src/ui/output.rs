//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag. Commands
//! write their own text form; every other format is rendered here from a
//! JSON value:
//!
//! - `json`: pretty-printed JSON
//! - `yaml`: YAML via `serde_yaml`
//! - `table`: an object becomes one row under its keys, an array of objects
//!   one row per item
//!
//! Diagnostics go to stderr so stdout stays parseable.

use std::fmt::Display;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::config::OutputFormat;
use crate::model::{Model, ModelError};

/// Errors from rendering a result.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Where and how command results are written.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub format: OutputFormat,
    pub verbosity: Verbosity,
}

impl Output {
    pub fn new(format: OutputFormat, verbosity: Verbosity) -> Self {
        Self { format, verbosity }
    }

    /// Whether commands should print their own text form.
    pub fn is_text(&self) -> bool {
        self.format == OutputFormat::Text
    }

    /// Render a model: its debug form as text, otherwise as a document.
    pub fn render_model<M: Model + Display>(&self, model: &M) -> Result<String, OutputError> {
        match self.format {
            OutputFormat::Text => Ok(model.to_string()),
            _ => self.render_value(&model.to_value()?),
        }
    }

    /// Render a JSON value in the selected format. Text falls back to
    /// pretty JSON.
    pub fn render_value(&self, value: &Value) -> Result<String, OutputError> {
        match self.format {
            OutputFormat::Text | OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => {
                let text = serde_yaml::to_string(value)?;
                Ok(text.trim_end().to_string())
            }
            OutputFormat::Table => Ok(value_table(value)),
        }
    }

    /// Print a command result. Documents are printed even in quiet mode.
    pub fn result(&self, rendered: impl Display) {
        if !self.is_text() || self.verbosity != Verbosity::Quiet {
            println!("{}", rendered);
        }
    }
}

fn value_table(value: &Value) -> String {
    match value {
        Value::Object(object) => object_rows(&object.keys().cloned().collect::<Vec<_>>(), &[object]),
        Value::Array(items) => {
            let objects: Vec<&Map<String, Value>> =
                items.iter().filter_map(Value::as_object).collect();
            match objects.first() {
                Some(first) if objects.len() == items.len() => {
                    object_rows(&first.keys().cloned().collect::<Vec<_>>(), &objects)
                }
                _ => format_table(
                    &["VALUE"],
                    &items.iter().map(|item| vec![cell(Some(item))]).collect::<Vec<_>>(),
                ),
            }
        }
        other => cell(Some(other)),
    }
}

fn object_rows(keys: &[String], objects: &[&Map<String, Value>]) -> String {
    let headers: Vec<String> = keys.iter().map(|k| k.to_uppercase()).collect();
    let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
    let rows: Vec<Vec<String>> = objects
        .iter()
        .map(|object| keys.iter().map(|k| cell(object.get(k))).collect())
        .collect();
    format_table(&headers, &rows)
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Format rows as left-aligned columns under a header line.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.to_vec())];
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}
