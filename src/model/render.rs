//! model::render
//!
//! Debug rendering shared by the models' `Display` implementations:
//!
//! ```text
//! class CopyPartSource {
//!     repository: repo
//!     ref: main
//!     path: a.csv
//!     range: null
//!     additionalProperties: {}
//! }
//! ```
//!
//! Unset fields print as `null`. Multi-line values (nested models) are
//! indented one level so the output stays readable.

use std::fmt;

use super::AdditionalProperties;

const INDENT: &str = "    ";

/// Builder for the `class Name { ... }` form.
pub(crate) struct ModelDisplay {
    out: String,
}

impl ModelDisplay {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            out: format!("class {} {{\n", name),
        }
    }

    /// Append one declared field.
    pub(crate) fn field<T: fmt::Display>(mut self, name: &str, value: Option<T>) -> Self {
        let rendered = match value {
            Some(value) => indented(&value.to_string()),
            None => "null".to_string(),
        };
        self.out.push_str(INDENT);
        self.out.push_str(name);
        self.out.push_str(": ");
        self.out.push_str(&rendered);
        self.out.push('\n');
        self
    }

    /// Append the additional-property map and close the block.
    pub(crate) fn finish(self, additional: &AdditionalProperties) -> String {
        let mut this = self.field("additionalProperties", Some(additional));
        this.out.push('}');
        this.out
    }
}

fn indented(text: &str) -> String {
    text.replace('\n', &format!("\n{}", INDENT))
}

/// Renders a slice as `[a, b, c]` using each item's `Display`.
pub(crate) struct DisplaySlice<'a, T>(pub(crate) &'a [T]);

impl<T: fmt::Display> fmt::Display for DisplaySlice<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}
