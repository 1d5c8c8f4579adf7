//! Rendering of assembled entries.
//!
//! A formatter turns the ordered [`Field`]s of one entry into a single output line.
//! [`Formatter::Text`] produces the human oriented `key=value` form, [`Formatter::Json`] one JSON object per line.

use serde::{Deserialize, Serialize};

use crate::fields::Field;
use crate::style::Styles;

pub mod json;
pub mod text;

/// Errors that can occur while rendering or writing an entry.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// Writing the rendered entry failed.
    #[error("failed to write log entry")]
    Io(#[from] std::io::Error),

    /// Serializing the entry failed.
    #[error("failed to serialize log entry")]
    Json(#[from] serde_json::Error),
}

/// Everything besides the fields that a formatter needs.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext<'a> {
    /// Styles to apply, `None` when styling is disabled.
    pub styles: Option<&'a Styles>,
    /// `strftime` pattern for the timestamp.
    pub time_format: &'a str,
}

/// Output format of a logger.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formatter {
    /// `INFO message key=value`.
    #[default]
    Text,
    /// `{"level":"info","msg":"message","key":"value"}`.
    Json,
}

impl Formatter {
    /// Appends the rendered entry, including the trailing newline, to `output`.
    pub fn render(
        self,
        fields: &[Field<'_>],
        context: &RenderContext<'_>,
        output: &mut Vec<u8>,
    ) -> Result<(), RenderError> {
        match self {
            Formatter::Text => {
                text::render(fields, context, output);
                Ok(())
            }
            Formatter::Json => json::render(fields, context, output),
        }
    }
}
