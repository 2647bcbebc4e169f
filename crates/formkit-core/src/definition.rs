//! Form definitions stored as files.
//!
//! A definition file is the serialized [`FormDefinition`] in YAML or JSON,
//! using the same vocabulary as the wire protocol:
//!
//! ```yaml
//! id: feedback
//! title: Feedback Form
//! steps:
//!   - id: main
//!     title: Your Feedback
//!     fields:
//!       - id: rating
//!         label: Overall Rating
//!         type: dropdown
//!         options: [Excellent, Good, Fair, Poor]
//!         required: true
//! ```
//!
//! Scalar option values such as `options: [1, 2, 3]` are read as strings.
//! Loading goes through the same validation as the builder.

use crate::error::{FormError, Result};
use crate::form::FormDefinition;
use crate::io::atomic_write;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            _ => Err(FormError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

pub fn parse(text: &str, format: Format) -> Result<FormDefinition> {
    Ok(match format {
        Format::Yaml => serde_yaml::from_str(text)?,
        Format::Json => serde_json::from_str(text)?,
    })
}

pub fn to_string(form: &FormDefinition, format: Format) -> Result<String> {
    Ok(match format {
        Format::Yaml => serde_yaml::to_string(form)?,
        Format::Json => serde_json::to_string_pretty(form)?,
    })
}

/// Load a definition; the format is picked from the file extension.
pub fn load(path: &Path) -> Result<FormDefinition> {
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    parse(&text, format)
}

/// Atomically write `form` to `path`. Submit hooks are not persisted.
pub fn save(path: &Path, form: &FormDefinition) -> Result<()> {
    let format = Format::from_path(path)?;
    let text = to_string(form, format)?;
    atomic_write(path, text.as_bytes())
}
