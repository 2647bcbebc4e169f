//! Messages relayed from a rendered form surface back to its session.
//!
//! The wire shape is JSON with a `type` discriminator:
//!
//! ```json
//! {"type": "formSubmit", "data": {"name": "Ada", "subscribe": true}}
//! {"type": "formCancel"}
//! {"type": "stepChanged", "step": 1}
//! {"type": "ready"}
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Submitted values keyed by field id. Ordered so serialized output is stable.
pub type FormData = BTreeMap<String, FieldValue>;

/// A submitted field value: checkboxes send booleans, everything else strings.
/// Strings are raw user input, never HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Bool(_) => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FormMessage {
    FormSubmit { data: FormData },
    FormCancel,
    StepChanged { step: usize },
    Ready,
}

impl FormMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            FormMessage::FormSubmit { .. } => "formSubmit",
            FormMessage::FormCancel => "formCancel",
            FormMessage::StepChanged { .. } => "stepChanged",
            FormMessage::Ready => "ready",
        }
    }
}
