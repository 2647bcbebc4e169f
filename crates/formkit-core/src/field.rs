use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// One typed input control within a form step.
///
/// Shared metadata lives on the struct; everything that only makes sense for
/// one control type lives in [`FieldKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Field {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            required: false,
            description: None,
            kind,
        }
    }

    /// The wire name of this field's type (`checkbox`, `dropdown`, `text`, `longtext`).
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Placeholder text, for the variants that carry one.
    pub fn placeholder(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Text { placeholder, .. } | FieldKind::LongText { placeholder, .. } => {
                placeholder.as_deref()
            }
            FieldKind::Checkbox { .. } | FieldKind::Dropdown { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    #[serde(rename_all = "camelCase")]
    Checkbox {
        #[serde(default, skip_serializing_if = "is_false")]
        default_value: bool,
    },
    #[serde(rename_all = "camelCase")]
    Dropdown {
        #[serde(default)]
        options: Vec<SelectOption>,
        #[serde(
            default,
            deserialize_with = "optional_scalar",
            skip_serializing_if = "Option::is_none"
        )]
        default_value: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        validation: Option<Validation>,
    },
    #[serde(rename_all = "camelCase")]
    LongText {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rows: Option<u32>,
    },
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Checkbox { .. } => "checkbox",
            FieldKind::Dropdown { .. } => "dropdown",
            FieldKind::Text { .. } => "text",
            FieldKind::LongText { .. } => "longtext",
        }
    }
}

// ---------------------------------------------------------------------------
// SelectOption / Validation
// ---------------------------------------------------------------------------

/// A dropdown entry: either a bare string used as both label and value, or
/// an explicit label/value pair.
///
/// Definition files may write numbers or booleans (`options: [1, 2, 3]`);
/// they are read as their string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SelectOption {
    Plain(String),
    Labeled { label: String, value: String },
}

impl SelectOption {
    pub fn labeled(label: impl Into<String>, value: impl Into<String>) -> Self {
        SelectOption::Labeled {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SelectOption::Plain(s) => s,
            SelectOption::Labeled { label, .. } => label,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            SelectOption::Plain(s) => s,
            SelectOption::Labeled { value, .. } => value,
        }
    }
}

impl<'de> Deserialize<'de> for SelectOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawSelectOption::deserialize(deserializer)? {
            RawSelectOption::Plain(s) => SelectOption::Plain(s.into()),
            RawSelectOption::Labeled { label, value } => SelectOption::Labeled {
                label: label.into(),
                value: value.into(),
            },
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelectOption {
    Plain(Scalar),
    Labeled { label: Scalar, value: Scalar },
}

/// Any YAML/JSON scalar that has an obvious string form.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(s) => s,
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(n) => n.to_string(),
            Scalar::Uint(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
        }
    }
}

fn optional_scalar<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

impl From<&str> for SelectOption {
    fn from(s: &str) -> Self {
        SelectOption::Plain(s.to_string())
    }
}

impl From<String> for SelectOption {
    fn from(s: String) -> Self {
        SelectOption::Plain(s)
    }
}

impl From<(&str, &str)> for SelectOption {
    fn from((label, value): (&str, &str)) -> Self {
        SelectOption::labeled(label, value)
    }
}

/// Client-side validation for a single-line text field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Validation {
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_tagged_variants_with_camel_case_keys() {
        let yaml = r#"
id: theme
label: Theme
required: true
type: dropdown
options:
  - Light
  - label: Dark mode
    value: dark
defaultValue: dark
"#;
        let field: Field = serde_yaml::from_str(yaml).unwrap();
        assert!(field.required);
        assert_eq!(field.type_name(), "dropdown");
        match &field.kind {
            FieldKind::Dropdown {
                options,
                default_value,
            } => {
                assert_eq!(options[0], SelectOption::Plain("Light".into()));
                assert_eq!(options[1].label(), "Dark mode");
                assert_eq!(options[1].value(), "dark");
                assert_eq!(default_value.as_deref(), Some("dark"));
            }
            other => panic!("expected dropdown, got {other:?}"),
        }
    }

    #[test]
    fn numeric_and_bool_options_read_as_strings() {
        let yaml = r#"
id: size
label: Size
type: dropdown
options: [1, 2, 3]
defaultValue: 2
"#;
        let field: Field = serde_yaml::from_str(yaml).unwrap();
        let FieldKind::Dropdown {
            options,
            default_value,
        } = &field.kind
        else {
            panic!("expected dropdown, got {:?}", field.kind);
        };
        let values: Vec<&str> = options.iter().map(SelectOption::value).collect();
        assert_eq!(values, ["1", "2", "3"]);
        assert_eq!(options[0], SelectOption::Plain("1".into()));
        assert_eq!(default_value.as_deref(), Some("2"));

        let yaml = r#"
id: flag
label: Flag
type: dropdown
options:
  - true
  - label: 1.5x
    value: 1.5
"#;
        let field: Field = serde_yaml::from_str(yaml).unwrap();
        let FieldKind::Dropdown { options, .. } = &field.kind else {
            panic!("expected dropdown");
        };
        assert_eq!(options[0].value(), "true");
        assert_eq!(options[1].label(), "1.5x");
        assert_eq!(options[1].value(), "1.5");
    }

    #[test]
    fn structured_option_without_value_is_rejected() {
        let json = r#"{"id":"x","label":"X","type":"dropdown","options":[{"label":"A"}]}"#;
        assert!(serde_json::from_str::<Field>(json).is_err());
    }

    #[test]
    fn longtext_type_name_round_trips() {
        let field = Field::new(
            "notes",
            "Notes",
            FieldKind::LongText {
                default_value: None,
                placeholder: Some("…".into()),
                rows: Some(6),
            },
        );
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "longtext");
        assert_eq!(json["rows"], 6);
        assert!(json.get("required").is_none());
        let back: Field = serde_json::from_value(json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = serde_json::from_str::<Field>(r#"{"id":"x","label":"X","type":"slider"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn placeholder_only_on_text_variants() {
        let cb = Field::new("a", "A", FieldKind::Checkbox { default_value: true });
        assert_eq!(cb.placeholder(), None);
        let text = Field::new(
            "b",
            "B",
            FieldKind::Text {
                default_value: None,
                placeholder: Some("type here".into()),
                validation: None,
            },
        );
        assert_eq!(text.placeholder(), Some("type here"));
    }
}
