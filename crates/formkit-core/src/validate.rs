//! Server-side re-check of submitted form data.
//!
//! The rendered controls already enforce `required` and `pattern` in the
//! browser; this repeats those checks against the definition so a host never
//! trusts the surface blindly.

use crate::field::{Field, FieldKind};
use crate::form::FormDefinition;
use crate::message::{FieldValue, FormData};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: &Field, message: impl Into<String>) -> Self {
        Self {
            field: field.id.clone(),
            message: message.into(),
        }
    }
}

/// Check `data` against every field of `form`. Keys that name no field are ignored.
pub fn check_submission(form: &FormDefinition, data: &FormData) -> Vec<FieldIssue> {
    form.fields()
        .filter_map(|field| check_field(field, data.get(&field.id)))
        .collect()
}

fn check_field(field: &Field, value: Option<&FieldValue>) -> Option<FieldIssue> {
    match &field.kind {
        FieldKind::Checkbox { .. } => match value {
            None | Some(FieldValue::Bool(false)) if field.required => {
                Some(FieldIssue::new(field, "must be checked"))
            }
            Some(FieldValue::Text(_)) => Some(FieldIssue::new(field, "expected true or false")),
            _ => None,
        },
        FieldKind::Dropdown { options, .. } => {
            let text = match text_value(field, value) {
                Ok(t) => t,
                Err(issue) => return Some(issue),
            };
            if text.is_empty() {
                return field
                    .required
                    .then(|| FieldIssue::new(field, "an option must be selected"));
            }
            if options.iter().any(|o| o.value() == text) {
                None
            } else {
                Some(FieldIssue::new(field, format!("'{text}' is not one of the options")))
            }
        }
        FieldKind::Text { validation, .. } => {
            let text = match text_value(field, value) {
                Ok(t) => t,
                Err(issue) => return Some(issue),
            };
            if text.is_empty() {
                return field
                    .required
                    .then(|| FieldIssue::new(field, "this field is required"));
            }
            let pattern = validation.as_ref().and_then(|v| v.pattern.as_deref())?;
            let re = browser_pattern(pattern)?;
            if re.is_match(text) {
                return None;
            }
            let message = validation
                .as_ref()
                .and_then(|v| v.message.clone())
                .unwrap_or_else(|| format!("does not match pattern {pattern}"));
            Some(FieldIssue::new(field, message))
        }
        FieldKind::LongText { .. } => {
            let text = match text_value(field, value) {
                Ok(t) => t,
                Err(issue) => return Some(issue),
            };
            (text.is_empty() && field.required)
                .then(|| FieldIssue::new(field, "this field is required"))
        }
    }
}

/// Compile an HTML `pattern` attribute the way a browser applies it: anchored
/// to the whole value, with ASCII `\d`, `\w` and `\b`.
///
/// Browser patterns are ECMAScript syntax. Constructs the regex engine lacks
/// (look-around, backreferences) are logged and the check is skipped; the
/// browser still enforces them client-side.
fn browser_pattern(pattern: &str) -> Option<Regex> {
    let anchored = format!("^(?:{})$", ascii_classes(pattern));
    match Regex::new(&anchored) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "pattern not supported server-side; skipping check");
            None
        }
    }
}

/// Rewrite the shorthand classes that are Unicode-aware in `regex` but ASCII
/// in ECMAScript.
fn ascii_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut in_class = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(next) = chars.next() else {
                    out.push(c);
                    break;
                };
                let replacement = match (next, in_class) {
                    ('d', false) => Some("[0-9]"),
                    ('d', true) => Some("0-9"),
                    ('D', false) => Some("[^0-9]"),
                    ('w', false) => Some("[0-9A-Za-z_]"),
                    ('w', true) => Some("0-9A-Za-z_"),
                    ('W', false) => Some("[^0-9A-Za-z_]"),
                    ('b', false) => Some("(?-u:\\b)"),
                    ('B', false) => Some("(?-u:\\B)"),
                    _ => None,
                };
                match replacement {
                    Some(r) => out.push_str(r),
                    None => {
                        out.push(c);
                        out.push(next);
                    }
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Missing values read as the empty string; booleans are a shape error.
fn text_value<'a>(field: &Field, value: Option<&'a FieldValue>) -> Result<&'a str, FieldIssue> {
    match value {
        None => Ok(""),
        Some(FieldValue::Text(s)) => Ok(s.as_str()),
        Some(FieldValue::Bool(_)) => Err(FieldIssue::new(field, "expected a string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{
        create_form, CheckboxOptions, DropdownOptions, LongTextOptions, TextOptions,
    };
    use crate::field::Validation;

    fn registration() -> FormDefinition {
        create_form("reg", "Registration")
            .add_step("main", "Main")
            .add_text(
                "username",
                "Username",
                TextOptions {
                    required: true,
                    validation: Some(Validation::pattern(
                        "[a-zA-Z0-9_]{3,20}",
                        "3-20 alphanumeric characters or underscore",
                    )),
                    ..Default::default()
                },
            )
            .add_dropdown(
                "role",
                "Role",
                [("Developer", "dev"), ("Designer", "designer")],
                DropdownOptions {
                    required: true,
                    ..Default::default()
                },
            )
            .add_checkbox(
                "terms",
                "Accept terms",
                CheckboxOptions {
                    required: true,
                    ..Default::default()
                },
            )
            .add_long_text("bio", "Bio", LongTextOptions::default())
            .build()
            .unwrap()
    }

    fn data(pairs: &[(&str, FieldValue)]) -> FormData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn valid_submission_has_no_issues() {
        let d = data(&[
            ("username", "ada_l".into()),
            ("role", "dev".into()),
            ("terms", true.into()),
            ("extra", "ignored".into()),
        ]);
        assert!(check_submission(&registration(), &d).is_empty());
    }

    #[test]
    fn missing_required_values_are_reported_in_field_order() {
        let issues = check_submission(&registration(), &FormData::new());
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, ["username", "role", "terms"]);
    }

    #[test]
    fn pattern_is_anchored_and_uses_custom_message() {
        let d = data(&[
            ("username", "a valid_name with spaces".into()),
            ("role", "dev".into()),
            ("terms", true.into()),
        ]);
        let issues = check_submission(&registration(), &d);
        assert_eq!(
            issues,
            vec![FieldIssue {
                field: "username".into(),
                message: "3-20 alphanumeric characters or underscore".into(),
            }]
        );
    }

    #[test]
    fn dropdown_value_must_be_an_option_value_not_label() {
        let d = data(&[
            ("username", "ada".into()),
            ("role", "Developer".into()),
            ("terms", true.into()),
        ]);
        let issues = check_submission(&registration(), &d);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "role");
    }

    fn single_text(required: bool, pattern: &str) -> FormDefinition {
        create_form("f", "F")
            .add_step("a", "A")
            .add_text(
                "code",
                "Code",
                TextOptions {
                    required,
                    validation: Some(Validation::pattern(pattern, "bad code")),
                    ..Default::default()
                },
            )
            .build()
            .unwrap()
    }

    fn code(value: &str) -> FormData {
        data(&[("code", value.into())])
    }

    #[test]
    fn look_ahead_pattern_builds_renders_and_is_skipped_server_side() {
        let form = single_text(true, "(?=.*[0-9]).{8,}");
        let html = crate::render::render_form(&form);
        assert!(html.contains("pattern=\"(?=.*[0-9]).{8,}\""));

        // Not expressible here; the browser enforces it.
        assert!(check_submission(&form, &code("short")).is_empty());
        // Required still applies.
        assert_eq!(check_submission(&form, &code("")).len(), 1);
    }

    #[test]
    fn shorthand_classes_are_ascii_like_the_browser() {
        let digits = single_text(false, r"\d{3}");
        assert!(check_submission(&digits, &code("123")).is_empty());
        // Arabic-Indic digits satisfy Unicode \d but not ECMAScript \d.
        assert_eq!(check_submission(&digits, &code("١٢٣")).len(), 1);

        let word = single_text(false, r"[\w-]+");
        assert!(check_submission(&word, &code("a_b-9")).is_empty());
        assert_eq!(check_submission(&word, &code("é")).len(), 1);
    }

    #[test]
    fn ascii_classes_leaves_other_escapes_alone() {
        assert_eq!(ascii_classes(r"\d\.[\d\]]\s"), r"[0-9]\.[0-9\]]\s");
        assert_eq!(ascii_classes(r"\w\b"), r"[0-9A-Za-z_](?-u:\b)");
    }

    #[test]
    fn whitespace_long_text_counts_as_present() {
        let form = create_form("f", "F")
            .add_step("a", "A")
            .add_long_text(
                "bio",
                "Bio",
                LongTextOptions {
                    required: true,
                    ..Default::default()
                },
            )
            .build()
            .unwrap();
        let spaces = data(&[("bio", "   ".into())]);
        assert!(check_submission(&form, &spaces).is_empty());
        assert_eq!(check_submission(&form, &FormData::new()).len(), 1);
    }

    #[test]
    fn wrong_value_shapes_are_reported() {
        let d = data(&[
            ("username", true.into()),
            ("role", "dev".into()),
            ("terms", "yes".into()),
        ]);
        let issues = check_submission(&registration(), &d);
        assert_eq!(
            issues.iter().map(|i| i.message.as_str()).collect::<Vec<_>>(),
            ["expected a string", "expected true or false"]
        );
    }
}
