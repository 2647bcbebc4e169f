use crate::error::{FormError, Result};
use crate::field::Field;
use crate::message::FormData;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Form-level submit handler. Shared so one definition can back several sessions.
pub type SubmitHook = Arc<dyn Fn(&FormData) -> anyhow::Result<()> + Send + Sync>;

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// An ordered group of fields shown as one page of a multi-page form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Step {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.id.as_str()) {
                return Err(FormError::DuplicateField {
                    step: self.id.clone(),
                    field: field.id.clone(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FormDefinition
// ---------------------------------------------------------------------------

/// The full immutable description of a multi-step form.
///
/// Fields are private: every constructor validates, so a definition with no
/// steps, duplicate step ids or duplicate field ids within a step cannot be
/// observed. Text patterns are browser (ECMAScript) syntax and are passed
/// through as written.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "RawDefinition")]
pub struct FormDefinition {
    id: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    steps: Vec<Step>,
    #[serde(skip)]
    on_submit: Option<SubmitHook>,
}

#[derive(Deserialize)]
struct RawDefinition {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    steps: Vec<Step>,
}

impl TryFrom<RawDefinition> for FormDefinition {
    type Error = FormError;

    fn try_from(raw: RawDefinition) -> Result<Self> {
        FormDefinition::new(raw.id, raw.title, raw.description, raw.steps)
    }
}

impl FormDefinition {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: Option<String>,
        steps: Vec<Step>,
    ) -> Result<Self> {
        let id = id.into();
        if steps.is_empty() {
            return Err(FormError::EmptyForm(id));
        }
        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.id.as_str()) {
                return Err(FormError::DuplicateStep {
                    form: id.clone(),
                    step: step.id.clone(),
                });
            }
            step.validate()?;
        }
        Ok(Self {
            id,
            title: title.into(),
            description,
            steps,
            on_submit: None,
        })
    }

    /// Attach (or replace) the form-level submit handler.
    pub fn with_on_submit(mut self, hook: SubmitHook) -> Self {
        self.on_submit = Some(hook);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Always non-empty.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn on_submit(&self) -> Option<&SubmitHook> {
        self.on_submit.as_ref()
    }

    /// All fields in display order across every step.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.steps.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field_count(&self) -> usize {
        self.steps.iter().map(|s| s.fields.len()).sum()
    }
}

impl fmt::Debug for FormDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormDefinition")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("steps", &self.steps)
            .field("on_submit", &self.on_submit.as_ref().map(|_| "<hook>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldKind, Validation};

    fn text(id: &str) -> Field {
        Field::new(
            id,
            id,
            FieldKind::Text {
                default_value: None,
                placeholder: None,
                validation: None,
            },
        )
    }

    #[test]
    fn empty_steps_rejected() {
        let err = FormDefinition::new("f", "F", None, vec![]).unwrap_err();
        assert!(matches!(err, FormError::EmptyForm(id) if id == "f"));
    }

    #[test]
    fn duplicate_step_rejected() {
        let steps = vec![Step::new("a", "A"), Step::new("a", "Again")];
        let err = FormDefinition::new("f", "F", None, steps).unwrap_err();
        assert!(matches!(err, FormError::DuplicateStep { .. }));
    }

    #[test]
    fn duplicate_field_within_step_rejected() {
        let mut step = Step::new("a", "A");
        step.fields = vec![text("name"), text("name")];
        let err = FormDefinition::new("f", "F", None, vec![step]).unwrap_err();
        assert!(matches!(err, FormError::DuplicateField { field, .. } if field == "name"));
    }

    #[test]
    fn same_field_id_in_different_steps_allowed() {
        let mut a = Step::new("a", "A");
        a.fields = vec![text("name")];
        let mut b = Step::new("b", "B");
        b.fields = vec![text("name")];
        let def = FormDefinition::new("f", "F", None, vec![a, b]).unwrap();
        assert_eq!(def.field_count(), 2);
    }

    #[test]
    fn browser_only_pattern_is_accepted() {
        let mut step = Step::new("a", "A");
        step.fields = vec![Field::new(
            "pw",
            "Password",
            FieldKind::Text {
                default_value: None,
                placeholder: None,
                validation: Some(Validation::pattern("(?=.*[0-9]).{8,}", "8+ with a digit")),
            },
        )];
        let def = FormDefinition::new("f", "F", None, vec![step]).unwrap();
        assert_eq!(def.field_count(), 1);
    }

    #[test]
    fn deserialization_runs_validation() {
        let err = serde_json::from_str::<FormDefinition>(r#"{"id":"f","title":"F","steps":[]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("at least one step"));
    }
}
