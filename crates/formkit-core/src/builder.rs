//! Fluent construction of [`FormDefinition`]s.
//!
//! ```
//! use formkit_core::builder::{create_form, TextOptions};
//!
//! let form = create_form("s", "Survey")
//!     .add_step("a", "A")
//!     .add_text("name", "Name", TextOptions { required: true, ..Default::default() })
//!     .build()
//!     .unwrap();
//! assert_eq!(form.steps()[0].fields[0].id, "name");
//! ```
//!
//! Methods take the builder by value so a chain reads top to bottom. The
//! first structural error is latched and returned by [`FormBuilder::build`];
//! calls after a failure are ignored. `build` consumes the builder, so a
//! finished builder cannot be reused.

use crate::error::{FormError, Result};
use crate::field::{Field, FieldKind, SelectOption, Validation};
use crate::form::{FormDefinition, Step, SubmitHook};
use crate::message::FormData;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Per-variant options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct CheckboxOptions {
    pub required: bool,
    pub default_value: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DropdownOptions {
    pub required: bool,
    pub default_value: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TextOptions {
    pub required: bool,
    pub default_value: Option<String>,
    pub description: Option<String>,
    pub placeholder: Option<String>,
    pub validation: Option<Validation>,
}

#[derive(Debug, Clone, Default)]
pub struct LongTextOptions {
    pub required: bool,
    pub default_value: Option<String>,
    pub description: Option<String>,
    pub placeholder: Option<String>,
    pub rows: Option<u32>,
}

// ---------------------------------------------------------------------------
// FormBuilder
// ---------------------------------------------------------------------------

pub struct FormBuilder {
    id: String,
    title: String,
    description: Option<String>,
    steps: Vec<Step>,
    current: Option<Step>,
    on_submit: Option<SubmitHook>,
    error: Option<FormError>,
}

/// Start a new form. Shorthand for [`FormBuilder::new`].
pub fn create_form(id: impl Into<String>, title: impl Into<String>) -> FormBuilder {
    FormBuilder::new(id, title)
}

impl FormBuilder {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            steps: Vec::new(),
            current: None,
            on_submit: None,
            error: None,
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        if self.error.is_none() {
            self.description = Some(text.into());
        }
        self
    }

    /// Close the open step (if any) and open a new one.
    pub fn add_step(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        if self.error.is_some() {
            return self;
        }
        if let Some(step) = self.current.take() {
            self.steps.push(step);
        }
        self.current = Some(Step::new(id, title));
        self
    }

    pub fn step_description(mut self, text: impl Into<String>) -> Self {
        if self.error.is_some() {
            return self;
        }
        match self.current.as_mut() {
            Some(step) => step.description = Some(text.into()),
            None => self.fail_no_step("step_description()".to_string()),
        }
        self
    }

    pub fn add_checkbox(
        self,
        id: impl Into<String>,
        label: impl Into<String>,
        opts: CheckboxOptions,
    ) -> Self {
        let field = Field {
            id: id.into(),
            label: label.into(),
            required: opts.required,
            description: opts.description,
            kind: FieldKind::Checkbox {
                default_value: opts.default_value,
            },
        };
        self.push_field(field)
    }

    pub fn add_dropdown<I, O>(
        self,
        id: impl Into<String>,
        label: impl Into<String>,
        options: I,
        opts: DropdownOptions,
    ) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<SelectOption>,
    {
        let field = Field {
            id: id.into(),
            label: label.into(),
            required: opts.required,
            description: opts.description,
            kind: FieldKind::Dropdown {
                options: options.into_iter().map(Into::into).collect(),
                default_value: opts.default_value,
            },
        };
        self.push_field(field)
    }

    pub fn add_text(
        self,
        id: impl Into<String>,
        label: impl Into<String>,
        opts: TextOptions,
    ) -> Self {
        let field = Field {
            id: id.into(),
            label: label.into(),
            required: opts.required,
            description: opts.description,
            kind: FieldKind::Text {
                default_value: opts.default_value,
                placeholder: opts.placeholder,
                validation: opts.validation,
            },
        };
        self.push_field(field)
    }

    pub fn add_long_text(
        self,
        id: impl Into<String>,
        label: impl Into<String>,
        opts: LongTextOptions,
    ) -> Self {
        let field = Field {
            id: id.into(),
            label: label.into(),
            required: opts.required,
            description: opts.description,
            kind: FieldKind::LongText {
                default_value: opts.default_value,
                placeholder: opts.placeholder,
                rows: opts.rows,
            },
        };
        self.push_field(field)
    }

    /// Attach a form-level submit handler.
    ///
    /// A session runs its own submit callback first and this one second.
    pub fn on_submit<F>(mut self, callback: F) -> Self
    where
        F: Fn(&FormData) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        if self.error.is_none() {
            self.on_submit = Some(Arc::new(callback));
        }
        self
    }

    pub fn build(mut self) -> Result<FormDefinition> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        if let Some(step) = self.current.take() {
            self.steps.push(step);
        }
        let definition = FormDefinition::new(self.id, self.title, self.description, self.steps)?;
        Ok(match self.on_submit {
            Some(hook) => definition.with_on_submit(hook),
            None => definition,
        })
    }

    fn push_field(mut self, field: Field) -> Self {
        if self.error.is_some() {
            return self;
        }
        match self.current.as_mut() {
            Some(step) => step.fields.push(field),
            None => self.fail_no_step(format!("field '{}'", field.id)),
        }
        self
    }

    fn fail_no_step(&mut self, operation: String) {
        self.error = Some(FormError::NoOpenStep { operation });
    }
}
