//! Built-in example forms.

use crate::builder::{
    create_form, CheckboxOptions, DropdownOptions, LongTextOptions, TextOptions,
};
use crate::error::{FormError, Result};
use crate::field::Validation;
use crate::form::FormDefinition;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Names accepted by [`get`], in display order.
pub fn names() -> &'static [&'static str] {
    &["demo", "simple", "wizard", "validation", "feedback", "complete"]
}

pub fn get(name: &str) -> Result<FormDefinition> {
    match name {
        "demo" => demo(),
        "simple" => simple(),
        "wizard" => wizard(),
        "validation" => validation(),
        "feedback" => feedback(),
        "complete" => complete(),
        other => Err(FormError::DemoNotFound(other.to_string())),
    }
}

fn text(required: bool, placeholder: &str, description: Option<&str>) -> TextOptions {
    TextOptions {
        required,
        placeholder: (!placeholder.is_empty()).then(|| placeholder.to_string()),
        description: description.map(str::to_string),
        ..Default::default()
    }
}

fn required() -> TextOptions {
    TextOptions {
        required: true,
        ..Default::default()
    }
}

/// Three-step tour of every field type.
fn demo() -> Result<FormDefinition> {
    create_form("builderDemo", "Demo Form")
        .description("This form was created using the FormBuilder API")
        .add_step("step1", "Basic Information")
        .step_description("Please provide your basic information")
        .add_text("name", "Name", text(true, "Enter your name", Some("Your full name")))
        .add_text(
            "email",
            "Email",
            TextOptions {
                required: true,
                placeholder: Some("email@example.com".into()),
                validation: Some(Validation::pattern(
                    EMAIL_PATTERN,
                    "Please enter a valid email address",
                )),
                ..Default::default()
            },
        )
        .add_dropdown(
            "role",
            "Role",
            [
                ("Developer", "dev"),
                ("Designer", "designer"),
                ("Manager", "manager"),
                ("Other", "other"),
            ],
            DropdownOptions {
                required: true,
                description: Some("Select your primary role".into()),
                ..Default::default()
            },
        )
        .add_step("step2", "Preferences")
        .step_description("Tell us about your preferences")
        .add_checkbox(
            "newsletter",
            "Subscribe to newsletter",
            CheckboxOptions {
                default_value: true,
                description: Some("Receive updates and news via email".into()),
                ..Default::default()
            },
        )
        .add_checkbox(
            "notifications",
            "Enable notifications",
            CheckboxOptions {
                description: Some("Get notified about important events".into()),
                ..Default::default()
            },
        )
        .add_dropdown(
            "theme",
            "Preferred Theme",
            ["Light", "Dark", "High Contrast", "Auto"],
            DropdownOptions {
                default_value: Some("Auto".into()),
                ..Default::default()
            },
        )
        .add_step("step3", "Additional Information")
        .step_description("Provide any additional details")
        .add_long_text(
            "bio",
            "Biography",
            LongTextOptions {
                placeholder: Some("Tell us about yourself...".into()),
                rows: Some(8),
                description: Some("A brief description about yourself (optional)".into()),
                ..Default::default()
            },
        )
        .add_long_text(
            "feedback",
            "Feedback",
            LongTextOptions {
                required: true,
                placeholder: Some("Your feedback...".into()),
                rows: Some(5),
                description: Some("Please provide your feedback about this form system".into()),
                ..Default::default()
            },
        )
        .build()
}

fn simple() -> Result<FormDefinition> {
    create_form("simple", "Quick Survey")
        .add_step("main", "Tell us about yourself")
        .add_text("name", "Name", required())
        .add_text("email", "Email", required())
        .add_checkbox("subscribe", "Subscribe to updates", CheckboxOptions::default())
        .build()
}

fn wizard() -> Result<FormDefinition> {
    let on = CheckboxOptions {
        default_value: true,
        ..Default::default()
    };
    create_form("wizard", "Project Setup Wizard")
        .add_step("project", "Project Details")
        .add_text("projectName", "Project Name", text(true, "my-awesome-project", None))
        .add_dropdown(
            "projectType",
            "Project Type",
            ["Web Application", "Mobile App", "Desktop App", "Library"],
            DropdownOptions {
                required: true,
                ..Default::default()
            },
        )
        .add_step("settings", "Configuration")
        .add_checkbox("typescript", "Use TypeScript", on.clone())
        .add_checkbox("testing", "Include testing setup", on)
        .add_dropdown(
            "packageManager",
            "Package Manager",
            ["npm", "yarn", "pnpm"],
            DropdownOptions::default(),
        )
        .add_step("finish", "Final Setup")
        .add_long_text(
            "notes",
            "Additional Notes",
            LongTextOptions {
                rows: Some(6),
                placeholder: Some("Any special requirements...".into()),
                ..Default::default()
            },
        )
        .build()
}

fn validation() -> Result<FormDefinition> {
    create_form("validation", "User Registration")
        .add_step("register", "Create Account")
        .add_text(
            "username",
            "Username",
            TextOptions {
                required: true,
                validation: Some(Validation::pattern(
                    "^[a-zA-Z0-9_]{3,20}$",
                    "3-20 alphanumeric characters or underscore",
                )),
                ..Default::default()
            },
        )
        .add_text(
            "email",
            "Email",
            TextOptions {
                required: true,
                validation: Some(Validation::pattern(
                    EMAIL_PATTERN,
                    "Please enter a valid email address",
                )),
                ..Default::default()
            },
        )
        .add_text(
            "website",
            "Website",
            TextOptions {
                validation: Some(Validation::pattern(
                    "^https?://.+",
                    "Must start with http:// or https://",
                )),
                ..Default::default()
            },
        )
        .build()
}

fn feedback() -> Result<FormDefinition> {
    create_form("feedback", "Feedback Form")
        .description("Help us improve")
        .add_step("main", "Your Feedback")
        .add_dropdown(
            "rating",
            "Overall Rating",
            ["Excellent", "Good", "Fair", "Poor"],
            DropdownOptions {
                required: true,
                ..Default::default()
            },
        )
        .add_long_text(
            "comments",
            "Comments",
            LongTextOptions {
                required: true,
                placeholder: Some("Tell us more...".into()),
                rows: Some(8),
                ..Default::default()
            },
        )
        .add_checkbox(
            "followUp",
            "May we contact you for follow-up?",
            CheckboxOptions::default(),
        )
        .build()
}

fn complete() -> Result<FormDefinition> {
    create_form("complete", "Complete Example")
        .description("Demonstrating all available field types")
        .add_step("text-fields", "Text Inputs")
        .add_text(
            "shortText",
            "Short Text",
            text(
                false,
                "Single line text",
                Some("For short inputs like names, titles, etc."),
            ),
        )
        .add_long_text(
            "longText",
            "Long Text",
            LongTextOptions {
                placeholder: Some("Multiple lines...".into()),
                rows: Some(6),
                description: Some("For longer inputs like descriptions, notes, etc.".into()),
                ..Default::default()
            },
        )
        .add_step("selections", "Selection Inputs")
        .add_checkbox(
            "checkbox1",
            "First Option",
            CheckboxOptions {
                default_value: true,
                ..Default::default()
            },
        )
        .add_checkbox("checkbox2", "Second Option", CheckboxOptions::default())
        .add_dropdown(
            "simpleDropdown",
            "Simple Dropdown",
            ["Option 1", "Option 2", "Option 3"],
            DropdownOptions::default(),
        )
        .add_dropdown(
            "labeledDropdown",
            "Labeled Dropdown",
            [
                ("Display Name 1", "value1"),
                ("Display Name 2", "value2"),
                ("Display Name 3", "value3"),
            ],
            DropdownOptions::default(),
        )
        .add_step("required-fields", "Required Fields")
        .step_description("These fields must be filled out")
        .add_text("requiredText", "Required Text", required())
        .add_dropdown(
            "requiredDropdown",
            "Required Dropdown",
            ["A", "B", "C"],
            DropdownOptions {
                required: true,
                ..Default::default()
            },
        )
        .add_long_text(
            "requiredLong",
            "Required Long Text",
            LongTextOptions {
                required: true,
                rows: Some(4),
                ..Default::default()
            },
        )
        .build()
}
