//! Form definition → HTML markup.
//!
//! Rendering is a pure function of the definition: no ids are generated and
//! nothing depends on time, so the same definition always yields byte-identical
//! output. Client-side behaviour (step switching, revealing Submit on the last
//! step) belongs to the page script; only the initial state is emitted here.

use crate::field::{Field, FieldKind};
use crate::form::{FormDefinition, Step};
use std::fmt::Write as _;

const DEFAULT_ROWS: u32 = 5;
const REQUIRED_MARK: &str = "<span class=\"required-mark\">*</span>";

/// Escape the five HTML metacharacters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the whole form with step 0 visible.
pub fn render_form(form: &FormDefinition) -> String {
    let steps = form.steps();
    let mut html = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        html,
        "<div class=\"form-container\" data-form-id=\"{}\">",
        escape_html(form.id())
    );
    html.push_str("<div class=\"form-header\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(form.title()));
    if let Some(desc) = form.description() {
        let _ = writeln!(html, "<p class=\"form-description\">{}</p>", escape_html(desc));
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"form-steps\">\n");
    for (index, step) in steps.iter().enumerate() {
        html.push_str(&render_step(step, index));
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"form-navigation\">\n");
    html.push_str("<button id=\"prevBtn\" class=\"button secondary\" disabled>Previous</button>\n");
    let _ = writeln!(
        html,
        "<div class=\"step-indicator\"><span id=\"currentStep\">1</span> / <span id=\"totalSteps\">{}</span></div>",
        steps.len()
    );
    html.push_str("<button id=\"nextBtn\" class=\"button primary\">Next</button>\n");
    html.push_str(
        "<button id=\"submitBtn\" class=\"button primary\" style=\"display: none;\">Submit</button>\n",
    );
    html.push_str("</div>\n");
    html.push_str("</div>\n");
    html
}

fn render_step(step: &Step, index: usize) -> String {
    let visibility = if index == 0 { "active" } else { "inactive" };
    let mut html = String::new();
    let _ = writeln!(
        html,
        "<div class=\"form-step {visibility}\" data-step=\"{index}\" data-step-id=\"{}\">",
        escape_html(&step.id)
    );
    html.push_str("<div class=\"step-header\">\n");
    let _ = writeln!(html, "<h2>{}</h2>", escape_html(&step.title));
    if let Some(desc) = &step.description {
        let _ = writeln!(html, "<p class=\"step-description\">{}</p>", escape_html(desc));
    }
    html.push_str("</div>\n");
    html.push_str("<div class=\"step-fields\">\n");
    for field in &step.fields {
        html.push_str(&render_field(field));
    }
    html.push_str("</div>\n");
    html.push_str("</div>\n");
    html
}

/// Render a single field wrapped in its `form-field` container.
pub fn render_field(field: &Field) -> String {
    let id = escape_html(&field.id);
    let label = escape_html(&field.label);
    let mark = if field.required { REQUIRED_MARK } else { "" };
    let required = if field.required { " required" } else { "" };
    let description = field
        .description
        .as_deref()
        .map(|d| format!("<p class=\"field-description\">{}</p>\n", escape_html(d)))
        .unwrap_or_default();

    let mut html = String::new();
    let _ = writeln!(
        html,
        "<div class=\"form-field\" data-field-id=\"{id}\" data-field-type=\"{}\">",
        field.type_name()
    );

    match &field.kind {
        FieldKind::Checkbox { default_value } => {
            let checked = if *default_value { " checked" } else { "" };
            let _ = writeln!(
                html,
                "<label class=\"checkbox-label\"><input type=\"checkbox\" id=\"{id}\" name=\"{id}\"{checked}{required}><span>{label}{mark}</span></label>"
            );
            html.push_str(&description);
        }
        FieldKind::Dropdown {
            options,
            default_value,
        } => {
            let _ = writeln!(html, "<label for=\"{id}\">{label}{mark}</label>");
            html.push_str(&description);
            let _ = writeln!(html, "<select id=\"{id}\" name=\"{id}\"{required}>");
            html.push_str("<option value=\"\">Select an option</option>\n");
            for opt in options {
                let selected = if default_value.as_deref() == Some(opt.value()) {
                    " selected"
                } else {
                    ""
                };
                let _ = writeln!(
                    html,
                    "<option value=\"{}\"{selected}>{}</option>",
                    escape_html(opt.value()),
                    escape_html(opt.label())
                );
            }
            html.push_str("</select>\n");
        }
        FieldKind::Text {
            default_value,
            placeholder,
            validation,
        } => {
            let _ = writeln!(html, "<label for=\"{id}\">{label}{mark}</label>");
            html.push_str(&description);
            let _ = write!(html, "<input type=\"text\" id=\"{id}\" name=\"{id}\"");
            push_attr(&mut html, "placeholder", placeholder.as_deref());
            push_attr(&mut html, "value", default_value.as_deref());
            push_attr(
                &mut html,
                "pattern",
                validation.as_ref().and_then(|v| v.pattern.as_deref()),
            );
            let _ = writeln!(html, "{required}>");
            if let Some(message) = validation.as_ref().and_then(|v| v.message.as_deref()) {
                let _ = writeln!(
                    html,
                    "<p class=\"field-validation-message\">{}</p>",
                    escape_html(message)
                );
            }
        }
        FieldKind::LongText {
            default_value,
            placeholder,
            rows,
        } => {
            let rows = rows.filter(|r| *r > 0).unwrap_or(DEFAULT_ROWS);
            let _ = writeln!(html, "<label for=\"{id}\">{label}{mark}</label>");
            html.push_str(&description);
            let _ = write!(
                html,
                "<textarea id=\"{id}\" name=\"{id}\" rows=\"{rows}\""
            );
            push_attr(&mut html, "placeholder", placeholder.as_deref());
            let content = default_value.as_deref().map(escape_html).unwrap_or_default();
            let _ = writeln!(html, "{required}>{content}</textarea>");
        }
    }

    html.push_str("</div>\n");
    html
}

/// Append ` name="value"` when the value is present and non-empty.
fn push_attr(html: &mut String, name: &str, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        let _ = write!(html, " {name}=\"{}\"", escape_html(v));
    }
}
