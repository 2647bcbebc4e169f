use crate::output::{flag, print_json, print_table};
use anyhow::{Context, Result};
use formkit_core::definition;
use std::path::Path;

pub fn run(file: &Path, json: bool) -> Result<()> {
    let form = definition::load(file)
        .with_context(|| format!("failed to load form definition {}", file.display()))?;

    if json {
        return print_json(&serde_json::json!({
            "valid": true,
            "id": form.id(),
            "title": form.title(),
            "steps": form.steps().len(),
            "fields": form.field_count(),
        }));
    }

    println!(
        "{} ({}): {} step(s), {} field(s)",
        form.title(),
        form.id(),
        form.steps().len(),
        form.field_count()
    );
    println!();

    let rows: Vec<Vec<String>> = form
        .steps()
        .iter()
        .flat_map(|step| {
            step.fields.iter().map(move |field| {
                vec![
                    step.id.clone(),
                    field.id.clone(),
                    field.type_name().to_string(),
                    flag(field.required),
                    field.label.clone(),
                ]
            })
        })
        .collect();
    print_table(&["STEP", "FIELD", "TYPE", "REQUIRED", "LABEL"], rows);
    Ok(())
}
