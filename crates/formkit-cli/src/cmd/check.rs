use crate::cmd::source::FormSource;
use crate::output::{print_json, print_table};
use anyhow::{bail, Context, Result};
use formkit_core::validate::check_submission;
use formkit_core::FormData;

pub fn run(source: &FormSource, data: &str, json: bool) -> Result<()> {
    let form = source.load()?;
    let data = parse_data(data)?;
    let issues = check_submission(&form, &data);

    if json {
        print_json(&serde_json::json!({
            "valid": issues.is_empty(),
            "issues": issues,
        }))?;
    } else if issues.is_empty() {
        println!("ok: submission is valid for '{}'", form.id());
    } else {
        let rows: Vec<Vec<String>> = issues
            .iter()
            .map(|i| vec![i.field.clone(), i.message.clone()])
            .collect();
        print_table(&["FIELD", "ISSUE"], rows);
    }

    if !issues.is_empty() {
        bail!("{} issue(s) found", issues.len());
    }
    Ok(())
}

/// Inline JSON, or `@PATH` for a file containing it.
fn parse_data(arg: &str) -> Result<FormData> {
    let text = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read submission data from {path}"))?,
        None => arg.to_string(),
    };
    serde_json::from_str(&text).context("submission data must be a JSON object of strings and booleans")
}
