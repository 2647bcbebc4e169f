use crate::output::{print_json, print_table};
use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use formkit_core::catalog;
use formkit_core::definition::{self, Format};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum DemoSubcommand {
    /// List the built-in forms
    List,
    /// Print a built-in form as a definition file
    Show {
        name: String,
        #[arg(long, value_enum, default_value = "yaml")]
        format: ExportFormat,
        /// Write to this file instead of stdout (format from its extension)
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ExportFormat {
    Yaml,
    Json,
}

impl From<ExportFormat> for Format {
    fn from(f: ExportFormat) -> Self {
        match f {
            ExportFormat::Yaml => Format::Yaml,
            ExportFormat::Json => Format::Json,
        }
    }
}

pub fn run(subcommand: DemoSubcommand, json: bool) -> Result<()> {
    match subcommand {
        DemoSubcommand::List => list(json),
        DemoSubcommand::Show { name, format, out } => show(&name, format, out, json),
    }
}

fn list(json: bool) -> Result<()> {
    let mut entries = Vec::new();
    for name in catalog::names() {
        let form = catalog::get(name)?;
        entries.push(serde_json::json!({
            "name": name,
            "id": form.id(),
            "title": form.title(),
            "steps": form.steps().len(),
            "fields": form.field_count(),
        }));
    }

    if json {
        return print_json(&entries);
    }
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            ["name", "title", "steps", "fields"]
                .iter()
                .map(|k| match &e[*k] {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect();
    print_table(&["NAME", "TITLE", "STEPS", "FIELDS"], rows);
    Ok(())
}

fn show(name: &str, format: ExportFormat, out: Option<PathBuf>, json: bool) -> Result<()> {
    let form = catalog::get(name)?;

    if let Some(path) = out {
        definition::save(&path, &form)?;
        if json {
            print_json(&serde_json::json!({ "name": name, "path": path }))?;
        } else {
            println!("wrote {}", path.display());
        }
        return Ok(());
    }

    // --json always means JSON output, whatever --format says.
    let format = if json { Format::Json } else { format.into() };
    print!("{}", definition::to_string(&form, format)?);
    if format == Format::Json {
        println!();
    }
    Ok(())
}
