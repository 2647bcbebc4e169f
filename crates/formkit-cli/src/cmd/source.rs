use anyhow::{bail, Context, Result};
use clap::Args;
use formkit_core::{catalog, definition, FormDefinition};
use std::path::PathBuf;

/// Where a command gets its form from: a definition file or a built-in demo.
#[derive(Args, Debug)]
pub struct FormSource {
    /// Form definition file (.yaml, .yml or .json)
    #[arg(conflicts_with = "demo")]
    pub file: Option<PathBuf>,

    /// Use a built-in demo form instead of a file (see `formkit demo list`)
    #[arg(long, value_name = "NAME")]
    pub demo: Option<String>,
}

impl FormSource {
    pub fn load(&self) -> Result<FormDefinition> {
        match (&self.file, &self.demo) {
            (Some(path), _) => definition::load(path)
                .with_context(|| format!("failed to load form definition {}", path.display())),
            (None, Some(name)) => Ok(catalog::get(name)?),
            (None, None) => bail!("provide a definition file or --demo <NAME>"),
        }
    }
}
