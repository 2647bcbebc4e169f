use crate::cmd::source::FormSource;
use crate::output::print_json;
use anyhow::{bail, Result};
use formkit_core::Outcome;
use formkit_server::{serve_form, ServeConfig};

pub fn run(source: &FormSource, port: u16, no_open: bool, json: bool) -> Result<()> {
    let form = source.load()?;
    let config = ServeConfig {
        port,
        open_browser: !no_open,
    };

    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt.block_on(serve_form(form, config))?;

    match outcome {
        Outcome::Submitted { data } => {
            if json {
                print_json(&serde_json::json!({ "status": "submitted", "data": data }))
            } else {
                print_json(&data)
            }
        }
        Outcome::SubmitFailed { error } => bail!("form submission failed: {error}"),
        Outcome::Cancelled => bail!("form was cancelled"),
    }
}
