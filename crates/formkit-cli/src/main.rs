mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::{demo::DemoSubcommand, source::FormSource};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "formkit",
    about = "Build, render, check and serve multi-step forms",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the HTML markup for a form
    Render {
        #[command(flatten)]
        source: FormSource,

        /// Wrap the markup in the full browser page
        #[arg(long)]
        page: bool,
    },

    /// Load a definition file and summarize its steps and fields
    Validate { file: PathBuf },

    /// Check submitted data against a form's fields
    Check {
        #[command(flatten)]
        source: FormSource,

        /// Submitted data as a JSON object, or @PATH to read it from a file
        #[arg(long)]
        data: String,
    },

    /// Built-in example forms
    Demo {
        #[command(subcommand)]
        subcommand: DemoSubcommand,
    },

    /// Open a form in the browser and print the submitted data
    Serve {
        #[command(flatten)]
        source: FormSource,

        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "0", env = "FORMKIT_PORT")]
        port: u16,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render { source, page } => cmd::render::run(&source, page, cli.json),
        Commands::Validate { file } => cmd::validate::run(&file, cli.json),
        Commands::Check { source, data } => cmd::check::run(&source, &data, cli.json),
        Commands::Demo { subcommand } => cmd::demo::run(subcommand, cli.json),
        Commands::Serve {
            source,
            port,
            no_open,
        } => cmd::serve::run(&source, port, no_open, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
