mod commands;
mod config;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "formcraft")]
#[command(version, about = "formcraft CLI - validate form submissions against a schema", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "formcraft.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a submission; exits with 1 when it is invalid
    Validate {
        /// Schema JSON file
        #[arg(short, long)]
        schema: PathBuf,

        /// Submission JSON file, keyed by field id
        #[arg(short, long)]
        data: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which fields are visible for a submission
    Visible {
        /// Schema JSON file
        #[arg(short, long)]
        schema: PathBuf,

        /// Submission JSON file, keyed by field id
        #[arg(short, long)]
        data: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Lint a schema; exits with 1 when issues are found
    Check {
        /// Schema JSON file
        #[arg(short, long)]
        schema: PathBuf,

        /// Print the issues as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a schema as canonical JSON
    Normalize {
        /// Schema JSON file
        #[arg(short, long)]
        schema: PathBuf,

        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
}

fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log.filter.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;
    init_tracing(&config);
    if !config.output.color {
        colored::control::set_override(false);
    }
    tracing::debug!("Using config {:?}", cli.config);

    match cli.command {
        Commands::Validate { schema, data, json } => {
            commands::validate::execute(&schema, &data, config.format(json))
        }
        Commands::Visible { schema, data, json } => {
            commands::visible::execute(&schema, &data, config.format(json))
        }
        Commands::Check { schema, json } => commands::check::execute(&schema, config.format(json)),
        Commands::Normalize { schema, compact } => commands::normalize::execute(&schema, compact),
    }
}
