//! STL Showcase
//!
//! View STL models as normalized, browser-ready 3D scenes.
//!
//! # Commands
//!
//! - `showcase view <FILE>` - load a model and print its vertex count,
//!   optionally exporting the plotly figure as JSON or HTML
//! - `showcase normalize <FILE> <OUT>` - write the centered, unit-scaled
//!   mesh back out as STL
//! - `showcase save-project <NAME>` - save a named project record
//!
//! Logging goes to stderr and follows `RUST_LOG` (default `info`).

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mesh::ShowcaseConfig;
use tracing_subscriber::EnvFilter;

/// STL model showcase
#[derive(Parser)]
#[command(name = "showcase")]
#[command(about = "View STL models as normalized 3D scenes", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a model and build its scene
    View {
        /// STL file to view
        #[arg(name = "FILE")]
        file: PathBuf,

        /// Write the plotly figure as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write a standalone HTML viewer page
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Write the normalized mesh as STL
    Normalize {
        /// STL file to normalize
        #[arg(name = "FILE")]
        file: PathBuf,

        /// Output STL file
        #[arg(name = "OUT")]
        out: PathBuf,

        /// Write ASCII instead of binary STL
        #[arg(long)]
        ascii: bool,
    },

    /// Save a named project record
    SaveProject {
        /// Project name
        #[arg(name = "NAME")]
        name: String,

        /// JSON object to store instead of an empty record
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => ShowcaseConfig::load(path)?,
        None => ShowcaseConfig::default(),
    };

    match cli.command {
        Commands::View { file, json, html } => {
            commands::view(config, &file, json.as_deref(), html.as_deref())
        }
        Commands::Normalize { file, out, ascii } => commands::normalize(&file, &out, ascii),
        Commands::SaveProject { name, data } => {
            commands::save_project(config, &name, data.as_deref())
        }
    }
}
