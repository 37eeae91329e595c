//! compone CLI - renders demo pages built from compone components.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "compone")]
#[command(about = "Render HTML pages from composable components")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to compone.toml config file
    #[arg(short, long, default_value = "compone.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the demo page
    Render {
        /// Write the page to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Page title (defaults to config or "Page title")
        #[arg(short, long)]
        title: Option<String>,

        /// Prefix the page with a doctype
        #[arg(long)]
        doctype: bool,
    },

    /// List the HTML element catalog
    Catalog {
        /// Only list self-closing elements
        #[arg(long)]
        void_only: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render {
            output,
            title,
            doctype,
        } => {
            let doctype = if doctype { Some(true) } else { None };
            commands::render::run(&cli.config, output, title, doctype)?;
        }
        Commands::Catalog { void_only } => {
            commands::catalog::run(void_only)?;
        }
    }

    Ok(())
}
