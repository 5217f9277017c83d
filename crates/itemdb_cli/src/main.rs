//! itemdb CLI
//!
//! Command-line tools for server item databases.
//!
//! # Commands
//!
//! - `inspect` - Display database version and item statistics
//! - `verify` - Verify a database round-trips byte-for-byte
//! - `servers` - List known attribute server dialects
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Server item database command-line tools.
#[derive(Parser)]
#[command(name = "itemdb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display database version and item statistics
    Inspect {
        /// Path to the OTB file
        otb: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Verify a database round-trips byte-for-byte
    Verify {
        /// Path to the OTB file
        otb: PathBuf,

        /// items.xml to apply and validate
        #[arg(short, long)]
        xml: Option<PathBuf>,

        /// Attribute server dialect to validate against
        #[arg(short, long)]
        server: Option<String>,
    },

    /// List known attribute server dialects
    Servers {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Inspect { otb, format } => {
            commands::inspect::run(&otb, &format)?;
        }
        Commands::Verify { otb, xml, server } => {
            commands::verify::run(&otb, xml.as_deref(), server.as_deref())?;
        }
        Commands::Servers { format } => {
            commands::servers::run(&format)?;
        }
        Commands::Version => {
            println!("itemdb CLI v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
