//! fqueue CLI
//!
//! Command-line tools for persistent queue files.
//!
//! # Commands
//!
//! - `inspect` - Display header fields and record statistics
//! - `verify` - Verify queue file integrity
//! - `dump` - List live records without consuming them
//! - `push` - Append one record
//! - `pop` - Remove (or peek at) the oldest record
//! - `reset` - Discard all records, keeping the file size
//! - `truncate` - Shrink an empty queue to its header

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// fqueue command-line queue tools.
#[derive(Parser)]
#[command(name = "fqueue")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the queue file
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display header fields and record statistics
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Verify queue file integrity
    Verify,

    /// List live records without consuming them
    Dump {
        /// Maximum number of records to list
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Append one record and print its index
    Push {
        /// Data region size used if the file has to be created
        #[arg(short, long)]
        capacity: Option<u64>,

        /// Read the payload from this file instead of the argument
        #[arg(short, long, conflicts_with = "payload")]
        file: Option<PathBuf>,

        /// Payload text
        #[arg(required_unless_present = "file")]
        payload: Option<String>,
    },

    /// Remove the oldest record and print it
    Pop {
        /// Show the record without removing it
        #[arg(long)]
        peek: bool,
    },

    /// Discard all records, keeping capacity and file size
    Reset,

    /// Shrink an empty queue back to its header
    Truncate,

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
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Inspect { format } => {
            let path = cli.path.ok_or("Queue path required for inspect")?;
            commands::inspect::run(&path, &format)?;
        }
        Commands::Verify => {
            let path = cli.path.ok_or("Queue path required for verify")?;
            commands::verify::run(&path)?;
        }
        Commands::Dump { limit, format } => {
            let path = cli.path.ok_or("Queue path required for dump")?;
            commands::dump::run(&path, limit, &format)?;
        }
        Commands::Push {
            capacity,
            file,
            payload,
        } => {
            let path = cli.path.ok_or("Queue path required for push")?;
            commands::push::run(&path, capacity, file.as_deref(), payload.as_deref())?;
        }
        Commands::Pop { peek } => {
            let path = cli.path.ok_or("Queue path required for pop")?;
            commands::pop::run(&path, peek)?;
        }
        Commands::Reset => {
            let path = cli.path.ok_or("Queue path required for reset")?;
            commands::maintenance::reset(&path)?;
        }
        Commands::Truncate => {
            let path = cli.path.ok_or("Queue path required for truncate")?;
            commands::maintenance::truncate(&path)?;
        }
        Commands::Version => {
            println!("fqueue CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("fqueue core v{}", fqueue_core::VERSION);
        }
    }

    Ok(())
}
