//! lidx CLI
//!
//! Command-line tools for lidx full-text indexes.
//!
//! # Commands
//!
//! - `set` / `set-file` - Index a document from an argument or a file
//! - `remove` - Remove a document
//! - `search` - Prefix, substring or suffix search
//! - `inspect` - Display index statistics
//! - `dump` - Print every stored entry, decoded

mod commands;

use clap::{Parser, Subcommand};
use lidx_core::SearchKind;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// lidx command-line index tools.
#[derive(Parser)]
#[command(name = "lidx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the index directory
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
    /// Index text as a document, replacing earlier content
    Set {
        /// Document id
        doc: u64,

        /// Document text
        text: String,
    },

    /// Index a UTF-8 file as a document
    SetFile {
        /// Document id
        doc: u64,

        /// File to read
        file: PathBuf,
    },

    /// Remove a document
    Remove {
        /// Document id
        doc: u64,
    },

    /// Find documents containing a matching word
    Search {
        /// Word or word fragment
        token: String,

        /// Match mode (prefix, substring, suffix)
        #[arg(short, long, default_value = "prefix")]
        kind: SearchKind,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Display index statistics
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print stored entries for debugging
    Dump {
        /// Maximum number of entries to print
        #[arg(short, long)]
        limit: Option<usize>,

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
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Set { doc, text } => {
            let path = cli.path.ok_or("Index path required for set")?;
            commands::document::set(&path, doc, &text)?;
        }
        Commands::SetFile { doc, file } => {
            let path = cli.path.ok_or("Index path required for set-file")?;
            commands::document::set_file(&path, doc, &file)?;
        }
        Commands::Remove { doc } => {
            let path = cli.path.ok_or("Index path required for remove")?;
            commands::document::remove(&path, doc)?;
        }
        Commands::Search {
            token,
            kind,
            format,
        } => {
            let path = cli.path.ok_or("Index path required for search")?;
            commands::search::run(&path, &token, kind, &format)?;
        }
        Commands::Inspect { format } => {
            let path = cli.path.ok_or("Index path required for inspect")?;
            commands::inspect::run(&path, &format)?;
        }
        Commands::Dump { limit, format } => {
            let path = cli.path.ok_or("Index path required for dump")?;
            commands::dump::run(&path, limit, &format)?;
        }
        Commands::Version => {
            println!("lidx CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("lidx core v{}", lidx_core::VERSION);
        }
    }

    Ok(())
}
