//! # catalog-stream CLI Module
//!
//! ## Available Commands
//!
//! - `emit` - Drain every model in a fixture file into canonical lines
//! - `decode` - Split a `relationships` value into its relationships
//! - `example` - Drain the built-in Top Gun model

mod commands;

use catalog_stream_core::CatalogError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// catalog-stream - flatten composite models for catalog ingestion
///
/// Entities and relationships are written as one JSON object per line with
/// sorted keys. Logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "catalog-stream")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print `decode` output as JSON
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Drain models from a fixture file (TOML or JSON)
    Emit {
        /// Path to the fixture file
        #[arg(short, long)]
        input: PathBuf,

        /// Write entity lines here instead of stdout
        #[arg(short, long)]
        entities: Option<PathBuf>,

        /// Write relationship lines here instead of stdout
        #[arg(short, long)]
        relationships: Option<PathBuf>,

        /// Fail if a model emits the same qualifiedName twice
        #[arg(long)]
        check_unique: bool,
    },

    /// Decode a relationships string
    Decode {
        /// Encoded value, e.g. "actors#ACTOR#actor://Tom Cruise|actors#ACTOR#actor://Meg Ryan"
        encoded: String,
    },

    /// Drain the built-in Top Gun model to stdout
    Example,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), CatalogError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Emit {
            input,
            entities,
            relationships,
            check_unique,
        } => cmd_emit(
            &input,
            entities.as_deref(),
            relationships.as_deref(),
            check_unique,
        )
        .map(|_| ()),
        Commands::Decode { encoded } => cmd_decode(&encoded, json_mode),
        Commands::Example => cmd_example(),
    }
}
