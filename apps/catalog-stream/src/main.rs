//! # catalog-stream
//!
//! Command line driver for catalog-stream-core.
//!
//! ## Architecture
//!
//! ```text
//!  fixture file ──▶ ModelFile ──▶ models ──drain──▶ LineWriter ──▶ entities.jsonl
//!  (toml / json)                    │                          └─▶ relationships.jsonl
//!                                   ▼
//!                         catalog-stream-core (THE LOGIC)
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Both streams to stdout
//! catalog-stream emit -i models.toml
//!
//! # Separate files for the bulk loader
//! catalog-stream emit -i models.toml -e entities.jsonl -r relationships.jsonl --check-unique
//!
//! # Inspect an embedded relationships value
//! catalog-stream decode "actors#ACTOR#actor://Tom Cruise|actors#ACTOR#actor://Meg Ryan"
//! ```

use catalog_stream::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // Logging to stderr only — stdout carries record lines.
    // CATALOG_STREAM_LOG_FORMAT=json enables machine-parseable output.
    let log_format =
        std::env::var("CATALOG_STREAM_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "catalog_stream=debug,catalog_stream_core=debug"
    } else {
        "catalog_stream=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
