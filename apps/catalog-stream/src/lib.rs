//! # catalog-stream
//!
//! Library side of the CLI: fixture parsing and command implementations,
//! exposed so integration tests can drive them without spawning a process.

pub mod cli;
pub mod fixture;
