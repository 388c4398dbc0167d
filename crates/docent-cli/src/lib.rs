//! Docent CLI
//!
//! Command-line interface for the document study pipeline: upload a PDF,
//! extract topics or questions, browse stored sessions, and explore items
//! interactively with lazily fetched details.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod explore;
pub mod output;

pub use cli::{Cli, CliFormat, Command, Mode};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
