//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand, ValueEnum};
use docent_domain::ItemKind;
use std::path::PathBuf;

/// Docent CLI - Turn PDFs into interactive study sessions.
#[derive(Debug, Parser)]
#[command(name = "docent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(f: CliFormat) -> Self {
        match f {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

/// Extraction mode.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    /// Extract important topics
    Summary,
    /// Extract questions
    Questions,
}

impl From<Mode> for ItemKind {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Summary => ItemKind::Topic,
            Mode::Questions => ItemKind::Question,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload a PDF and extract topics or questions
    Upload(UploadArgs),

    /// List stored sessions
    List,

    /// Show one session with its items
    Show(ShowArgs),

    /// Re-run extraction for a stored session
    Regen(RegenArgs),

    /// Delete one session
    Delete(DeleteArgs),

    /// Delete every stored session for the configured user
    Purge(PurgeArgs),

    /// Explore a session's items interactively
    Explore(ExploreArgs),
}

/// Arguments for the upload command.
#[derive(Debug, Parser)]
pub struct UploadArgs {
    /// Path to the PDF file
    pub file: PathBuf,

    /// Extraction mode
    #[arg(short, long, value_enum, default_value = "summary")]
    pub mode: Mode,

    /// Session title (defaults to the file name)
    #[arg(short, long)]
    pub title: Option<String>,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Session id
    pub id: String,
}

/// Arguments for the regen command.
#[derive(Debug, Parser)]
pub struct RegenArgs {
    /// Session id
    pub id: String,

    /// Extraction mode to regenerate
    #[arg(short, long, value_enum)]
    pub mode: Mode,
}

/// Arguments for the delete command.
#[derive(Debug, Parser)]
pub struct DeleteArgs {
    /// Session id
    pub id: String,
}

/// Arguments for the purge command.
#[derive(Debug, Parser)]
pub struct PurgeArgs {
    /// Skip the confirmation requirement
    #[arg(long)]
    pub yes: bool,
}

/// Arguments for the explore command.
#[derive(Debug, Parser)]
pub struct ExploreArgs {
    /// Session id
    pub id: String,

    /// Which item list to explore
    #[arg(short, long, value_enum, default_value = "questions")]
    pub mode: Mode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upload() {
        let cli = Cli::parse_from(["docent", "upload", "notes.pdf", "--mode", "questions"]);
        match cli.command {
            Command::Upload(args) => {
                assert_eq!(args.file, PathBuf::from("notes.pdf"));
                assert!(matches!(args.mode, Mode::Questions));
            }
            _ => panic!("Expected upload command"),
        }
    }

    #[test]
    fn test_upload_defaults_to_summary() {
        let cli = Cli::parse_from(["docent", "upload", "notes.pdf"]);
        match cli.command {
            Command::Upload(args) => assert!(matches!(args.mode, Mode::Summary)),
            _ => panic!("Expected upload command"),
        }
    }

    #[test]
    fn test_parse_explore() {
        let cli = Cli::parse_from(["docent", "explore", "some-id", "--mode", "summary"]);
        match cli.command {
            Command::Explore(args) => {
                assert_eq!(args.id, "some-id");
                assert!(matches!(args.mode, Mode::Summary));
            }
            _ => panic!("Expected explore command"),
        }
    }

    #[test]
    fn test_mode_maps_to_kind() {
        assert_eq!(ItemKind::from(Mode::Summary), ItemKind::Topic);
        assert_eq!(ItemKind::from(Mode::Questions), ItemKind::Question);
    }
}
