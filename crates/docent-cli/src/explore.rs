//! Interactive session exploration.
//!
//! A readline loop over one session's item list: open an item to fetch and
//! show its detail, collapse it again, reload, edit labels, and append new
//! items. Items are addressed by their position in the list; one item is open
//! at a time.

use crate::cli::ExploreArgs;
use crate::commands::{build_provider, open_store, resolve_session_id};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docent_domain::traits::SessionStore;
use docent_domain::{ItemId, ItemKind};
use docent_explorer::ItemExplorer;
use docent_llm::ChatCompletionsProvider;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::sync::Arc;

/// Run the interactive explorer for one session.
pub async fn run_explore(args: ExploreArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let store = open_store(config)?;
    let id = resolve_session_id(&store, &config.user_id, &args.id)?;

    let session = store
        .get_session(id, &config.user_id)?
        .ok_or_else(|| CliError::SessionNotFound(args.id.clone()))?;

    let kind: ItemKind = args.mode.into();
    let items = match kind {
        ItemKind::Topic => session.topics,
        ItemKind::Question => session.questions,
    };

    if items.is_empty() {
        println!(
            "{}",
            formatter.info(&format!(
                "No {}s stored for this session yet; use 'add' to create some, or run 'docent regen'",
                kind
            ))
        );
    }

    let provider = Arc::new(build_provider(config)?);
    let mut explorer = ItemExplorer::new(provider, kind, session.source_text, items);

    println!(
        "{}",
        formatter.info(&format!(
            "Exploring '{}' - type 'help' for commands, 'exit' to quit",
            session.title
        ))
    );
    println!();
    render_items(&explorer, formatter);

    let mut editor = DefaultEditor::new().map_err(|e| {
        CliError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to initialize editor: {}", e),
        ))
    })?;

    let history_path = history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("docent> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_command(line) {
                    Ok(ExploreCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ExploreCommand::Help) => {
                        print_help();
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_command(cmd, &mut explorer, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// Explorer REPL command.
enum ExploreCommand {
    Exit,
    Help,
    List,
    Open(usize),
    Reload(usize),
    Edit(usize, String),
    Add(String),
}

/// Parse a REPL command line.
fn parse_command(line: &str) -> Result<ExploreCommand> {
    let mut parts = line.splitn(3, char::is_whitespace);
    let head = parts.next().unwrap_or("");

    match head {
        "exit" | "quit" | "q" => Ok(ExploreCommand::Exit),
        "help" | "?" => Ok(ExploreCommand::Help),
        "list" | "ls" => Ok(ExploreCommand::List),
        "open" | "o" => Ok(ExploreCommand::Open(parse_index(parts.next())?)),
        "reload" | "r" => Ok(ExploreCommand::Reload(parse_index(parts.next())?)),
        "edit" | "e" => {
            let index = parse_index(parts.next())?;
            let label = parts.next().unwrap_or("").trim().to_string();
            if label.is_empty() {
                return Err(CliError::InvalidInput(
                    "Usage: edit <n> <new label>".to_string(),
                ));
            }
            Ok(ExploreCommand::Edit(index, label))
        }
        "add" | "a" => {
            // Everything after the command word is the label
            let label = line[head.len()..].trim().to_string();
            Ok(ExploreCommand::Add(label))
        }
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            head
        ))),
    }
}

/// Parse a 1-based item number.
fn parse_index(arg: Option<&str>) -> Result<usize> {
    let arg = arg.ok_or_else(|| CliError::InvalidInput("Missing item number".to_string()))?;
    let n: usize = arg
        .parse()
        .map_err(|_| CliError::InvalidInput(format!("Not an item number: {}", arg)))?;
    if n == 0 {
        return Err(CliError::InvalidInput(
            "Item numbers start at 1".to_string(),
        ));
    }
    Ok(n)
}

/// Execute a parsed REPL command.
async fn execute_command(
    cmd: ExploreCommand,
    explorer: &mut ItemExplorer<ChatCompletionsProvider>,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ExploreCommand::List => {
            render_items(explorer, formatter);
        }
        ExploreCommand::Open(n) => {
            let id = item_id_at(explorer, n)?;

            // Only the first open of an item goes to the model
            if explorer.expanded() != Some(id) && explorer.detail(id).is_none() {
                println!("{}", formatter.info("Fetching detail..."));
            }

            explorer.toggle_expand(id).await?;
            render_items(explorer, formatter);
            render_expanded(explorer, formatter);
        }
        ExploreCommand::Reload(n) => {
            let id = item_id_at(explorer, n)?;

            println!("{}", formatter.info("Fetching detail..."));
            explorer.reload(id).await?;
            render_expanded(explorer, formatter);
        }
        ExploreCommand::Edit(n, label) => {
            let id = item_id_at(explorer, n)?;

            explorer.edit_label(id, label)?;
            println!("{}", formatter.success(&format!("Item {} updated", n)));
            render_items(explorer, formatter);
        }
        ExploreCommand::Add(label) => {
            match explorer.add_item(&label) {
                Some(_) => {
                    println!("{}", formatter.success("Item added"));
                    render_items(explorer, formatter);
                }
                None => {
                    eprintln!("{}", formatter.error("Cannot add an empty item"));
                }
            }
        }
        ExploreCommand::Exit | ExploreCommand::Help => unreachable!(),
    }

    Ok(())
}

/// Map a 1-based item number to its id.
fn item_id_at(explorer: &ItemExplorer<ChatCompletionsProvider>, n: usize) -> Result<ItemId> {
    explorer
        .items()
        .get(n - 1)
        .map(|item| item.id)
        .ok_or_else(|| CliError::InvalidInput(format!("No item number {}", n)))
}

/// Render the item list with expansion markers.
fn render_items(explorer: &ItemExplorer<ChatCompletionsProvider>, formatter: &Formatter) {
    if explorer.items().is_empty() {
        println!("{}", formatter.info("(no items)"));
        return;
    }

    for (idx, item) in explorer.items().iter().enumerate() {
        let marker = if explorer.expanded() == Some(item.id) {
            "▾"
        } else if explorer.detail(item.id).is_some() {
            "·"
        } else {
            " "
        };
        println!("{} {:>2}) {}", marker, idx + 1, item.label);
    }
}

/// Render the expanded item's detail or error below the list.
fn render_expanded(explorer: &ItemExplorer<ChatCompletionsProvider>, formatter: &Formatter) {
    let Some(id) = explorer.expanded() else {
        return;
    };

    println!();
    if let Some(error) = explorer.last_error() {
        println!("{}", formatter.error(error));
    } else if let Some(detail) = explorer.detail(id) {
        println!("{}", detail);
    }
    println!();
}

/// Print REPL help.
fn print_help() {
    println!("Commands:");
    println!("  list              Show the item list");
    println!("  open <n>          Expand item n (fetches its detail on first open)");
    println!("                    Opening the expanded item collapses it");
    println!("  reload <n>        Re-fetch the detail for item n");
    println!("  edit <n> <label>  Replace item n's label (its detail is kept)");
    println!("  add <label>       Append a new item");
    println!("  help              Show this help");
    println!("  exit              Quit");
}

/// Get the explorer history file path.
fn history_path() -> Result<PathBuf> {
    Ok(Config::dir()?.join("explore_history"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_open() {
        assert!(matches!(parse_command("open 3"), Ok(ExploreCommand::Open(3))));
        assert!(matches!(parse_command("o 1"), Ok(ExploreCommand::Open(1))));
    }

    #[test]
    fn test_parse_edit_keeps_label_whole() {
        match parse_command("edit 2 What about lifetimes?") {
            Ok(ExploreCommand::Edit(2, label)) => {
                assert_eq!(label, "What about lifetimes?");
            }
            _ => panic!("Expected edit command"),
        }
    }

    #[test]
    fn test_parse_add_keeps_label_whole() {
        match parse_command("add How do traits work in practice?") {
            Ok(ExploreCommand::Add(label)) => {
                assert_eq!(label, "How do traits work in practice?");
            }
            _ => panic!("Expected add command"),
        }
    }

    #[test]
    fn test_parse_rejects_zero_index() {
        assert!(parse_command("open 0").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_command() {
        assert!(parse_command("frobnicate").is_err());
    }

    #[test]
    fn test_parse_exit_aliases() {
        assert!(matches!(parse_command("exit"), Ok(ExploreCommand::Exit)));
        assert!(matches!(parse_command("quit"), Ok(ExploreCommand::Exit)));
        assert!(matches!(parse_command("q"), Ok(ExploreCommand::Exit)));
    }
}
