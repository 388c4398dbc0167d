//! Show command implementation.

use crate::cli::ShowArgs;
use crate::commands::{open_store, resolve_session_id};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docent_domain::traits::SessionStore;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let store = open_store(config)?;
    let id = resolve_session_id(&store, &config.user_id, &args.id)?;

    let session = store
        .get_session(id, &config.user_id)?
        .ok_or_else(|| CliError::SessionNotFound(args.id.clone()))?;

    println!("{}", formatter.format_session(&session)?);

    Ok(())
}
