//! Delete and purge command implementations.

use crate::cli::{DeleteArgs, PurgeArgs};
use crate::commands::{open_store, resolve_session_id};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docent_domain::traits::SessionStore;

/// Execute the delete command.
pub fn execute_delete(args: DeleteArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut store = open_store(config)?;
    let id = resolve_session_id(&store, &config.user_id, &args.id)?;

    let removed = store.delete_session(id, &config.user_id)?;
    if !removed {
        return Err(CliError::SessionNotFound(args.id));
    }

    println!("{}", formatter.success(&format!("Deleted session {}", id)));

    Ok(())
}

/// Execute the purge command.
pub fn execute_purge(args: PurgeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    if !args.yes {
        return Err(CliError::InvalidInput(format!(
            "This deletes every session owned by '{}'. Re-run with --yes to confirm.",
            config.user_id
        )));
    }

    let mut store = open_store(config)?;
    let removed = store.delete_owner(&config.user_id)?;

    println!(
        "{}",
        formatter.success(&format!("Deleted {} sessions", removed))
    );

    Ok(())
}
