//! List command implementation.

use crate::commands::open_store;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use docent_domain::traits::SessionStore;

/// Execute the list command.
pub fn execute_list(config: &Config, formatter: &Formatter) -> Result<()> {
    let store = open_store(config)?;
    let summaries = store.list_sessions(&config.user_id)?;

    println!("{}", formatter.format_summaries(&summaries)?);

    Ok(())
}
