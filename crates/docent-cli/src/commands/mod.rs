//! Command implementations.

pub mod delete;
pub mod list;
pub mod regen;
pub mod show;
pub mod upload;

pub use self::delete::{execute_delete, execute_purge};
pub use self::list::execute_list;
pub use self::regen::execute_regen;
pub use self::show::execute_show;
pub use self::upload::execute_upload;

use crate::config::Config;
use crate::error::{CliError, Result};
use docent_domain::traits::SessionStore;
use docent_domain::SessionId;
use docent_llm::ChatCompletionsProvider;
use docent_store::SqliteStore;

/// Open the local session store, creating its directory if needed.
pub(crate) fn open_store(config: &Config) -> Result<SqliteStore> {
    let path = config.database_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(SqliteStore::new(path)?)
}

/// Build the completion provider from the configured endpoint.
pub(crate) fn build_provider(config: &Config) -> Result<ChatCompletionsProvider> {
    let api_key = std::env::var(&config.completion.api_key_env)
        .map_err(|_| CliError::MissingApiKey(config.completion.api_key_env.clone()))?;

    Ok(ChatCompletionsProvider::new(
        &config.completion.endpoint,
        api_key,
        &config.completion.model,
    ))
}

/// Resolve a session id argument, accepting a unique id prefix
/// (listings truncate ids for readability).
pub(crate) fn resolve_session_id(
    store: &SqliteStore,
    owner_id: &str,
    id: &str,
) -> Result<SessionId> {
    if let Ok(parsed) = SessionId::from_string(id) {
        return Ok(parsed);
    }

    let matches: Vec<SessionId> = store
        .list_sessions(owner_id)?
        .into_iter()
        .map(|s| s.id)
        .filter(|sid| sid.to_string().starts_with(id))
        .collect();

    match matches.len() {
        1 => Ok(matches[0]),
        0 => Err(CliError::SessionNotFound(id.to_string())),
        _ => Err(CliError::InvalidInput(format!(
            "Ambiguous session id prefix: {}",
            id
        ))),
    }
}
