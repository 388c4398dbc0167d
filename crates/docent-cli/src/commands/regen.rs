//! Regen command implementation.
//!
//! Re-runs extraction for a stored session against its saved source text,
//! replacing the item list for the chosen mode.

use crate::cli::RegenArgs;
use crate::commands::{build_provider, open_store, resolve_session_id};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docent_domain::traits::SessionStore;
use docent_domain::{ItemKind, NewSession};
use docent_extractor::{ExtractionRequest, Extractor, ExtractorConfig};
use docent_store::content_fingerprint;
use std::sync::Arc;

/// Execute the regen command.
pub async fn execute_regen(args: RegenArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut store = open_store(config)?;
    let id = resolve_session_id(&store, &config.user_id, &args.id)?;

    let session = store
        .get_session(id, &config.user_id)?
        .ok_or_else(|| CliError::SessionNotFound(args.id.clone()))?;

    let kind: ItemKind = args.mode.into();

    println!(
        "{}",
        formatter.info(&format!("Regenerating {}s for '{}'...", kind, session.title))
    );

    let provider = Arc::new(build_provider(config)?);
    let extractor = Extractor::new(provider, ExtractorConfig::default());

    let outcome = extractor
        .extract(ExtractionRequest {
            text: session.source_text.clone(),
            kind,
        })
        .await?;

    let labels: Vec<String> = outcome.items.iter().map(|i| i.label.clone()).collect();
    let count = labels.len();

    store.upsert_session(NewSession {
        owner_id: config.user_id.clone(),
        title: session.title,
        source_text: session.source_text.clone(),
        topics: (kind == ItemKind::Topic).then(|| labels.clone()),
        questions: (kind == ItemKind::Question).then_some(labels),
        fingerprint: content_fingerprint(&config.user_id, &session.source_text),
    })?;

    println!(
        "{}",
        formatter.success(&format!("Replaced with {} {}s", count, kind))
    );

    if let Some(session) = store.get_session(id, &config.user_id)? {
        println!("{}", formatter.format_session(&session)?);
    }

    Ok(())
}
