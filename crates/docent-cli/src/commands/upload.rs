//! Upload command implementation.

use crate::cli::UploadArgs;
use crate::commands::{build_provider, open_store};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docent_domain::traits::SessionStore;
use docent_domain::{ItemKind, NewSession};
use docent_extractor::{ExtractionRequest, Extractor, ExtractorConfig};
use docent_store::content_fingerprint;
use std::fs;
use std::sync::Arc;

/// Execute the upload command.
pub async fn execute_upload(
    args: UploadArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let is_pdf = args
        .file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        return Err(CliError::InvalidInput(
            "Only PDF files are supported".to_string(),
        ));
    }

    let bytes = fs::read(&args.file)?;
    let text = docent_ingest::extract_pdf_text(&bytes)?;

    let kind: ItemKind = args.mode.into();

    println!(
        "{}",
        formatter.info(&format!(
            "Extracted {} chars of text, asking the model for {}s...",
            text.len(),
            kind
        ))
    );

    let provider = Arc::new(build_provider(config)?);
    let extractor = Extractor::new(provider, ExtractorConfig::default());

    let outcome = extractor
        .extract(ExtractionRequest {
            text: text.clone(),
            kind,
        })
        .await?;

    if outcome.skipped > 0 {
        eprintln!(
            "{}",
            formatter.error(&format!(
                "Skipped {} malformed records in the response",
                outcome.skipped
            ))
        );
    }

    let labels: Vec<String> = outcome.items.iter().map(|i| i.label.clone()).collect();
    let count = labels.len();

    let title = args.title.unwrap_or_else(|| {
        args.file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string())
    });

    let fingerprint = content_fingerprint(&config.user_id, &text);

    let mut store = open_store(config)?;
    let id = store.upsert_session(NewSession {
        owner_id: config.user_id.clone(),
        title,
        source_text: text,
        topics: (kind == ItemKind::Topic).then(|| labels.clone()),
        questions: (kind == ItemKind::Question).then_some(labels),
        fingerprint,
    })?;

    println!(
        "{}",
        formatter.success(&format!("Session {} saved with {} {}s", id, count, kind))
    );

    if let Some(session) = store.get_session(id, &config.user_id)? {
        println!("{}", formatter.format_session(&session)?);
    }

    Ok(())
}
