//! Docent Explorer
//!
//! The interactive item cache: given a session's extracted items and their
//! shared source text, manages per-item lazy detail fetches, an in-memory
//! detail cache, label edits, manual reloads, and user-appended items.
//!
//! # State model
//!
//! Each item moves through `Collapsed → Expanded+Fetching → Expanded+Ready`
//! (or `Expanded+Error`); selecting it again collapses it, and selecting a
//! different item collapses the previous one, so at most one item is expanded
//! at any time. Fetch state is keyed by stable item id in maps alongside the
//! item list:
//!
//! - a detail cache (`id → text`), filled on successful fetches
//! - per-item loading flags, so a fetch for one item never blocks another
//! - a single last-error slot, cleared on every expand
//!
//! A failed fetch stores its message in place of the detail and leaves every
//! other item untouched; there is no automatic retry. None of this state is
//! persisted.
//!
//! # Example Usage
//!
//! ```no_run
//! use docent_explorer::ItemExplorer;
//! use docent_domain::{Item, ItemKind};
//! use docent_llm::MockProvider;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(MockProvider::new("An answer."));
//! let items = vec![Item::new("What is ownership?")];
//!
//! let mut explorer =
//!     ItemExplorer::new(provider, ItemKind::Question, "source text", items);
//!
//! let id = explorer.items()[0].id;
//! explorer.toggle_expand(id).await?;
//!
//! assert_eq!(explorer.detail(id), Some("An answer."));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod explorer;
mod prompt;

pub use error::ExplorerError;
pub use explorer::ItemExplorer;
pub use prompt::detail_request;
