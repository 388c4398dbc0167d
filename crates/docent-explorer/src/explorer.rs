//! The interactive item cache

use crate::error::ExplorerError;
use crate::prompt::detail_request;
use docent_domain::traits::CompletionProvider;
use docent_domain::{Item, ItemId, ItemKind};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Interactive view over one session's item list
///
/// Manages on-demand retrieval of per-item detail text against a shared
/// source context: expand/collapse, lazy fetch with caching, manual reload,
/// label edits, and appending user-authored items.
///
/// Ephemeral fetch state lives in maps keyed by [`ItemId`], separate from the
/// item records themselves: a detail cache, per-item loading flags, and a
/// single last-error slot. At most one item is expanded at a time; expanding
/// another item collapses the previous one. None of this state is persisted.
pub struct ItemExplorer<P>
where
    P: CompletionProvider,
{
    provider: Arc<P>,
    kind: ItemKind,
    context: String,
    items: Vec<Item>,
    expanded: Option<ItemId>,
    loading: HashSet<ItemId>,
    details: HashMap<ItemId, String>,
    last_error: Option<String>,
}

impl<P> ItemExplorer<P>
where
    P: CompletionProvider + Send + Sync,
{
    /// Create an explorer over the given items and shared context
    ///
    /// Items that already carry a detail seed the cache, so their detail is
    /// shown without a fetch.
    pub fn new(
        provider: Arc<P>,
        kind: ItemKind,
        context: impl Into<String>,
        mut items: Vec<Item>,
    ) -> Self {
        let mut details = HashMap::new();
        for item in &mut items {
            if let Some(detail) = item.detail.take() {
                details.insert(item.id, detail);
            }
        }

        Self {
            provider,
            kind,
            context: context.into(),
            items,
            expanded: None,
            loading: HashSet::new(),
            details,
            last_error: None,
        }
    }

    /// The items, in display order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The kind of items this explorer works with
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// The currently expanded item, if any
    pub fn expanded(&self) -> Option<ItemId> {
        self.expanded
    }

    /// The cached detail text for an item, if fetched
    pub fn detail(&self, id: ItemId) -> Option<&str> {
        self.details.get(&id).map(String::as_str)
    }

    /// Whether a detail fetch is in flight for an item
    pub fn is_loading(&self, id: ItemId) -> bool {
        self.loading.contains(&id)
    }

    /// The error message from the most recent failed fetch, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Look up an item by id
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Expand or collapse an item
    ///
    /// Selecting the already-expanded item collapses it. Selecting any other
    /// item expands it (collapsing the previous one), clears the last error,
    /// and fetches its detail unless the cache already has one. At most one
    /// fetch is triggered per call.
    pub async fn toggle_expand(&mut self, id: ItemId) -> Result<(), ExplorerError> {
        if self.item(id).is_none() {
            return Err(ExplorerError::UnknownItem(id));
        }

        if self.expanded == Some(id) {
            self.expanded = None;
            self.last_error = None;
            return Ok(());
        }

        self.expanded = Some(id);
        self.last_error = None;

        if !self.details.contains_key(&id) && !self.loading.contains(&id) {
            self.fetch_detail(id).await?;
        }

        Ok(())
    }

    /// Fetch the detail text for an item
    ///
    /// Marks the item loading, clears the last error, and asks the completion
    /// provider for a detail of the item's current label against the shared
    /// context. On success the result replaces the cache entry; on failure
    /// the error message is stored and any previously cached detail is left
    /// in place. Provider failures are reported through [`Self::last_error`],
    /// not as an `Err`.
    pub async fn fetch_detail(&mut self, id: ItemId) -> Result<(), ExplorerError> {
        let label = self
            .item(id)
            .map(|item| item.label.clone())
            .ok_or(ExplorerError::UnknownItem(id))?;

        if !self.loading.insert(id) {
            return Err(ExplorerError::FetchInFlight(id));
        }
        self.last_error = None;

        debug!("Fetching {} detail for '{}'", self.kind, label);

        let request = detail_request(self.kind, &label, &self.context);
        match self.provider.complete(&request).await {
            Ok(detail) => {
                self.details.insert(id, detail);
            }
            Err(e) => {
                warn!("Detail fetch for '{}' failed: {}", label, e);
                self.last_error = Some(e.to_string());
            }
        }

        self.loading.remove(&id);
        Ok(())
    }

    /// Re-fetch the detail for an already-populated item
    ///
    /// Only available once a detail is cached and no fetch is in flight for
    /// the item; the fresh result replaces the cached one.
    pub async fn reload(&mut self, id: ItemId) -> Result<(), ExplorerError> {
        if self.item(id).is_none() {
            return Err(ExplorerError::UnknownItem(id));
        }
        if self.loading.contains(&id) {
            return Err(ExplorerError::FetchInFlight(id));
        }
        if !self.details.contains_key(&id) {
            return Err(ExplorerError::NotFetched(id));
        }

        self.fetch_detail(id).await
    }

    /// Replace an item's label in place
    ///
    /// Any cached detail for the item is deliberately left untouched, so it
    /// may describe the previous label until the user reloads.
    pub fn edit_label(
        &mut self,
        id: ItemId,
        new_label: impl Into<String>,
    ) -> Result<(), ExplorerError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(ExplorerError::UnknownItem(id))?;

        item.label = new_label.into();
        Ok(())
    }

    /// Append a new user-authored item
    ///
    /// The label is trimmed; if nothing remains, the list is left unchanged
    /// and `None` is returned. The new item starts with no detail.
    pub fn add_item(&mut self, label: &str) -> Option<ItemId> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return None;
        }

        let item = Item::new(trimmed);
        let id = item.id;
        self.items.push(item);
        Some(id)
    }
}
