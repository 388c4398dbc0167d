//! Error types for the explorer

use docent_domain::ItemId;
use thiserror::Error;

/// Errors that can occur while driving an item explorer
///
/// Provider failures are not represented here: a failed detail fetch stores
/// its message in the explorer's error slot and the call itself succeeds.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// The item id is not part of this explorer's list
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),

    /// A fetch is already in flight for this item
    #[error("A fetch is already in flight for item {0}")]
    FetchInFlight(ItemId),

    /// Reload requested for an item whose detail was never fetched
    #[error("No cached detail to reload for item {0}")]
    NotFetched(ItemId),
}
