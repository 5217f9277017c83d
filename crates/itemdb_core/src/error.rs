//! Error types for itemdb core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core item-list operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An item with this server id is already present in the list.
    #[error("duplicate server id: {id}")]
    DuplicateId {
        /// The conflicting server id.
        id: u16,
    },

    /// No item with this server id exists in the list.
    #[error("item not found: {id}")]
    ItemNotFound {
        /// The server id that was not found.
        id: u16,
    },

    /// The server id space is exhausted.
    #[error("no free server id available above {max}")]
    IdSpaceExhausted {
        /// The current highest server id.
        max: u16,
    },
}

impl CoreError {
    /// Creates a duplicate id error.
    pub fn duplicate_id(id: u16) -> Self {
        Self::DuplicateId { id }
    }

    /// Creates an item not found error.
    pub fn item_not_found(id: u16) -> Self {
        Self::ItemNotFound { id }
    }
}
