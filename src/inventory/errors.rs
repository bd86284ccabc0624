use thiserror::Error;

/// Errors from stock storage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Resource {0} is not stocked")]
    UnknownResource(String),

    #[error("Not enough {resource} available: {available} left, {requested} requested")]
    InsufficientStock {
        resource: String,
        available: u32,
        requested: u32,
    },

    #[error("Stock of {resource} cannot hold {available} + {added} units")]
    Overflow {
        resource: String,
        available: u32,
        added: u32,
    },

    /// Transport or storage fault from a remote-backed implementation.
    /// The in-memory store never emits this.
    #[error("Inventory backend unavailable: {0}")]
    Backend(String),
}
