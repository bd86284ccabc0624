use chrono::NaiveDate;
use thiserror::Error;

/// Errors from slot storage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Provider {provider_id} already has an open slot on {day}")]
    AlreadyExists { provider_id: String, day: NaiveDate },

    /// Transport or storage fault from a remote-backed implementation.
    /// The in-memory ledger never emits this.
    #[error("Availability backend unavailable: {0}")]
    Backend(String),
}
