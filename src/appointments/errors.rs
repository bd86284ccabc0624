use thiserror::Error;

/// Errors from appointment storage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppointmentError {
    /// Transport or storage fault from a remote-backed implementation.
    /// The in-memory ledger never emits this.
    #[error("Appointment backend unavailable: {0}")]
    Backend(String),
}
