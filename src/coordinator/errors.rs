use crate::appointments::AppointmentError;
use crate::availability::AvailabilityError;
use crate::inventory::InventoryError;
use crate::{AppointmentId, ProviderId, ResourceName};
use chrono::NaiveDate;
use thiserror::Error;

/// Outcome taxonomy of the reservation core.
///
/// Everything except `BackendUnavailable` and `CompensationFailed` is a
/// recoverable, caller-facing rejection with no state left behind. No
/// operation is retried inside the core; retry policy belongs to the
/// caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReservationError {
    /// Malformed date or empty identifier. Rejected before any store is
    /// touched.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The `(provider, day)` slot is already open. An idempotency signal,
    /// not a failure worth retrying.
    #[error("Provider {provider_id} already has an open slot on {day}")]
    AlreadyExists {
        provider_id: ProviderId,
        day: NaiveDate,
    },

    /// No appointment under this id, including ids already canceled.
    #[error("Appointment {0} not found")]
    NotFound(AppointmentId),

    #[error("Resource {0} is not stocked")]
    UnknownResource(ResourceName),

    #[error("Not enough {resource} available: {available} left, {requested} requested")]
    InsufficientStock {
        resource: ResourceName,
        available: u32,
        requested: u32,
    },

    /// No open slot on the requested day. Any inventory taken beforehand
    /// has already been restored when this is returned.
    #[error("No provider is available on {0}")]
    NoProviderAvailable(NaiveDate),

    /// A store reported a transport or storage fault. Any partial
    /// progress was rolled back before this was returned.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A rollback itself failed; fatal for this operation only. One
    /// inventory unit may be unaccounted for until an operator steps in.
    #[error("Compensation failed: {detail}")]
    CompensationFailed { detail: String },
}

impl From<AvailabilityError> for ReservationError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::AlreadyExists { provider_id, day } => {
                ReservationError::AlreadyExists { provider_id, day }
            }
            AvailabilityError::Backend(detail) => ReservationError::BackendUnavailable(detail),
        }
    }
}

impl From<InventoryError> for ReservationError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::UnknownResource(name) => ReservationError::UnknownResource(name),
            InventoryError::InsufficientStock {
                resource,
                available,
                requested,
            } => ReservationError::InsufficientStock {
                resource,
                available,
                requested,
            },
            overflow @ InventoryError::Overflow { .. } => {
                ReservationError::InvalidInput(overflow.to_string())
            }
            InventoryError::Backend(detail) => ReservationError::BackendUnavailable(detail),
        }
    }
}

impl From<AppointmentError> for ReservationError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::Backend(detail) => ReservationError::BackendUnavailable(detail),
        }
    }
}
