//! Reservation coordination across availability, inventory, and
//! appointments.
//!
//! The coordinator is the sole writer of all three stores. There is no
//! cross-store transaction: a reservation claims the reversible resource
//! (one inventory unit) first and the irreversible one (the provider's
//! slot) second, and compensates the inventory claim whenever a later
//! step fails. Saga-style compensation, not two-phase commit.

use crate::appointments::{Appointment, AppointmentLedger, AppointmentStore};
use crate::availability::{AvailabilityLedger, SlotStore};
use crate::inventory::{InventoryStore, StockStore};
use crate::{AppointmentId, ProviderId, ResourceName};
use chrono::NaiveDate;
use tracing::{debug, error, warn};

pub mod errors;
pub use errors::ReservationError;


/// Orchestrates reservations and cancellations over three backing stores.
///
/// Generic over the store implementations so a deployment can swap a
/// database-backed store in for any leaf; defaults to the in-memory
/// ledgers. Every operation takes `&self` and is safe under concurrent
/// callers, relying on each store's per-operation atomicity.
///
/// Actor identity arrives as explicit parameters (`patient_id`,
/// `provider_id`); authentication and role checks belong to the session
/// layer in front of this type.
#[derive(Debug, Default)]
pub struct ReservationCoordinator<S = AvailabilityLedger, K = InventoryStore, A = AppointmentLedger>
where
    S: SlotStore,
    K: StockStore,
    A: AppointmentStore,
{
    availability: S,
    inventory: K,
    appointments: A,
}

impl ReservationCoordinator {
    /// Creates a coordinator over empty in-memory stores.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, K, A> ReservationCoordinator<S, K, A>
where
    S: SlotStore,
    K: StockStore,
    A: AppointmentStore,
{
    /// Creates a coordinator over caller-provided stores.
    pub fn with_stores(availability: S, inventory: K, appointments: A) -> Self {
        Self {
            availability,
            inventory,
            appointments,
        }
    }

    /// Books an appointment for `patient_id` on `day` holding one unit of
    /// `resource_name`.
    ///
    /// Either fully succeeds or leaves no trace: the inventory unit taken
    /// in the first step is restored if no slot can be consumed or the
    /// appointment cannot be recorded. A consumed slot is the point of no
    /// return, so it is taken last among the fallible claims.
    pub fn reserve(
        &self,
        day: &str,
        resource_name: &str,
        patient_id: &str,
    ) -> Result<Appointment, ReservationError> {
        let day = parse_day(day)?;
        require_non_empty(resource_name, "resource name")?;
        require_non_empty(patient_id, "patient id")?;

        self.inventory.try_decrease(resource_name, 1)?;

        let provider_id = match self.availability.try_consume_any(day) {
            Ok(Some(provider_id)) => provider_id,
            Ok(None) => {
                self.return_dose(resource_name, "no provider available")?;
                return Err(ReservationError::NoProviderAvailable(day));
            }
            Err(fault) => {
                self.return_dose(resource_name, "availability backend fault")?;
                return Err(fault.into());
            }
        };

        match self
            .appointments
            .record(day, patient_id, &provider_id, resource_name)
        {
            Ok(appointment) => {
                debug!(
                    id = appointment.id,
                    provider = %provider_id,
                    resource = resource_name,
                    "reservation confirmed"
                );
                Ok(appointment)
            }
            Err(fault) => {
                // The slot is already gone and cannot be recreated; the
                // dose can and must be.
                self.return_dose(resource_name, "appointment backend fault")?;
                Err(fault.into())
            }
        }
    }

    /// Cancels an appointment, returning its held unit to inventory.
    ///
    /// Idempotent at the interface: a second cancel of the same id finds
    /// nothing to remove and reports [`ReservationError::NotFound`], so
    /// inventory is restored at most once. The provider's slot stays
    /// consumed.
    pub fn cancel(&self, appointment_id: AppointmentId) -> Result<Appointment, ReservationError> {
        let appointment = self
            .appointments
            .remove(appointment_id)?
            .ok_or(ReservationError::NotFound(appointment_id))?;

        if let Err(fault) = self.inventory.restore(&appointment.resource_name, 1) {
            // The appointment is already gone; an unrestored unit needs
            // operator attention.
            error!(
                id = appointment.id,
                resource = %appointment.resource_name,
                error = %fault,
                "inventory restore failed after cancellation"
            );
            return Err(ReservationError::CompensationFailed {
                detail: fault.to_string(),
            });
        }

        debug!(id = appointment.id, "appointment canceled");
        Ok(appointment)
    }

    /// Opens a slot for `provider_id` on `day`.
    pub fn publish_availability(&self, provider_id: &str, day: &str) -> Result<(), ReservationError> {
        let day = parse_day(day)?;
        require_non_empty(provider_id, "provider id")?;
        self.availability.publish(provider_id, day)?;
        Ok(())
    }

    /// Adds (`delta > 0`) or removes (`delta < 0`) units of
    /// `resource_name`, returning the new total. Removal rides the same
    /// guarded decrement as reservation and cannot push the count
    /// negative.
    pub fn adjust_inventory(
        &self,
        resource_name: &str,
        delta: i64,
    ) -> Result<u32, ReservationError> {
        require_non_empty(resource_name, "resource name")?;
        if delta == 0 {
            return Err(ReservationError::InvalidInput(
                "inventory delta must be non-zero".to_string(),
            ));
        }
        let count = u32::try_from(delta.unsigned_abs())
            .map_err(|_| ReservationError::InvalidInput(format!("delta {delta} out of range")))?;
        let total = if delta > 0 {
            self.inventory.increase(resource_name, count)?
        } else {
            self.inventory.try_decrease(resource_name, count)?
        };
        Ok(total)
    }

    /// Providers with an open slot on `day`, ascending by provider id.
    pub fn find_providers(&self, day: &str) -> Result<Vec<ProviderId>, ReservationError> {
        let day = parse_day(day)?;
        Ok(self.availability.find_providers(day)?)
    }

    /// Appointments held with `provider_id`, ascending by id.
    pub fn list_for_provider(&self, provider_id: &str) -> Result<Vec<Appointment>, ReservationError> {
        Ok(self.appointments.list_for_provider(provider_id)?)
    }

    /// Appointments held by `patient_id`, ascending by id.
    pub fn list_for_patient(&self, patient_id: &str) -> Result<Vec<Appointment>, ReservationError> {
        Ok(self.appointments.list_for_patient(patient_id)?)
    }

    /// Current unit count per resource, ascending by name.
    pub fn inventory_levels(&self) -> Result<Vec<(ResourceName, u32)>, ReservationError> {
        Ok(self.inventory.levels()?)
    }

    /// Looks up a single appointment by id.
    pub fn appointment(
        &self,
        appointment_id: AppointmentId,
    ) -> Result<Option<Appointment>, ReservationError> {
        Ok(self.appointments.get(appointment_id)?)
    }

    /// Compensating restore of one reserved unit. A failure here means a
    /// unit is lost until an operator intervenes, which escalates the
    /// whole operation to [`ReservationError::CompensationFailed`].
    fn return_dose(&self, resource_name: &str, cause: &str) -> Result<(), ReservationError> {
        warn!(resource = resource_name, cause, "rolling back reserved unit");
        self.inventory.restore(resource_name, 1).map_err(|fault| {
            error!(resource = resource_name, error = %fault, "unit rollback failed");
            ReservationError::CompensationFailed {
                detail: fault.to_string(),
            }
        })?;
        Ok(())
    }
}

fn parse_day(day: &str) -> Result<NaiveDate, ReservationError> {
    day.parse()
        .map_err(|_| ReservationError::InvalidInput(format!("malformed date: {day:?}")))
}

fn require_non_empty(value: &str, what: &str) -> Result<(), ReservationError> {
    if value.is_empty() {
        return Err(ReservationError::InvalidInput(format!(
            "{what} must not be empty"
        )));
    }
    Ok(())
}
