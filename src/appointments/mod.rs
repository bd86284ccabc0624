//! Confirmed appointments.

use crate::{AppointmentId, PatientId, ProviderId, ResourceName};
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::BTreeMap;

pub mod errors;
pub use errors::AppointmentError;


/// A confirmed booking linking a patient, a provider, a day, and one held
/// resource unit. The unit is held until the appointment is canceled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Appointment {
    pub id: AppointmentId,
    pub day: NaiveDate,
    pub patient_id: PatientId,
    pub provider_id: ProviderId,
    pub resource_name: ResourceName,
}

/// Store of confirmed appointments keyed by a monotonically increasing id.
pub trait AppointmentStore: Send + Sync {
    /// Appends a new appointment under a freshly assigned id.
    fn record(
        &self,
        day: NaiveDate,
        patient_id: &str,
        provider_id: &str,
        resource_name: &str,
    ) -> Result<Appointment, AppointmentError>;

    fn get(&self, id: AppointmentId) -> Result<Option<Appointment>, AppointmentError>;

    /// Deletes and returns the record in one atomic step, so callers can
    /// tell "canceling now" apart from "someone already canceled this".
    fn remove(&self, id: AppointmentId) -> Result<Option<Appointment>, AppointmentError>;

    /// All appointments for `provider_id`, ascending by id. Read-only.
    fn list_for_provider(&self, provider_id: &str) -> Result<Vec<Appointment>, AppointmentError>;

    /// All appointments for `patient_id`, ascending by id. Read-only.
    fn list_for_patient(&self, patient_id: &str) -> Result<Vec<Appointment>, AppointmentError>;
}

#[derive(Debug, Default)]
struct Inner {
    next_id: AppointmentId,
    by_id: BTreeMap<AppointmentId, Appointment>,
}

/// In-memory appointment store. Ids start at 1 and are unique for the
/// process lifetime; removed ids are never reassigned.
#[derive(Debug, Default)]
pub struct AppointmentLedger {
    inner: RwLock<Inner>,
}

impl AppointmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().by_id.is_empty()
    }
}

impl AppointmentStore for AppointmentLedger {
    fn record(
        &self,
        day: NaiveDate,
        patient_id: &str,
        provider_id: &str,
        resource_name: &str,
    ) -> Result<Appointment, AppointmentError> {
        let mut inner = self.inner.write();
        inner.next_id += 1;
        let appointment = Appointment {
            id: inner.next_id,
            day,
            patient_id: patient_id.to_string(),
            provider_id: provider_id.to_string(),
            resource_name: resource_name.to_string(),
        };
        inner.by_id.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    fn get(&self, id: AppointmentId) -> Result<Option<Appointment>, AppointmentError> {
        Ok(self.inner.read().by_id.get(&id).cloned())
    }

    fn remove(&self, id: AppointmentId) -> Result<Option<Appointment>, AppointmentError> {
        Ok(self.inner.write().by_id.remove(&id))
    }

    fn list_for_provider(&self, provider_id: &str) -> Result<Vec<Appointment>, AppointmentError> {
        let inner = self.inner.read();
        Ok(inner
            .by_id
            .values()
            .filter(|a| a.provider_id == provider_id)
            .cloned()
            .collect())
    }

    fn list_for_patient(&self, patient_id: &str) -> Result<Vec<Appointment>, AppointmentError> {
        let inner = self.inner.read();
        Ok(inner
            .by_id
            .values()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect())
    }
}
