//! Provider availability slots.
//!
//! A slot is an open `(provider, day)` pair. Slots are one-shot: a
//! successful reservation consumes the slot and nothing recreates it,
//! not even cancellation of the appointment that consumed it.

use crate::ProviderId;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::BTreeSet;

pub mod errors;
pub use errors::AvailabilityError;

#[cfg(test)]
mod tests;

/// Store of open `(provider, day)` slots.
///
/// `try_consume_any` must be a single atomic compare-and-delete: two
/// concurrent callers never both win the same slot, and never both lose
/// while two distinct slots exist for the day. A backing database would
/// use a conditional `DELETE ... RETURNING` here; the in-memory ledger
/// uses one write-lock scope.
pub trait SlotStore: Send + Sync {
    /// Opens a slot for `provider_id` on `day`.
    ///
    /// Fails with [`AvailabilityError::AlreadyExists`] if the pair is
    /// already open; callers may treat that as a no-op warning.
    fn publish(&self, provider_id: &str, day: NaiveDate) -> Result<(), AvailabilityError>;

    /// Returns every provider with an open slot on `day`, ascending by
    /// provider id. Read-only.
    fn find_providers(&self, day: NaiveDate) -> Result<Vec<ProviderId>, AvailabilityError>;

    /// Removes the slot of the lexicographically smallest provider open
    /// on `day` and returns that provider, or `None` without mutation.
    fn try_consume_any(&self, day: NaiveDate) -> Result<Option<ProviderId>, AvailabilityError>;
}

/// In-memory slot store, ordered by `(day, provider)`.
///
/// The ordering makes both reads cheap: `find_providers` is a range scan
/// and `try_consume_any` takes the first key in the day's range, which is
/// the deterministic lexicographic choice the reservation path relies on.
#[derive(Debug, Default)]
pub struct AvailabilityLedger {
    slots: RwLock<BTreeSet<(NaiveDate, ProviderId)>>,
}

impl AvailabilityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open slots across all days.
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }
}

impl SlotStore for AvailabilityLedger {
    fn publish(&self, provider_id: &str, day: NaiveDate) -> Result<(), AvailabilityError> {
        let mut slots = self.slots.write();
        if !slots.insert((day, provider_id.to_string())) {
            return Err(AvailabilityError::AlreadyExists {
                provider_id: provider_id.to_string(),
                day,
            });
        }
        Ok(())
    }

    fn find_providers(&self, day: NaiveDate) -> Result<Vec<ProviderId>, AvailabilityError> {
        let slots = self.slots.read();
        Ok(slots
            .range((day, String::new())..)
            .take_while(|entry| entry.0 == day)
            .map(|entry| entry.1.clone())
            .collect())
    }

    fn try_consume_any(&self, day: NaiveDate) -> Result<Option<ProviderId>, AvailabilityError> {
        let mut slots = self.slots.write();
        // First key in the day's range is the smallest provider id.
        let chosen = slots
            .range((day, String::new())..)
            .next()
            .filter(|entry| entry.0 == day)
            .cloned();
        match chosen {
            Some(key) => {
                slots.remove(&key);
                Ok(Some(key.1))
            }
            None => Ok(None),
        }
    }
}
