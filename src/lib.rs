//! dosier - reservation core for limited-capacity vaccine appointments.
//!
//! Coordinates three stores under concurrent access: open provider
//! availability slots, consumable dose inventory, and confirmed
//! appointments. A reservation atomically claims one dose and one slot,
//! compensating the dose if the slot cannot be claimed; a cancellation
//! returns the dose but never the slot.
//!
//! # Example
//!
//! ```
//! use dosier::ReservationCoordinator;
//!
//! let core = ReservationCoordinator::new();
//! core.publish_availability("amy", "2024-03-01").unwrap();
//! core.adjust_inventory("moderna", 5).unwrap();
//!
//! let appointment = core.reserve("2024-03-01", "moderna", "p1").unwrap();
//! assert_eq!(appointment.provider_id, "amy");
//!
//! core.cancel(appointment.id).unwrap();
//! assert_eq!(core.inventory_levels().unwrap(), vec![("moderna".to_string(), 5)]);
//! ```

pub mod appointments;
pub mod availability;
pub mod coordinator;
pub mod inventory;

pub use appointments::{Appointment, AppointmentLedger, AppointmentStore};
pub use availability::{AvailabilityLedger, SlotStore};
pub use coordinator::{ReservationCoordinator, ReservationError};
pub use inventory::{InventoryStore, StockStore};

/// Identifier for a resource provider (caregiver).
pub type ProviderId = String;

/// Identifier for a patient.
pub type PatientId = String;

/// Name of a consumable resource type (e.g. a vaccine).
pub type ResourceName = String;

/// System-assigned appointment identifier, monotonically increasing.
pub type AppointmentId = u64;
