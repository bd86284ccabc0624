//! Consumable resource inventory.
//!
//! Tracks available unit counts per resource name. The count can never go
//! negative: the check and the subtraction happen in one atomic step.

use crate::ResourceName;
use parking_lot::RwLock;
use std::collections::BTreeMap;

pub mod errors;
pub use errors::InventoryError;


/// Store of per-resource available unit counts.
///
/// `try_decrease` is the guarded primitive: check-then-subtract in a
/// single atomic step, the equivalent of a conditional
/// `UPDATE ... WHERE available >= ?` against a shared database.
pub trait StockStore: Send + Sync {
    /// Adds `count` units, creating the resource record at zero on first
    /// reference. Returns the new total. Fails with
    /// [`InventoryError::Overflow`] if the total would exceed the counter
    /// range, leaving the count unchanged.
    fn increase(&self, name: &str, count: u32) -> Result<u32, InventoryError>;

    /// Subtracts `count` units if at least that many are available,
    /// returning the new total. Never leaves the count negative.
    fn try_decrease(&self, name: &str, count: u32) -> Result<u32, InventoryError>;

    /// Unconditionally returns `count` units, used by cancellation and by
    /// reservation rollback. Calling it at most once per held unit is the
    /// caller's responsibility.
    fn restore(&self, name: &str, count: u32) -> Result<u32, InventoryError>;

    /// Current count for `name`, or `None` if never stocked. Read-only.
    fn available(&self, name: &str) -> Result<Option<u32>, InventoryError>;

    /// Every known resource with its count, ascending by name. Read-only.
    fn levels(&self) -> Result<Vec<(ResourceName, u32)>, InventoryError>;
}

/// In-memory stock store.
#[derive(Debug, Default)]
pub struct InventoryStore {
    stock: RwLock<BTreeMap<ResourceName, u32>>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StockStore for InventoryStore {
    fn increase(&self, name: &str, count: u32) -> Result<u32, InventoryError> {
        let mut stock = self.stock.write();
        let current = stock.get(name).copied().unwrap_or(0);
        let total = current
            .checked_add(count)
            .ok_or(InventoryError::Overflow {
                resource: name.to_string(),
                available: current,
                added: count,
            })?;
        stock.insert(name.to_string(), total);
        Ok(total)
    }

    fn try_decrease(&self, name: &str, count: u32) -> Result<u32, InventoryError> {
        let mut stock = self.stock.write();
        let units = stock
            .get_mut(name)
            .ok_or_else(|| InventoryError::UnknownResource(name.to_string()))?;
        if *units < count {
            return Err(InventoryError::InsufficientStock {
                resource: name.to_string(),
                available: *units,
                requested: count,
            });
        }
        *units -= count;
        Ok(*units)
    }

    fn restore(&self, name: &str, count: u32) -> Result<u32, InventoryError> {
        self.increase(name, count)
    }

    fn available(&self, name: &str) -> Result<Option<u32>, InventoryError> {
        Ok(self.stock.read().get(name).copied())
    }

    fn levels(&self) -> Result<Vec<(ResourceName, u32)>, InventoryError> {
        let stock = self.stock.read();
        Ok(stock.iter().map(|(name, units)| (name.clone(), *units)).collect())
    }
}
