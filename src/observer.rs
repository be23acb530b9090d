//! # Low-stock Notifications
//!
//! The inventory actor publishes a [`LowStockAlert`] through an [`InventorySubject`] whenever a
//! candy's stock ends up at or below the threshold. Observers are plain trait objects, and any
//! `Fn(&LowStockAlert)` closure is one.
//!
//! Observers run on the inventory actor's task, so they should return quickly. Forward to a
//! channel if the work is slow.

use crate::model::{CandyId, StockStatus};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct LowStockAlert {
    pub candy_id: CandyId,
    pub name: String,
    pub quantity: u32,
    pub status: StockStatus,
}

pub trait InventoryObserver: Send + Sync {
    fn on_low_stock(&self, alert: &LowStockAlert);
}

impl<F> InventoryObserver for F
where
    F: Fn(&LowStockAlert) + Send + Sync,
{
    fn on_low_stock(&self, alert: &LowStockAlert) {
        self(alert)
    }
}

/// Handle returned by [`InventorySubject::attach`], used to detach again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type ObserverList = Vec<(ObserverId, Arc<dyn InventoryObserver>)>;

/// Shared observer registry. Clones share the same list.
#[derive(Clone, Default)]
pub struct InventorySubject {
    observers: Arc<RwLock<ObserverList>>,
    next_id: Arc<AtomicU64>,
}

impl InventorySubject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, observer: impl InventoryObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(observer)));
        debug!(?id, "Observer attached");
        id
    }

    /// Returns false if the id was not attached.
    pub fn detach(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(attached, _)| *attached != id);
        before != observers.len()
    }

    pub fn notify(&self, alert: &LowStockAlert) {
        // Snapshot first so an observer may attach or detach without deadlocking.
        let snapshot: Vec<Arc<dyn InventoryObserver>> = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        warn!(
            candy_id = %alert.candy_id,
            name = %alert.name,
            quantity = alert.quantity,
            status = %alert.status,
            observers = snapshot.len(),
            "Low stock"
        );
        for observer in snapshot {
            observer.on_low_stock(alert);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
