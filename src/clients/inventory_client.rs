//! # Inventory Client
//!
//! Typed API over the inventory actor: catalog edits, stock movements and the read-side
//! queries the dashboard and console use.

use crate::candy_actor::{InventoryAction, InventoryActionResult, InventoryError, LowStockThreshold};
use crate::model::{Candy, CandyCreate, CandyId, CandyKind, CandyUpdate, InventoryItem};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Inventory actor.
#[derive(Clone)]
pub struct InventoryClient {
    inner: ResourceClient<Candy>,
    threshold: LowStockThreshold,
}

impl InventoryClient {
    pub fn new(inner: ResourceClient<Candy>, threshold: LowStockThreshold) -> Self {
        Self { inner, threshold }
    }

    #[instrument(skip(self))]
    pub async fn create_candy(&self, params: CandyCreate) -> Result<CandyId, InventoryError> {
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_candy(
        &self,
        id: CandyId,
        update: CandyUpdate,
    ) -> Result<Candy, InventoryError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Sends a stock action and returns the stock level after it.
    async fn stock_action(&self, id: CandyId, action: InventoryAction) -> Result<u32, InventoryError> {
        let result = self
            .inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)?;
        let level = match result {
            InventoryActionResult::CheckStock(level)
            | InventoryActionResult::SetStock(level)
            | InventoryActionResult::Decrement(level)
            | InventoryActionResult::ReserveStock(level)
            | InventoryActionResult::ReleaseStock(level) => level,
        };
        debug!(candy_id = %id, level, "Stock level");
        Ok(level)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: CandyId) -> Result<u32, InventoryError> {
        self.stock_action(id, InventoryAction::CheckStock).await
    }

    #[instrument(skip(self))]
    pub async fn set_stock(&self, id: CandyId, quantity: u32) -> Result<u32, InventoryError> {
        self.stock_action(id, InventoryAction::SetStock(quantity)).await
    }

    /// Takes up to `by` units off, stopping at zero.
    #[instrument(skip(self))]
    pub async fn decrement(&self, id: CandyId, by: u32) -> Result<u32, InventoryError> {
        self.stock_action(id, InventoryAction::Decrement(by)).await
    }

    /// Takes exactly `quantity` units off or fails with `InsufficientStock`.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: CandyId, quantity: u32) -> Result<u32, InventoryError> {
        self.stock_action(id, InventoryAction::ReserveStock(quantity)).await
    }

    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: CandyId, quantity: u32) -> Result<u32, InventoryError> {
        self.stock_action(id, InventoryAction::ReleaseStock(quantity)).await
    }

    /// Case-insensitive exact match on the candy name.
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Candy>, InventoryError> {
        let name = name.trim();
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|candy| candy.name.eq_ignore_ascii_case(name)))
    }

    #[instrument(skip(self))]
    pub async fn items_by_kind(&self, kind: CandyKind) -> Result<Vec<Candy>, InventoryError> {
        let mut items = self.list().await?;
        items.retain(|candy| candy.kind == kind);
        Ok(items)
    }

    /// Every candy with its stock status under the current threshold.
    pub async fn inventory(&self) -> Result<Vec<InventoryItem>, InventoryError> {
        let threshold = self.threshold.get();
        Ok(self
            .list()
            .await?
            .into_iter()
            .map(|candy| InventoryItem::new(candy, threshold))
            .collect())
    }

    /// Candies at or below the threshold, out-of-stock ones included.
    pub async fn low_stock_items(&self) -> Result<Vec<InventoryItem>, InventoryError> {
        let threshold = self.threshold.get();
        let mut items = self.inventory().await?;
        items.retain(|item| item.quantity() <= threshold);
        Ok(items)
    }

    /// Sum of price times quantity over the catalog.
    pub async fn total_inventory_value(&self) -> Result<f64, InventoryError> {
        let total: f64 = self.list().await?.iter().map(Candy::stock_value).sum();
        Ok(crate::model::round_cents(total))
    }

    pub fn low_stock_threshold(&self) -> u32 {
        self.threshold.get()
    }

    pub fn set_low_stock_threshold(&self, threshold: u32) {
        self.threshold.set(threshold);
    }
}

#[async_trait]
impl ActorClient<Candy> for InventoryClient {
    type Error = InventoryError;

    fn inner(&self) -> &ResourceClient<Candy> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => InventoryError::NotFound(id),
            other => other
                .downcast_entity::<InventoryError>()
                .unwrap_or_else(|e| InventoryError::ActorCommunicationError(e.to_string())),
        }
    }
}
