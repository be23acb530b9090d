//! [`ActorEntity`] implementation for [`Candy`].
//!
//! Every successful mutation is written to `inventory.csv` before the actor commits it, so a
//! failed write leaves both the file and the in-memory stock unchanged.

use super::actions::{InventoryAction, InventoryActionResult};
use super::error::InventoryError;
use super::InventoryContext;
use crate::model::{Candy, CandyCreate, CandyId, CandyUpdate, StockStatus};
use crate::observer::LowStockAlert;
use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::debug;

fn validate_name(name: &str) -> Result<(), InventoryError> {
    if name.trim().is_empty() {
        return Err(InventoryError::Validation("name must not be empty".into()));
    }
    Ok(())
}

fn validate_amount(field: &str, value: f64) -> Result<(), InventoryError> {
    if !value.is_finite() || value < 0.0 {
        return Err(InventoryError::Validation(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(())
}

impl Candy {
    /// Publishes a low-stock alert if the current stock is at or below the threshold.
    fn alert_if_low(&self, ctx: &InventoryContext) {
        let threshold = ctx.threshold.get();
        if self.quantity <= threshold {
            ctx.alerts.notify(&LowStockAlert {
                candy_id: self.id,
                name: self.name.clone(),
                quantity: self.quantity,
                status: StockStatus::from_quantity(self.quantity, threshold),
            });
        }
    }
}

#[async_trait]
impl ActorEntity for Candy {
    type Id = CandyId;
    type Create = CandyCreate;
    type Update = CandyUpdate;
    type Action = InventoryAction;
    type ActionResult = InventoryActionResult;
    type Context = InventoryContext;
    type Error = InventoryError;

    fn id(&self) -> &CandyId {
        &self.id
    }

    fn from_create_params(id: CandyId, params: CandyCreate) -> Result<Self, Self::Error> {
        validate_name(&params.name)?;
        validate_amount("price", params.price)?;
        validate_amount("weight", params.weight)?;
        Ok(Candy::new(
            id,
            params.name.trim(),
            params.kind,
            params.price,
            params.weight,
            params.quantity,
        ))
    }

    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), Self::Error> {
        ctx.repo.upsert(self)?;
        Ok(())
    }

    /// Handles edits to the catalog entry.
    ///
    /// # Fields Updated
    /// - `name`: must not be empty
    /// - `price`: must be finite and non-negative
    /// - `quantity`: replaces the stock level, then the low-stock rule applies
    async fn on_update(
        &mut self,
        update: CandyUpdate,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            validate_name(&name)?;
            self.name = name.trim().to_string();
        }
        if let Some(price) = update.price {
            validate_amount("price", price)?;
            self.price = price;
        }
        let stock_changed = update.quantity.is_some();
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        ctx.repo.upsert(self)?;
        if stock_changed {
            self.alert_if_low(ctx);
        }
        Ok(())
    }

    async fn on_delete(&self, ctx: &Self::Context) -> Result<(), Self::Error> {
        ctx.repo.remove(self.id)?;
        Ok(())
    }

    /// Handles stock actions.
    ///
    /// # Actions
    /// - `CheckStock`: current level, no side effects
    /// - `SetStock` / `Decrement` / `ReserveStock`: persist, then alert if low
    /// - `ReleaseStock`: persist
    async fn handle_action(
        &mut self,
        action: InventoryAction,
        ctx: &Self::Context,
    ) -> Result<InventoryActionResult, Self::Error> {
        debug!(candy_id = %self.id, ?action, stock = self.quantity, "Stock action");
        match action {
            InventoryAction::CheckStock => Ok(InventoryActionResult::CheckStock(self.quantity)),
            InventoryAction::SetStock(quantity) => {
                self.quantity = quantity;
                ctx.repo.upsert(self)?;
                self.alert_if_low(ctx);
                Ok(InventoryActionResult::SetStock(self.quantity))
            }
            InventoryAction::Decrement(by) => {
                self.quantity = self.quantity.saturating_sub(by);
                ctx.repo.upsert(self)?;
                self.alert_if_low(ctx);
                Ok(InventoryActionResult::Decrement(self.quantity))
            }
            InventoryAction::ReserveStock(quantity) => {
                if quantity == 0 {
                    return Err(InventoryError::InvalidQuantity(quantity));
                }
                if quantity > self.quantity {
                    return Err(InventoryError::InsufficientStock {
                        requested: quantity,
                        available: self.quantity,
                    });
                }
                self.quantity -= quantity;
                ctx.repo.upsert(self)?;
                self.alert_if_low(ctx);
                Ok(InventoryActionResult::ReserveStock(self.quantity))
            }
            InventoryAction::ReleaseStock(quantity) => {
                self.quantity = self.quantity.saturating_add(quantity);
                ctx.repo.upsert(self)?;
                Ok(InventoryActionResult::ReleaseStock(self.quantity))
            }
        }
    }
}
