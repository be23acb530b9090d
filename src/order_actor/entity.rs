//! [`ActorEntity`] implementation for [`Order`].
//!
//! Placing an order talks to two other actors: the account actor to check the customer, and the
//! inventory actor to reserve each line. If any reservation fails, the lines already reserved are
//! released before the error is returned, so a rejected order never holds stock.
//!
//! Cancelling is all or nothing: the `Cancelled` status is written first, then stock is handed
//! back. If a release fails, the lines already released are reserved again and the old status is
//! restored, so a retried cancel never returns the same stock twice.

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use super::OrderContext;
use crate::candy_actor::InventoryError;
use crate::model::{Order, OrderCreate, OrderId, OrderItem, OrderStatus};
use actor_framework::{ActorClient, ActorEntity};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Hands back reservations made while placing an order. Failures are only logged.
async fn release_items(ctx: &OrderContext, items: &[OrderItem]) {
    for item in items {
        if let Err(e) = ctx.inventory.release_stock(item.candy_id, item.quantity).await {
            warn!(candy_id = %item.candy_id, quantity = item.quantity, error = %e, "Release failed");
        }
    }
}

/// Gives back stock for every line of a cancelled order.
///
/// Lines whose candy has left the catalog are skipped. Any other failure re-reserves what was
/// already released, leaving stock as it was before the call.
async fn release_for_cancel(ctx: &OrderContext, items: &[OrderItem]) -> Result<(), OrderError> {
    let mut released: Vec<&OrderItem> = Vec::with_capacity(items.len());
    for item in items {
        match ctx.inventory.release_stock(item.candy_id, item.quantity).await {
            Ok(_) => released.push(item),
            Err(InventoryError::NotFound(_)) => {
                warn!(candy_id = %item.candy_id, quantity = item.quantity, "Candy gone, nothing to release");
            }
            Err(e) => {
                for done in released {
                    if let Err(undo) = ctx.inventory.reserve_stock(done.candy_id, done.quantity).await {
                        warn!(candy_id = %done.candy_id, error = %undo, "Re-reserve failed");
                    }
                }
                return Err(e.into());
            }
        }
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = OrderContext;
    type Error = OrderError;

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        let customer = params.customer.trim();
        if customer.is_empty() {
            return Err(OrderError::Validation("customer must not be empty".into()));
        }
        if params.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if let Some(item) = params.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::Validation(format!(
                "quantity for {} must be at least 1",
                item.candy_id
            )));
        }
        if let Some(item) = params
            .items
            .iter()
            .find(|item| !item.unit_price.is_finite() || item.unit_price < 0.0)
        {
            return Err(OrderError::Validation(format!(
                "unit price for {} must be a non-negative number",
                item.candy_id
            )));
        }
        Ok(Order::new(id, customer, params.items))
    }

    /// Checks the customer, reserves stock line by line and persists the order.
    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), Self::Error> {
        if ctx.accounts.get(self.customer.clone()).await?.is_none() {
            return Err(OrderError::UnknownCustomer(self.customer.clone()));
        }

        let mut reserved = Vec::with_capacity(self.items.len());
        for item in &self.items {
            match ctx.inventory.reserve_stock(item.candy_id, item.quantity).await {
                Ok(remaining) => {
                    debug!(order_id = %self.id, candy_id = %item.candy_id, remaining, "Reserved");
                    reserved.push(item.clone());
                }
                Err(e) => {
                    release_items(ctx, &reserved).await;
                    return Err(e.into());
                }
            }
        }

        if let Err(e) = ctx.repo.upsert(self) {
            release_items(ctx, &reserved).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Err(OrderError::InvalidState(
            "orders change through discounts and status moves only".into(),
        ))
    }

    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Err(OrderError::InvalidState(
            "orders are kept for history; cancel instead".into(),
        ))
    }

    /// Handles order actions.
    ///
    /// # Actions
    /// - `ApplyDiscounts`: only while `Placed`, returns the new grand total
    /// - `AdvanceStatus`: one step forward, or to `Cancelled` which releases every line's stock
    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &Self::Context,
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::ApplyDiscounts(discounts) => {
                if self.status != OrderStatus::Placed {
                    return Err(OrderError::InvalidState(format!(
                        "discounts apply to placed orders, {} is {:?}",
                        self.id, self.status
                    )));
                }
                for discount in &discounts {
                    discount.apply(self);
                }
                ctx.repo.upsert(self)?;
                Ok(OrderActionResult::ApplyDiscounts(self.grand_total()))
            }
            OrderAction::AdvanceStatus(next) => {
                if !self.status.can_advance_to(next) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: next,
                    });
                }
                let previous = self.status;
                self.status = next;
                ctx.repo.upsert(self)?;
                if next == OrderStatus::Cancelled {
                    if let Err(e) = release_for_cancel(ctx, &self.items).await {
                        self.status = previous;
                        if let Err(undo) = ctx.repo.upsert(self) {
                            warn!(order_id = %self.id, error = %undo, "Restoring status failed");
                        }
                        return Err(e);
                    }
                }
                Ok(OrderActionResult::AdvanceStatus(next))
            }
        }
    }
}
