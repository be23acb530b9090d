//! # Order Client
//!
//! Typed API over the order actor. Placing an order validates the customer and reserves stock
//! inside the actor's `on_create` hook, so callers get back a single [`OrderError`].

use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::pricing::DiscountCommand;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use tracing::{info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

fn unexpected(result: OrderActionResult) -> OrderError {
    OrderError::ActorCommunicationError(format!("unexpected action result: {:?}", result))
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %id, "Order placed");
        Ok(id)
    }

    /// Applies the discounts in order and returns the new grand total.
    #[instrument(skip(self))]
    pub async fn apply_discounts(
        &self,
        id: OrderId,
        discounts: Vec<Box<dyn DiscountCommand>>,
    ) -> Result<f64, OrderError> {
        match self
            .inner
            .perform_action(id, OrderAction::ApplyDiscounts(discounts))
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::ApplyDiscounts(total) => Ok(total),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn advance_status(
        &self,
        id: OrderId,
        next: OrderStatus,
    ) -> Result<OrderStatus, OrderError> {
        match self
            .inner
            .perform_action(id, OrderAction::AdvanceStatus(next))
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::AdvanceStatus(status) => Ok(status),
            other => Err(unexpected(other)),
        }
    }

    /// Cancels the order and gives its stock back.
    pub async fn cancel_order(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        self.advance_status(id, OrderStatus::Cancelled).await
    }

    /// Current state of an order that is known to exist.
    pub async fn reload(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    pub async fn orders_for_customer(&self, customer: &str) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list().await?;
        orders.retain(|order| order.customer == customer);
        Ok(orders)
    }

    pub async fn orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list().await?;
        orders.retain(|order| order.status == status);
        Ok(orders)
    }

    /// Orders created strictly after `since`.
    pub async fn orders_after(&self, since: DateTime<Local>) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list().await?;
        orders.retain(|order| order.created_at > since);
        Ok(orders)
    }

    /// Orders created on the local calendar day.
    pub async fn todays_orders(&self) -> Result<Vec<Order>, OrderError> {
        let today = Local::now().date_naive();
        let mut orders = self.list().await?;
        orders.retain(|order| order.created_at.date_naive() == today);
        Ok(orders)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .downcast_entity::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}
