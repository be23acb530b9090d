//! Dashboard numbers and display models for orders.

use crate::account_actor::AccountError;
use crate::candy_actor::InventoryError;
use crate::clients::{AccountClient, InventoryClient, OrderClient};
use crate::model::{Order, OrderId, OrderStatus};
use crate::order_actor::OrderError;
use actor_framework::ActorClient;
use chrono::{DateTime, Local};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReportError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Account(#[from] AccountError),
}

pub fn format_date(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%d").to_string()
}

pub fn format_date_time(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

pub fn format_time(at: &DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_inventory_value: f64,
    /// Candies at or below the low-stock threshold, including sold-out ones
    pub low_stock_count: usize,
    pub todays_orders: usize,
    pub account_count: usize,
}

impl DashboardStats {
    pub async fn collect(
        inventory: &InventoryClient,
        orders: &OrderClient,
        accounts: &AccountClient,
    ) -> Result<Self, ReportError> {
        Ok(Self {
            total_inventory_value: inventory.total_inventory_value().await?,
            low_stock_count: inventory.low_stock_items().await?.len(),
            todays_orders: orders.todays_orders().await?.len(),
            account_count: accounts.list().await?.len(),
        })
    }
}

/// One row of an order table.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub id: OrderId,
    pub customer: String,
    pub email: String,
    pub status: OrderStatus,
    pub total: f64,
    pub created_at: DateTime<Local>,
    /// e.g. "Chocolate Bar x2, Gummy Bear x3"
    pub items: String,
}

impl OrderSummary {
    pub fn new(order: &Order, email: impl Into<String>) -> Self {
        let items = order
            .items
            .iter()
            .map(|item| format!("{} x{}", item.name, item.quantity))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            id: order.id,
            customer: order.customer.clone(),
            email: email.into(),
            status: order.status,
            total: order.grand_total(),
            created_at: order.created_at,
            items,
        }
    }

    /// Summaries for every order, newest first, with each customer's email looked up.
    pub async fn for_all(
        orders: &OrderClient,
        accounts: &AccountClient,
    ) -> Result<Vec<Self>, ReportError> {
        let emails: std::collections::HashMap<String, String> = accounts
            .list()
            .await?
            .into_iter()
            .map(|account| (account.username, account.email))
            .collect();
        let mut summaries: Vec<Self> = orders
            .list()
            .await?
            .iter()
            .map(|order| {
                let email = emails.get(&order.customer).cloned().unwrap_or_default();
                Self::new(order, email)
            })
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(summaries)
    }

    pub fn status_label(&self) -> &'static str {
        self.status.display_name()
    }

    pub fn date(&self) -> String {
        format_date_time(&self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CandyId, OrderItem};
    use chrono::TimeZone;

    #[test]
    fn test_order_summary() {
        let mut order = Order::new(
            OrderId(7),
            "customer",
            vec![
                OrderItem::new(CandyId(2), "Chocolate Bar", 2, 1.50),
                OrderItem::new(CandyId(1), "Gummy Bear", 3, 1.00),
            ],
        );
        order.created_at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 30).unwrap();
        order.status = OrderStatus::Shipped;

        let summary = OrderSummary::new(&order, "c@example.com");
        assert_eq!(summary.items, "Chocolate Bar x2, Gummy Bear x3");
        assert_eq!(summary.total, 6.0);
        assert_eq!(summary.status_label(), "In Transit");
        assert_eq!(summary.date(), "2024-03-09 14:05");
        assert_eq!(format_date(&order.created_at), "2024-03-09");
        assert_eq!(format_time(&order.created_at), "14:05:30");
    }
}
