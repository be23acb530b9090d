//! A customer order.
//!
//! # Actor Framework
//! [`Order`] implements the [`ActorEntity`](actor_framework::ActorEntity) trait, allowing it to
//! be managed by a [`ResourceActor`](actor_framework::ResourceActor). Creating one reserves
//! stock through the inventory actor. See [`crate::order_actor`].

use crate::model::CandyId;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Rounds a money amount to whole cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Order lifecycle. Statuses only move forward, and `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Placed,
    Paid,
    Packing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Label shown to customers.
    pub fn display_name(self) -> &'static str {
        match self {
            OrderStatus::Placed => "Pending",
            OrderStatus::Paid | OrderStatus::Packing => "Processing",
            OrderStatus::Shipped => "In Transit",
            OrderStatus::Delivered => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    fn rank(self) -> u8 {
        match self {
            OrderStatus::Placed => 0,
            OrderStatus::Paid => 1,
            OrderStatus::Packing => 2,
            OrderStatus::Shipped => 3,
            OrderStatus::Delivered => 4,
            OrderStatus::Cancelled => 5,
        }
    }

    pub fn can_advance_to(self, next: OrderStatus) -> bool {
        match next {
            OrderStatus::Cancelled => matches!(
                self,
                OrderStatus::Placed | OrderStatus::Paid | OrderStatus::Packing
            ),
            _ => self != OrderStatus::Cancelled && next.rank() == self.rank() + 1,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub candy_id: CandyId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl OrderItem {
    pub fn new(candy_id: CandyId, name: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            candy_id,
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// A discount that has been applied to an order, kept for receipts.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedDiscount {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub customer: String,
    pub created_at: DateTime<Local>,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub subtotal: f64,
    pub discount_total: f64,
    pub applied_discounts: Vec<AppliedDiscount>,
}

impl Order {
    /// Builds a placed order with its subtotal computed from the items.
    pub fn new(id: OrderId, customer: impl Into<String>, items: Vec<OrderItem>) -> Self {
        let subtotal = round_cents(items.iter().map(OrderItem::line_total).sum());
        Self {
            id,
            customer: customer.into(),
            created_at: Local::now(),
            items,
            status: OrderStatus::Placed,
            subtotal,
            discount_total: 0.0,
            applied_discounts: Vec::new(),
        }
    }

    /// `subtotal - discount_total`, never below zero.
    pub fn grand_total(&self) -> f64 {
        round_cents((self.subtotal - self.discount_total).max(0.0))
    }

    /// Adds to the discount total and records the discount by name.
    pub fn add_discount(&mut self, name: impl Into<String>, amount: f64) {
        let amount = round_cents(amount.max(0.0));
        self.discount_total = round_cents(self.discount_total + amount);
        self.applied_discounts.push(AppliedDiscount {
            name: name.into(),
            amount,
        });
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer: String,
    pub items: Vec<OrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order::new(
            OrderId(1),
            "customer",
            vec![
                OrderItem::new(CandyId(1), "Gummy Bear", 3, 1.00),
                OrderItem::new(CandyId(2), "Chocolate Bar", 2, 1.50),
            ],
        )
    }

    #[test]
    fn test_totals() {
        let mut order = order();
        assert_eq!(order.subtotal, 6.00);
        assert_eq!(order.item_count(), 5);

        order.add_discount("10% Off", 0.6);
        assert_eq!(order.grand_total(), 5.40);

        // Grand total never goes negative.
        order.add_discount("Coupon BIG", 100.0);
        assert_eq!(order.grand_total(), 0.0);
        assert_eq!(order.applied_discounts.len(), 2);
    }

    #[test]
    fn test_status_transitions() {
        use OrderStatus::*;
        assert!(Placed.can_advance_to(Paid));
        assert!(Paid.can_advance_to(Packing));
        assert!(Shipped.can_advance_to(Delivered));
        assert!(!Placed.can_advance_to(Shipped));
        assert!(!Paid.can_advance_to(Placed));
        assert!(!Delivered.can_advance_to(Delivered));

        assert!(Packing.can_advance_to(Cancelled));
        assert!(!Shipped.can_advance_to(Cancelled));
        assert!(!Cancelled.can_advance_to(Cancelled));
        assert!(!Cancelled.can_advance_to(Placed));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(OrderStatus::Placed.to_string(), "Pending");
        assert_eq!(OrderStatus::Packing.to_string(), "Processing");
        assert_eq!(OrderStatus::Shipped.to_string(), "In Transit");
        assert_eq!(OrderId(12).to_string(), "order_12");
    }
}
