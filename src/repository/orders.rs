use super::{read_rows, write_rows, DataDir, RepositoryError};
use crate::model::{AppliedDiscount, CandyId, Order, OrderId, OrderItem, OrderStatus};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OrderRow {
    id: OrderId,
    customer: String,
    created_at: DateTime<Local>,
    status: OrderStatus,
    subtotal: f64,
    discount_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OrderItemRow {
    order_id: OrderId,
    candy_id: CandyId,
    name: String,
    quantity: u32,
    unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DiscountRow {
    order_id: OrderId,
    name: String,
    amount: f64,
}

/// Orders are split over three files: the header row per order in `orders.csv`, its lines in
/// `order_items.csv` and its applied discounts in `order_discounts.csv`.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    orders: PathBuf,
    items: PathBuf,
    discounts: PathBuf,
}

impl OrderRepository {
    pub fn new(dir: &DataDir) -> Self {
        Self {
            orders: dir.file("orders.csv"),
            items: dir.file("order_items.csv"),
            discounts: dir.file("order_discounts.csv"),
        }
    }

    pub fn load_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let mut orders: BTreeMap<OrderId, Order> = read_rows::<OrderRow>(&self.orders)?
            .into_iter()
            .map(|row| {
                let order = Order {
                    id: row.id,
                    customer: row.customer,
                    created_at: row.created_at,
                    items: Vec::new(),
                    status: row.status,
                    subtotal: row.subtotal,
                    discount_total: row.discount_total,
                    applied_discounts: Vec::new(),
                };
                (row.id, order)
            })
            .collect();

        // Rows for orders missing from orders.csv are orphans and are skipped.
        for row in read_rows::<OrderItemRow>(&self.items)? {
            if let Some(order) = orders.get_mut(&row.order_id) {
                order.items.push(OrderItem {
                    candy_id: row.candy_id,
                    name: row.name,
                    quantity: row.quantity,
                    unit_price: row.unit_price,
                });
            }
        }
        for row in read_rows::<DiscountRow>(&self.discounts)? {
            if let Some(order) = orders.get_mut(&row.order_id) {
                order.applied_discounts.push(AppliedDiscount {
                    name: row.name,
                    amount: row.amount,
                });
            }
        }

        Ok(orders.into_values().collect())
    }

    /// Rewrites the order's rows in all three files.
    pub fn upsert(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut orders: Vec<OrderRow> = read_rows(&self.orders)?;
        orders.retain(|row| row.id != order.id);
        orders.push(OrderRow {
            id: order.id,
            customer: order.customer.clone(),
            created_at: order.created_at,
            status: order.status,
            subtotal: order.subtotal,
            discount_total: order.discount_total,
        });
        orders.sort_by_key(|row| row.id);

        let mut items: Vec<OrderItemRow> = read_rows(&self.items)?;
        items.retain(|row| row.order_id != order.id);
        items.extend(order.items.iter().map(|item| OrderItemRow {
            order_id: order.id,
            candy_id: item.candy_id,
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
        }));
        items.sort_by_key(|row| row.order_id);

        let mut discounts: Vec<DiscountRow> = read_rows(&self.discounts)?;
        discounts.retain(|row| row.order_id != order.id);
        discounts.extend(order.applied_discounts.iter().map(|d| DiscountRow {
            order_id: order.id,
            name: d.name.clone(),
            amount: d.amount,
        }));
        discounts.sort_by_key(|row| row.order_id);

        write_rows(&self.orders, &orders)?;
        write_rows(&self.items, &items)?;
        write_rows(&self.discounts, &discounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: u32, customer: &str) -> Order {
        Order::new(
            OrderId(id),
            customer,
            vec![
                OrderItem::new(CandyId(1), "Gummy Bear", 3, 1.00),
                OrderItem::new(CandyId(2), "Chocolate Bar", 1, 4.50),
            ],
        )
    }

    #[test]
    fn test_orders_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = OrderRepository::new(&DataDir::new(dir.path()));
        assert!(repo.load_all().unwrap().is_empty());

        let mut first = order(1, "customer");
        first.add_discount("10% Off", 0.75);
        let second = order(2, "alice");
        repo.upsert(&second).unwrap();
        repo.upsert(&first).unwrap();

        let loaded = repo.load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, OrderId(1));
        assert_eq!(loaded[0].items, first.items);
        assert_eq!(loaded[0].applied_discounts, first.applied_discounts);
        assert_eq!(loaded[0].created_at, first.created_at);
        assert_eq!(loaded[1].customer, "alice");
    }

    #[test]
    fn test_upsert_replaces_rows() {
        let dir = tempfile::tempdir().unwrap();
        let repo = OrderRepository::new(&DataDir::new(dir.path()));

        let mut placed = order(1, "customer");
        repo.upsert(&placed).unwrap();

        placed.status = OrderStatus::Paid;
        placed.items.truncate(1);
        repo.upsert(&placed).unwrap();

        let loaded = repo.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].status, OrderStatus::Paid);
        assert_eq!(loaded[0].items.len(), 1);
    }
}
