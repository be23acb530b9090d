//! Turns a shopping cart into a paid order.

use crate::cart::{CartLine, ShoppingCart};
use crate::clients::OrderClient;
use crate::model::{Order, OrderCreate, OrderId, OrderItem, OrderStatus};
use crate::order_actor::OrderError;
use crate::pricing::{DiscountCommand, PricingCommand};
use tracing::{info, instrument, warn};

fn order_item(line: &CartLine) -> OrderItem {
    OrderItem::new(line.candy_id, line.description(), line.quantity, line.unit_price())
}

#[derive(Clone)]
pub struct CheckoutService {
    orders: OrderClient,
}

impl CheckoutService {
    pub fn new(orders: OrderClient) -> Self {
        Self { orders }
    }

    /// Places the cart as an order, applies the discounts and takes payment.
    ///
    /// The cart is cleared only once the order is paid. If any step fails, the order is cancelled
    /// so its stock goes back, and the cart is left as it was.
    #[instrument(skip(self, cart, discounts), fields(lines = cart.lines().len()))]
    pub async fn checkout(
        &self,
        customer: &str,
        cart: &mut ShoppingCart,
        discounts: Vec<Box<dyn DiscountCommand>>,
    ) -> Result<Order, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        let params = OrderCreate {
            customer: customer.to_string(),
            items: cart.lines().iter().map(order_item).collect(),
        };
        let id = self.orders.create_order(params).await?;
        if let Err(e) = self.settle(id, discounts).await {
            warn!(order_id = %id, error = %e, "Checkout failed, cancelling order");
            if let Err(cancel) = self.orders.cancel_order(id).await {
                warn!(order_id = %id, error = %cancel, "Cancel after failed checkout failed");
            }
            return Err(e);
        }
        cart.clear();

        let order = self.orders.reload(id).await?;
        info!(order_id = %id, total = order.grand_total(), "Checkout complete");
        Ok(order)
    }

    async fn settle(
        &self,
        id: OrderId,
        discounts: Vec<Box<dyn DiscountCommand>>,
    ) -> Result<(), OrderError> {
        if !discounts.is_empty() {
            self.orders.apply_discounts(id, discounts).await?;
        }
        // Payment is not processed; a placed order is marked paid straight away.
        self.orders.advance_status(id, OrderStatus::Paid).await?;
        Ok(())
    }

    /// Price preview, no order is placed.
    pub fn quote(&self, cart: &ShoppingCart, pricing: &dyn PricingCommand) -> f64 {
        pricing.quote(cart)
    }
}
