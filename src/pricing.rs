//! # Pricing and Discounts
//!
//! Two command families:
//!
//! - [`PricingCommand`] quotes a cart without touching it (regular price, percentage sale).
//! - [`DiscountCommand`] is applied to a placed order and adds to its discount total. Discount
//!   commands travel to the order actor inside
//!   [`OrderAction::ApplyDiscounts`](crate::order_actor::OrderAction::ApplyDiscounts).

use crate::cart::ShoppingCart;
use crate::model::{round_cents, Order};
use std::fmt::Debug;

pub trait PricingCommand: Send + Sync {
    fn quote(&self, cart: &ShoppingCart) -> f64;
}

/// Plain cart total.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegularPricing;

impl PricingCommand for RegularPricing {
    fn quote(&self, cart: &ShoppingCart) -> f64 {
        round_cents(cart.total())
    }
}

/// Cart total minus a fraction, `percent_off` in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct DiscountPricing {
    percent_off: f64,
}

impl DiscountPricing {
    /// Values outside `[0, 1]` are clamped.
    pub fn new(percent_off: f64) -> Self {
        let percent_off = if percent_off.is_finite() {
            percent_off.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { percent_off }
    }

    pub fn percent_off(&self) -> f64 {
        self.percent_off
    }
}

impl PricingCommand for DiscountPricing {
    fn quote(&self, cart: &ShoppingCart) -> f64 {
        round_cents(cart.total() * (1.0 - self.percent_off))
    }
}

/// A discount applied to a placed order.
pub trait DiscountCommand: Debug + Send + Sync {
    fn name(&self) -> String;

    /// Amount this discount takes off the given order.
    fn amount(&self, order: &Order) -> f64;

    fn apply(&self, order: &mut Order) {
        let amount = self.amount(order);
        order.add_discount(self.name(), amount);
    }
}

/// Percentage of the subtotal, `0.1` for 10%.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentOff(pub f64);

impl DiscountCommand for PercentOff {
    fn name(&self) -> String {
        format!("{}% Off", (self.0.clamp(0.0, 1.0) * 100.0).round())
    }

    fn amount(&self, order: &Order) -> f64 {
        order.subtotal * self.0.clamp(0.0, 1.0)
    }
}

/// Flat amount off.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponCode {
    pub code: String,
    pub amount: f64,
}

impl DiscountCommand for CouponCode {
    fn name(&self) -> String {
        format!("Coupon {}", self.code)
    }

    fn amount(&self, _order: &Order) -> f64 {
        self.amount
    }
}
