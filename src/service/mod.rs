//! Workflows that span more than one actor.

pub mod checkout;
pub mod reports;

pub use checkout::CheckoutService;
pub use reports::{DashboardStats, OrderSummary, ReportError};
