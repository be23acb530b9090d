//! A candy in the catalog, together with its current stock.
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
//!
//! See [`impl ActorEntity for Candy`](Candy#impl-ActorEntity-for-Candy) for details on:
//! - Creation parameters ([`CandyCreate`])
//! - Update parameters ([`CandyUpdate`])
//! - Custom actions ([`InventoryAction`](crate::candy_actor::InventoryAction))

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Candies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandyId(pub u32);

impl From<u32> for CandyId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CandyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "candy_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandyKind {
    Chocolate,
    Gummy,
    Hard,
    Generic,
}

impl CandyKind {
    /// Guesses the kind from a free-text type or product name.
    pub fn infer(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("gummy") {
            CandyKind::Gummy
        } else if text.contains("chocolate") {
            CandyKind::Chocolate
        } else if text.contains("hard") || text.contains("lollipop") {
            CandyKind::Hard
        } else {
            CandyKind::Generic
        }
    }

    /// Unit weight used when a candy is made without an explicit one.
    pub fn default_weight(self) -> f64 {
        match self {
            CandyKind::Gummy => 0.05,
            CandyKind::Chocolate => 0.15,
            CandyKind::Hard => 0.10,
            CandyKind::Generic => 0.05,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CandyKind::Chocolate => "Chocolate",
            CandyKind::Gummy => "Gummy",
            CandyKind::Hard => "Hard Candy",
            CandyKind::Generic => "Candy",
        }
    }
}

impl Display for CandyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candy {
    pub id: CandyId,
    pub name: String,
    pub kind: CandyKind,
    pub price: f64,
    pub weight: f64,
    /// Units in stock.
    pub quantity: u32,
}

impl Candy {
    pub fn new(
        id: CandyId,
        name: impl Into<String>,
        kind: CandyKind,
        price: f64,
        weight: f64,
        quantity: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            price,
            weight,
            quantity,
        }
    }

    /// Price of everything on the shelf.
    pub fn stock_value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Payload for adding a candy to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CandyCreate {
    pub name: String,
    pub kind: CandyKind,
    pub price: f64,
    pub weight: f64,
    pub quantity: u32,
}

impl From<Candy> for CandyCreate {
    fn from(candy: Candy) -> Self {
        Self {
            name: candy.name,
            kind: candy.kind,
            price: candy.price,
            weight: candy.weight,
            quantity: candy.quantity,
        }
    }
}

/// Payload for editing a catalog entry. `None` leaves the field alone.
#[derive(Debug, Clone, Default)]
pub struct CandyUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
}

/// Stock level bucket relative to the low-stock threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    InStock,
    Low,
    Critical,
    OutOfStock,
}

impl StockStatus {
    pub fn from_quantity(quantity: u32, threshold: u32) -> Self {
        if quantity == 0 {
            StockStatus::OutOfStock
        } else if quantity <= threshold / 2 {
            StockStatus::Critical
        } else if quantity <= threshold {
            StockStatus::Low
        } else {
            StockStatus::InStock
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::Low => "Low Stock",
            StockStatus::Critical => "Critical",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

impl Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A candy as seen from the stock room.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    pub candy: Candy,
    pub status: StockStatus,
}

impl InventoryItem {
    pub fn new(candy: Candy, threshold: u32) -> Self {
        let status = StockStatus::from_quantity(candy.quantity, threshold);
        Self { candy, status }
    }

    pub fn quantity(&self) -> u32 {
        self.candy.quantity
    }
}
