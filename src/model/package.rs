use crate::model::Candy;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageKind {
    ChocolateBox,
    GummyBag,
    HardCandyBag,
    CandyBag,
}

impl PackageKind {
    pub fn name(self) -> &'static str {
        match self {
            PackageKind::ChocolateBox => "Chocolate Box",
            PackageKind::GummyBag => "Gummy Bag",
            PackageKind::HardCandyBag => "Hard Candy Bag",
            PackageKind::CandyBag => "Candy Bag",
        }
    }

    pub fn price(self) -> f64 {
        match self {
            PackageKind::ChocolateBox => 3.00,
            _ => 2.00,
        }
    }
}

/// Packaging sold together with a candy. Its price is added to the candy's unit price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandyPackage {
    pub kind: PackageKind,
    pub price: f64,
}

impl CandyPackage {
    pub fn new(kind: PackageKind) -> Self {
        Self {
            kind,
            price: kind.price(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Human-readable packing note, e.g. "Chocolate Bar packed in a Chocolate Box".
    pub fn pack(&self, candy: &Candy) -> String {
        format!("{} packed in a {}", candy.name, self.name())
    }
}

impl Display for CandyPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (${:.2})", self.name(), self.price)
    }
}
