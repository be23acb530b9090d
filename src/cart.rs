//! # Shopping Cart
//!
//! A customer's cart lives outside the actors. It holds candy snapshots taken when the line was
//! added; stock is only reserved at checkout.
//!
//! [`CartCommand`] wraps cart edits as values so a front-end can queue, log or replay them.

use crate::model::{Candy, CandyId, CandyPackage};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Quantity must be at least 1")]
    ZeroQuantity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub candy_id: CandyId,
    pub candy: Candy,
    pub package: Option<CandyPackage>,
    pub quantity: u32,
}

impl CartLine {
    /// Candy price plus package price.
    pub fn unit_price(&self) -> f64 {
        self.candy.price + self.package.map(|p| p.price).unwrap_or(0.0)
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price() * f64::from(self.quantity)
    }

    /// "Gummy Bear" or "Gummy Bear (Gummy Bag)".
    pub fn description(&self) -> String {
        match &self.package {
            Some(package) => format!("{} ({})", self.candy.name, package.name()),
            None => self.candy.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingCart {
    lines: Vec<CartLine>,
}

impl ShoppingCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds units, merging into an existing line for the same candy and package.
    pub fn add_item(
        &mut self,
        candy: Candy,
        package: Option<CandyPackage>,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        let existing = self.lines.iter_mut().find(|line| {
            line.candy_id == candy.id && line.package.map(|p| p.kind) == package.map(|p| p.kind)
        });
        match existing {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(quantity);
                line.candy = candy;
            }
            None => self.lines.push(CartLine {
                candy_id: candy.id,
                candy,
                package,
                quantity,
            }),
        }
        Ok(())
    }

    /// Removes every line for the candy. Returns whether anything was removed.
    pub fn remove_item(&mut self, candy_id: CandyId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.candy_id != candy_id);
        before != self.lines.len()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

pub trait CartCommand: Send + Sync {
    fn name(&self) -> String;
    fn execute(&self, cart: &mut ShoppingCart) -> Result<(), CartError>;
}

#[derive(Debug, Clone)]
pub struct AddItemCommand {
    pub candy: Candy,
    pub package: Option<CandyPackage>,
    pub quantity: u32,
}

impl CartCommand for AddItemCommand {
    fn name(&self) -> String {
        format!("Add {} x{}", self.candy.name, self.quantity)
    }

    fn execute(&self, cart: &mut ShoppingCart) -> Result<(), CartError> {
        cart.add_item(self.candy.clone(), self.package, self.quantity)
    }
}

#[derive(Debug, Clone)]
pub struct RemoveItemCommand {
    pub candy_id: CandyId,
}

impl CartCommand for RemoveItemCommand {
    fn name(&self) -> String {
        format!("Remove {}", self.candy_id)
    }

    fn execute(&self, cart: &mut ShoppingCart) -> Result<(), CartError> {
        cart.remove_item(self.candy_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CandyKind, PackageKind};

    fn gummy() -> Candy {
        Candy::new(CandyId(1), "Gummy Bear", CandyKind::Gummy, 1.00, 0.05, 15)
    }

    fn chocolate() -> Candy {
        Candy::new(CandyId(2), "Chocolate Bar", CandyKind::Chocolate, 1.50, 0.15, 20)
    }

    #[test]
    fn test_add_merges_same_candy_and_package() {
        let mut cart = ShoppingCart::new();
        cart.add_item(gummy(), None, 2).unwrap();
        cart.add_item(gummy(), None, 3).unwrap();
        let bag = CandyPackage::new(PackageKind::GummyBag);
        cart.add_item(gummy(), Some(bag), 1).unwrap();

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.item_count(), 6);
        // 5 * 1.00 + 1 * (1.00 + 2.00)
        assert_eq!(cart.total(), 8.0);
        assert_eq!(cart.lines()[1].description(), "Gummy Bear (Gummy Bag)");
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut cart = ShoppingCart::new();
        assert_eq!(cart.add_item(gummy(), None, 0), Err(CartError::ZeroQuantity));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_commands() {
        let mut cart = ShoppingCart::new();
        let commands: Vec<Box<dyn CartCommand>> = vec![
            Box::new(AddItemCommand {
                candy: gummy(),
                package: None,
                quantity: 2,
            }),
            Box::new(AddItemCommand {
                candy: chocolate(),
                package: None,
                quantity: 1,
            }),
            Box::new(RemoveItemCommand {
                candy_id: CandyId(1),
            }),
        ];
        for command in &commands {
            command.execute(&mut cart).unwrap();
        }
        assert_eq!(commands[0].name(), "Add Gummy Bear x2");
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].candy_id, CandyId(2));

        assert!(!cart.remove_item(CandyId(1)));
        cart.clear();
        assert!(cart.is_empty());
    }
}
