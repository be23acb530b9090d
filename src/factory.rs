//! # Candy Factories
//!
//! One factory per [`CandyKind`]. A factory knows its kind's stock candy, unit weight and
//! packaging. It produces [`CandyCreate`] payloads, which become catalog entries once the
//! inventory actor assigns them an id.

use crate::model::{Candy, CandyCreate, CandyKind, CandyPackage, PackageKind};

pub trait CandyFactory: Send + Sync {
    fn kind(&self) -> CandyKind;

    /// Name and unit price of the kind's stock candy.
    fn default_candy(&self) -> (&'static str, f64);

    fn package_kind(&self) -> PackageKind;

    fn create_candy(&self, name: &str, price: f64, quantity: u32) -> CandyCreate {
        CandyCreate {
            name: name.to_string(),
            kind: self.kind(),
            price,
            weight: self.kind().default_weight(),
            quantity,
        }
    }

    fn create_default(&self, quantity: u32) -> CandyCreate {
        let (name, price) = self.default_candy();
        self.create_candy(name, price, quantity)
    }

    fn create_package(&self) -> CandyPackage {
        CandyPackage::new(self.package_kind())
    }

    /// Copies name, price, weight and stock, and re-tags the copy with this factory's kind.
    fn copy_candy(&self, original: &Candy) -> CandyCreate {
        CandyCreate {
            name: original.name.clone(),
            kind: self.kind(),
            price: original.price,
            weight: original.weight,
            quantity: original.quantity,
        }
    }
}

pub struct ChocolateFactory;
pub struct GummyFactory;
pub struct HardCandyFactory;
pub struct GenericCandyFactory;

impl CandyFactory for ChocolateFactory {
    fn kind(&self) -> CandyKind {
        CandyKind::Chocolate
    }

    fn default_candy(&self) -> (&'static str, f64) {
        ("Chocolate Bar", 1.50)
    }

    fn package_kind(&self) -> PackageKind {
        PackageKind::ChocolateBox
    }
}

impl CandyFactory for GummyFactory {
    fn kind(&self) -> CandyKind {
        CandyKind::Gummy
    }

    fn default_candy(&self) -> (&'static str, f64) {
        ("Gummy Bear", 1.00)
    }

    fn package_kind(&self) -> PackageKind {
        PackageKind::GummyBag
    }
}

impl CandyFactory for HardCandyFactory {
    fn kind(&self) -> CandyKind {
        CandyKind::Hard
    }

    fn default_candy(&self) -> (&'static str, f64) {
        ("Lollipop", 0.75)
    }

    fn package_kind(&self) -> PackageKind {
        PackageKind::HardCandyBag
    }
}

impl CandyFactory for GenericCandyFactory {
    fn kind(&self) -> CandyKind {
        CandyKind::Generic
    }

    fn default_candy(&self) -> (&'static str, f64) {
        ("Generic Candy", 1.20)
    }

    fn package_kind(&self) -> PackageKind {
        PackageKind::CandyBag
    }
}

pub fn factory_for(kind: CandyKind) -> &'static dyn CandyFactory {
    match kind {
        CandyKind::Chocolate => &ChocolateFactory,
        CandyKind::Gummy => &GummyFactory,
        CandyKind::Hard => &HardCandyFactory,
        CandyKind::Generic => &GenericCandyFactory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CandyId;

    #[test]
    fn test_defaults_per_kind() {
        let chocolate = factory_for(CandyKind::Chocolate).create_default(20);
        assert_eq!(chocolate.name, "Chocolate Bar");
        assert_eq!(chocolate.price, 1.50);
        assert_eq!(chocolate.weight, 0.15);
        assert_eq!(chocolate.quantity, 20);

        let lollipop = factory_for(CandyKind::Hard).create_default(10);
        assert_eq!(lollipop.name, "Lollipop");
        assert_eq!(lollipop.kind, CandyKind::Hard);

        let generic = factory_for(CandyKind::Generic).create_candy("Jelly Bean", 0.30, 4);
        assert_eq!(generic.weight, 0.05);
    }

    #[test]
    fn test_packages() {
        let cases = [
            (CandyKind::Chocolate, "Chocolate Box", 3.00),
            (CandyKind::Gummy, "Gummy Bag", 2.00),
            (CandyKind::Hard, "Hard Candy Bag", 2.00),
            (CandyKind::Generic, "Candy Bag", 2.00),
        ];
        for (kind, name, price) in cases {
            let package = factory_for(kind).create_package();
            assert_eq!(package.name(), name);
            assert_eq!(package.price, price);
        }
    }

    #[test]
    fn test_copy_keeps_weight() {
        let original = Candy::new(CandyId(4), "Truffle", CandyKind::Chocolate, 2.25, 0.2, 6);
        let copy = GummyFactory.copy_candy(&original);
        assert_eq!(copy.name, "Truffle");
        assert_eq!(copy.weight, 0.2);
        assert_eq!(copy.kind, CandyKind::Gummy);
    }
}
