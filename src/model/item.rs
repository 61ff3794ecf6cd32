//! Items and their closed variant set
//!
//! The Edible/Technical capabilities are modeled as a closed tagged union
//! (`ItemKind`) with derived values computed by pattern matching, so the
//! variant set stays exhaustive-checkable.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{Category, Discount, NamedEntity};

/// Kilocalories per kilogram of pizza.
pub const CALORIES_PER_KG_PIZZA: i64 = 2200;
/// Kilocalories per kilogram of chicken nuggets.
pub const CALORIES_PER_KG_CHICKEN_NUGGETS: i64 = 2970;

/// Closed set of item variants.
///
/// `Pizza` and `ChickenNuggets` carry the Edible capability, `Laptop` the
/// Technical one; `Plain` carries neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Plain,
    Pizza { weight_kg: Decimal },
    ChickenNuggets { weight_kg: Decimal },
    Laptop { warranty_years: i64 },
}

/// Capability tag used for grouping reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapabilityTag {
    Edible,
    Technical,
}

impl std::fmt::Display for CapabilityTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapabilityTag::Edible => write!(f, "Edible"),
            CapabilityTag::Technical => write!(f, "Technical"),
        }
    }
}

/// An item produced by factories and sold by stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub width: Decimal,
    pub height: Decimal,
    pub length: Decimal,
    pub production_cost: Decimal,
    pub selling_price: Decimal,
    pub discount: Discount,
    pub kind: ItemKind,
}

impl Item {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        name: impl Into<String>,
        category: Category,
        width: Decimal,
        height: Decimal,
        length: Decimal,
        production_cost: Decimal,
        selling_price: Decimal,
        discount: Discount,
        kind: ItemKind,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            width,
            height,
            length,
            production_cost,
            selling_price,
            discount,
            kind,
        }
    }

    /// Volume from the three dimensions, scaled to 2 decimal places.
    pub fn volume(&self) -> Decimal {
        round_half_up(self.width * self.height * self.length, 2)
    }

    /// Selling price with the discount applied, scaled to 2 decimal places.
    pub fn discounted_selling_price(&self) -> Decimal {
        let factor = Decimal::ONE - self.discount.percentage() / Decimal::from(100);
        round_half_up(self.selling_price * factor, 2)
    }

    /// Weight of the item, present only for edible variants.
    pub fn weight_kg(&self) -> Option<Decimal> {
        match &self.kind {
            ItemKind::Pizza { weight_kg } | ItemKind::ChickenNuggets { weight_kg } => {
                Some(*weight_kg)
            }
            _ => None,
        }
    }

    /// Kilocalories for edible variants, rounded half-up to a whole number.
    pub fn kilocalories(&self) -> Option<i64> {
        let (weight_kg, per_kg) = match &self.kind {
            ItemKind::Pizza { weight_kg } => (*weight_kg, CALORIES_PER_KG_PIZZA),
            ItemKind::ChickenNuggets { weight_kg } => (*weight_kg, CALORIES_PER_KG_CHICKEN_NUGGETS),
            _ => return None,
        };
        round_half_up(weight_kg * Decimal::from(per_kg), 0).to_i64()
    }

    /// Weight-adjusted discounted price for edible variants.
    ///
    /// The discount applies to the per-kilogram selling price, so the total
    /// is `weight * discounted_selling_price`, scaled to 2 decimal places.
    pub fn price(&self) -> Option<Decimal> {
        self.weight_kg()
            .map(|w| round_half_up(w * self.discounted_selling_price(), 2))
    }

    /// Remaining warranty in months, present only for technical variants.
    pub fn remaining_warranty_months(&self) -> Option<i64> {
        match &self.kind {
            ItemKind::Laptop { warranty_years } => Some(warranty_years * 12),
            _ => None,
        }
    }

    pub fn is_edible(&self) -> bool {
        matches!(
            self.kind,
            ItemKind::Pizza { .. } | ItemKind::ChickenNuggets { .. }
        )
    }

    pub fn is_technical(&self) -> bool {
        matches!(self.kind, ItemKind::Laptop { .. })
    }

    /// The capability this item carries, if any.
    pub fn capability(&self) -> Option<CapabilityTag> {
        match &self.kind {
            ItemKind::Pizza { .. } | ItemKind::ChickenNuggets { .. } => Some(CapabilityTag::Edible),
            ItemKind::Laptop { .. } => Some(CapabilityTag::Technical),
            ItemKind::Plain => None,
        }
    }
}

impl NamedEntity for Item {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_item(kind: ItemKind) -> Item {
        Item::new(
            1,
            "Test item",
            Category::new(1, "Food", ""),
            Decimal::from(2),
            Decimal::from(3),
            Decimal::from(4),
            Decimal::from(50),
            Decimal::from(100),
            Discount::new(Decimal::from(25)).unwrap(),
            kind,
        )
    }

    #[test]
    fn test_volume() {
        let item = make_test_item(ItemKind::Plain);
        assert_eq!(item.volume(), Decimal::from(24));
    }

    #[test]
    fn test_discounted_selling_price() {
        let item = make_test_item(ItemKind::Plain);
        assert_eq!(item.discounted_selling_price(), "75.00".parse().unwrap());
    }

    #[test]
    fn test_pizza_kilocalories() {
        let pizza = make_test_item(ItemKind::Pizza {
            weight_kg: Decimal::from(2),
        });
        assert_eq!(pizza.kilocalories(), Some(4400));
    }

    #[test]
    fn test_nuggets_kilocalories_rounds_half_up() {
        let nuggets = make_test_item(ItemKind::ChickenNuggets {
            weight_kg: "0.5".parse().unwrap(),
        });
        assert_eq!(nuggets.kilocalories(), Some(1485));
    }

    #[test]
    fn test_edible_price_uses_weight_and_discount() {
        let pizza = make_test_item(ItemKind::Pizza {
            weight_kg: Decimal::from(2),
        });
        // 2 kg * 75.00 discounted per-kg price
        assert_eq!(pizza.price(), Some("150.00".parse().unwrap()));
    }

    #[test]
    fn test_laptop_warranty_months() {
        let laptop = make_test_item(ItemKind::Laptop { warranty_years: 3 });
        assert_eq!(laptop.remaining_warranty_months(), Some(36));
        assert!(laptop.is_technical());
        assert!(!laptop.is_edible());
    }

    #[test]
    fn test_plain_item_has_no_capability() {
        let item = make_test_item(ItemKind::Plain);
        assert_eq!(item.capability(), None);
        assert_eq!(item.kilocalories(), None);
        assert_eq!(item.price(), None);
        assert_eq!(item.remaining_warranty_months(), None);
    }
}
