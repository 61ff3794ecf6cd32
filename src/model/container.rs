//! Item containers: factories and stores
//!
//! Containers hold plain `Vec<Item>`; uniqueness inside and across the
//! containers of one batch is enforced by the resolver's assignment ledger
//! at ingestion time, and reporting tie rules depend on deterministic
//! iteration order.

use serde::{Deserialize, Serialize};

use super::{Address, Item, NamedEntity};

/// Common surface of factories and stores for generic reporting.
pub trait ItemContainer {
    fn name(&self) -> &str;
    fn items(&self) -> &[Item];

    fn item_count(&self) -> usize {
        self.items().len()
    }
}

/// A factory producing a set of items at one address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factory {
    pub id: i64,
    pub name: String,
    pub address: Address,
    pub items: Vec<Item>,
}

impl Factory {
    pub fn new(id: i64, name: impl Into<String>, address: Address, items: Vec<Item>) -> Self {
        Self {
            id,
            name: name.into(),
            address,
            items,
        }
    }
}

impl NamedEntity for Factory {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl ItemContainer for Factory {
    fn name(&self) -> &str {
        &self.name
    }

    fn items(&self) -> &[Item] {
        &self.items
    }
}

/// Store specialization chosen at ingestion time.
///
/// `Technical` requires at least one technical item, `Food` at least one
/// edible item; the pipeline rejects store records that violate this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreKind {
    General,
    Technical,
    Food,
}

/// A store selling a set of items through a web address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub web_address: String,
    pub items: Vec<Item>,
    pub kind: StoreKind,
}

impl Store {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        web_address: impl Into<String>,
        items: Vec<Item>,
        kind: StoreKind,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            web_address: web_address.into(),
            items,
            kind,
        }
    }

    /// Edible items, computed on demand from the single item list.
    pub fn edible_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.is_edible())
    }

    /// Technical items, computed on demand from the single item list.
    pub fn technical_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.is_technical())
    }
}

impl NamedEntity for Store {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl ItemContainer for Store {
    fn name(&self) -> &str {
        &self.name
    }

    fn items(&self) -> &[Item] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Discount, ItemKind};
    use rust_decimal::Decimal;

    fn make_test_item(id: i64, kind: ItemKind) -> Item {
        Item::new(
            id,
            format!("Item {id}"),
            Category::new(1, "Mixed", ""),
            Decimal::ONE,
            Decimal::ONE,
            Decimal::ONE,
            Decimal::ONE,
            Decimal::from(10),
            Discount::none(),
            kind,
        )
    }

    #[test]
    fn test_store_capability_views() {
        let store = Store::new(
            1,
            "Mixed store",
            "www.mixed.example",
            vec![
                make_test_item(
                    1,
                    ItemKind::Pizza {
                        weight_kg: Decimal::ONE,
                    },
                ),
                make_test_item(2, ItemKind::Laptop { warranty_years: 2 }),
                make_test_item(3, ItemKind::Plain),
            ],
            StoreKind::General,
        );

        assert_eq!(store.edible_items().count(), 1);
        assert_eq!(store.technical_items().count(), 1);
        assert_eq!(store.item_count(), 3);
    }

    #[test]
    fn test_container_trait_over_both_kinds() {
        let factory = Factory::new(
            1,
            "F1",
            Address::new("Ilica", "1", crate::model::City::Zagreb),
            vec![make_test_item(1, ItemKind::Plain)],
        );
        let container: &dyn ItemContainer = &factory;
        assert_eq!(container.name(), "F1");
        assert_eq!(container.item_count(), 1);
    }
}
