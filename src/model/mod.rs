//! Domain model for the production chain
//!
//! Entities are constructed fully populated by the ingestion pipeline and
//! never mutated afterwards. Equality is structural throughout so duplicate
//! detection works across distinct constructions from different input
//! records.

mod address;
mod category;
mod container;
mod discount;
mod item;

pub use address::{Address, City};
pub use category::Category;
pub use container::{Factory, ItemContainer, Store, StoreKind};
pub use discount::Discount;
pub use item::{CapabilityTag, Item, ItemKind, CALORIES_PER_KG_CHICKEN_NUGGETS, CALORIES_PER_KG_PIZZA};

/// Common identity surface shared by all persisted entities.
///
/// Ids come from the record files and key both `resolve_by_id` lookups and
/// the batch-wide assignment ledger.
pub trait NamedEntity {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
}
