//! Record ingestion
//!
//! Builds the full entity graph from line-per-field record files in strict
//! dependency order (categories → items → addresses → factories/stores),
//! resolving cross-references through the resolver and recovering from bad
//! records at record granularity.

mod pipeline;
mod records;
mod selection;
mod source;

pub use pipeline::{
    load_addresses, load_categories, load_chain, load_factories, load_items, load_stores,
    LoadedChain, ADDRESSES_FILE, CATEGORIES_FILE, FACTORIES_FILE, ITEMS_FILE, STORES_FILE,
};
pub use records::{
    read_address_record, read_category_record, read_factory_record, read_item_record,
    read_store_record, AddressRecord, CategoryRecord, FactoryRecord, ItemIdField, ItemRecord,
    ItemSubtype, StoreRecord, StoreTypeTag,
};
pub use selection::choose_items;
pub use source::RecordReader;
