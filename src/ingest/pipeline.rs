//! Staged entity-graph construction
//!
//! Loaders run in strict dependency order: categories → items → addresses →
//! factories/stores, because later records reference earlier entities by id
//! or index. A bad record is skipped with a warning and the stage continues;
//! an unreadable source file fails only that stage, which returns an empty
//! collection so downstream stages still run (with degenerate output).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::error::{IngestError, ValidationError};
use crate::model::{
    Address, Category, Discount, Factory, Item, ItemKind, Store, StoreKind,
};
use crate::resolver::{resolve_by_id, resolve_by_index, SelectionLedger};

use super::records::{
    read_address_record, read_category_record, read_factory_record, read_item_record,
    read_store_record, ItemIdField, ItemSubtype, StoreTypeTag,
};
use super::source::RecordReader;

pub const CATEGORIES_FILE: &str = "categories.txt";
pub const ITEMS_FILE: &str = "items.txt";
pub const ADDRESSES_FILE: &str = "addresses.txt";
pub const FACTORIES_FILE: &str = "factories.txt";
pub const STORES_FILE: &str = "stores.txt";

/// The fully constructed entity graph of one ingestion run.
#[derive(Debug, Clone, Default)]
pub struct LoadedChain {
    pub categories: Vec<Category>,
    pub items: Vec<Item>,
    pub addresses: Vec<Address>,
    pub factories: Vec<Factory>,
    pub stores: Vec<Store>,
}

/// Load the whole chain from the conventional file names inside `dir`.
pub fn load_chain(dir: &Path) -> LoadedChain {
    let categories = load_categories(&dir.join(CATEGORIES_FILE));
    let items = load_items(&dir.join(ITEMS_FILE), &categories);
    let addresses = load_addresses(&dir.join(ADDRESSES_FILE));
    let factories = load_factories(&dir.join(FACTORIES_FILE), &addresses, &items);
    let stores = load_stores(&dir.join(STORES_FILE), &items);

    LoadedChain {
        categories,
        items,
        addresses,
        factories,
        stores,
    }
}

/// Load categories, rejecting records structurally equal to an earlier one.
pub fn load_categories(path: &Path) -> Vec<Category> {
    let Some(mut reader) = open_stage(path) else {
        return Vec::new();
    };

    let mut categories: Vec<Category> = Vec::new();
    loop {
        match next_record_start(&mut reader, path) {
            Some(id_line) => match read_category_record(&mut reader, &id_line) {
                Ok(record) => {
                    let category = Category::new(record.id, record.name, record.description);
                    if categories.iter().any(|c| *c == category) {
                        warn!(
                            "Category [{}] has already been added, record ignored",
                            category.name
                        );
                        continue;
                    }
                    categories.push(category);
                }
                Err(e) if is_eof(&e) => {
                    skip_truncated(path, &e);
                    break;
                }
                Err(e) => warn!("Skipping category record: {e}"),
            },
            None => break,
        }
    }
    categories
}

/// Load items, resolving each record's category id against the loaded
/// categories.
pub fn load_items(path: &Path, categories: &[Category]) -> Vec<Item> {
    let Some(mut reader) = open_stage(path) else {
        return Vec::new();
    };

    let mut items: Vec<Item> = Vec::new();
    loop {
        match next_record_start(&mut reader, path) {
            Some(id_line) => match read_item_record(&mut reader, &id_line) {
                Ok(record) => {
                    let Some(category) = resolve_by_id(categories, record.category_id) else {
                        warn!("No category found for id {}, item record skipped", record.category_id);
                        continue;
                    };

                    let discount = match Discount::new(record.discount_percentage) {
                        Ok(d) => d,
                        Err(e) => {
                            warn!("Skipping item record [{}]: {e}", record.name);
                            continue;
                        }
                    };

                    if let Err(e) = check_positive_fields(&record) {
                        warn!("Skipping item record [{}]: {e}", record.name);
                        continue;
                    }

                    let kind = match record.subtype {
                        ItemSubtype::Plain => ItemKind::Plain,
                        ItemSubtype::Pizza { weight_kg } => ItemKind::Pizza { weight_kg },
                        ItemSubtype::ChickenNuggets { weight_kg } => {
                            ItemKind::ChickenNuggets { weight_kg }
                        }
                        ItemSubtype::Laptop { warranty_years } => {
                            ItemKind::Laptop { warranty_years }
                        }
                    };

                    items.push(Item::new(
                        record.id,
                        record.name,
                        category.clone(),
                        record.width,
                        record.height,
                        record.length,
                        record.production_cost,
                        record.selling_price,
                        discount,
                        kind,
                    ));
                }
                Err(e) if is_eof(&e) => {
                    skip_truncated(path, &e);
                    break;
                }
                Err(e) => warn!("Skipping item record: {e}"),
            },
            None => break,
        }
    }

    for item in &items {
        if let (Some(kcal), Some(price)) = (item.kilocalories(), item.price()) {
            info!("Kilocalories in {}: {kcal}", item.name);
            info!(
                "Price (with {}% discount) for {}: {price}",
                item.discount.percentage(),
                item.name
            );
        }
    }

    items
}

/// Load addresses, rejecting records with an unsupported city name.
pub fn load_addresses(path: &Path) -> Vec<Address> {
    let Some(mut reader) = open_stage(path) else {
        return Vec::new();
    };

    let mut addresses: Vec<Address> = Vec::new();
    loop {
        match next_record_start(&mut reader, path) {
            Some(street_line) => match read_address_record(&mut reader, &street_line) {
                Ok(record) => match record.city_name.parse() {
                    Ok(city) => {
                        addresses.push(Address::new(record.street, record.house_number, city))
                    }
                    Err(e) => warn!("Skipping address record: {e}"),
                },
                Err(e) if is_eof(&e) => {
                    skip_truncated(path, &e);
                    break;
                }
                Err(e) => warn!("Skipping address record: {e}"),
            },
            None => break,
        }
    }
    addresses
}

/// Load factories. One assignment ledger spans the whole factory batch, so
/// an item can never end up in two factories.
pub fn load_factories(path: &Path, addresses: &[Address], items: &[Item]) -> Vec<Factory> {
    let Some(mut reader) = open_stage(path) else {
        return Vec::new();
    };

    let mut ledger = SelectionLedger::new();
    let mut factories: Vec<Factory> = Vec::new();
    loop {
        match next_record_start(&mut reader, path) {
            Some(id_line) => match read_factory_record(&mut reader, &id_line) {
                Ok(record) => {
                    let address = match resolve_by_index(addresses, record.address_index) {
                        Ok(a) => a.clone(),
                        Err(e) => {
                            warn!("Skipping factory record [{}]: {e}", record.name);
                            continue;
                        }
                    };
                    let chosen = resolve_item_ids(&record.item_ids, items, &ledger);
                    commit_chosen(&mut ledger, &chosen);
                    factories.push(Factory::new(record.id, record.name, address, chosen));
                }
                Err(e) if is_eof(&e) => {
                    skip_truncated(path, &e);
                    break;
                }
                Err(e) => warn!("Skipping factory record: {e}"),
            },
            None => break,
        }
    }
    factories
}

/// Load stores. The store batch uses its own assignment ledger, separate
/// from the factory batch.
pub fn load_stores(path: &Path, items: &[Item]) -> Vec<Store> {
    let Some(mut reader) = open_stage(path) else {
        return Vec::new();
    };

    let mut ledger = SelectionLedger::new();
    let mut stores: Vec<Store> = Vec::new();
    loop {
        match next_record_start(&mut reader, path) {
            Some(id_line) => match read_store_record(&mut reader, &id_line) {
                Ok(record) => {
                    let chosen = resolve_item_ids(&record.item_ids, items, &ledger);

                    let kind = match record.store_type {
                        StoreTypeTag::Technical => {
                            if !chosen.iter().any(Item::is_technical) {
                                warn!(
                                    "Cannot create technical store [{}] without technical items, record skipped",
                                    record.name
                                );
                                continue;
                            }
                            StoreKind::Technical
                        }
                        StoreTypeTag::Food => {
                            if !chosen.iter().any(Item::is_edible) {
                                warn!(
                                    "Cannot create food store [{}] without edible items, record skipped",
                                    record.name
                                );
                                continue;
                            }
                            StoreKind::Food
                        }
                        StoreTypeTag::General => StoreKind::General,
                    };

                    commit_chosen(&mut ledger, &chosen);
                    stores.push(Store::new(
                        record.id,
                        record.name,
                        record.web_address,
                        chosen,
                        kind,
                    ));
                }
                Err(e) if is_eof(&e) => {
                    skip_truncated(path, &e);
                    break;
                }
                Err(e) => warn!("Skipping store record: {e}"),
            },
            None => break,
        }
    }
    stores
}

/// Resolve an item-id list against the item pool with duplicate tracking.
///
/// Malformed, unknown, and already-assigned ids are warned and skipped
/// individually; the rest of the list still resolves. Resolution itself is
/// side-effect free: the caller commits the chosen items to the ledger only
/// once the whole record is accepted, so a skipped record consumes nothing.
fn resolve_item_ids(ids: &[ItemIdField], items: &[Item], ledger: &SelectionLedger) -> Vec<Item> {
    let mut chosen: Vec<Item> = Vec::new();
    for field in ids {
        let id = match field {
            ItemIdField::Id(id) => *id,
            ItemIdField::Malformed(raw) => {
                warn!("Invalid item id format '{raw}', entry ignored");
                continue;
            }
        };
        let Some(item) = resolve_by_id(items, id) else {
            warn!("No item found for id {id}, entry ignored");
            continue;
        };
        // Duplicates within this record's own list are caught here; the
        // ledger covers the rest of the batch.
        if chosen.iter().any(|c| c.id == id) {
            warn!("Item [{}] listed twice in one record, entry ignored", item.name);
            continue;
        }
        if let Err(e) = ledger.check(item) {
            warn!("{e}");
            continue;
        }
        chosen.push(item.clone());
    }
    chosen
}

fn commit_chosen(ledger: &mut SelectionLedger, chosen: &[Item]) {
    for item in chosen {
        ledger.commit(item);
    }
}

fn open_stage(path: &Path) -> Option<RecordReader<BufReader<File>>> {
    match File::open(path) {
        Ok(file) => Some(RecordReader::new(BufReader::new(file))),
        Err(e) => {
            error!(
                "Cannot read input source {}: {e}. Stage continues with no data.",
                path.display()
            );
            None
        }
    }
}

/// Pull the first field of the next record, or `None` at a clean end of
/// stream. An IO failure mid-stream ends the stage.
fn next_record_start<R: BufRead>(reader: &mut RecordReader<R>, path: &Path) -> Option<String> {
    match reader.next_field() {
        Ok(field) => field,
        Err(e) => {
            error!("Read failure in {}: {e}. Stage stopped.", path.display());
            None
        }
    }
}

/// Dimensional and price fields must be positive.
fn check_positive_fields(record: &super::records::ItemRecord) -> Result<(), ValidationError> {
    let fields = [
        ("width", record.width),
        ("height", record.height),
        ("length", record.length),
        ("production cost", record.production_cost),
        ("selling price", record.selling_price),
    ];
    for (field, value) in fields {
        if value <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveDimension { field, value });
        }
    }
    Ok(())
}

fn is_eof(e: &IngestError) -> bool {
    matches!(e, IngestError::UnexpectedEof { .. })
}

fn skip_truncated(path: &Path, e: &IngestError) {
    warn!(
        "Truncated trailing record in {}: {e}. Earlier records kept.",
        path.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            CATEGORIES_FILE,
            "1\nFood\nEdible goods\n2\nTech\nTechnical goods\n1\nFood\nEdible goods\n",
        );

        let categories = load_categories(&path);
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Food");
        assert_eq!(categories[1].name, "Tech");
    }

    #[test]
    fn test_missing_file_yields_empty_stage() {
        let dir = TempDir::new().unwrap();
        let categories = load_categories(&dir.path().join("nonexistent.txt"));
        assert!(categories.is_empty());
    }

    #[test]
    fn test_unresolvable_category_skips_item_only() {
        let dir = TempDir::new().unwrap();
        let categories = vec![Category::new(1, "Food", "")];
        // First item references category 99 (unknown), second resolves.
        let path = write_file(
            &dir,
            ITEMS_FILE,
            "1\nGhost\n99\n1\n1\n1\n1\n10\n0\n3\n2\nChair\n1\n1\n1\n1\n1\n10\n0\n3\n",
        );

        let items = load_items(&path, &categories);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Chair");
    }

    #[test]
    fn test_out_of_range_discount_skips_item() {
        let dir = TempDir::new().unwrap();
        let categories = vec![Category::new(1, "Food", "")];
        let path = write_file(
            &dir,
            ITEMS_FILE,
            "1\nShady\n1\n1\n1\n1\n1\n10\n120\n3\n",
        );

        let items = load_items(&path, &categories);
        assert!(items.is_empty());
    }

    #[test]
    fn test_non_positive_dimension_skips_item() {
        let dir = TempDir::new().unwrap();
        let categories = vec![Category::new(1, "Misc", "")];
        let path = write_file(&dir, ITEMS_FILE, "1\nFlat\n1\n0\n1\n1\n1\n10\n0\n3\n");

        let items = load_items(&path, &categories);
        assert!(items.is_empty());
    }

    #[test]
    fn test_unknown_city_skips_address_only() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            ADDRESSES_FILE,
            "Ilica\n1\nZagreb\nMain Street\n5\nAtlantis\nRiva\n3\nSplit\n",
        );

        let addresses = load_addresses(&path);
        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses[0].city.name(), "Zagreb");
        assert_eq!(addresses[1].city.name(), "Split");
    }

    #[test]
    fn test_factory_batch_item_sets_are_disjoint() {
        let dir = TempDir::new().unwrap();
        let categories = vec![Category::new(1, "Misc", "")];
        let items_path = write_file(
            &dir,
            ITEMS_FILE,
            "1\nA\n1\n1\n1\n1\n1\n10\n0\n3\n2\nB\n1\n1\n1\n1\n1\n10\n0\n3\n",
        );
        let items = load_items(&items_path, &categories);
        let addresses = vec![Address::new("Ilica", "1", crate::model::City::Zagreb)];

        // Both factories ask for item 1; the second request is a duplicate.
        let factories_path = write_file(
            &dir,
            FACTORIES_FILE,
            "1\nFirst\n1\n1,2\n2\nSecond\n1\n1\n",
        );
        let factories = load_factories(&factories_path, &addresses, &items);

        assert_eq!(factories.len(), 2);
        assert_eq!(factories[0].items.len(), 2);
        assert!(factories[1].items.is_empty());
    }

    #[test]
    fn test_store_capability_requirement() {
        let dir = TempDir::new().unwrap();
        let categories = vec![Category::new(1, "Misc", "")];
        let items_path = write_file(
            &dir,
            ITEMS_FILE,
            "1\nChair\n1\n1\n1\n1\n1\n10\n0\n3\n",
        );
        let items = load_items(&items_path, &categories);

        // A technical store with only a plain chair is rejected; the general
        // store after it still loads.
        let stores_path = write_file(
            &dir,
            STORES_FILE,
            "1\nTechShop\nwww.tech.example\n1\n1\n2\nCorner\nwww.corner.example\n\n3\n",
        );
        let stores = load_stores(&stores_path, &items);

        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].name, "Corner");
        assert_eq!(stores[0].kind, StoreKind::General);
    }

    #[test]
    fn test_rejected_store_releases_its_items() {
        let dir = TempDir::new().unwrap();
        let categories = vec![Category::new(1, "Misc", "")];
        let items_path = write_file(
            &dir,
            ITEMS_FILE,
            "1\nChair\n1\n1\n1\n1\n1\n10\n0\n3\n",
        );
        let items = load_items(&items_path, &categories);

        // The technical store wanting the chair is rejected; the general
        // store after it must still be able to take the same item.
        let stores_path = write_file(
            &dir,
            STORES_FILE,
            "1\nTechShop\nwww.tech.example\n1\n1\n2\nCorner\nwww.corner.example\n1\n3\n",
        );
        let stores = load_stores(&stores_path, &items);

        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].name, "Corner");
        assert_eq!(stores[0].items.len(), 1);
        assert_eq!(stores[0].items[0].name, "Chair");
    }

    #[test]
    fn test_item_listed_twice_in_one_record_kept_once() {
        let dir = TempDir::new().unwrap();
        let categories = vec![Category::new(1, "Misc", "")];
        let items_path = write_file(
            &dir,
            ITEMS_FILE,
            "1\nChair\n1\n1\n1\n1\n1\n10\n0\n3\n",
        );
        let items = load_items(&items_path, &categories);
        let addresses = vec![Address::new("Ilica", "1", crate::model::City::Zagreb)];

        let factories_path = write_file(&dir, FACTORIES_FILE, "1\nFirst\n1\n1,1\n");
        let factories = load_factories(&factories_path, &addresses, &items);

        assert_eq!(factories.len(), 1);
        assert_eq!(factories[0].items.len(), 1);
    }

    #[test]
    fn test_truncated_trailing_record_keeps_earlier_ones() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, CATEGORIES_FILE, "1\nFood\nEdible goods\n2\nTech\n");

        let categories = load_categories(&path);
        assert_eq!(categories.len(), 1);
    }
}
