//! Raw record parsing
//!
//! One function per record type. Each function consumes exactly the fields
//! the record owns before converting any of them, so a malformed value
//! skips that one record without misaligning the rest of the stream. The
//! only unrecoverable shape is an unparseable subtype tag, where the number
//! of remaining fields is unknowable; the record is rejected with whatever
//! was consumed.

use std::io::BufRead;

use rust_decimal::Decimal;

use crate::error::IngestError;

use super::source::RecordReader;

/// Raw category record: `(id, name, description)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Subtype selector inside an item record.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemSubtype {
    Plain,
    Pizza { weight_kg: Decimal },
    ChickenNuggets { weight_kg: Decimal },
    Laptop { warranty_years: i64 },
}

/// Raw item record; `category_id` is resolved by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub width: Decimal,
    pub height: Decimal,
    pub length: Decimal,
    pub production_cost: Decimal,
    pub selling_price: Decimal,
    pub discount_percentage: Decimal,
    pub subtype: ItemSubtype,
}

/// Raw address record.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressRecord {
    pub street: String,
    pub house_number: String,
    pub city_name: String,
}

/// Raw factory record; `address_index` is 1-based, `item_ids` come from a
/// comma-delimited list.
#[derive(Debug, Clone, PartialEq)]
pub struct FactoryRecord {
    pub id: i64,
    pub name: String,
    pub address_index: usize,
    pub item_ids: Vec<ItemIdField>,
}

/// Store specialization tag. Tags other than 1 and 2 fall back to a
/// general store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreTypeTag {
    Technical,
    Food,
    General,
}

/// Raw store record.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRecord {
    pub id: i64,
    pub name: String,
    pub web_address: String,
    pub item_ids: Vec<ItemIdField>,
    pub store_type: StoreTypeTag,
}

/// One entry of an item-id list: either a parsed id or the raw text that
/// failed to parse (skipped with a warning by the pipeline).
#[derive(Debug, Clone, PartialEq)]
pub enum ItemIdField {
    Id(i64),
    Malformed(String),
}

const SUBTYPE_FOOD: i64 = 1;
const SUBTYPE_LAPTOP: i64 = 2;
const FOOD_PIZZA: i64 = 1;
const FOOD_CHICKEN_NUGGETS: i64 = 2;
const STORE_TECHNICAL: i64 = 1;
const STORE_FOOD: i64 = 2;

/// Read a category record, `id_line` being the already-consumed first field.
pub fn read_category_record<R: BufRead>(
    reader: &mut RecordReader<R>,
    id_line: &str,
) -> Result<CategoryRecord, IngestError> {
    let name = reader.field("category name")?;
    let description = reader.field("category description")?;
    let id = parse_int("category id", id_line)?;

    Ok(CategoryRecord {
        id,
        name,
        description,
    })
}

/// Read an item record, `id_line` being the already-consumed first field.
pub fn read_item_record<R: BufRead>(
    reader: &mut RecordReader<R>,
    id_line: &str,
) -> Result<ItemRecord, IngestError> {
    let name = reader.field("item name")?;
    let category_id = reader.field("category id")?;
    let width = reader.field("width")?;
    let height = reader.field("height")?;
    let length = reader.field("length")?;
    let production_cost = reader.field("production cost")?;
    let selling_price = reader.field("selling price")?;
    let discount = reader.field("discount percentage")?;
    let subtype_tag = reader.field("subtype tag")?;

    // Consume the subtype's extra fields before converting anything, so a
    // bad numeric value earlier in the record cannot misalign the stream.
    let subtype = match parse_int("subtype tag", &subtype_tag)? {
        SUBTYPE_FOOD => {
            let food_tag = reader.field("food tag")?;
            let weight = reader.field("weight in kg")?;
            let weight_kg = parse_decimal("weight in kg", &weight)?;
            match parse_int("food tag", &food_tag)? {
                FOOD_PIZZA => ItemSubtype::Pizza { weight_kg },
                FOOD_CHICKEN_NUGGETS => ItemSubtype::ChickenNuggets { weight_kg },
                _ => {
                    return Err(IngestError::UnknownTag {
                        what: "food",
                        value: food_tag,
                    })
                }
            }
        }
        SUBTYPE_LAPTOP => {
            let warranty = reader.field("warranty years")?;
            ItemSubtype::Laptop {
                warranty_years: parse_int("warranty years", &warranty)?,
            }
        }
        _ => ItemSubtype::Plain,
    };

    Ok(ItemRecord {
        id: parse_int("item id", id_line)?,
        name,
        category_id: parse_int("category id", &category_id)?,
        width: parse_decimal("width", &width)?,
        height: parse_decimal("height", &height)?,
        length: parse_decimal("length", &length)?,
        production_cost: parse_decimal("production cost", &production_cost)?,
        selling_price: parse_decimal("selling price", &selling_price)?,
        discount_percentage: parse_decimal("discount percentage", &discount)?,
        subtype,
    })
}

/// Read an address record, `street_line` being the already-consumed first field.
pub fn read_address_record<R: BufRead>(
    reader: &mut RecordReader<R>,
    street_line: &str,
) -> Result<AddressRecord, IngestError> {
    let house_number = reader.field("house number")?;
    let city_name = reader.field("city name")?;

    Ok(AddressRecord {
        street: street_line.to_string(),
        house_number,
        city_name,
    })
}

/// Read a factory record, `id_line` being the already-consumed first field.
pub fn read_factory_record<R: BufRead>(
    reader: &mut RecordReader<R>,
    id_line: &str,
) -> Result<FactoryRecord, IngestError> {
    let name = reader.field("factory name")?;
    let address_index = reader.field("address index")?;
    let item_list = reader.field("item id list")?;

    let address_index = parse_int("address index", &address_index)?;
    let address_index = usize::try_from(address_index).map_err(|_| IngestError::InvalidNumber {
        field: "address index",
        value: address_index.to_string(),
    })?;

    Ok(FactoryRecord {
        id: parse_int("factory id", id_line)?,
        name,
        address_index,
        item_ids: parse_item_id_list(&item_list),
    })
}

/// Read a store record, `id_line` being the already-consumed first field.
pub fn read_store_record<R: BufRead>(
    reader: &mut RecordReader<R>,
    id_line: &str,
) -> Result<StoreRecord, IngestError> {
    let name = reader.field("store name")?;
    let web_address = reader.field("web address")?;
    let item_list = reader.field("item id list")?;
    let store_type = reader.field("store type tag")?;

    let store_type = match parse_int("store type tag", &store_type)? {
        STORE_TECHNICAL => StoreTypeTag::Technical,
        STORE_FOOD => StoreTypeTag::Food,
        _ => StoreTypeTag::General,
    };

    Ok(StoreRecord {
        id: parse_int("store id", id_line)?,
        name,
        web_address,
        item_ids: parse_item_id_list(&item_list),
        store_type,
    })
}

/// Split a comma-delimited id list, keeping malformed entries so the
/// pipeline can warn about them individually.
fn parse_item_id_list(raw: &str) -> Vec<ItemIdField> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<i64>() {
            Ok(id) => ItemIdField::Id(id),
            Err(_) => ItemIdField::Malformed(s.to_string()),
        })
        .collect()
}

fn parse_int(field: &'static str, raw: &str) -> Result<i64, IngestError> {
    raw.trim().parse().map_err(|_| IngestError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal, IngestError> {
    raw.trim().parse().map_err(|_| IngestError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}
