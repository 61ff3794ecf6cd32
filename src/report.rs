//! Aggregate reporting over the constructed entity graph
//!
//! Pure, read-only queries. Empty collections and missing capabilities are
//! explicit errors rather than the historical "return the first element"
//! fallback, which silently masked the empty case.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::error::ReportError;
use crate::model::{CapabilityTag, Category, Factory, Item, ItemContainer, Store};

/// The factory producing the single largest-volume item.
///
/// Ties resolve to the first factory encountered in iteration order.
pub fn factory_with_largest_item_volume(factories: &[Factory]) -> Result<&Factory, ReportError> {
    let mut best: Option<(&Factory, Decimal)> = None;
    for factory in factories {
        for item in &factory.items {
            let volume = item.volume();
            if best.map_or(true, |(_, max)| volume > max) {
                best = Some((factory, volume));
            }
        }
    }
    best.map(|(f, _)| f).ok_or(ReportError::EmptyCollection {
        what: "factories with items",
    })
}

/// The store selling the cheapest item by discounted selling price.
pub fn store_with_cheapest_item(stores: &[Store]) -> Result<&Store, ReportError> {
    let mut best: Option<(&Store, Decimal)> = None;
    for store in stores {
        for item in &store.items {
            let price = item.discounted_selling_price();
            if best.map_or(true, |(_, min)| price < min) {
                best = Some((store, price));
            }
        }
    }
    best.map(|(s, _)| s).ok_or(ReportError::EmptyCollection {
        what: "stores with items",
    })
}

/// The edible item with the most kilocalories.
pub fn most_caloric_food(items: &[Item]) -> Result<&Item, ReportError> {
    capability_extreme(items, "edible", |item| item.kilocalories(), |a, b| a > b)
}

/// The edible item with the highest weight-adjusted discounted price.
pub fn highest_priced_food(items: &[Item]) -> Result<&Item, ReportError> {
    capability_extreme(items, "edible", |item| item.price(), |a, b| a > b)
}

/// The technical item with the shortest remaining warranty.
pub fn laptop_with_shortest_warranty(items: &[Item]) -> Result<&Item, ReportError> {
    capability_extreme(
        items,
        "technical",
        |item| item.remaining_warranty_months(),
        |a, b| a < b,
    )
}

fn capability_extreme<'a, T: PartialOrd + Copy>(
    items: &'a [Item],
    capability: &'static str,
    project: impl Fn(&Item) -> Option<T>,
    better: impl Fn(T, T) -> bool,
) -> Result<&'a Item, ReportError> {
    let mut best: Option<(&Item, T)> = None;
    for item in items {
        if let Some(value) = project(item) {
            if best.map_or(true, |(_, cur)| better(value, cur)) {
                best = Some((item, value));
            }
        }
    }
    best.map(|(i, _)| i).ok_or_else(|| {
        warn!("No {capability} items present, nothing to report");
        ReportError::NoMatchingItems { capability }
    })
}

/// Partition items by their category.
pub fn group_by_category(items: &[Item]) -> HashMap<Category, Vec<&Item>> {
    let mut groups: HashMap<Category, Vec<&Item>> = HashMap::new();
    for item in items {
        groups.entry(item.category.clone()).or_default().push(item);
    }
    groups
}

/// Partition items by capability. Items carrying neither capability are
/// omitted.
pub fn group_by_capability(items: &[Item]) -> HashMap<CapabilityTag, Vec<&Item>> {
    let mut groups: HashMap<CapabilityTag, Vec<&Item>> = HashMap::new();
    for item in items {
        if let Some(tag) = item.capability() {
            groups.entry(tag).or_default().push(item);
        }
    }
    groups
}

/// Cheapest and priciest item of a group by discounted selling price.
pub fn price_extremes<'a>(items: &[&'a Item]) -> Option<(&'a Item, &'a Item)> {
    let mut cheapest: Option<&Item> = None;
    let mut priciest: Option<&Item> = None;
    for &item in items {
        let price = item.discounted_selling_price();
        if cheapest.map_or(true, |c| price < c.discounted_selling_price()) {
            cheapest = Some(item);
        }
        if priciest.map_or(true, |p| price > p.discounted_selling_price()) {
            priciest = Some(item);
        }
    }
    cheapest.zip(priciest)
}

/// Mean selling price, 2 decimal places, ceiling rounding.
pub fn average_item_price(items: &[Item]) -> Result<Decimal, ReportError> {
    average(items, |item| item.selling_price)
}

/// Mean volume, 2 decimal places, ceiling rounding.
pub fn average_item_volume(items: &[Item]) -> Result<Decimal, ReportError> {
    average(items, |item| item.volume())
}

/// Mean selling price of items whose volume strictly exceeds the average
/// volume.
pub fn average_price_above_average_volume(items: &[Item]) -> Result<Decimal, ReportError> {
    let average_volume = average_item_volume(items)?;
    let above: Vec<Item> = items
        .iter()
        .filter(|i| i.volume() > average_volume)
        .cloned()
        .collect();
    average_item_price(&above)
}

fn average(items: &[Item], project: impl Fn(&Item) -> Decimal) -> Result<Decimal, ReportError> {
    if items.is_empty() {
        return Err(ReportError::EmptyCollection { what: "items" });
    }
    let total: Decimal = items.iter().map(&project).sum();
    Ok((total / Decimal::from(items.len() as u64))
        .round_dp_with_strategy(2, RoundingStrategy::ToPositiveInfinity))
}

/// Containers holding strictly more items than the mean item count of their
/// kind.
pub fn containers_above_average_item_count<C: ItemContainer>(containers: &[C]) -> Vec<&C> {
    if containers.is_empty() {
        return Vec::new();
    }
    let total: usize = containers.iter().map(ItemContainer::item_count).sum();
    let average = total as f64 / containers.len() as f64;
    containers
        .iter()
        .filter(|c| c.item_count() as f64 > average)
        .collect()
}

/// Items with an active discount.
pub fn discounted_items(items: &[Item]) -> Vec<&Item> {
    items.iter().filter(|i| i.discount.is_active()).collect()
}

/// Items ordered by volume, largest first; equal volumes order by name.
pub fn items_by_volume_desc(items: &[Item]) -> Vec<&Item> {
    let mut sorted: Vec<&Item> = items.iter().collect();
    sorted.sort_by(|a, b| b.volume().cmp(&a.volume()).then_with(|| a.name.cmp(&b.name)));
    sorted
}
