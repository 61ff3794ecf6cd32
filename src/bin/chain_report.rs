use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use prodchain::ingest::load_chain;
use prodchain::model::{CapabilityTag, ItemContainer};
use prodchain::report;
use prodchain::snapshot::ChainSnapshot;

const SNAPSHOT_FILE: &str = "snapshots/chain-snapshot.json";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let data_dir = match args.len() {
        1 => PathBuf::from("data"),
        2 => PathBuf::from(&args[1]),
        _ => {
            eprintln!("Usage: {} [data-dir]", args[0]);
            std::process::exit(1);
        }
    };

    info!("Loading production chain from {}", data_dir.display());
    let chain = load_chain(&data_dir);

    match report::factory_with_largest_item_volume(&chain.factories) {
        Ok(factory) => println!(
            "The factory that produces an item with the greatest volume is: '{}'.",
            factory.name
        ),
        Err(e) => println!("{e}"),
    }

    match report::store_with_cheapest_item(&chain.stores) {
        Ok(store) => println!(
            "The store that sells an item with the cheapest price is: '{}'.",
            store.name
        ),
        Err(e) => println!("{e}"),
    }

    match report::most_caloric_food(&chain.items) {
        Ok(item) => {
            if let Some(kcal) = item.kilocalories() {
                println!("The food product with the most calories is {} [{kcal}]", item.name);
            }
        }
        Err(e) => println!("{e}"),
    }

    match report::highest_priced_food(&chain.items) {
        Ok(item) => {
            if let Some(price) = item.price() {
                println!(
                    "The food product with the highest price (with discount and weight) is {} [{price}]",
                    item.name
                );
            }
        }
        Err(e) => println!("{e}"),
    }

    match report::laptop_with_shortest_warranty(&chain.items) {
        Ok(item) => {
            if let Some(months) = item.remaining_warranty_months() {
                println!("The laptop with the shortest warranty is {} [{months}]", item.name);
            }
        }
        Err(e) => println!("{e}"),
    }

    println!("Cheapest and most expensive items by category:");
    for (category, group) in report::group_by_category(&chain.items) {
        if let Some((cheapest, priciest)) = report::price_extremes(&group) {
            println!(
                "  {}: cheapest {} [{}], most expensive {} [{}]",
                category.name,
                cheapest.name,
                cheapest.discounted_selling_price(),
                priciest.name,
                priciest.discounted_selling_price()
            );
        }
    }

    println!("Cheapest and most expensive items by capability:");
    let by_capability = report::group_by_capability(&chain.items);
    for tag in [CapabilityTag::Edible, CapabilityTag::Technical] {
        if let Some(group) = by_capability.get(&tag) {
            if let Some((cheapest, priciest)) = report::price_extremes(group) {
                println!(
                    "  {tag}: cheapest {} [{}], most expensive {} [{}]",
                    cheapest.name,
                    cheapest.discounted_selling_price(),
                    priciest.name,
                    priciest.discounted_selling_price()
                );
            }
        }
    }

    if let Ok(average) = report::average_item_price(&chain.items) {
        println!("Average price of all items: {average}");
    }
    if let Ok(average) = report::average_item_volume(&chain.items) {
        println!("Average volume of all items: {average}");
    }
    if let Ok(average) = report::average_price_above_average_volume(&chain.items) {
        println!("Average price of all items with above average volume: {average}");
    }

    println!("Stores with an above-average number of items:");
    for store in report::containers_above_average_item_count(&chain.stores) {
        println!("  {} [{} items]", ItemContainer::name(store), store.item_count());
    }

    println!("Discounted items:");
    for item in report::discounted_items(&chain.items) {
        println!("  {} [{}%]", item.name, item.discount.percentage());
    }

    println!("Store items:");
    for store in &chain.stores {
        let names: Vec<&str> = store.items.iter().map(|i| i.name.as_str()).collect();
        println!(
            "  {} sells {} item(s): {}",
            ItemContainer::name(store),
            store.item_count(),
            names.join(", ")
        );
    }

    println!("Store item volumes (largest first):");
    for store in &chain.stores {
        println!("  {}:", ItemContainer::name(store));
        for item in report::items_by_volume_desc(&store.items) {
            println!("    {} [{}]", item.name, item.volume());
        }
    }

    println!("Factory item volumes (production order):");
    for factory in &chain.factories {
        println!("  {}:", ItemContainer::name(factory));
        for item in &factory.items {
            println!("    {} [{}]", item.name, item.volume());
        }
    }

    write_and_verify_snapshot(&data_dir, &chain)?;

    info!("Report finished");
    Ok(())
}

fn write_and_verify_snapshot(data_dir: &Path, chain: &prodchain::LoadedChain) -> Result<()> {
    let path = data_dir.join(SNAPSHOT_FILE);

    let snapshot = ChainSnapshot::capture(&chain.factories, &chain.stores);
    snapshot.save(&path)?;

    let restored = ChainSnapshot::load(&path)?;
    let factory_names: Vec<&str> = restored.factories.iter().map(|f| f.name.as_str()).collect();
    let store_names: Vec<&str> = restored.stores.iter().map(|s| s.name.as_str()).collect();
    println!("Restored factories: {}", factory_names.join(", "));
    println!("Restored stores: {}", store_names.join(", "));

    Ok(())
}
