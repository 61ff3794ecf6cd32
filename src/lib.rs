//! prodchain - Production-Chain Ingestion & Inventory Analytics
//!
//! This crate builds a small production-chain entity graph (categories,
//! items, factories, stores) from line-per-field record files, resolving
//! cross-references by numeric id with batch-wide duplicate tracking, and
//! derives aggregate facts over the result.
//!
//! ## Data flow
//! Record files -> ingestion pipeline -> (via the resolver) -> domain
//! entities -> aggregate reporter -> human-readable summaries. The pipeline
//! is strictly feed-forward and runs once per invocation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! let chain = prodchain::ingest::load_chain(Path::new("data"));
//! if let Ok(best) = prodchain::report::factory_with_largest_item_volume(&chain.factories) {
//!     println!("Largest-volume factory: {}", best.name);
//! }
//! ```

// Core error handling
pub mod error;

// Domain entities and derived-value formulas
pub mod model;

// Raw identifier resolution and the batch assignment ledger
pub mod resolver;

// Record ingestion pipeline
pub mod ingest;

// Aggregate reporting over the constructed graph
pub mod report;

// End-of-run serialized checkpoint
pub mod snapshot;

// Public re-exports for the common surface
pub use error::{
    ChainError, IngestError, ReportError, ResolveError, SnapshotError, ValidationError,
};
pub use ingest::{load_chain, LoadedChain};
pub use model::{
    Address, CapabilityTag, Category, City, Discount, Factory, Item, ItemContainer, ItemKind,
    NamedEntity, Store, StoreKind,
};
pub use resolver::{resolve_by_id, resolve_by_index, Choice, SelectionLedger};
pub use snapshot::{ChainSnapshot, MIN_SNAPSHOT_ITEMS, SNAPSHOT_VERSION};
