//! Error handling for the production-chain pipeline
//!
//! This module provides idiomatic Rust error types using thiserror for
//! better error messages and proper error chain handling. Record-level
//! problems (duplicates, unresolvable references, malformed fields) are
//! recovered inside the ingestion pipeline and never reach callers; the
//! variants here describe the failures that *are* surfaced.

use thiserror::Error;

/// Main error type for the production-chain system
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Field- and value-level validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Discount percentage {percentage} is outside [0, 100]")]
    DiscountOutOfRange { percentage: rust_decimal::Decimal },

    #[error("City '{name}' is not supported. Supported cities: {supported}")]
    CityNotSupported { name: String, supported: String },

    #[error("Dimension '{field}' must be positive, got {value}")]
    NonPositiveDimension {
        field: &'static str,
        value: rust_decimal::Decimal,
    },
}

/// Reference-resolution errors (menu indices, persisted ids, duplicates)
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Choice {index} is out of range, expected 1..={max}")]
    IndexOutOfRange { index: usize, max: usize },

    #[error("Item [{name}] with id {id} has already been assigned in this batch")]
    DuplicateSelection { id: i64, name: String },
}

/// Record-stream reading errors
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Unexpected end of input while reading field '{field}'")]
    UnexpectedEof { field: &'static str },

    #[error("Invalid numeric value '{value}' for field '{field}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Unknown {what} tag '{value}'")]
    UnknownTag { what: &'static str, value: String },

    #[error("IO error while reading records: {0}")]
    Io(#[from] std::io::Error),
}

/// Aggregate-reporter errors
///
/// The reporter fails explicitly instead of falling back to the first
/// element of the collection, so an empty or capability-less inventory is
/// visible to the caller.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Cannot report on an empty collection of {what}")]
    EmptyCollection { what: &'static str },

    #[error("No {capability} items present in the inventory")]
    NoMatchingItems { capability: &'static str },
}

/// Snapshot checkpoint errors
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot version mismatch: expected {expected}, got {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Snapshot IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
