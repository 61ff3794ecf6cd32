//! End-of-run serialized checkpoint
//!
//! Captures the factory and store collections (only containers with at
//! least `MIN_SNAPSHOT_ITEMS` items) as a versioned JSON document, written
//! once at the end of a run and read back to demonstrate round-trip
//! fidelity. This is not a durable store; there is no schema evolution.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::model::{Factory, ItemContainer, Store};

/// Snapshot format version - increment when struct layout changes
pub const SNAPSHOT_VERSION: u32 = 1;

/// Containers with fewer items than this are left out of the snapshot.
pub const MIN_SNAPSHOT_ITEMS: usize = 5;

/// Versioned checkpoint of the container collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSnapshot {
    /// Format version for compatibility checking
    pub version: u32,

    pub created_at: DateTime<Utc>,

    pub factories: Vec<Factory>,
    pub stores: Vec<Store>,
}

impl ChainSnapshot {
    /// Capture the containers that qualify for the checkpoint.
    pub fn capture(factories: &[Factory], stores: &[Store]) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            created_at: Utc::now(),
            factories: factories
                .iter()
                .filter(|f| f.item_count() >= MIN_SNAPSHOT_ITEMS)
                .cloned()
                .collect(),
            stores: stores
                .iter()
                .filter(|s| s.item_count() >= MIN_SNAPSHOT_ITEMS)
                .cloned()
                .collect(),
        }
    }

    /// Save snapshot to disk
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }

    /// Load snapshot from disk
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let bytes = std::fs::read(path)?;
        let snapshot: Self = serde_json::from_slice(&bytes)?;

        // Version check
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: snapshot.version,
            });
        }

        Ok(snapshot)
    }
}
