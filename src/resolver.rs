//! Reference resolution for menu choices and persisted ids
//!
//! Translates raw identifiers (1-based menu indices during selection,
//! numeric ids during file ingestion) into live entity references, and
//! tracks which items have already been assigned within one batch of
//! containers so no item ends up in two containers.

use std::collections::HashSet;

use crate::error::ResolveError;
use crate::model::NamedEntity;

/// Outcome of classifying a raw menu number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// A valid 1-based pick into the pool.
    Pick(usize),
    /// The "finished choosing" sentinel (`pool_len + 1`).
    Finish,
}

/// Resolve a 1-based menu index against a pool.
pub fn resolve_by_index<T>(pool: &[T], index: usize) -> Result<&T, ResolveError> {
    if index == 0 || index > pool.len() {
        return Err(ResolveError::IndexOutOfRange {
            index,
            max: pool.len(),
        });
    }
    Ok(&pool[index - 1])
}

/// Classify a raw menu number as a pick or the finish sentinel.
///
/// The sentinel slot `pool_len + 1` is only offered once the first item has
/// been committed, so a container can never be finished empty by accident.
pub fn classify_choice(
    pool_len: usize,
    raw: usize,
    first_run: bool,
) -> Result<Choice, ResolveError> {
    let max = if first_run { pool_len } else { pool_len + 1 };
    if raw == 0 || raw > max {
        return Err(ResolveError::IndexOutOfRange { index: raw, max });
    }
    if !first_run && raw == pool_len + 1 {
        return Ok(Choice::Finish);
    }
    Ok(Choice::Pick(raw))
}

/// Resolve a persisted numeric id against a pool of named entities.
///
/// A miss is not an error here; callers log a warning and skip the record.
pub fn resolve_by_id<T: NamedEntity>(pool: &[T], id: i64) -> Option<&T> {
    pool.iter().find(|e| e.id() == id)
}

/// Batch-wide "already assigned" tracking set.
///
/// One ledger spans one batch of containers (all factories, or separately
/// all stores); committing an id twice anywhere in the batch is a duplicate.
#[derive(Debug, Default)]
pub struct SelectionLedger {
    assigned: HashSet<i64>,
}

impl SelectionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail if the entity has already been assigned in this batch.
    pub fn check(&self, entity: &impl NamedEntity) -> Result<(), ResolveError> {
        if self.assigned.contains(&entity.id()) {
            return Err(ResolveError::DuplicateSelection {
                id: entity.id(),
                name: entity.name().to_string(),
            });
        }
        Ok(())
    }

    /// Record an assignment. Call only after `check` has passed.
    pub fn commit(&mut self, entity: &impl NamedEntity) {
        self.assigned.insert(entity.id());
    }

    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }

    /// Whether every item of the pool has been assigned somewhere.
    pub fn is_pool_exhausted(&self, pool: &[impl NamedEntity]) -> bool {
        pool.iter().all(|e| self.assigned.contains(&e.id()))
    }
}
