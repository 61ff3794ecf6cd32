//! Duplicate-free item selection
//!
//! The interactive workflow: choices arrive one at a time as 1-based menu
//! numbers over a shared item pool, with `pool.len() + 1` as the "finished
//! choosing" sentinel once at least one item has been picked. The prompt
//! itself lives outside this crate; any iterator of raw choices drives the
//! loop, which makes the workflow testable without a console.

use tracing::warn;

use crate::model::Item;
use crate::resolver::{classify_choice, resolve_by_index, Choice, SelectionLedger};

/// Run one container's selection over the shared pool.
///
/// Invalid and duplicate choices are warned and the loop keeps asking, the
/// sentinel ends the selection, and the loop also ends when the feed runs
/// dry or every pool item is already assigned somewhere in the batch. The
/// ledger is shared across all containers of one batch, so the returned
/// sets are disjoint between containers.
pub fn choose_items(
    pool: &[Item],
    choices: &mut dyn Iterator<Item = usize>,
    ledger: &mut SelectionLedger,
) -> Vec<Item> {
    let mut chosen: Vec<Item> = Vec::new();
    let mut first_run = true;

    while !ledger.is_pool_exhausted(pool) {
        let Some(raw) = choices.next() else {
            break;
        };

        let choice = match classify_choice(pool.len(), raw, first_run) {
            Ok(c) => c,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };

        let index = match choice {
            Choice::Finish => break,
            Choice::Pick(i) => i,
        };

        let item = match resolve_by_index(pool, index) {
            Ok(item) => item,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };

        if let Err(e) = ledger.check(item) {
            warn!("{e}");
            continue;
        }

        ledger.commit(item);
        chosen.push(item.clone());
        first_run = false;
    }

    chosen
}
