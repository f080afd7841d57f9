use serde::{Deserialize, Serialize};

use super::record::{RecordId, StoredTransaction};

/// The session's transaction list — the single in-memory source of truth.
///
/// Created empty at sign-in, replaced wholesale on hydrate, appended to on
/// insert, emptied on bulk delete, destroyed at sign-out. Scoped to one
/// signed-in user; never shared across sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// Records in insertion order (store order after a hydrate).
    pub records: Vec<StoredTransaction>,
}

impl Ledger {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Handles of every record currently in the list, in list order.
    #[must_use]
    pub fn record_ids(&self) -> Vec<RecordId> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }
}
