use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// Store-assigned identifier of one persisted transaction document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transaction together with its identity in the remote store.
///
/// This is what the ledger holds: records only enter it after the store
/// has confirmed a write (or returned them from a fetch), so every entry
/// has a deletable handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTransaction {
    /// Handle for later deletion
    pub id: RecordId,

    /// The transaction payload
    #[serde(flatten)]
    pub transaction: Transaction,
}

impl StoredTransaction {
    pub fn new(id: RecordId, transaction: Transaction) -> Self {
        Self { id, transaction }
    }
}

/// Outcome of a fan-out bulk delete.
///
/// Every requested id ends up in exactly one of the two lists — partial
/// failure is reported, never silently dropped.
#[derive(Debug, Clone, Default)]
pub struct DeleteReport {
    /// Records the store confirmed as deleted
    pub deleted: Vec<RecordId>,

    /// Records whose delete requests failed (still in the store)
    pub failed: Vec<RecordId>,
}

impl DeleteReport {
    /// `true` when every requested delete succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
