use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::record::{RecordId, StoredTransaction};
use crate::models::transaction::Transaction;

/// Manages the session's in-memory transaction list.
///
/// Pure state transitions — the session decides when the store has
/// confirmed a mutation and only then applies it here, so the list never
/// gets ahead of the store.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Validate a transaction before it is sent to the store.
    ///
    /// Rules:
    /// - Amount must not be negative (the kind decides the sign)
    /// - Description must not be blank
    pub fn validate(&self, transaction: &Transaction) -> Result<(), CoreError> {
        if transaction.amount < Decimal::ZERO {
            return Err(CoreError::ValidationError(
                "Transaction amount must not be negative".into(),
            ));
        }
        if transaction.name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Transaction description must not be blank".into(),
            ));
        }
        Ok(())
    }

    /// Append a store-confirmed record to the end of the list.
    pub fn append(&self, ledger: &mut Ledger, record: StoredTransaction) {
        ledger.records.push(record);
    }

    /// Replace the whole list with the store's current contents.
    pub fn replace_all(&self, ledger: &mut Ledger, records: Vec<StoredTransaction>) {
        ledger.records = records;
    }

    /// Empty the list after a fully confirmed bulk delete.
    pub fn clear(&self, ledger: &mut Ledger) {
        ledger.records.clear();
    }

    /// Drop the records whose deletes were confirmed, keeping the rest,
    /// so the local view matches what the store still holds.
    pub fn retain_failed(&self, ledger: &mut Ledger, deleted: &[RecordId]) {
        ledger.records.retain(|r| !deleted.contains(&r.id));
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
