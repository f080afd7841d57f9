use async_trait::async_trait;
use futures::future::join_all;

use crate::errors::CoreError;
use crate::models::record::{DeleteReport, RecordId, StoredTransaction};
use crate::models::transaction::Transaction;
use crate::models::user::UserId;

/// Trait abstraction over the remote per-user document collection.
///
/// The hosted backend (Firestore) implements this trait. If the backend
/// changes or goes away, only that one implementation is replaced — the
/// session and the services on top are untouched.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Human-readable name of this store (for logs/errors).
    fn name(&self) -> &str;

    /// Persist one transaction under the user's scope.
    /// Returns the store-assigned record id.
    async fn append(
        &self,
        user: &UserId,
        transaction: &Transaction,
    ) -> Result<RecordId, CoreError>;

    /// Fetch every transaction currently persisted for the user.
    /// Order is unspecified — callers sort for display.
    async fn fetch_all(&self, user: &UserId) -> Result<Vec<StoredTransaction>, CoreError>;

    /// Delete one record by its id.
    async fn delete(&self, user: &UserId, id: &RecordId) -> Result<(), CoreError>;

    /// Delete many records: one concurrent request per id, joined before
    /// returning. Individual failures are collected into the report,
    /// never thrown away — callers decide whether to retry the failed
    /// subset.
    async fn delete_many(&self, user: &UserId, ids: &[RecordId]) -> DeleteReport {
        let results = join_all(
            ids.iter()
                .map(|id| async move { (id.clone(), self.delete(user, id).await) }),
        )
        .await;

        let mut report = DeleteReport::default();
        for (id, result) in results {
            match result {
                Ok(()) => report.deleted.push(id),
                Err(e) => {
                    tracing::warn!("{}: delete of record {id} failed: {e}", self.name());
                    report.failed.push(id);
                }
            }
        }
        report
    }
}
