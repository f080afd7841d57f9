use rust_decimal::Decimal;

use crate::models::chart::ChartPoint;
use crate::models::record::StoredTransaction;
use crate::models::transaction::TransactionKind;

/// Generates chart-ready data from the transaction list.
///
/// The core computes all the numbers — the frontend only renders.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// The list snapshot in ascending date order, for chart consumption.
    ///
    /// The sort is stable: same-date records keep their original relative
    /// order, since no secondary key exists.
    #[must_use]
    pub fn chronological<'a>(
        &self,
        records: &'a [StoredTransaction],
    ) -> Vec<&'a StoredTransaction> {
        let mut sorted: Vec<&StoredTransaction> = records.iter().collect();
        sorted.sort_by_key(|r| r.transaction.date);
        sorted
    }

    /// Chronological points annotated with the running net balance.
    #[must_use]
    pub fn series(&self, records: &[StoredTransaction]) -> Vec<ChartPoint> {
        let mut balance = Decimal::ZERO;
        self.chronological(records)
            .into_iter()
            .map(|record| {
                let transaction = &record.transaction;
                match transaction.kind {
                    TransactionKind::Income => balance += transaction.amount,
                    TransactionKind::Expense => balance -= transaction.amount,
                }
                ChartPoint {
                    date: transaction.date,
                    kind: transaction.kind,
                    amount: transaction.amount,
                    balance,
                }
            })
            .collect()
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
