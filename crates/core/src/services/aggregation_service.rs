use rust_decimal::Decimal;

use crate::models::record::StoredTransaction;
use crate::models::summary::BalanceSummary;
use crate::models::transaction::TransactionKind;

/// Derives the dashboard summary from a transaction list snapshot.
///
/// Pure business logic — no I/O, no store calls. Easy to test.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Recompute the full summary in one pass over the snapshot.
    ///
    /// Income amounts accumulate into `income_total`, everything else
    /// into `expense_total`, and `net_balance` is the difference. Always
    /// a full recomputation — at personal-finance list sizes an
    /// incremental update isn't worth the bookkeeping it needs.
    #[must_use]
    pub fn summarize(&self, records: &[StoredTransaction]) -> BalanceSummary {
        let mut income_total = Decimal::ZERO;
        let mut expense_total = Decimal::ZERO;

        for record in records {
            match record.transaction.kind {
                TransactionKind::Income => income_total += record.transaction.amount,
                TransactionKind::Expense => expense_total += record.transaction.amount,
            }
        }

        BalanceSummary {
            income_total,
            expense_total,
            net_balance: income_total - expense_total,
        }
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
