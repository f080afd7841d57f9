use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::TransactionKind;

/// A single data point for dashboard chart rendering.
///
/// The core generates these — the frontend just renders. Points come out
/// in chronological order with the running net balance already applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    /// The date for this data point
    pub date: NaiveDate,

    /// Income or expense
    pub kind: TransactionKind,

    /// Amount of the underlying transaction
    pub amount: Decimal,

    /// Running net balance after applying this transaction
    pub balance: Decimal,
}
