use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a transaction adds to or subtracts from the balance.
///
/// Serialized lowercase (`"income"` / `"expense"`) — the tag format the
/// document store uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in (salary, refunds, interest)
    Income,
    /// Money going out
    Expense,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

/// Sort order for transaction table listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionSortOrder {
    /// Newest date first (default for display)
    DateDesc,
    /// Oldest date first
    DateAsc,
    /// Largest amount first
    AmountDesc,
    /// Smallest amount first
    AmountAsc,
}

/// One recorded income or expense event.
///
/// **Important**: `amount` is always non-negative. Whether it adds to or
/// subtracts from the balance is decided by `kind` alone. Amounts are
/// fixed-point decimals so summed totals cannot drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Date of the transaction (no time component — daily granularity)
    pub date: NaiveDate,

    /// Non-negative amount
    pub amount: Decimal,

    /// Free-text category label (e.g., "food", "salary")
    pub tag: String,

    /// Free-text description
    pub name: String,

    /// Free-text payment method (e.g., "cash", "card")
    pub mode: String,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        date: NaiveDate,
        amount: Decimal,
        tag: impl Into<String>,
        name: impl Into<String>,
        mode: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            date,
            amount,
            tag: tag.into(),
            name: name.into(),
            mode: mode.into(),
        }
    }

    /// Convenience constructor for an income transaction.
    pub fn income(
        date: NaiveDate,
        amount: Decimal,
        tag: impl Into<String>,
        name: impl Into<String>,
        mode: impl Into<String>,
    ) -> Self {
        Self::new(TransactionKind::Income, date, amount, tag, name, mode)
    }

    /// Convenience constructor for an expense transaction.
    pub fn expense(
        date: NaiveDate,
        amount: Decimal,
        tag: impl Into<String>,
        name: impl Into<String>,
        mode: impl Into<String>,
    ) -> Self {
        Self::new(TransactionKind::Expense, date, amount, tag, name, mode)
    }
}
