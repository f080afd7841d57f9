use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The derived summary shown on the dashboard cards.
///
/// Always recomputed from the full transaction list, never patched
/// incrementally. After every recomputation
/// `net_balance == income_total - expense_total`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// Sum of amounts over income transactions
    pub income_total: Decimal,

    /// Sum of amounts over expense transactions
    pub expense_total: Decimal,

    /// `income_total - expense_total`
    pub net_balance: Decimal,
}
