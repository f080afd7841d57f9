pub mod errors;
pub mod models;
pub mod notify;
pub mod services;
pub mod store;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use models::{
    chart::ChartPoint,
    ledger::Ledger,
    record::{RecordId, StoredTransaction},
    settings::Settings,
    summary::BalanceSummary,
    transaction::{Transaction, TransactionKind, TransactionSortOrder},
    user::UserId,
};
use notify::{NotificationSink, NullSink};
use services::{
    aggregation_service::AggregationService, chart_service::ChartService,
    ledger_service::LedgerService,
};
use store::traits::TransactionStore;

use errors::CoreError;

/// Main entry point for the MoneyDash core library.
/// Owns the session's transaction list and all services that derive
/// dashboard values from it.
///
/// Every mutating operation takes `&mut self`, so hydrate, append, and
/// bulk delete can never interleave on one session — the presentation
/// layer additionally reads `is_loading` to disable triggering controls
/// while a store round-trip is in flight.
#[must_use]
pub struct MoneyDash {
    ledger: Ledger,
    summary: BalanceSummary,
    settings: Settings,
    user: Option<UserId>,
    loading: bool,
    store: Box<dyn TransactionStore>,
    notifier: Box<dyn NotificationSink>,
    ledger_service: LedgerService,
    aggregation_service: AggregationService,
    chart_service: ChartService,
}

impl std::fmt::Debug for MoneyDash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoneyDash")
            .field("transactions", &self.ledger.len())
            .field("summary", &self.summary)
            .field("user", &self.user)
            .field("loading", &self.loading)
            .field("store", &self.store.name())
            .finish()
    }
}

impl MoneyDash {
    /// Create a session with no signed-in user. Store operations are
    /// guarded until `sign_in` is called.
    pub fn new(store: Box<dyn TransactionStore>) -> Self {
        Self {
            ledger: Ledger::default(),
            summary: BalanceSummary::default(),
            settings: Settings::default(),
            user: None,
            loading: false,
            store,
            notifier: Box::new(NullSink),
            ledger_service: LedgerService::new(),
            aggregation_service: AggregationService::new(),
            chart_service: ChartService::new(),
        }
    }

    /// Replace the notification sink (toast boundary).
    pub fn with_notifier(mut self, notifier: Box<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replace the display settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    // ── Session Lifecycle ───────────────────────────────────────────

    /// Start a session for an authenticated user with a fresh, empty
    /// transaction list. Call `hydrate` afterwards to load the store.
    pub fn sign_in(&mut self, user: UserId) {
        tracing::info!("session started for user {user}");
        self.user = Some(user);
        self.ledger = Ledger::default();
        self.summary = BalanceSummary::default();
        self.loading = false;
    }

    /// End the session, destroying its list state and summary.
    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!("session ended for user {user}");
        }
        self.ledger = Ledger::default();
        self.summary = BalanceSummary::default();
        self.loading = false;
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    fn require_user(&self) -> Result<UserId, CoreError> {
        self.user.clone().ok_or(CoreError::NotSignedIn)
    }

    // ── Hydration ───────────────────────────────────────────────────

    /// Replace the in-memory list with the store's current contents and
    /// recompute the summary. Returns the number of records fetched.
    ///
    /// On failure the prior list is left untouched and the error is
    /// surfaced to the caller — never swallowed.
    pub async fn hydrate(&mut self) -> Result<usize, CoreError> {
        let user = self.require_user()?;
        self.loading = true;

        let fetched = self.store.fetch_all(&user).await;
        self.loading = false;

        match fetched {
            Ok(records) => {
                let count = records.len();
                self.ledger_service.replace_all(&mut self.ledger, records);
                self.recompute();
                tracing::info!("hydrated {count} transactions for user {user}");
                self.notifier.success("Transactions fetched");
                Ok(count)
            }
            Err(e) => {
                self.notifier.error("Couldn't fetch transactions");
                Err(e)
            }
        }
    }

    // ── Appending ───────────────────────────────────────────────────

    /// Record one transaction: validate, write through the store, and
    /// only after the store confirms append it to the in-memory list.
    /// On store failure the list is not mutated.
    pub async fn add_transaction(
        &mut self,
        transaction: Transaction,
    ) -> Result<RecordId, CoreError> {
        self.add_inner(transaction, false).await
    }

    async fn add_inner(
        &mut self,
        transaction: Transaction,
        suppress_notification: bool,
    ) -> Result<RecordId, CoreError> {
        let user = self.require_user()?;
        self.ledger_service.validate(&transaction)?;

        match self.store.append(&user, &transaction).await {
            Ok(id) => {
                self.ledger_service
                    .append(&mut self.ledger, StoredTransaction::new(id.clone(), transaction));
                self.recompute();
                if !suppress_notification {
                    self.notifier.success("Transaction added");
                }
                Ok(id)
            }
            Err(e) => {
                // the list must never get ahead of a failed write
                if !suppress_notification {
                    self.notifier.error("Couldn't add transaction");
                }
                Err(e)
            }
        }
    }

    /// Bulk import. All transactions are validated first; if any fails
    /// validation, none are written. Per-record notifications are
    /// suppressed and a single summary notification is emitted at the
    /// end. Returns the number imported.
    ///
    /// Store-confirmed writes stay in the list even when a later write
    /// fails — the list tracks exactly what the store accepted.
    pub async fn add_transactions(
        &mut self,
        transactions: Vec<Transaction>,
    ) -> Result<usize, CoreError> {
        self.require_user()?;
        for transaction in &transactions {
            self.ledger_service.validate(transaction)?;
        }

        let total = transactions.len();
        let mut imported = 0usize;
        for transaction in transactions {
            match self.add_inner(transaction, true).await {
                Ok(_) => imported += 1,
                Err(e) => {
                    tracing::warn!("bulk import stopped after {imported}/{total}: {e}");
                    self.notifier.error("Couldn't import all transactions");
                    return Err(e);
                }
            }
        }

        self.notifier.success("Transactions imported");
        Ok(imported)
    }

    // ── Bulk Delete ─────────────────────────────────────────────────

    /// Delete every record in the list from the store: one concurrent
    /// delete per record, joined before reporting. Returns the number
    /// deleted.
    ///
    /// On partial failure the list keeps exactly the records whose
    /// deletes failed, so the local view matches what the store still
    /// holds — retrying is just calling this again. Partial failure is
    /// never reported as success.
    pub async fn delete_all(&mut self) -> Result<usize, CoreError> {
        let user = self.require_user()?;
        let ids = self.ledger.record_ids();
        if ids.is_empty() {
            return Ok(0);
        }

        self.loading = true;
        let report = self.store.delete_many(&user, &ids).await;
        self.loading = false;

        if report.is_complete() {
            self.ledger_service.clear(&mut self.ledger);
            self.recompute();
            self.notifier.success("All transactions deleted");
            Ok(report.deleted.len())
        } else {
            tracing::warn!(
                "bulk delete for user {user} left {} of {} records in the store",
                report.failed.len(),
                ids.len(),
            );
            self.ledger_service
                .retain_failed(&mut self.ledger, &report.deleted);
            self.recompute();
            self.notifier.error("Some transactions could not be deleted");
            Err(CoreError::PartialDelete {
                deleted: report.deleted.len(),
                failed: report.failed.len(),
            })
        }
    }

    // ── Derived Values ──────────────────────────────────────────────

    /// Read-only view of the current transaction list, in list order.
    #[must_use]
    pub fn transactions(&self) -> &[StoredTransaction] {
        &self.ledger.records
    }

    /// The current derived summary.
    #[must_use]
    pub fn summary(&self) -> &BalanceSummary {
        &self.summary
    }

    #[must_use]
    pub fn income_total(&self) -> Decimal {
        self.summary.income_total
    }

    #[must_use]
    pub fn expense_total(&self) -> Decimal {
        self.summary.expense_total
    }

    #[must_use]
    pub fn net_balance(&self) -> Decimal {
        self.summary.net_balance
    }

    /// `true` while a hydrate or bulk delete round-trip is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.ledger.len()
    }

    /// Drives the "no transactions yet" view.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    // ── Views ───────────────────────────────────────────────────────

    /// The list in ascending date order (stable), for chart consumption.
    #[must_use]
    pub fn chronological(&self) -> Vec<&StoredTransaction> {
        self.chart_service.chronological(&self.ledger.records)
    }

    /// Chart points with the running net balance applied.
    #[must_use]
    pub fn chart_series(&self) -> Vec<ChartPoint> {
        self.chart_service.series(&self.ledger.records)
    }

    /// The list sorted for table display.
    #[must_use]
    pub fn transactions_sorted(&self, order: &TransactionSortOrder) -> Vec<&StoredTransaction> {
        let mut records: Vec<&StoredTransaction> = self.ledger.records.iter().collect();
        match order {
            TransactionSortOrder::DateDesc => {
                records.sort_by(|a, b| b.transaction.date.cmp(&a.transaction.date))
            }
            TransactionSortOrder::DateAsc => {
                records.sort_by(|a, b| a.transaction.date.cmp(&b.transaction.date))
            }
            TransactionSortOrder::AmountDesc => {
                records.sort_by(|a, b| b.transaction.amount.cmp(&a.transaction.amount))
            }
            TransactionSortOrder::AmountAsc => {
                records.sort_by(|a, b| a.transaction.amount.cmp(&b.transaction.amount))
            }
        }
        records
    }

    /// Search by matching the query against name, tag, and payment mode
    /// (case-insensitive).
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&StoredTransaction> {
        let q = query.to_lowercase();
        self.ledger
            .records
            .iter()
            .filter(|r| {
                r.transaction.name.to_lowercase().contains(&q)
                    || r.transaction.tag.to_lowercase().contains(&q)
                    || r.transaction.mode.to_lowercase().contains(&q)
            })
            .collect()
    }

    /// The list filtered to one transaction kind.
    #[must_use]
    pub fn transactions_by_kind(&self, kind: TransactionKind) -> Vec<&StoredTransaction> {
        self.ledger
            .records
            .iter()
            .filter(|r| r.transaction.kind == kind)
            .collect()
    }

    /// Date of the earliest transaction, if any.
    #[must_use]
    pub fn earliest_date(&self) -> Option<NaiveDate> {
        self.ledger
            .records
            .iter()
            .map(|r| r.transaction.date)
            .min()
    }

    /// Date of the latest transaction, if any.
    #[must_use]
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.ledger
            .records
            .iter()
            .map(|r| r.transaction.date)
            .max()
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Set the symbol prefixed to formatted amounts (e.g., "Rs.", "$").
    pub fn set_currency_symbol(&mut self, symbol: String) -> Result<(), CoreError> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return Err(CoreError::ValidationError(
                "Currency symbol must not be blank".into(),
            ));
        }
        self.settings.currency_symbol = trimmed.to_string();
        Ok(())
    }

    /// Format an amount for card display, e.g. `Rs. 1250.50`.
    #[must_use]
    pub fn format_amount(&self, amount: Decimal) -> String {
        format!("{} {amount}", self.settings.currency_symbol)
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export the current transaction list as a JSON array (ids are
    /// store-assigned, so they are stripped — the output round-trips
    /// through `import_from_json`).
    pub fn export_to_json(&self) -> Result<String, CoreError> {
        let transactions: Vec<&Transaction> =
            self.ledger.records.iter().map(|r| &r.transaction).collect();
        serde_json::to_string_pretty(&transactions)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize transactions: {e}")))
    }

    /// Export the current transaction list as a CSV string.
    /// Columns: id, type, date, amount, tag, name, mode
    #[must_use]
    pub fn export_to_csv(&self) -> String {
        fn escape(field: &str) -> String {
            if field.contains(',') || field.contains('"') || field.contains('\n') {
                format!("\"{}\"", field.replace('"', "\"\""))
            } else {
                field.to_string()
            }
        }

        let mut csv = String::from("id,type,date,amount,tag,name,mode\n");
        for record in &self.ledger.records {
            let t = &record.transaction;
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                record.id,
                t.kind,
                t.date,
                t.amount,
                escape(&t.tag),
                escape(&t.name),
                escape(&t.mode),
            ));
        }
        csv
    }

    /// Import transactions from a JSON array. All records are validated
    /// before any is written; returns the number imported.
    pub async fn import_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let transactions: Vec<Transaction> = serde_json::from_str(json)?;
        self.add_transactions(transactions).await
    }

    /// Import transactions from CSV text with a header row. Column order
    /// is free; `id` columns (from a prior export) are ignored since the
    /// store assigns fresh ids on write.
    pub async fn import_from_csv(&mut self, csv_text: &str) -> Result<usize, CoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv_text.as_bytes());

        let headers = reader.headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let (kind_col, date_col, amount_col) = (column("type"), column("date"), column("amount"));
        let (tag_col, name_col, mode_col) = (column("tag"), column("name"), column("mode"));

        let field = |record: &csv::StringRecord, col: Option<usize>| -> String {
            col.and_then(|i| record.get(i)).unwrap_or("").to_string()
        };

        let mut transactions = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let row = index + 2; // header is row 1
            let record = result?;

            let kind = match field(&record, kind_col).as_str() {
                "income" => TransactionKind::Income,
                "expense" => TransactionKind::Expense,
                other => {
                    return Err(CoreError::Deserialization(format!(
                        "row {row}: unknown transaction type '{other}'"
                    )))
                }
            };

            let date_text = field(&record, date_col);
            let date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d").map_err(|e| {
                CoreError::Deserialization(format!("row {row}: bad date '{date_text}': {e}"))
            })?;

            let amount_text = field(&record, amount_col);
            let amount: Decimal = amount_text.parse().map_err(|e| {
                CoreError::Deserialization(format!("row {row}: bad amount '{amount_text}': {e}"))
            })?;

            transactions.push(Transaction {
                kind,
                date,
                amount,
                tag: field(&record, tag_col),
                name: field(&record, name_col),
                mode: field(&record, mode_col),
            });
        }

        self.add_transactions(transactions).await
    }

    // ── Internal ────────────────────────────────────────────────────

    fn recompute(&mut self) {
        self.summary = self.aggregation_service.summarize(&self.ledger.records);
    }
}
