use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::record::{RecordId, StoredTransaction};
use crate::models::transaction::{Transaction, TransactionKind};
use crate::models::user::UserId;
use super::traits::TransactionStore;

const BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Fetch page size. The whole collection is refetched on demand —
/// personal-finance scale, no pagination cursor.
const PAGE_SIZE: u32 = 300;

/// Firestore REST adapter for the per-user transaction collection.
///
/// - **Scope**: documents live under `users/{uid}/transactions`.
/// - **Auth**: optional web API key (`key` query parameter) plus optional
///   Firebase ID token (bearer header) for rule-protected projects.
/// - **Ids**: client-generated UUID v4, sent as `documentId` so the
///   returned handle is known before the response is parsed.
///
/// Amounts are written as decimal strings. Documents written by older
/// clients stored them as doubles, so reads accept both forms.
pub struct FirestoreStore {
    client: Client,
    project_id: String,
    api_key: Option<String>,
    id_token: Option<String>,
}

impl FirestoreStore {
    pub fn new(project_id: impl Into<String>) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            project_id: project_id.into(),
            api_key: None,
            id_token: None,
        }
    }

    /// Attach the Firebase web API key (sent as the `key` query parameter).
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Attach the signed-in user's ID token (sent as a bearer header).
    #[must_use]
    pub fn with_id_token(mut self, token: impl Into<String>) -> Self {
        self.id_token = Some(token.into());
        self
    }

    fn collection_url(&self, user: &UserId) -> String {
        format!(
            "{BASE_URL}/projects/{}/databases/(default)/documents/users/{}/transactions",
            self.project_id,
            user.as_str(),
        )
    }

    fn document_url(&self, user: &UserId, id: &RecordId) -> String {
        format!("{}/{}", self.collection_url(user), id.as_str())
    }

    /// Apply the configured credentials to an outgoing request.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = match &self.api_key {
            Some(key) => request.query(&[("key", key.as_str())]),
            None => request,
        };
        match &self.id_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Credential rejections are `StoreUnavailable`; other non-success
    /// statuses are left for the caller to classify per operation.
    fn check_credentials(&self, status: StatusCode) -> Result<(), CoreError> {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CoreError::StoreUnavailable(format!(
                "{} rejected credentials ({status})",
                self.name()
            )));
        }
        Ok(())
    }
}

// ── Firestore REST wire types ───────────────────────────────────────

#[derive(Deserialize)]
struct ListResponse {
    /// Absent entirely when the collection is empty.
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Deserialize)]
struct Document {
    /// Full resource name; the record id is the last path segment.
    name: String,

    #[serde(default)]
    fields: HashMap<String, FieldValue>,
}

#[derive(Serialize)]
struct NewDocument {
    fields: HashMap<&'static str, FieldValue>,
}

/// One Firestore typed value. Firestore tags every field with its type,
/// e.g. `{"stringValue": "food"}` — exactly one variant is populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FieldValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    string_value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    double_value: Option<f64>,

    /// Firestore encodes 64-bit integers as JSON strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    integer_value: Option<String>,
}

impl FieldValue {
    fn string(value: impl Into<String>) -> Self {
        Self {
            string_value: Some(value.into()),
            ..Self::default()
        }
    }

    fn as_str(&self) -> Option<&str> {
        self.string_value.as_deref()
    }

    fn as_decimal(&self) -> Option<Decimal> {
        if let Some(s) = &self.string_value {
            return s.trim().parse().ok();
        }
        if let Some(d) = self.double_value {
            return Decimal::from_f64(d);
        }
        if let Some(i) = &self.integer_value {
            return i.parse().ok();
        }
        None
    }
}

impl Document {
    fn record_id(&self) -> RecordId {
        RecordId::new(self.name.rsplit('/').next().unwrap_or(&self.name))
    }

    fn text_field(&self, key: &str) -> Result<&str, CoreError> {
        self.fields
            .get(key)
            .and_then(FieldValue::as_str)
            .ok_or_else(|| {
                CoreError::Deserialization(format!(
                    "document {} is missing text field '{key}'",
                    self.record_id()
                ))
            })
    }

    fn decimal_field(&self, key: &str) -> Result<Decimal, CoreError> {
        self.fields
            .get(key)
            .and_then(FieldValue::as_decimal)
            .ok_or_else(|| {
                CoreError::Deserialization(format!(
                    "document {} has no usable numeric field '{key}'",
                    self.record_id()
                ))
            })
    }

    fn decode(&self) -> Result<StoredTransaction, CoreError> {
        let id = self.record_id();

        let kind = match self.text_field("type")? {
            "income" => TransactionKind::Income,
            "expense" => TransactionKind::Expense,
            other => {
                return Err(CoreError::Deserialization(format!(
                    "document {id} has unknown transaction type '{other}'"
                )))
            }
        };

        let date_str = self.text_field("date")?;
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            CoreError::Deserialization(format!("document {id} has bad date '{date_str}': {e}"))
        })?;

        let transaction = Transaction {
            kind,
            date,
            amount: self.decimal_field("amount")?,
            tag: self.text_field("tag").unwrap_or_default().to_string(),
            name: self.text_field("name")?.to_string(),
            mode: self.text_field("mode").unwrap_or_default().to_string(),
        };

        Ok(StoredTransaction::new(id, transaction))
    }
}

fn encode_fields(transaction: &Transaction) -> HashMap<&'static str, FieldValue> {
    let mut fields = HashMap::new();
    fields.insert("type", FieldValue::string(transaction.kind.to_string()));
    fields.insert(
        "date",
        FieldValue::string(transaction.date.format("%Y-%m-%d").to_string()),
    );
    // Decimal string, not a double — exact amounts survive the store
    fields.insert("amount", FieldValue::string(transaction.amount.to_string()));
    fields.insert("tag", FieldValue::string(transaction.tag.as_str()));
    fields.insert("name", FieldValue::string(transaction.name.as_str()));
    fields.insert("mode", FieldValue::string(transaction.mode.as_str()));
    fields
}

#[async_trait]
impl TransactionStore for FirestoreStore {
    fn name(&self) -> &str {
        "Firestore"
    }

    async fn append(
        &self,
        user: &UserId,
        transaction: &Transaction,
    ) -> Result<RecordId, CoreError> {
        let document_id = Uuid::new_v4().to_string();
        let url = self.collection_url(user);
        tracing::debug!("appending document {document_id} for user {user}");

        let response = self
            .authorize(
                self.client
                    .post(&url)
                    .query(&[("documentId", document_id.as_str())]),
            )
            .json(&NewDocument {
                fields: encode_fields(transaction),
            })
            .send()
            .await?;

        let status = response.status();
        self.check_credentials(status)?;
        if !status.is_success() {
            return Err(CoreError::WriteFailed(format!(
                "{} returned {status} for new transaction",
                self.name()
            )));
        }

        let document: Document = response.json().await.map_err(|e| {
            CoreError::Deserialization(format!("bad create response from {}: {e}", self.name()))
        })?;
        Ok(document.record_id())
    }

    async fn fetch_all(&self, user: &UserId) -> Result<Vec<StoredTransaction>, CoreError> {
        let url = self.collection_url(user);
        tracing::debug!("fetching transaction collection for user {user}");

        let response = self
            .authorize(
                self.client
                    .get(&url)
                    .query(&[("pageSize", PAGE_SIZE.to_string())]),
            )
            .send()
            .await?;

        let status = response.status();
        self.check_credentials(status)?;
        if !status.is_success() {
            return Err(CoreError::ReadFailed(format!(
                "{} returned {status} for transaction list",
                self.name()
            )));
        }

        let list: ListResponse = response.json().await.map_err(|e| {
            CoreError::Deserialization(format!("bad list response from {}: {e}", self.name()))
        })?;

        list.documents.iter().map(Document::decode).collect()
    }

    async fn delete(&self, user: &UserId, id: &RecordId) -> Result<(), CoreError> {
        let url = self.document_url(user, id);

        let response = self.authorize(self.client.delete(&url)).send().await?;

        let status = response.status();
        self.check_credentials(status)?;
        if !status.is_success() {
            return Err(CoreError::WriteFailed(format!(
                "{} returned {status} deleting record {id}",
                self.name()
            )));
        }

        Ok(())
    }
}
