//! Transaction service
//!
//! Provides business logic for transactions: validated create and update,
//! delete, and receipt attachment. A receipt that cannot be processed never
//! blocks the write; the transaction is saved without it.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::config::settings::DEFAULT_RECEIPT_MAX_BYTES;
use crate::error::{Error, Result};
use crate::models::{CategoryId, Money, ReceiptImage, Transaction, TransactionId};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
    receipt_max_bytes: usize,
}

/// Raw image bytes offered as a receipt
#[derive(Debug, Clone)]
pub struct ReceiptUpload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// What to do with an existing receipt on update
#[derive(Debug, Clone, Default)]
pub enum ReceiptChange {
    #[default]
    Keep,
    Replace(ReceiptUpload),
    Remove,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub category_id: CategoryId,
    pub date: NaiveDateTime,
    pub amount: Money,
    pub description: Option<String>,
    pub receipt: Option<ReceiptUpload>,
}

/// Input for updating a transaction; every field is rewritten except the
/// receipt, which follows `receipt`
#[derive(Debug, Clone)]
pub struct UpdateTransactionInput {
    pub category_id: CategoryId,
    pub date: NaiveDateTime,
    pub amount: Money,
    pub description: Option<String>,
    pub receipt: ReceiptChange,
}

impl UpdateTransactionInput {
    /// Start an update from the current state of a transaction
    pub fn from_existing(txn: &Transaction) -> Self {
        Self {
            category_id: txn.category_id,
            date: txn.date,
            amount: txn.amount,
            description: txn.description.clone(),
            receipt: ReceiptChange::Keep,
        }
    }
}

/// Parse a transaction date
///
/// Accepts `YYYY-MM-DD` (midnight), `YYYY-MM-DDTHH:MM[:SS]` with `T` or a
/// space as separator, and RFC 3339 timestamps, which are converted to
/// local time.
pub fn parse_date(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(datetime);
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        return Ok(datetime.with_timezone(&Local).naive_local());
    }

    Err(Error::Validation(format!(
        "Invalid date '{}'. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS",
        s
    )))
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            receipt_max_bytes: DEFAULT_RECEIPT_MAX_BYTES,
        }
    }

    /// Override the largest receipt payload that will be stored
    pub fn with_receipt_limit(mut self, max_bytes: usize) -> Self {
        self.receipt_max_bytes = max_bytes;
        self
    }

    fn require_category(&self, id: CategoryId) -> Result<()> {
        if self.storage.categories.exists(id)? {
            Ok(())
        } else {
            Err(Error::category_not_found(id.to_string()))
        }
    }

    /// Encode an uploaded receipt, or log and drop it if it cannot be stored
    fn process_receipt(&self, upload: &ReceiptUpload) -> Option<ReceiptImage> {
        match ReceiptImage::from_bytes(&upload.bytes, &upload.mime_type, self.receipt_max_bytes) {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!(error = %e, "receipt could not be processed; saving without it");
                None
            }
        }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> Result<Transaction> {
        let mut txn = Transaction::new(input.category_id, input.date, input.amount);
        txn.set_description(input.description);
        txn.validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        self.require_category(input.category_id)?;

        if let Some(upload) = &input.receipt {
            txn.receipt = self.process_receipt(upload);
        }

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        tracing::info!(transaction = %txn.id, amount = %txn.amount, "created transaction");
        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full or short ID
    pub fn find(&self, identifier: &str) -> Result<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.storage.transactions.get(id);
        }

        Ok(self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .find(|t| t.id.matches(identifier)))
    }

    /// Every transaction, oldest first
    pub fn list_all(&self) -> Result<Vec<Transaction>> {
        self.storage.transactions.get_all()
    }

    /// Update a transaction
    pub fn update(&self, id: TransactionId, input: UpdateTransactionInput) -> Result<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| Error::transaction_not_found(id.to_string()))?;

        txn.category_id = input.category_id;
        txn.date = input.date;
        txn.amount = input.amount;
        txn.set_description(input.description);
        txn.validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        self.require_category(input.category_id)?;

        match &input.receipt {
            ReceiptChange::Keep => {}
            ReceiptChange::Replace(upload) => txn.receipt = self.process_receipt(upload),
            ReceiptChange::Remove => txn.receipt = None,
        }

        txn.updated_at = Utc::now();
        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        tracing::info!(transaction = %txn.id, "updated transaction");
        Ok(txn)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> Result<Transaction> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| Error::transaction_not_found(id.to_string()))?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        tracing::info!(transaction = %txn.id, "deleted transaction");
        Ok(txn)
    }
}
