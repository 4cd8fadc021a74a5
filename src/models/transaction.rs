//! Transaction model
//!
//! A transaction spends a positive amount against exactly one budget
//! category at a point in time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, TransactionId};
use super::money::Money;
use super::receipt::ReceiptImage;

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount,
    AmountTooLarge,
    DescriptionTooLong(usize),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Transaction amount must be greater than zero"),
            Self::AmountTooLarge => write!(f, "Transaction amount exceeds {}", Money::MAX_AMOUNT),
            Self::DescriptionTooLong(len) => write!(
                f,
                "Description too long ({} chars, max {})",
                len, MAX_DESCRIPTION_LEN
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

const MAX_DESCRIPTION_LEN: usize = 500;

/// A spend recorded against a budget category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Always positive; the category's remaining figure goes down by this much
    pub amount: Money,

    /// The owning category. Deleting the category deletes this transaction.
    pub category_id: CategoryId,

    /// When the spend happened (local time)
    pub date: NaiveDateTime,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<ReceiptImage>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(category_id: CategoryId, date: NaiveDateTime, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            amount,
            category_id,
            date,
            description: None,
            receipt: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a transaction dated at midnight of `date`
    pub fn on_date(category_id: CategoryId, date: NaiveDate, amount: Money) -> Self {
        Self::new(category_id, date.and_time(NaiveTime::MIN), amount)
    }

    /// Set the description; blank text clears it
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
    }

    pub fn has_receipt(&self) -> bool {
        self.receipt.is_some()
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount);
        }
        if !self.amount.is_within_limit() {
            return Err(TransactionValidationError::AmountTooLarge);
        }
        if let Some(description) = &self.description {
            let len = description.chars().count();
            if len > MAX_DESCRIPTION_LEN {
                return Err(TransactionValidationError::DescriptionTooLong(len));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.amount,
            self.description.as_deref().unwrap_or("")
        )
    }
}
