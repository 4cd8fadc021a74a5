//! Income source model
//!
//! An income source is a named amount with a recurrence frequency. Sources
//! are created and deleted, never edited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::IncomeId;
use super::money::Money;

/// How often an income source pays out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum IncomeFrequency {
    /// One-time or irregular income
    None,
    Weekly,
    Biweekly,
    #[default]
    Monthly,
    Yearly,
}

impl IncomeFrequency {
    /// All frequencies, in display order
    pub fn all() -> &'static [IncomeFrequency] {
        &[
            Self::None,
            Self::Weekly,
            Self::Biweekly,
            Self::Monthly,
            Self::Yearly,
        ]
    }

    /// Monthly multiplier as an exact `(numerator, denominator)` pair
    ///
    /// | frequency | multiplier |
    /// |-----------|------------|
    /// | none      | 0          |
    /// | weekly    | 4.33       |
    /// | biweekly  | 2.17       |
    /// | monthly   | 1          |
    /// | yearly    | 1/12       |
    pub const fn monthly_ratio(&self) -> (i64, i64) {
        match self {
            Self::None => (0, 1),
            Self::Weekly => (433, 100),
            Self::Biweekly => (217, 100),
            Self::Monthly => (1, 1),
            Self::Yearly => (1, 12),
        }
    }

    /// Whether this frequency describes recurring income
    pub const fn is_recurring(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Stable lowercase name, as stored on disk
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Display label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "No frequency",
            Self::Weekly => "Weekly",
            Self::Biweekly => "Bi-weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }

    /// Parse a frequency name, falling back to monthly for anything unknown
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "none" | "once" | "one-time" => Self::None,
            "weekly" => Self::Weekly,
            "biweekly" | "bi-weekly" | "fortnightly" => Self::Biweekly,
            "monthly" => Self::Monthly,
            "yearly" | "annually" | "annual" => Self::Yearly,
            other => {
                tracing::warn!(frequency = other, "unknown income frequency, treating as monthly");
                Self::Monthly
            }
        }
    }
}

impl From<String> for IncomeFrequency {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl fmt::Display for IncomeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Validation errors for income sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeAmount,
    AmountTooLarge,
}

impl fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Income source name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Income source name too long ({} chars, max {})",
                len, MAX_NAME_LEN
            ),
            Self::NegativeAmount => write!(f, "Income amount cannot be negative"),
            Self::AmountTooLarge => write!(f, "Income amount exceeds {}", Money::MAX_AMOUNT),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

const MAX_NAME_LEN: usize = 100;

fn default_active() -> bool {
    true
}

/// A source of income such as a salary or a side job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    pub id: IncomeId,
    pub name: String,
    pub amount: Money,
    #[serde(default)]
    pub frequency: IncomeFrequency,
    /// Reads only consider active sources; nothing clears this today
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl IncomeSource {
    /// Create a new, active income source
    pub fn new(name: impl Into<String>, amount: Money, frequency: IncomeFrequency) -> Self {
        Self {
            id: IncomeId::new(),
            name: name.into(),
            amount,
            frequency,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(IncomeValidationError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(IncomeValidationError::NameTooLong(name.chars().count()));
        }
        if self.amount.is_negative() {
            return Err(IncomeValidationError::NegativeAmount);
        }
        if !self.amount.is_within_limit() {
            return Err(IncomeValidationError::AmountTooLarge);
        }
        Ok(())
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_income_source_is_active() {
        let source = IncomeSource::new("Salary", Money::from_units(30000), IncomeFrequency::Monthly);
        assert!(source.is_active);
        assert_eq!(source.amount.cents(), 3_000_000);
        assert!(source.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let negative = IncomeSource::new("Refund", Money::from_cents(-1), IncomeFrequency::None);
        assert_eq!(negative.validate(), Err(IncomeValidationError::NegativeAmount));

        let unnamed = IncomeSource::new("   ", Money::from_units(1), IncomeFrequency::Weekly);
        assert_eq!(unnamed.validate(), Err(IncomeValidationError::EmptyName));

        let zero = IncomeSource::new("Gift", Money::zero(), IncomeFrequency::None);
        assert!(zero.validate().is_ok());

        let huge = IncomeSource::new("Lottery", Money::from_cents(i64::MAX), IncomeFrequency::Weekly);
        assert_eq!(huge.validate(), Err(IncomeValidationError::AmountTooLarge));
    }

    #[test]
    fn test_frequency_parse_lenient() {
        assert_eq!(IncomeFrequency::parse_lenient("weekly"), IncomeFrequency::Weekly);
        assert_eq!(IncomeFrequency::parse_lenient("BiWeekly"), IncomeFrequency::Biweekly);
        assert_eq!(IncomeFrequency::parse_lenient("none"), IncomeFrequency::None);
        assert_eq!(IncomeFrequency::parse_lenient("quarterly"), IncomeFrequency::Monthly);
    }

    #[test]
    fn test_frequency_serde() {
        let json = serde_json::to_string(&IncomeFrequency::Biweekly).unwrap();
        assert_eq!(json, "\"biweekly\"");

        let unknown: IncomeFrequency = serde_json::from_str("\"semimonthly\"").unwrap();
        assert_eq!(unknown, IncomeFrequency::Monthly);
    }

    #[test]
    fn test_missing_active_flag_defaults_to_true() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Salary",
            "amount": "100.00",
            "frequency": "monthly",
            "created_at": "2025-01-01T00:00:00Z"
        }"#;
        let source: IncomeSource = serde_json::from_str(json).unwrap();
        assert!(source.is_active);
        assert_eq!(source.amount, Money::from_units(100));
    }

    #[test]
    fn test_serialization() {
        let source = IncomeSource::new("Freelance", Money::from_cents(125050), IncomeFrequency::Yearly);
        let json = serde_json::to_string(&source).unwrap();
        let deserialized: IncomeSource = serde_json::from_str(&json).unwrap();
        assert_eq!(source, deserialized);
    }
}
