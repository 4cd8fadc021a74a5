//! Budget category model
//!
//! A category carries a per-period allocation. Categories do not depend on
//! the period; the same allocation applies to every bi-monthly window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;
use super::money::Money;

/// What kind of money a category holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    #[default]
    Expense,
    Savings,
    Insurance,
    Other,
}

impl CategoryType {
    pub fn all() -> &'static [CategoryType] {
        &[Self::Expense, Self::Savings, Self::Insurance, Self::Other]
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Savings => "Savings",
            Self::Insurance => "Insurance",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for CategoryType {
    type Err = CategoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "savings" | "saving" => Ok(Self::Savings),
            "insurance" => Ok(Self::Insurance),
            "other" => Ok(Self::Other),
            other => Err(CategoryValidationError::UnknownType(other.to_string())),
        }
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeAllocation,
    AllocationTooLarge,
    UnknownType(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
            Self::NegativeAllocation => write!(f, "Allocated amount cannot be negative"),
            Self::AllocationTooLarge => write!(f, "Allocated amount exceeds {}", Money::MAX_AMOUNT),
            Self::UnknownType(t) => write!(
                f,
                "Unknown category type '{}' (expected expense, savings, insurance or other)",
                t
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

const MAX_NAME_LEN: usize = 50;

/// A budget category with a per-period allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub category_type: CategoryType,
    /// Budget ceiling for each bi-monthly period
    pub allocated_amount: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BudgetCategory {
    pub fn new(name: impl Into<String>, category_type: CategoryType, allocated_amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            category_type,
            allocated_amount,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(name.chars().count()));
        }
        if self.allocated_amount.is_negative() {
            return Err(CategoryValidationError::NegativeAllocation);
        }
        if !self.allocated_amount.is_within_limit() {
            return Err(CategoryValidationError::AllocationTooLarge);
        }
        Ok(())
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = BudgetCategory::new("Groceries", CategoryType::Expense, Money::from_units(5000));
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.allocated_amount.cents(), 500_000);
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_zero_allocation_is_valid() {
        let category = BudgetCategory::new("Misc", CategoryType::Other, Money::zero());
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let negative = BudgetCategory::new("Rent", CategoryType::Expense, Money::from_cents(-1));
        assert_eq!(negative.validate(), Err(CategoryValidationError::NegativeAllocation));

        let empty = BudgetCategory::new(" ", CategoryType::Expense, Money::zero());
        assert_eq!(empty.validate(), Err(CategoryValidationError::EmptyName));

        let long = BudgetCategory::new("x".repeat(51), CategoryType::Expense, Money::zero());
        assert_eq!(long.validate(), Err(CategoryValidationError::NameTooLong(51)));

        let huge = BudgetCategory::new("Yacht", CategoryType::Savings, Money::from_cents(i64::MAX));
        assert_eq!(huge.validate(), Err(CategoryValidationError::AllocationTooLarge));
    }

    #[test]
    fn test_type_from_str() {
        assert_eq!("Savings".parse::<CategoryType>().unwrap(), CategoryType::Savings);
        assert_eq!("insurance".parse::<CategoryType>().unwrap(), CategoryType::Insurance);
        assert!("luxury".parse::<CategoryType>().is_err());
    }

    #[test]
    fn test_serialization_uses_type_key() {
        let category = BudgetCategory::new("Health", CategoryType::Insurance, Money::from_units(800));
        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value["type"], "insurance");
        assert_eq!(value["allocated_amount"], "800.00");

        let back: BudgetCategory = serde_json::from_value(value).unwrap();
        assert_eq!(back, category);
    }
}
