//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod income;
pub mod summary;
pub mod transaction;

pub use category::{handle_category_command, CategoryCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use summary::handle_summary_command;
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::Money;

/// Parse a money argument such as `1200`, `1200.50` or `1,200.50`
pub(crate) fn parse_amount(s: &str) -> Result<Money> {
    Money::parse(s).map_err(|e| Error::Validation(format!("Invalid amount: {}", e)))
}

/// Parse an optional `--date` argument used to pick a period
pub(crate) fn parse_reference_date(date: Option<&str>) -> Result<Option<NaiveDate>> {
    date.map(|d| {
        NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d")
            .map_err(|_| Error::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", d)))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,200.50").unwrap(), Money::from_cents(120050));
        assert!(parse_amount("12.345").unwrap_err().is_validation());
        assert!(parse_amount("abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_reference_date() {
        assert_eq!(parse_reference_date(None).unwrap(), None);
        assert_eq!(
            parse_reference_date(Some("2025-02-16")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 16)
        );
        assert!(parse_reference_date(Some("16/02/2025")).is_err());
    }
}
