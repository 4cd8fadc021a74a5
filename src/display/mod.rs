//! Display formatting for terminal output
//!
//! Formats models and aggregation results as plain text. Every formatter
//! takes the currency symbol so amounts render as `₱1,234.50`.

pub mod category;
pub mod income;
pub mod summary;
pub mod transaction;

pub use category::{format_category_details, format_category_list};
pub use income::format_income_list;
pub use summary::{format_period_summary, progress_bar};
pub use transaction::{format_period_transactions, format_transaction_details};

/// Truncate a string to a maximum number of characters, marking the cut
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

/// Column width that fits every value and the header
pub(crate) fn column_width<'a, I>(header: &str, values: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.chars().count())
}
