//! Transaction display formatting

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::config::settings::DEFAULT_DATE_FORMAT;
use crate::models::Transaction;
use crate::services::PeriodTransaction;

use super::{column_width, truncate};

/// Render a date with a user-chosen strftime pattern, falling back to
/// `DEFAULT_DATE_FORMAT` when chrono cannot render it
fn format_date(date: &NaiveDateTime, date_format: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", date.format(date_format)) {
        Ok(()) => out,
        Err(_) => date.format(DEFAULT_DATE_FORMAT).to_string(),
    }
}

/// Format a period's transactions as a register with a total line
pub fn format_period_transactions(
    label: &str,
    transactions: &[PeriodTransaction],
    symbol: &str,
    date_format: &str,
) -> String {
    let mut output = format!("Transactions for {}\n\n", label);

    if transactions.is_empty() {
        output.push_str("No transactions in this period.\n");
        return output;
    }

    let category_width = column_width(
        "Category",
        transactions.iter().map(|t| t.category_name.as_str()),
    )
    .min(20);

    let dates: Vec<String> = transactions
        .iter()
        .map(|t| format_date(&t.date, date_format))
        .collect();
    let date_width = column_width("Date", dates.iter().map(String::as_str));

    output.push_str(&format!(
        "{:<dw$}  {:<cw$}  {:>14}  {:<12}  {}\n",
        "Date",
        "Category",
        "Amount",
        "ID",
        "Description",
        dw = date_width,
        cw = category_width
    ));
    output.push_str(&"-".repeat(date_width + category_width + 56));
    output.push('\n');

    for (txn, date) in transactions.iter().zip(&dates) {
        let receipt = if txn.has_receipt { " 📎" } else { "" };
        output.push_str(&format!(
            "{:<dw$}  {:<cw$}  {:>14}  {:<12}  {}{}\n",
            date,
            truncate(&txn.category_name, category_width),
            txn.amount.format_with_symbol(symbol),
            txn.id.to_string(),
            truncate(txn.description.as_deref().unwrap_or(""), 30),
            receipt,
            dw = date_width,
            cw = category_width
        ));
    }

    let total: crate::models::Money = transactions.iter().map(|t| t.amount).sum();
    output.push_str(&format!(
        "\n{} transaction(s), total {}\n",
        transactions.len(),
        total.format_with_symbol(symbol)
    ));

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, category_name: Option<&str>, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d %H:%M:%S")));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(symbol)));
    output.push_str(&format!(
        "Category:    {}\n",
        category_name.unwrap_or("(missing category)")
    ));

    if let Some(description) = &txn.description {
        output.push_str(&format!("Description: {}\n", description));
    }

    match &txn.receipt {
        Some(receipt) => output.push_str(&format!(
            "Receipt:     {} ({} bytes)\n",
            receipt.mime_type,
            receipt.size_hint()
        )),
        None => output.push_str("Receipt:     none\n"),
    }

    output.push_str(&format!("Created:     {}\n", txn.created_at.format("%Y-%m-%d %H:%M")));

    output
}
