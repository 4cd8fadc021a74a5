//! Transaction CLI commands

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveTime};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_period_transactions, format_transaction_details};
use crate::error::{Error, Result};
use crate::models::period::Period;
use crate::models::receipt::sniff_mime_type;
use crate::models::{CategoryId, Transaction};
use crate::services::{
    parse_date, AggregationService, CategoryService, CreateTransactionInput, ReceiptChange,
    ReceiptUpload, TransactionService, UpdateTransactionInput,
};
use crate::storage::Storage;

use super::{parse_amount, parse_reference_date};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a spend against a category
    Add {
        /// Amount spent (e.g. "1200" or "1200.50")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Date (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Receipt image to attach
        #[arg(short, long)]
        receipt: Option<PathBuf>,
    },

    /// List transactions in the period containing a date
    List {
        /// Any date in the period (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
        /// Write the attached receipt image to this file
        #[arg(long)]
        save_receipt: Option<PathBuf>,
    },

    /// Edit a transaction; omitted fields keep their current value
    Edit {
        /// Transaction ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        /// New description; an empty string clears it
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Replace the receipt image
        #[arg(short, long, conflicts_with = "remove_receipt")]
        receipt: Option<PathBuf>,
        /// Remove the receipt image
        #[arg(long)]
        remove_receipt: bool,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

fn load_receipt(path: &Path, settings: &Settings) -> Result<ReceiptUpload> {
    let size = std::fs::metadata(path)?.len();
    if size > settings.receipt_source_max_bytes as u64 {
        return Err(Error::Receipt(format!(
            "{} is {} bytes, limit is {} bytes",
            path.display(),
            size,
            settings.receipt_source_max_bytes
        )));
    }

    let bytes = std::fs::read(path)?;
    let mime_type = sniff_mime_type(path, &bytes)
        .ok_or_else(|| Error::Receipt(format!("{} is not a recognised image", path.display())))?;

    Ok(ReceiptUpload {
        bytes,
        mime_type: mime_type.to_string(),
    })
}

/// Read a receipt image from disk
///
/// Any failure is reported and yields `None`; the transaction is still
/// written.
fn read_receipt(path: &Path, settings: &Settings) -> Option<ReceiptUpload> {
    match load_receipt(path, settings) {
        Ok(upload) => Some(upload),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read receipt");
            eprintln!("Warning: receipt not attached: {}", e);
            None
        }
    }
}

fn find_transaction(service: &TransactionService<'_>, id: &str) -> Result<Transaction> {
    service
        .find(id)?
        .ok_or_else(|| Error::transaction_not_found(id))
}

fn find_category_id(storage: &Storage, category: &str) -> Result<CategoryId> {
    CategoryService::new(storage)
        .find(category)?
        .map(|c| c.id)
        .ok_or_else(|| Error::category_not_found(category))
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> Result<()> {
    let service = TransactionService::new(storage).with_receipt_limit(settings.receipt_max_bytes);
    let symbol = &settings.currency_symbol;

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            date,
            description,
            receipt,
        } => {
            let amount = parse_amount(&amount)?;
            let category_id = find_category_id(storage, &category)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive().and_time(NaiveTime::MIN),
            };
            let receipt = receipt.and_then(|path| read_receipt(&path, settings));

            let txn = service.create(CreateTransactionInput {
                category_id,
                date,
                amount,
                description,
                receipt,
            })?;

            println!("Recorded {} in {}", txn.amount.format_with_symbol(symbol), category);
            println!("  Period: {}", Period::containing_timestamp(txn.date));
            if txn.has_receipt() {
                println!("  Receipt attached");
            }
            println!("  ID:     {}", txn.id);
        }

        TransactionCommands::List { date } => {
            let date = parse_reference_date(date.as_deref())?;
            let label = Period::containing(date.unwrap_or_else(|| Local::now().date_naive())).label();
            let transactions = AggregationService::new(storage).transactions_for_period(date)?;

            print!(
                "{}",
                format_period_transactions(&label, &transactions, symbol, &settings.date_format)
            );
        }

        TransactionCommands::Show { id, save_receipt } => {
            let txn = find_transaction(&service, &id)?;
            let category = storage.categories.get(txn.category_id)?;

            print!(
                "{}",
                format_transaction_details(&txn, category.as_ref().map(|c| c.name.as_str()), symbol)
            );

            if let Some(path) = save_receipt {
                let receipt = txn
                    .receipt
                    .as_ref()
                    .ok_or_else(|| Error::Receipt("transaction has no receipt".into()))?;
                let bytes = receipt
                    .decode()
                    .map_err(|e| Error::Receipt(e.to_string()))?;
                std::fs::write(&path, bytes)?;
                println!("Receipt written to {}", path.display());
            }
        }

        TransactionCommands::Edit {
            id,
            amount,
            category,
            date,
            description,
            receipt,
            remove_receipt,
        } => {
            let txn = find_transaction(&service, &id)?;
            let mut input = UpdateTransactionInput::from_existing(&txn);

            if let Some(amount) = amount {
                input.amount = parse_amount(&amount)?;
            }
            if let Some(category) = category {
                input.category_id = find_category_id(storage, &category)?;
            }
            if let Some(date) = date {
                input.date = parse_date(&date)?;
            }
            if description.is_some() {
                input.description = description;
            }
            if remove_receipt {
                input.receipt = ReceiptChange::Remove;
            } else if let Some(path) = receipt {
                // An unreadable replacement still clears the old image
                input.receipt = match read_receipt(&path, settings) {
                    Some(upload) => ReceiptChange::Replace(upload),
                    None => ReceiptChange::Remove,
                };
            }

            let updated = service.update(txn.id, input)?;
            println!("Updated transaction: {}", updated.id);
        }

        TransactionCommands::Delete { id } => {
            let txn = find_transaction(&service, &id)?;
            let deleted = service.delete(txn.id)?;
            println!(
                "Deleted transaction {} ({})",
                deleted.id,
                deleted.amount.format_with_symbol(symbol)
            );
        }
    }

    Ok(())
}
