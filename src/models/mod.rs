//! Core data models for payperiod
//!
//! Income sources, budget categories and transactions are persisted.
//! `Period` is a derived value object recomputed on every request.

pub mod category;
pub mod ids;
pub mod income;
pub mod money;
pub mod period;
pub mod receipt;
pub mod transaction;

pub use category::{BudgetCategory, CategoryType};
pub use ids::{CategoryId, IncomeId, TransactionId};
pub use income::{IncomeFrequency, IncomeSource};
pub use money::Money;
pub use period::{period_bounds, period_label, Period, PeriodHalf};
pub use receipt::ReceiptImage;
pub use transaction::Transaction;
