//! Service layer for payperiod
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, period math, and cross-entity operations.

pub mod aggregation;
pub mod category;
pub mod frequency;
pub mod income;
pub mod transaction;

pub use aggregation::{AggregationService, CategorySpending, PeriodSummary, PeriodTransaction};
pub use category::{CategoryService, UpdateCategoryInput};
pub use frequency::{to_monthly, to_monthly_total, to_period_income};
pub use income::IncomeService;
pub use transaction::{
    parse_date, CreateTransactionInput, ReceiptChange, ReceiptUpload, TransactionService,
    UpdateTransactionInput,
};
