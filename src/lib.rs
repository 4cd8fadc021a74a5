//! payperiod - bi-monthly pay-period budgeting
//!
//! Tracks income sources, budget categories with a per-period allocation, and
//! transactions that spend against those categories. Every figure is computed
//! for a bi-monthly period: the 1st to the 15th, or the 16th to the last day
//! of the month.
//!
//! # Architecture
//!
//! - `config`: path resolution and user settings
//! - `error`: library error type
//! - `models`: entities, money, ids and the `Period` calculator
//! - `storage`: JSON file repositories with category cascade delete
//! - `services`: frequency normalizer, period aggregation and the validated
//!   entity services
//! - `display`: plain-text formatting for terminal output
//! - `cli`: clap command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use payperiod::config::PayperiodPaths;
//! use payperiod::services::AggregationService;
//! use payperiod::storage::Storage;
//!
//! let storage = Storage::open(PayperiodPaths::new()?)?;
//! let summary = AggregationService::new(&storage).period_summary(None)?;
//! println!("{}", summary.label);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{Error, Result};
