//! Period aggregation
//!
//! Joins transactions against budget categories for one bi-monthly period
//! and combines the result with period income. Every call recomputes from
//! repository content; nothing here writes.

use std::collections::HashMap;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::Result;
use crate::models::{CategoryId, CategoryType, Money, Period, TransactionId};
use crate::storage::Storage;

use super::frequency;

/// Spend and remaining figures for one category in one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpending {
    pub category_id: CategoryId,
    pub category_name: String,
    pub category_type: CategoryType,
    pub allocated_amount: Money,
    /// Sum of the category's transactions dated inside the period
    pub spent: Money,
    /// `allocated_amount - spent`; negative when over budget
    pub remaining: Money,
}

impl CategorySpending {
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }

    /// Spent as a share of allocated, or `None` for unallocated categories
    pub fn usage(&self) -> Option<f64> {
        self.spent.fraction_of(self.allocated_amount)
    }
}

/// A transaction in a period, joined with its category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTransaction {
    pub id: TransactionId,
    pub date: NaiveDateTime,
    pub amount: Money,
    pub description: Option<String>,
    pub has_receipt: bool,
    pub category_id: CategoryId,
    pub category_name: String,
    pub category_type: CategoryType,
}

/// Dashboard figures for one period
#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummary {
    pub period: Period,
    pub label: String,
    pub income: Money,
    pub total_allocated: Money,
    pub total_spent: Money,
    pub total_remaining: Money,
    /// Period income minus total allocated; negative when the budget
    /// exceeds income
    pub unallocated: Money,
    pub categories: Vec<CategorySpending>,
    /// Categories whose spend exceeds their allocation
    pub over_budget: Vec<CategorySpending>,
}

impl PeriodSummary {
    pub fn is_over_income(&self) -> bool {
        self.unallocated.is_negative()
    }
}

/// Service computing per-period figures
pub struct AggregationService<'a> {
    storage: &'a Storage,
}

impl<'a> AggregationService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn period_for(period_date: Option<NaiveDate>) -> Period {
        Period::containing(period_date.unwrap_or_else(|| Local::now().date_naive()))
    }

    /// Spend and remaining per category for the period containing
    /// `period_date` (default: today)
    ///
    /// Every category appears exactly once, ordered by name, including those
    /// without transactions.
    pub fn spending_by_category(&self, period_date: Option<NaiveDate>) -> Result<Vec<CategorySpending>> {
        self.spending_for(&Self::period_for(period_date))
    }

    fn spending_for(&self, period: &Period) -> Result<Vec<CategorySpending>> {
        let categories = self.storage.categories.get_all()?;
        let transactions = self
            .storage
            .transactions
            .get_by_date_range(period.start(), period.end())?;

        let mut spent_by_category: HashMap<CategoryId, Money> = HashMap::new();
        for txn in &transactions {
            *spent_by_category.entry(txn.category_id).or_default() += txn.amount;
        }

        let rows: Vec<_> = categories
            .into_iter()
            .map(|category| {
                let spent = spent_by_category.remove(&category.id).unwrap_or_default();
                CategorySpending {
                    category_id: category.id,
                    remaining: category.allocated_amount - spent,
                    category_name: category.name,
                    category_type: category.category_type,
                    allocated_amount: category.allocated_amount,
                    spent,
                }
            })
            .collect();

        for (category_id, amount) in &spent_by_category {
            tracing::warn!(
                category = %category_id,
                amount = %amount,
                "spending references a missing category"
            );
        }

        tracing::debug!(
            period = %period,
            categories = rows.len(),
            transactions = transactions.len(),
            "aggregated spending"
        );
        Ok(rows)
    }

    /// Transactions dated inside the period containing `period_date`
    /// (default: today), oldest first, joined with their category
    ///
    /// Like `spending_by_category`, a transaction whose category is gone is
    /// left out with a warning.
    pub fn transactions_for_period(&self, period_date: Option<NaiveDate>) -> Result<Vec<PeriodTransaction>> {
        let period = Self::period_for(period_date);
        let categories: HashMap<_, _> = self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let transactions = self
            .storage
            .transactions
            .get_by_date_range(period.start(), period.end())?;

        Ok(transactions
            .into_iter()
            .filter_map(|txn| {
                let Some(category) = categories.get(&txn.category_id) else {
                    tracing::warn!(transaction = %txn.id, "transaction references a missing category");
                    return None;
                };
                Some(PeriodTransaction {
                    id: txn.id,
                    date: txn.date,
                    amount: txn.amount,
                    has_receipt: txn.has_receipt(),
                    description: txn.description,
                    category_id: category.id,
                    category_name: category.name.clone(),
                    category_type: category.category_type,
                })
            })
            .collect())
    }

    /// Income attributable to one period across active sources
    pub fn total_period_income(&self) -> Result<Money> {
        let sources = self.storage.income.get_active()?;
        Ok(frequency::to_period_income(&sources))
    }

    /// Full dashboard figures for the period containing `period_date`
    /// (default: today)
    pub fn period_summary(&self, period_date: Option<NaiveDate>) -> Result<PeriodSummary> {
        let period = Self::period_for(period_date);
        let categories = self.spending_for(&period)?;
        let income = self.total_period_income()?;

        let total_allocated: Money = categories.iter().map(|c| c.allocated_amount).sum();
        let total_spent: Money = categories.iter().map(|c| c.spent).sum();
        let over_budget = categories
            .iter()
            .filter(|c| c.is_over_budget())
            .cloned()
            .collect();

        Ok(PeriodSummary {
            label: period.label(),
            period,
            income,
            total_allocated,
            total_spent,
            total_remaining: total_allocated - total_spent,
            unallocated: income - total_allocated,
            categories,
            over_budget,
        })
    }
}
