//! Income frequency normalization
//!
//! Converts an income amount at some recurrence into its monthly and
//! per-period equivalents. Multipliers are exact rationals and every
//! normalization rounds to minor units exactly once.

use crate::models::{IncomeFrequency, IncomeSource, Money};

/// Pay periods per month
const PERIODS_PER_MONTH: i64 = 2;

/// Monthly equivalent of `amount` received at `frequency`
///
/// One-time income (`none`) has no monthly equivalent and yields zero.
pub fn to_monthly(amount: Money, frequency: IncomeFrequency) -> Money {
    let (num, den) = frequency.monthly_ratio();
    amount.mul_ratio(num, den)
}

/// Share of a single source attributable to one period
///
/// One-time income counts in full. Recurring income is its monthly
/// equivalent split across both halves of the month, computed directly from
/// the amount so the halving does not round a second time.
pub fn source_period_income(source: &IncomeSource) -> Money {
    if !source.frequency.is_recurring() {
        return source.amount;
    }
    let (num, den) = source.frequency.monthly_ratio();
    source.amount.mul_ratio(num, den * PERIODS_PER_MONTH)
}

/// Income attributable to one period across all active sources
pub fn to_period_income<'a, I>(sources: I) -> Money
where
    I: IntoIterator<Item = &'a IncomeSource>,
{
    sources
        .into_iter()
        .filter(|s| s.is_active)
        .map(source_period_income)
        .sum()
}

/// Monthly income across all active sources
pub fn to_monthly_total<'a, I>(sources: I) -> Money
where
    I: IntoIterator<Item = &'a IncomeSource>,
{
    sources
        .into_iter()
        .filter(|s| s.is_active)
        .map(|s| to_monthly(s.amount, s.frequency))
        .sum()
}
