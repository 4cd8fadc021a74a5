//! Period dashboard formatting
//!
//! Proportion visuals only make sense for categories with a positive
//! allocation, so those rows get a bar and the rest are listed plainly.

use crate::services::{CategorySpending, PeriodSummary};

use super::{column_width, truncate};

const BAR_WIDTH: usize = 20;

/// Render a usage fraction as a fixed-width bar, e.g. `[#####-----]`
///
/// Fractions above 1.0 fill the bar and are marked with `!`.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let clamped = fraction.clamp(0.0, 1.0);
    let filled = (clamped * width as f64).round() as usize;
    let overflow = if fraction > 1.0 { "!" } else { "" };
    format!(
        "[{}{}]{}",
        "#".repeat(filled),
        "-".repeat(width - filled),
        overflow
    )
}

fn category_row(row: &CategorySpending, name_width: usize, symbol: &str) -> String {
    let usage = match row.usage() {
        Some(fraction) => format!(
            "{} {:>4.0}%",
            progress_bar(fraction, BAR_WIDTH),
            fraction * 100.0
        ),
        None => String::new(),
    };

    format!(
        "  {:<width$}  {:>14}  {:>14}  {:>14}  {}\n",
        truncate(&row.category_name, name_width),
        row.allocated_amount.format_with_symbol(symbol),
        row.spent.format_with_symbol(symbol),
        row.remaining.format_with_symbol(symbol),
        usage.trim_end(),
        width = name_width
    )
}

/// Format the dashboard for one period
pub fn format_period_summary(summary: &PeriodSummary, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Budget period: {} ({} to {})\n\n",
        summary.label,
        summary.period.start_date().format("%Y-%m-%d"),
        summary.period.end_date().format("%Y-%m-%d")
    ));
    output.push_str(&format!(
        "  Income this period:  {}\n",
        summary.income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Budgeted:            {}\n",
        summary.total_allocated.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Spent:               {}\n",
        summary.total_spent.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Remaining budget:    {}\n",
        summary.total_remaining.format_with_symbol(symbol)
    ));

    if summary.is_over_income() {
        output.push_str(&format!(
            "  Over income by:      {}\n",
            summary.unallocated.abs().format_with_symbol(symbol)
        ));
    } else {
        output.push_str(&format!(
            "  Unallocated:         {}\n",
            summary.unallocated.format_with_symbol(symbol)
        ));
    }

    if !summary.over_budget.is_empty() {
        output.push_str("\nOver budget:\n");
        for row in &summary.over_budget {
            output.push_str(&format!(
                "  ! {} is over by {}\n",
                row.category_name,
                row.remaining.abs().format_with_symbol(symbol)
            ));
        }
    }

    output.push('\n');
    if summary.categories.is_empty() {
        output.push_str("No categories yet. Add one with 'payperiod category add'.\n");
        return output;
    }

    let name_width = column_width(
        "Category",
        summary.categories.iter().map(|c| c.category_name.as_str()),
    )
    .min(24);

    output.push_str(&format!(
        "  {:<width$}  {:>14}  {:>14}  {:>14}\n",
        "Category",
        "Allocated",
        "Spent",
        "Remaining",
        width = name_width
    ));
    output.push_str(&format!(
        "  {:-<width$}  {:->14}  {:->14}  {:->14}\n",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    for row in &summary.categories {
        output.push_str(&category_row(row, name_width, symbol));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryType, Money, Period};
    use chrono::NaiveDate;

    fn row(name: &str, allocated: i64, spent: i64) -> CategorySpending {
        CategorySpending {
            category_id: CategoryId::new(),
            category_name: name.to_string(),
            category_type: CategoryType::Expense,
            allocated_amount: Money::from_units(allocated),
            spent: Money::from_units(spent),
            remaining: Money::from_units(allocated - spent),
        }
    }

    fn summary(categories: Vec<CategorySpending>, income: i64) -> PeriodSummary {
        let period = Period::containing(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
        let total_allocated: Money = categories.iter().map(|c| c.allocated_amount).sum();
        let total_spent: Money = categories.iter().map(|c| c.spent).sum();
        let income = Money::from_units(income);
        PeriodSummary {
            label: period.label(),
            period,
            income,
            total_allocated,
            total_spent,
            total_remaining: total_allocated - total_spent,
            unallocated: income - total_allocated,
            over_budget: categories.iter().filter(|c| c.is_over_budget()).cloned().collect(),
            categories,
        }
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(0.5, 4), "[##--]");
        assert_eq!(progress_bar(1.5, 4), "[####]!");
    }

    #[test]
    fn test_summary_header_and_rows() {
        let output = format_period_summary(&summary(vec![row("Groceries", 5000, 2000)], 15000), "₱");

        assert!(output.contains("Budget period: 16th–31st Jan 2025 (2025-01-16 to 2025-01-31)"));
        assert!(output.contains("₱15,000.00"));
        assert!(output.contains("Unallocated:         ₱10,000.00"));
        assert!(output.contains("[########------------]"));
        assert!(!output.contains("Over budget"));
    }

    #[test]
    fn test_over_budget_and_over_income() {
        let output = format_period_summary(
            &summary(vec![row("Dining", 100, 150), row("Impulse", 0, 20)], 50),
            "₱",
        );

        assert!(output.contains("Over income by:      ₱50.00"));
        assert!(output.contains("! Dining is over by ₱50.00"));
        assert!(output.contains("! Impulse is over by ₱20.00"));
        // Zero-allocation rows get no bar
        let impulse = output.lines().find(|l| l.contains("Impulse") && !l.contains('!')).unwrap();
        assert!(!impulse.contains('['));
    }

    #[test]
    fn test_no_categories() {
        let output = format_period_summary(&summary(vec![], 0), "₱");
        assert!(output.contains("No categories yet"));
    }
}
