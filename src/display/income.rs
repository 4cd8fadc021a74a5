//! Income source display formatting

use crate::models::{IncomeSource, Money};
use crate::services::frequency::{source_period_income, to_monthly};

use super::column_width;

/// Format income sources with their monthly and per-period equivalents
pub fn format_income_list(sources: &[IncomeSource], symbol: &str) -> String {
    if sources.is_empty() {
        return "No income sources yet.\n\nAdd one with 'payperiod income add'.\n".to_string();
    }

    let name_width = column_width("Source", sources.iter().map(|s| s.name.as_str()));

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:<12}  {:>14}  {:>14}  {:>14}  {}\n",
        "Source",
        "Frequency",
        "Amount",
        "Monthly",
        "Per period",
        "ID",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:-<12}  {:->14}  {:->14}  {:->14}  {:-<12}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    let mut monthly_total = Money::zero();
    let mut period_total = Money::zero();

    for source in sources {
        let monthly = to_monthly(source.amount, source.frequency);
        let period = source_period_income(source);
        monthly_total += monthly;
        period_total += period;

        output.push_str(&format!(
            "{:<width$}  {:<12}  {:>14}  {:>14}  {:>14}  {}\n",
            source.name,
            source.frequency.label(),
            source.amount.format_with_symbol(symbol),
            monthly.format_with_symbol(symbol),
            period.format_with_symbol(symbol),
            source.id,
            width = name_width
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "Monthly income:    {}\n",
        monthly_total.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Per-period income: {}\n",
        period_total.format_with_symbol(symbol)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IncomeFrequency;

    #[test]
    fn test_empty_list() {
        assert!(format_income_list(&[], "₱").contains("No income sources"));
    }

    #[test]
    fn test_list_shows_totals() {
        let sources = vec![
            IncomeSource::new("Salary", Money::from_units(30000), IncomeFrequency::Monthly),
            IncomeSource::new("Bonus", Money::from_units(5000), IncomeFrequency::None),
        ];
        let output = format_income_list(&sources, "₱");

        assert!(output.contains("Salary"));
        assert!(output.contains("No frequency"));
        assert!(output.contains("Monthly income:    ₱30,000.00"));
        assert!(output.contains("Per-period income: ₱20,000.00"));
    }
}
