//! Category display formatting

use crate::models::BudgetCategory;

use super::column_width;

/// Format categories as a table
pub fn format_category_list(categories: &[BudgetCategory], symbol: &str) -> String {
    if categories.is_empty() {
        return "No categories yet.\n\nAdd one with 'payperiod category add'.\n".to_string();
    }

    let name_width = column_width("Category", categories.iter().map(|c| c.name.as_str()));

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:<10}  {:>14}  {}\n",
        "Category",
        "Type",
        "Allocated",
        "ID",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:-<10}  {:->14}  {:-<12}\n",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    for category in categories {
        output.push_str(&format!(
            "{:<width$}  {:<10}  {:>14}  {}\n",
            category.name,
            category.category_type.label(),
            category.allocated_amount.format_with_symbol(symbol),
            category.id,
            width = name_width
        ));
    }

    output
}

/// Format category details
pub fn format_category_details(category: &BudgetCategory, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:         {}\n", category.id));
    output.push_str(&format!("  Type:       {}\n", category.category_type.label()));
    output.push_str(&format!(
        "  Allocated:  {} per period\n",
        category.allocated_amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Created:    {}\n",
        category.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryType, Money};

    #[test]
    fn test_category_list() {
        let categories = vec![
            BudgetCategory::new("Groceries", CategoryType::Expense, Money::from_units(5000)),
            BudgetCategory::new("Emergency", CategoryType::Savings, Money::from_cents(125050)),
        ];
        let output = format_category_list(&categories, "₱");

        assert!(output.contains("Groceries"));
        assert!(output.contains("₱5,000.00"));
        assert!(output.contains("₱1,250.50"));
        assert!(output.contains("Savings"));
    }

    #[test]
    fn test_category_details() {
        let category = BudgetCategory::new("Rent", CategoryType::Expense, Money::from_units(9000));
        let output = format_category_details(&category, "$");

        assert!(output.contains("Category: Rent"));
        assert!(output.contains("$9,000.00 per period"));
    }
}
