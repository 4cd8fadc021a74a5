//! Category CLI commands
//!
//! Implements CLI commands for budget category management.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_category_details, format_category_list};
use crate::error::{Error, Result};
use crate::models::CategoryType;
use crate::services::{CategoryService, UpdateCategoryInput};
use crate::storage::Storage;

use super::parse_amount;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Allocated amount per period (e.g. "5000" or "5000.00")
        allocated: String,
        /// Category type: expense, savings, insurance, other
        #[arg(short = 't', long = "type", default_value = "expense")]
        category_type: String,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Edit a category; only the given fields change
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        category_type: Option<String>,
        /// New allocated amount per period
        #[arg(short, long)]
        allocated: Option<String>,
    },

    /// Delete a category and all of its transactions
    Delete {
        /// Category name or ID
        category: String,
    },
}

fn parse_category_type(s: &str) -> Result<CategoryType> {
    s.parse::<CategoryType>()
        .map_err(|e| Error::Validation(e.to_string()))
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, settings: &Settings, cmd: CategoryCommands) -> Result<()> {
    let service = CategoryService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&service.list()?, symbol));
        }

        CategoryCommands::Add {
            name,
            allocated,
            category_type,
        } => {
            let category_type = parse_category_type(&category_type)?;
            let allocated = parse_amount(&allocated)?;
            let category = service.create(&name, category_type, allocated)?;

            println!("Created category: {}", category.name);
            println!("  Type:      {}", category.category_type.label());
            println!(
                "  Allocated: {}",
                category.allocated_amount.format_with_symbol(symbol)
            );
            println!("  ID:        {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let found = service
                .find(&category)?
                .ok_or_else(|| Error::category_not_found(&category))?;
            print!("{}", format_category_details(&found, symbol));
        }

        CategoryCommands::Edit {
            category,
            name,
            category_type,
            allocated,
        } => {
            let found = service
                .find(&category)?
                .ok_or_else(|| Error::category_not_found(&category))?;

            let input = UpdateCategoryInput {
                name,
                category_type: category_type.as_deref().map(parse_category_type).transpose()?,
                allocated_amount: allocated.as_deref().map(parse_amount).transpose()?,
            };

            if input.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(found.id, input)?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category } => {
            let found = service
                .find(&category)?
                .ok_or_else(|| Error::category_not_found(&category))?;
            let (deleted, removed) = service.delete(found.id)?;

            println!("Deleted category: {}", deleted.name);
            if removed > 0 {
                println!("  Also deleted {} transaction(s)", removed);
            }
        }
    }

    Ok(())
}
