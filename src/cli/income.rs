//! Income CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_income_list;
use crate::error::{Error, Result};
use crate::models::IncomeFrequency;
use crate::services::IncomeService;
use crate::storage::Storage;

use super::parse_amount;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Add an income source
    Add {
        /// Source name (e.g. "Salary")
        name: String,
        /// Amount received each time (e.g. "30000" or "30000.00")
        amount: String,
        /// How often it is received: none, weekly, biweekly, monthly, yearly
        #[arg(short, long, default_value = "monthly")]
        frequency: String,
    },

    /// List income sources with monthly and per-period equivalents
    List,

    /// Delete an income source
    Delete {
        /// Income source name or ID
        source: String,
    },
}

/// Handle an income command
pub fn handle_income_command(storage: &Storage, settings: &Settings, cmd: IncomeCommands) -> Result<()> {
    let service = IncomeService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        IncomeCommands::Add {
            name,
            amount,
            frequency,
        } => {
            let amount = parse_amount(&amount)?;
            let frequency = IncomeFrequency::parse_lenient(&frequency);
            let source = service.create(&name, amount, frequency)?;

            println!("Added income source: {}", source.name);
            println!("  Amount:    {}", source.amount.format_with_symbol(symbol));
            println!("  Frequency: {}", source.frequency.label());
            println!("  ID:        {}", source.id);
        }

        IncomeCommands::List => {
            print!("{}", format_income_list(&service.list()?, symbol));
        }

        IncomeCommands::Delete { source } => {
            let found = service
                .find(&source)?
                .ok_or_else(|| Error::income_not_found(&source))?;
            let deleted = service.delete(found.id)?;
            println!("Deleted income source: {}", deleted.name);
        }
    }

    Ok(())
}
