//! Period dashboard command

use crate::config::settings::Settings;
use crate::display::format_period_summary;
use crate::error::Result;
use crate::services::AggregationService;
use crate::storage::Storage;

use super::parse_reference_date;

/// Print the dashboard for the period containing `date` (default: today)
pub fn handle_summary_command(storage: &Storage, settings: &Settings, date: Option<&str>) -> Result<()> {
    let date = parse_reference_date(date)?;
    let summary = AggregationService::new(storage).period_summary(date)?;

    print!("{}", format_period_summary(&summary, &settings.currency_symbol));
    Ok(())
}
