//! Storage initialization
//!
//! Handles first-run setup: settings file plus empty data files.

use crate::config::paths::PayperiodPaths;
use crate::config::settings::Settings;
use crate::error::Error;

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched, so running this twice is harmless.
pub fn initialize_storage(paths: &PayperiodPaths) -> Result<(), Error> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
        tracing::info!(path = %paths.settings_file().display(), "created settings");
    }

    if !paths.categories_file().exists() {
        write_json_atomic(paths.categories_file(), &CategoryData::default())?;
    }

    for file in [paths.income_file(), paths.transactions_file()] {
        if !file.exists() {
            write_json_atomic(&file, &serde_json::json!({}))?;
        }
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &PayperiodPaths) -> bool {
    !paths.is_initialized()
}
