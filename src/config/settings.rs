//! User settings for payperiod
//!
//! Persisted as `config.json` in the base directory. Every field has a serde
//! default so older or hand-written files keep loading.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::PayperiodPaths;
use crate::error::Error;

/// Date format used when the configured one is unusable
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Stored receipt payloads are capped at 0.8 MB (before base64)
pub const DEFAULT_RECEIPT_MAX_BYTES: usize = 800 * 1024;

/// Source image files above 5 MB are refused outright
pub const DEFAULT_RECEIPT_SOURCE_MAX_BYTES: usize = 5 * 1024 * 1024;

/// User settings for payperiod
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Largest receipt payload stored with a transaction, in bytes
    #[serde(default = "default_receipt_max_bytes")]
    pub receipt_max_bytes: usize,

    /// Largest image file the CLI will read for a receipt, in bytes
    #[serde(default = "default_receipt_source_max_bytes")]
    pub receipt_source_max_bytes: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₱".to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

/// Whether `format` is a strftime pattern chrono can parse
pub fn is_valid_date_format(format: &str) -> bool {
    !format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

fn default_receipt_max_bytes() -> usize {
    DEFAULT_RECEIPT_MAX_BYTES
}

fn default_receipt_source_max_bytes() -> usize {
    DEFAULT_RECEIPT_SOURCE_MAX_BYTES
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            receipt_max_bytes: default_receipt_max_bytes(),
            receipt_source_max_bytes: default_receipt_source_max_bytes(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file is absent
    pub fn load_or_create(paths: &PayperiodPaths) -> Result<Self, Error> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - `init` decides when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| Error::Io(format!("Failed to read settings file: {}", e)))?;

        let mut settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse settings file: {}", e)))?;

        if !is_valid_date_format(&settings.date_format) {
            tracing::warn!(
                date_format = %settings.date_format,
                "unsupported date format in settings, using {}",
                DEFAULT_DATE_FORMAT
            );
            settings.date_format = default_date_format();
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PayperiodPaths) -> Result<(), Error> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| Error::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "₱");
        assert_eq!(settings.receipt_max_bytes, 800 * 1024);
        assert_eq!(settings.receipt_source_max_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayperiodPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            currency_symbol: "$".to_string(),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert!(paths.is_initialized());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.schema_version, 1);
        assert_eq!(loaded.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_bad_date_format_falls_back_to_default() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayperiodPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(
            paths.settings_file(),
            r#"{"currency_symbol": "$", "date_format": "%Q"}"#,
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(loaded.currency_symbol, "$");
    }

    #[test]
    fn test_date_format_validation() {
        assert!(is_valid_date_format("%Y-%m-%d"));
        assert!(is_valid_date_format("%d/%m/%Y %H:%M"));
        assert!(!is_valid_date_format("%Q"));
        assert!(!is_valid_date_format("%Y-%"));
        assert!(!is_valid_date_format(""));
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayperiodPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
