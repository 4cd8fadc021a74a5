//! Path management for payperiod
//!
//! ## Path Resolution Order
//!
//! 1. `PAYPERIOD_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/payperiod` or `~/.config/payperiod`
//! 3. Windows: `%APPDATA%\payperiod`

use std::path::PathBuf;

use crate::error::Error;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "PAYPERIOD_DATA_DIR";

/// Manages all paths used by payperiod
#[derive(Debug, Clone)]
pub struct PayperiodPaths {
    base_dir: PathBuf,
}

impl PayperiodPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no home/app-data directory can be
    /// determined. Callers treat this as fatal at startup.
    pub fn new() -> Result<Self, Error> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to income.json
    pub fn income_file(&self) -> PathBuf {
        self.data_dir().join("income.json")
    }

    /// Get the path to categories.json
    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    /// Get the path to transactions.json
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), Error> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| Error::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| Error::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if payperiod has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, Error> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                Error::Config(format!(
                    "HOME is not set; set {} to choose a data directory",
                    DATA_DIR_ENV
                ))
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("payperiod"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, Error> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| Error::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("payperiod"))
}
