//! Income source service
//!
//! Income sources are created and deleted; there is no edit operation.

use crate::error::{Error, Result};
use crate::models::{IncomeFrequency, IncomeId, IncomeSource, Money};
use crate::storage::Storage;

use super::frequency;

/// Service for income source management
pub struct IncomeService<'a> {
    storage: &'a Storage,
}

impl<'a> IncomeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new, active income source
    pub fn create(&self, name: &str, amount: Money, frequency: IncomeFrequency) -> Result<IncomeSource> {
        let source = IncomeSource::new(name.trim(), amount, frequency);
        source
            .validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        self.storage.income.upsert(source.clone())?;
        self.storage.income.save()?;

        tracing::info!(income = %source.id, name = %source.name, "created income source");
        Ok(source)
    }

    /// Permanently delete an income source
    pub fn delete(&self, id: IncomeId) -> Result<IncomeSource> {
        let source = self
            .storage
            .income
            .delete(id)?
            .ok_or_else(|| Error::income_not_found(id.to_string()))?;
        self.storage.income.save()?;

        tracing::info!(income = %source.id, name = %source.name, "deleted income source");
        Ok(source)
    }

    /// Active income sources, oldest first
    pub fn list(&self) -> Result<Vec<IncomeSource>> {
        self.storage.income.get_active()
    }

    pub fn get(&self, id: IncomeId) -> Result<Option<IncomeSource>> {
        self.storage.income.get(id)
    }

    /// Find an income source by name (case-insensitive) or id
    pub fn find(&self, identifier: &str) -> Result<Option<IncomeSource>> {
        let sources = self.storage.income.get_all()?;
        let name = identifier.trim().to_lowercase();

        if let Some(source) = sources.iter().find(|s| s.name.to_lowercase() == name) {
            return Ok(Some(source.clone()));
        }

        Ok(sources.into_iter().find(|s| s.id.matches(identifier)))
    }

    /// Monthly income across active sources
    pub fn monthly_total(&self) -> Result<Money> {
        Ok(frequency::to_monthly_total(&self.list()?))
    }

    /// Income attributable to one period across active sources
    pub fn period_total(&self) -> Result<Money> {
        Ok(frequency::to_period_income(&self.list()?))
    }
}
