//! Income source repository
//!
//! Handles persistence of income sources to income.json.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::Error;
use crate::models::{IncomeId, IncomeSource};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct IncomeData {
    #[serde(default)]
    sources: Vec<IncomeSource>,
}

/// Repository for income sources
pub struct IncomeRepository {
    path: PathBuf,
    sources: RwLock<HashMap<IncomeId, IncomeSource>>,
}

fn oldest_first(list: &mut [IncomeSource]) {
    list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
}

impl IncomeRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            sources: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), Error> {
        let file_data: IncomeData = read_json(&self.path)?;
        let mut sources = self.sources.write().map_err(lock_error)?;

        sources.clear();
        for source in file_data.sources {
            sources.insert(source.id, source);
        }

        tracing::debug!(count = sources.len(), "loaded income sources");
        Ok(())
    }

    pub fn save(&self) -> Result<(), Error> {
        let sources = self.sources.read().map_err(lock_error)?;

        let mut list: Vec<_> = sources.values().cloned().collect();
        oldest_first(&mut list);

        write_json_atomic(&self.path, &IncomeData { sources: list })
    }

    pub fn get(&self, id: IncomeId) -> Result<Option<IncomeSource>, Error> {
        let sources = self.sources.read().map_err(lock_error)?;
        Ok(sources.get(&id).cloned())
    }

    /// Get every income source, including inactive ones, oldest first
    pub fn get_all(&self) -> Result<Vec<IncomeSource>, Error> {
        let sources = self.sources.read().map_err(lock_error)?;

        let mut list: Vec<_> = sources.values().cloned().collect();
        oldest_first(&mut list);
        Ok(list)
    }

    /// Get active income sources, oldest first
    pub fn get_active(&self) -> Result<Vec<IncomeSource>, Error> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|s| s.is_active)
            .collect())
    }

    pub fn upsert(&self, source: IncomeSource) -> Result<(), Error> {
        let mut sources = self.sources.write().map_err(lock_error)?;
        sources.insert(source.id, source);
        Ok(())
    }

    /// Delete an income source, returning it if it existed
    pub fn delete(&self, id: IncomeId) -> Result<Option<IncomeSource>, Error> {
        let mut sources = self.sources.write().map_err(lock_error)?;
        Ok(sources.remove(&id))
    }

    pub fn count(&self) -> Result<usize, Error> {
        let sources = self.sources.read().map_err(lock_error)?;
        Ok(sources.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IncomeFrequency, Money};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, IncomeRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = IncomeRepository::new(temp_dir.path().join("income.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let source = IncomeSource::new("Salary", Money::from_units(30000), IncomeFrequency::Monthly);
        let id = source.id;

        repo.upsert(source).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount.units(), 30000);
    }

    #[test]
    fn test_get_active_skips_inactive() {
        let (_temp_dir, repo) = create_test_repo();
        let mut paused = IncomeSource::new("Old job", Money::from_units(10), IncomeFrequency::Weekly);
        paused.is_active = false;

        repo.upsert(paused).unwrap();
        repo.upsert(IncomeSource::new("Salary", Money::from_units(20), IncomeFrequency::Monthly))
            .unwrap();

        assert_eq!(repo.get_all().unwrap().len(), 2);
        let active = repo.get_active().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Salary");
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let source = IncomeSource::new("Bonus", Money::from_units(5000), IncomeFrequency::None);
        let id = source.id;

        repo.upsert(source).unwrap();
        assert_eq!(repo.delete(id).unwrap().unwrap().name, "Bonus");
        assert!(repo.delete(id).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_load() {
        let (temp_dir, repo) = create_test_repo();
        let source = IncomeSource::new("Rental", Money::from_cents(1_250_075), IncomeFrequency::Yearly);
        let id = source.id;

        repo.upsert(source).unwrap();
        repo.save().unwrap();

        let repo2 = IncomeRepository::new(temp_dir.path().join("income.json"));
        repo2.load().unwrap();

        let reloaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(reloaded.frequency, IncomeFrequency::Yearly);
        assert_eq!(reloaded.amount.cents(), 1_250_075);
    }
}
