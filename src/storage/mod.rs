//! Storage layer for payperiod
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Each entity type lives in its own file under `<base>/data/`.

pub mod categories;
pub mod file_io;
pub mod income;
pub mod init;
pub mod transactions;

pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use income::IncomeRepository;
pub use init::{initialize_storage, needs_initialization};
pub use transactions::TransactionRepository;

use crate::config::paths::PayperiodPaths;
use crate::error::Error;
use crate::models::{BudgetCategory, CategoryId};

pub(crate) fn lock_error<E: std::fmt::Display>(e: E) -> Error {
    Error::Storage(format!("Failed to acquire lock: {}", e))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: PayperiodPaths,
    pub income: IncomeRepository,
    pub categories: CategoryRepository,
    pub transactions: TransactionRepository,
}

impl Storage {
    /// Create a new Storage instance without loading anything
    pub fn new(paths: PayperiodPaths) -> Result<Self, Error> {
        paths.ensure_directories()?;

        Ok(Self {
            income: IncomeRepository::new(paths.income_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            paths,
        })
    }

    /// Create a Storage instance and load every repository from disk
    pub fn open(paths: PayperiodPaths) -> Result<Self, Error> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &PayperiodPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), Error> {
        self.income.load()?;
        self.categories.load()?;
        self.transactions.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), Error> {
        self.income.save()?;
        self.categories.save()?;
        self.transactions.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Delete a category together with every transaction that references it
    ///
    /// Returns the removed category and the number of transactions removed,
    /// or `None` if no such category exists.
    pub fn delete_category_cascade(
        &self,
        id: CategoryId,
    ) -> Result<Option<(BudgetCategory, usize)>, Error> {
        let Some(category) = self.categories.remove(id)? else {
            return Ok(None);
        };

        let removed = self.transactions.delete_by_category(id)?;

        self.transactions.save()?;
        self.categories.save()?;

        tracing::info!(
            category = %category.name,
            transactions = removed,
            "deleted category"
        );
        Ok(Some((category, removed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryType, Money, Transaction};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayperiodPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_storage();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_corrupt_file_fails_open() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayperiodPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.income_file(), "not json").unwrap();

        assert!(matches!(Storage::open(paths), Err(Error::Storage(_))));
    }

    #[test]
    fn test_delete_category_cascade() {
        let (temp_dir, storage) = create_storage();
        let day = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();

        let groceries = BudgetCategory::new("Groceries", CategoryType::Expense, Money::from_units(5000));
        let rent = BudgetCategory::new("Rent", CategoryType::Expense, Money::from_units(9000));
        let (groceries_id, rent_id) = (groceries.id, rent.id);
        storage.categories.upsert(groceries).unwrap();
        storage.categories.upsert(rent).unwrap();

        for amount in [1200, 800] {
            storage
                .transactions
                .upsert(Transaction::on_date(groceries_id, day, Money::from_units(amount)))
                .unwrap();
        }
        storage
            .transactions
            .upsert(Transaction::on_date(rent_id, day, Money::from_units(9000)))
            .unwrap();
        storage.save_all().unwrap();

        let (category, removed) = storage.delete_category_cascade(groceries_id).unwrap().unwrap();
        assert_eq!(category.name, "Groceries");
        assert_eq!(removed, 2);

        // The change must be on disk, not just in memory
        let paths = PayperiodPaths::with_base_dir(temp_dir.path().to_path_buf());
        let reopened = Storage::open(paths).unwrap();
        assert!(reopened.categories.get(groceries_id).unwrap().is_none());
        assert!(reopened.transactions.get_by_category(groceries_id).unwrap().is_empty());
        assert_eq!(reopened.transactions.get_by_category(rent_id).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_missing_category() {
        let (_temp_dir, storage) = create_storage();
        assert!(storage.delete_category_cascade(CategoryId::new()).unwrap().is_none());
    }
}
