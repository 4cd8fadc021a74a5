//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json, with an
//! in-memory index from category to transaction ids.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDateTime;

use crate::error::Error;
use crate::models::{CategoryId, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    #[serde(default)]
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with a per-category index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: category_id -> transaction_ids
    by_category: RwLock<HashMap<CategoryId, Vec<TransactionId>>>,
}

fn chronological(list: &mut [Transaction]) {
    list.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and rebuild the category index
    pub fn load(&self) -> Result<(), Error> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;

        data.clear();
        by_category.clear();

        for txn in file_data.transactions {
            by_category.entry(txn.category_id).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        tracing::debug!(count = data.len(), "loaded transactions");
        Ok(())
    }

    /// Save transactions to disk, oldest first
    pub fn save(&self) -> Result<(), Error> {
        let data = self.data.read().map_err(lock_error)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        chronological(&mut transactions);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, Error> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, date ascending
    pub fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        let data = self.data.read().map_err(lock_error)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        chronological(&mut transactions);
        Ok(transactions)
    }

    /// Get transactions for a category, date ascending
    pub fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Transaction>, Error> {
        let data = self.data.read().map_err(lock_error)?;
        let by_category = self.by_category.read().map_err(lock_error)?;

        let ids = by_category.get(&category_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        chronological(&mut transactions);
        Ok(transactions)
    }

    /// Get transactions dated within `[start, end]`, both ends inclusive,
    /// date ascending
    pub fn get_by_date_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Transaction>, Error> {
        let data = self.data.read().map_err(lock_error)?;

        let mut transactions: Vec<_> = data
            .values()
            .filter(|t| t.date >= start && t.date <= end)
            .cloned()
            .collect();
        chronological(&mut transactions);
        Ok(transactions)
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), Error> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;

        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_category.get_mut(&old.category_id) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_category.entry(txn.category_id).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction, returning whether it existed
    pub fn delete(&self, id: TransactionId) -> Result<bool, Error> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;

        match data.remove(&id) {
            Some(txn) => {
                if let Some(ids) = by_category.get_mut(&txn.category_id) {
                    ids.retain(|&tid| tid != id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete every transaction owned by a category, returning how many went
    pub(crate) fn delete_by_category(&self, category_id: CategoryId) -> Result<usize, Error> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;

        let ids = by_category.remove(&category_id).unwrap_or_default();
        let mut removed = 0;
        for id in ids {
            if data.remove(&id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, Error> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        (temp_dir, repo)
    }

    fn at(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_moves_between_categories() {
        let (_temp_dir, repo) = create_test_repo();
        let groceries = CategoryId::new();
        let dining = CategoryId::new();

        let mut txn = Transaction::new(groceries, at(3, 9, 0, 0), Money::from_units(100));
        repo.upsert(txn.clone()).unwrap();
        assert_eq!(repo.get_by_category(groceries).unwrap().len(), 1);

        txn.category_id = dining;
        repo.upsert(txn).unwrap();
        assert!(repo.get_by_category(groceries).unwrap().is_empty());
        assert_eq!(repo.get_by_category(dining).unwrap().len(), 1);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_date_range_is_inclusive_and_ordered() {
        let (_temp_dir, repo) = create_test_repo();
        let category = CategoryId::new();

        repo.upsert(Transaction::new(category, at(15, 23, 59, 59), Money::from_units(3)))
            .unwrap();
        repo.upsert(Transaction::new(category, at(1, 0, 0, 0), Money::from_units(1)))
            .unwrap();
        repo.upsert(Transaction::new(category, at(16, 0, 0, 0), Money::from_units(4)))
            .unwrap();
        repo.upsert(Transaction::new(category, at(8, 12, 0, 0), Money::from_units(2)))
            .unwrap();

        let range = repo
            .get_by_date_range(at(1, 0, 0, 0), at(15, 23, 59, 59))
            .unwrap();
        let amounts: Vec<_> = range.iter().map(|t| t.amount.units()).collect();
        assert_eq!(amounts, vec![1, 2, 3]);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let category = CategoryId::new();
        let txn = Transaction::new(category, at(2, 0, 0, 0), Money::from_units(50));
        let id = txn.id;

        repo.upsert(txn).unwrap();
        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert!(repo.get_by_category(category).unwrap().is_empty());
    }

    #[test]
    fn test_delete_by_category_leaves_others() {
        let (_temp_dir, repo) = create_test_repo();
        let doomed = CategoryId::new();
        let kept = CategoryId::new();

        repo.upsert(Transaction::new(doomed, at(2, 0, 0, 0), Money::from_units(1))).unwrap();
        repo.upsert(Transaction::new(doomed, at(3, 0, 0, 0), Money::from_units(2))).unwrap();
        repo.upsert(Transaction::new(kept, at(4, 0, 0, 0), Money::from_units(3))).unwrap();

        assert_eq!(repo.delete_by_category(doomed).unwrap(), 2);
        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.get_by_category(kept).unwrap().len(), 1);
        assert_eq!(repo.delete_by_category(doomed).unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let category = CategoryId::new();
        let mut txn = Transaction::new(category, at(5, 18, 30, 0), Money::from_cents(120050));
        txn.set_description(Some("Weekly market".into()));
        let id = txn.id;

        repo.upsert(txn).unwrap();
        repo.save().unwrap();

        let repo2 = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        repo2.load().unwrap();

        let reloaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(reloaded.amount.cents(), 120050);
        assert_eq!(reloaded.date, at(5, 18, 30, 0));
        assert_eq!(reloaded.description.as_deref(), Some("Weekly market"));
        assert_eq!(repo2.get_by_category(category).unwrap().len(), 1);
    }
}
