//! Budget category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::Error;
use crate::models::{BudgetCategory, CategoryId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    #[serde(default)]
    pub categories: Vec<BudgetCategory>,
}

/// Repository for budget category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, BudgetCategory>>,
}

fn by_name(list: &mut [BudgetCategory]) {
    list.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then(a.created_at.cmp(&b.created_at))
    });
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk, replacing anything in memory
    pub fn load(&self) -> Result<(), Error> {
        let file_data: CategoryData = read_json(&self.path)?;
        let mut categories = self.categories.write().map_err(lock_error)?;

        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        tracing::debug!(count = categories.len(), "loaded categories");
        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), Error> {
        let categories = self.categories.read().map_err(lock_error)?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        by_name(&mut list);

        write_json_atomic(&self.path, &CategoryData { categories: list })
    }

    pub fn get(&self, id: CategoryId) -> Result<Option<BudgetCategory>, Error> {
        let categories = self.categories.read().map_err(lock_error)?;
        Ok(categories.get(&id).cloned())
    }

    pub fn exists(&self, id: CategoryId) -> Result<bool, Error> {
        let categories = self.categories.read().map_err(lock_error)?;
        Ok(categories.contains_key(&id))
    }

    /// Get all categories ordered by name
    pub fn get_all(&self) -> Result<Vec<BudgetCategory>, Error> {
        let categories = self.categories.read().map_err(lock_error)?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        by_name(&mut list);
        Ok(list)
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<BudgetCategory>, Error> {
        let categories = self.categories.read().map_err(lock_error)?;

        let name_lower = name.trim().to_lowercase();
        Ok(categories
            .values()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a category
    pub fn upsert(&self, category: BudgetCategory) -> Result<(), Error> {
        let mut categories = self.categories.write().map_err(lock_error)?;
        categories.insert(category.id, category);
        Ok(())
    }

    /// Remove a category, returning it if it existed
    ///
    /// This does not touch transactions; use `Storage::delete_category_cascade`.
    pub(crate) fn remove(&self, id: CategoryId) -> Result<Option<BudgetCategory>, Error> {
        let mut categories = self.categories.write().map_err(lock_error)?;
        Ok(categories.remove(&id))
    }

    pub fn count(&self) -> Result<usize, Error> {
        let categories = self.categories.read().map_err(lock_error)?;
        Ok(categories.len())
    }
}
