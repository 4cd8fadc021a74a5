//! Category service
//!
//! Provides business logic for budget categories: validated create,
//! partial update, and delete with cascade to transactions.

use crate::error::{Error, Result};
use crate::models::{BudgetCategory, CategoryId, CategoryType, Money};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// Fields to change on a category; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub category_type: Option<CategoryType>,
    pub allocated_amount: Option<Money>,
}

impl UpdateCategoryInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category_type.is_none() && self.allocated_amount.is_none()
    }
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(
        &self,
        name: &str,
        category_type: CategoryType,
        allocated_amount: Money,
    ) -> Result<BudgetCategory> {
        let category = BudgetCategory::new(name.trim(), category_type, allocated_amount);
        category
            .validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(category = %category.id, name = %category.name, "created category");
        Ok(category)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<BudgetCategory>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name (case-insensitive) or ID string
    pub fn find(&self, identifier: &str) -> Result<Option<BudgetCategory>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        Ok(self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .find(|c| c.id.matches(identifier)))
    }

    /// List all categories ordered by name
    pub fn list(&self) -> Result<Vec<BudgetCategory>> {
        self.storage.categories.get_all()
    }

    /// Update only the supplied fields of a category
    pub fn update(&self, id: CategoryId, input: UpdateCategoryInput) -> Result<BudgetCategory> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| Error::category_not_found(id.to_string()))?;

        if let Some(name) = input.name {
            category.name = name.trim().to_string();
        }
        if let Some(category_type) = input.category_type {
            category.category_type = category_type;
        }
        if let Some(allocated_amount) = input.allocated_amount {
            category.allocated_amount = allocated_amount;
        }

        category
            .validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        category.updated_at = chrono::Utc::now();
        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(category = %category.id, name = %category.name, "updated category");
        Ok(category)
    }

    /// Delete a category and all of its transactions
    ///
    /// Returns the deleted category and how many transactions went with it.
    pub fn delete(&self, id: CategoryId) -> Result<(BudgetCategory, usize)> {
        self.storage
            .delete_category_cascade(id)?
            .ok_or_else(|| Error::category_not_found(id.to_string()))
    }
}
