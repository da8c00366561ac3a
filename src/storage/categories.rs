//! Category registry repository
//!
//! Manages loading and saving the expense and income registries to
//! `categories.json`. A missing file reads as the built-in registries.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{CategoryInfo, CategoryRegistry, TransactionKind};

use super::file_io::{read_json, write_json_atomic};

pub struct CategoryRepository {
    path: PathBuf,
    registry: RwLock<CategoryRegistry>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            registry: RwLock::new(CategoryRegistry::builtin()),
        }
    }

    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: CategoryRegistry = read_json(&self.path)?;

        let mut registry = self
            .registry
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *registry = file_data;
        Ok(())
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        let registry = self
            .registry
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        write_json_atomic(&self.path, &*registry)
    }

    /// A snapshot of both registries
    pub fn registry(&self) -> Result<CategoryRegistry, LedgerError> {
        let registry = self
            .registry
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(registry.clone())
    }

    pub fn get_all(&self, kind: TransactionKind) -> Result<Vec<CategoryInfo>, LedgerError> {
        let registry = self
            .registry
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(registry.for_kind(kind).to_vec())
    }

    /// Case-insensitive lookup
    pub fn find(&self, kind: TransactionKind, name: &str) -> Result<Option<CategoryInfo>, LedgerError> {
        let registry = self
            .registry
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(registry.find(kind, name).cloned())
    }

    /// Add a category; false if the name is taken for that kind
    pub fn insert(&self, category: CategoryInfo) -> Result<bool, LedgerError> {
        let mut registry = self
            .registry
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(registry.insert(category))
    }

    pub fn remove(&self, kind: TransactionKind, name: &str) -> Result<Option<CategoryInfo>, LedgerError> {
        let mut registry = self
            .registry
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(registry.remove(kind, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = CategoryRepository::new(temp_dir.path().join("categories.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_missing_file_loads_builtin_registry() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        assert_eq!(repo.get_all(TransactionKind::Expense).unwrap().len(), 12);
        assert_eq!(repo.get_all(TransactionKind::Income).unwrap().len(), 5);
        assert!(repo.find(TransactionKind::Expense, "food").unwrap().is_some());
    }

    #[test]
    fn test_custom_category_survives_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        assert!(repo
            .insert(CategoryInfo::new("Pets", TransactionKind::Expense))
            .unwrap());
        assert!(!repo
            .insert(CategoryInfo::new("pets", TransactionKind::Expense))
            .unwrap());
        repo.save().unwrap();

        let reloaded = CategoryRepository::new(temp_dir.path().join("categories.json"));
        reloaded.load().unwrap();
        let pets = reloaded.find(TransactionKind::Expense, "Pets").unwrap().unwrap();
        assert!(pets.custom);
    }

    #[test]
    fn test_remove() {
        let (_temp_dir, repo) = create_test_repo();
        let removed = repo.remove(TransactionKind::Income, "Rental").unwrap();
        assert_eq!(removed.map(|c| c.name), Some("Rental".to_string()));
        assert!(repo.remove(TransactionKind::Income, "Rental").unwrap().is_none());
    }
}
