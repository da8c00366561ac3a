//! Category service
//!
//! Lists the income and expense registries and manages custom categories.
//! Built-in categories cannot be removed.

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryInfo, TransactionKind};
use crate::storage::Storage;

pub struct CategoryService<'a> {
    storage: &'a Storage,
}

#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub kind: TransactionKind,
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub suggested_limit: Option<f64>,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn list(&self, kind: TransactionKind) -> LedgerResult<Vec<CategoryInfo>> {
        self.storage.categories.get_all(kind)
    }

    pub fn add(&self, input: CategoryInput) -> LedgerResult<CategoryInfo> {
        let mut category = CategoryInfo::new(input.name.trim(), input.kind);
        if let Some(icon) = input.icon {
            category.icon = icon;
        }
        if let Some(color) = input.color {
            category.color = color;
        }
        category.description = input.description.unwrap_or_default();
        category.suggested_limit = input.suggested_limit;

        category
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        if !self.storage.categories.insert(category.clone())? {
            return Err(LedgerError::Duplicate {
                entity_type: "Category",
                identifier: category.name,
            });
        }
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.name.clone(),
            Some(category.kind.as_str().to_string()),
            &category,
        )?;

        tracing::info!(name = %category.name, kind = %category.kind, "category added");
        Ok(category)
    }

    /// Remove a custom category that no transaction uses
    pub fn remove(&self, kind: TransactionKind, name: &str) -> LedgerResult<CategoryInfo> {
        let category = self
            .storage
            .categories
            .find(kind, name)?
            .ok_or_else(|| LedgerError::category_not_found(name.trim()))?;

        if !category.custom {
            return Err(LedgerError::Validation(format!(
                "'{}' is a built-in category and cannot be removed",
                category.name
            )));
        }
        if self.storage.transactions.uses_category(kind, &category.name)? {
            return Err(LedgerError::Validation(format!(
                "'{}' is still used by transactions",
                category.name
            )));
        }

        self.storage.categories.remove(kind, &category.name)?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            category.name.clone(),
            Some(kind.as_str().to_string()),
            &category,
        )?;

        tracing::info!(name = %category.name, "category removed");
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Transaction};
    use crate::services::test_support::create_test_storage;
    use chrono::NaiveDate;

    fn pets() -> CategoryInput {
        CategoryInput {
            kind: TransactionKind::Expense,
            name: " Pets ".into(),
            icon: Some("🐶".into()),
            color: None,
            description: None,
            suggested_limit: Some(0.05),
        }
    }

    #[test]
    fn test_add_custom_category() {
        let (_temp_dir, storage, _settings) = create_test_storage();
        let service = CategoryService::new(&storage);

        let category = service.add(pets()).unwrap();
        assert_eq!(category.name, "Pets");
        assert!(category.custom);
        assert_eq!(service.list(TransactionKind::Expense).unwrap().len(), 13);
        assert_eq!(service.list(TransactionKind::Income).unwrap().len(), 5);
    }

    #[test]
    fn test_add_rejects_duplicates_and_bad_limits() {
        let (_temp_dir, storage, _settings) = create_test_storage();
        let service = CategoryService::new(&storage);

        let mut input = pets();
        input.name = "FOOD".into();
        assert!(matches!(
            service.add(input),
            Err(LedgerError::Duplicate { .. })
        ));

        let mut input = pets();
        input.suggested_limit = Some(1.5);
        assert!(service.add(input).unwrap_err().is_validation());

        // same name is fine under the other kind
        let mut input = pets();
        input.kind = TransactionKind::Income;
        input.name = "Food".into();
        assert!(service.add(input).is_ok());
    }

    #[test]
    fn test_builtin_categories_cannot_be_removed() {
        let (_temp_dir, storage, _settings) = create_test_storage();
        let service = CategoryService::new(&storage);

        let err = service.remove(TransactionKind::Expense, "Food").unwrap_err();
        assert!(err.is_validation());
        assert!(service
            .remove(TransactionKind::Expense, "Nope")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_remove_custom_category() {
        let (_temp_dir, storage, _settings) = create_test_storage();
        let service = CategoryService::new(&storage);
        service.add(pets()).unwrap();

        let txn = Transaction::new(
            TransactionKind::Expense,
            Money::from_units(20),
            "Pets",
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        );
        let id = txn.id;
        storage.transactions.upsert(txn).unwrap();
        assert!(service.remove(TransactionKind::Expense, "pets").unwrap_err().is_validation());

        storage.transactions.delete(id).unwrap();
        let removed = service.remove(TransactionKind::Expense, "pets").unwrap();
        assert_eq!(removed.name, "Pets");
        assert_eq!(service.list(TransactionKind::Expense).unwrap().len(), 12);
    }
}
