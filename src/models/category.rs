//! Category registries
//!
//! Income and expense categories live in separate registries. Each registry
//! starts with the built-in categories and can be extended with custom ones.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::transaction::TransactionKind;

/// Lookup data for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,

    pub kind: TransactionKind,

    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub color: String,

    #[serde(default)]
    pub description: String,

    /// Suggested ceiling as a share of income (0.15 = 15%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_limit: Option<f64>,

    /// User-defined rather than built in
    #[serde(default)]
    pub custom: bool,
}

impl CategoryInfo {
    /// Create a custom category
    pub fn new(name: impl Into<String>, kind: TransactionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            icon: "📌".into(),
            color: "#8E8E93".into(),
            description: String::new(),
            suggested_limit: None,
            custom: true,
        }
    }

    fn builtin(
        name: &str,
        kind: TransactionKind,
        icon: &str,
        color: &str,
        description: &str,
        suggested_limit: Option<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            icon: icon.into(),
            color: color.into(),
            description: description.into(),
            suggested_limit,
            custom: false,
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if let Some(limit) = self.suggested_limit {
            if !(0.0..=1.0).contains(&limit) {
                return Err(CategoryValidationError::InvalidLimit(limit));
            }
        }

        Ok(())
    }
}

impl fmt::Display for CategoryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The expense and income category registries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRegistry {
    #[serde(default)]
    pub expense: Vec<CategoryInfo>,

    #[serde(default)]
    pub income: Vec<CategoryInfo>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CategoryRegistry {
    /// Registry holding only the built-in categories
    pub fn builtin() -> Self {
        use TransactionKind::{Expense, Income};

        let expense = vec![
            CategoryInfo::builtin("EMI", Expense, "💰", "#FF6B6B", "Loan payments and EMIs", Some(0.3)),
            CategoryInfo::builtin("Hospital", Expense, "🏥", "#FF4757", "Medical expenses and healthcare", Some(0.1)),
            CategoryInfo::builtin(
                "Emergency Fund and Targets",
                Expense,
                "🚨",
                "#FFA502",
                "Emergency savings and unexpected expenses",
                Some(0.1),
            ),
            CategoryInfo::builtin("Rent", Expense, "🏠", "#4ECDC4", "Housing and rent expenses", Some(0.35)),
            CategoryInfo::builtin("Shopping", Expense, "🛍️", "#A78BFA", "Personal and retail shopping", Some(0.15)),
            CategoryInfo::builtin("Travel", Expense, "✈️", "#F59E0B", "Travel and transportation expenses", Some(0.1)),
            CategoryInfo::builtin("Subscriptions", Expense, "📱", "#EC4899", "Regular subscription services", Some(0.05)),
            CategoryInfo::builtin("Household", Expense, "🏡", "#96C93D", "Household and utilities", Some(0.15)),
            CategoryInfo::builtin("Food", Expense, "🍽️", "#FED766", "Food and dining expenses", Some(0.15)),
            CategoryInfo::builtin("Entertainment", Expense, "🎮", "#A18CD1", "Entertainment and recreation", Some(0.1)),
            CategoryInfo::builtin("Others", Expense, "📌", "#8E8E93", "Miscellaneous expenses", Some(0.05)),
            CategoryInfo::builtin(
                "Investments",
                Expense,
                "📈",
                "#27ae60",
                "Investments and target savings for major goals",
                Some(0.15),
            ),
        ];

        let income = vec![
            CategoryInfo::builtin("Salary", Income, "💵", "#22C55E", "Regular employment income", None),
            CategoryInfo::builtin("Business", Income, "💼", "#8B5CF6", "Business and self-employment income", None),
            CategoryInfo::builtin("Freelance", Income, "💻", "#EC4899", "Freelance and contract work", None),
            CategoryInfo::builtin("Rental", Income, "🏠", "#F59E0B", "Income from rental properties", None),
            CategoryInfo::builtin("Others", Income, "💰", "#6B7280", "Other sources of income", None),
        ];

        Self { expense, income }
    }

    /// The registry for one kind
    pub fn for_kind(&self, kind: TransactionKind) -> &[CategoryInfo] {
        match kind {
            TransactionKind::Expense => &self.expense,
            TransactionKind::Income => &self.income,
        }
    }

    fn for_kind_mut(&mut self, kind: TransactionKind) -> &mut Vec<CategoryInfo> {
        match kind {
            TransactionKind::Expense => &mut self.expense,
            TransactionKind::Income => &mut self.income,
        }
    }

    /// Find a category by name (case-insensitive)
    pub fn find(&self, kind: TransactionKind, name: &str) -> Option<&CategoryInfo> {
        let name = name.trim();
        self.for_kind(kind)
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, kind: TransactionKind, name: &str) -> bool {
        self.find(kind, name).is_some()
    }

    /// Insert a category. Returns false if one with the same name exists.
    pub fn insert(&mut self, category: CategoryInfo) -> bool {
        if self.contains(category.kind, &category.name) {
            return false;
        }
        self.for_kind_mut(category.kind).push(category);
        true
    }

    /// Remove a category by name, returning it
    pub fn remove(&mut self, kind: TransactionKind, name: &str) -> Option<CategoryInfo> {
        let list = self.for_kind_mut(kind);
        let pos = list
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name.trim()))?;
        Some(list.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.expense.len() + self.income.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expense.is_empty() && self.income.is_empty()
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CategoryValidationError {
    #[error("Category name cannot be empty")]
    EmptyName,

    #[error("Category name too long ({0} chars, max 50)")]
    NameTooLong(usize),

    #[error("Suggested limit must be a share between 0 and 1, got {0}")]
    InvalidLimit(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let registry = CategoryRegistry::builtin();
        assert_eq!(registry.expense.len(), 12);
        assert_eq!(registry.income.len(), 5);

        let rent = registry.find(TransactionKind::Expense, "rent").unwrap();
        assert_eq!(rent.suggested_limit, Some(0.35));
        assert!(!rent.custom);

        // registries are separate
        assert!(registry.contains(TransactionKind::Income, "Salary"));
        assert!(!registry.contains(TransactionKind::Expense, "Salary"));
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut registry = CategoryRegistry::builtin();
        assert!(registry.insert(CategoryInfo::new("Pets", TransactionKind::Expense)));
        assert!(!registry.insert(CategoryInfo::new("pets", TransactionKind::Expense)));
        assert!(registry.insert(CategoryInfo::new("Pets", TransactionKind::Income)));
    }

    #[test]
    fn test_remove() {
        let mut registry = CategoryRegistry::builtin();
        registry.insert(CategoryInfo::new("Pets", TransactionKind::Expense));
        let removed = registry.remove(TransactionKind::Expense, "PETS").unwrap();
        assert_eq!(removed.name, "Pets");
        assert!(registry.remove(TransactionKind::Expense, "Pets").is_none());
    }

    #[test]
    fn test_validation() {
        let mut cat = CategoryInfo::new("", TransactionKind::Expense);
        assert_eq!(cat.validate(), Err(CategoryValidationError::EmptyName));

        cat.name = "Gym".into();
        cat.suggested_limit = Some(1.5);
        assert!(matches!(
            cat.validate(),
            Err(CategoryValidationError::InvalidLimit(_))
        ));

        cat.suggested_limit = Some(0.05);
        assert!(cat.validate().is_ok());
    }
}
