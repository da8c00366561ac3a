//! Service layer for FamLedger
//!
//! Services sit between the CLI and storage. They validate input at the
//! boundary, resolve category and member names against the registries,
//! persist the result and write the audit trail. Nothing invalid reaches the
//! aggregation engine.

pub mod category;
pub mod family;
pub mod plan;
pub mod transaction;

pub use category::{CategoryInput, CategoryService};
pub use family::{FamilyService, MemberInput};
pub use plan::{PlanEntryInput, PlanService};
pub use transaction::{
    CreateTransactionInput, TransactionFilter, TransactionService, UpdateTransactionInput,
};

use crate::error::{LedgerError, LedgerResult};
use crate::models::TransactionKind;
use crate::storage::Storage;

/// Canonical registry name for `name`, or NotFound
pub(crate) fn resolve_category(storage: &Storage, kind: TransactionKind, name: &str) -> LedgerResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::Validation("Category is required".into()));
    }
    storage
        .categories
        .find(kind, name)?
        .map(|c| c.name)
        .ok_or_else(|| LedgerError::category_not_found(format!("{} ({})", name, kind.as_str())))
}

/// Canonical roster name for `name`, or NotFound
pub(crate) fn resolve_member(storage: &Storage, name: &str) -> LedgerResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::Validation("Family member cannot be blank".into()));
    }
    storage
        .family
        .find(name)?
        .map(|m| m.name)
        .ok_or_else(|| LedgerError::member_not_found(name))
}

#[cfg(test)]
pub(crate) mod test_support {
    use tempfile::TempDir;

    use crate::config::{LedgerPaths, Settings};
    use crate::storage::{initialize_storage, Storage};

    /// Initialized storage in a temp dir, with default settings
    pub fn create_test_storage() -> (TempDir, Storage, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage, Settings::default())
    }
}
