//! Storage layer for FamLedger
//!
//! JSON file storage with atomic writes, one file per record kind, plus the
//! audit log every mutation is reported to.

pub mod categories;
pub mod family;
pub mod file_io;
pub mod init;
pub mod plans;
pub mod transactions;

pub use categories::CategoryRepository;
pub use family::FamilyRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use plans::PlanRepository;
pub use transactions::TransactionRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};

/// Owns every repository and the audit logger
pub struct Storage {
    paths: LedgerPaths,
    audit: AuditLogger,
    pub transactions: TransactionRepository,
    pub plans: PlanRepository,
    pub categories: CategoryRepository,
    pub family: FamilyRepository,
}

impl Storage {
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            plans: PlanRepository::new(paths.plans_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            family: FamilyRepository::new(paths.family_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), LedgerError> {
        self.transactions.load()?;
        self.plans.load()?;
        self.categories.load()?;
        self.family.load()?;
        tracing::debug!(
            transactions = self.transactions.count()?,
            plans = self.plans.count()?,
            "storage loaded"
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> LedgerResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> LedgerResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> LedgerResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_log_helpers_append_to_audit_log() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(LedgerPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        storage
            .log_create(EntityType::Category, "Pets", None, &json!({"name": "Pets"}))
            .unwrap();
        storage
            .log_delete(EntityType::Category, "Pets", None, &json!({"name": "Pets"}))
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].operation, Operation::Delete);
        assert!(temp_dir.path().join("audit.log").exists());
    }
}
