//! JSON Export functionality
//!
//! Exports the whole ledger to JSON with schema versioning.

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryRegistry, FamilyMember, MonthlyPlan, Transaction};
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub settings: Settings,

    pub transactions: Vec<Transaction>,

    pub plans: Vec<MonthlyPlan>,

    pub categories: CategoryRegistry,

    pub family: Vec<FamilyMember>,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub plan_count: usize,
    pub category_count: usize,
    pub member_count: usize,
    /// Date of the earliest transaction
    pub earliest_transaction: Option<String>,
    /// Date of the latest transaction
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Snapshot everything in storage
    pub fn from_storage(storage: &Storage, settings: &Settings) -> LedgerResult<Self> {
        let transactions = storage.transactions.get_all()?;
        let plans = storage.plans.get_all()?;
        let categories = storage.categories.registry()?;
        let family = storage.family.get_all()?;

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            plan_count: plans.len(),
            category_count: categories.len(),
            member_count: family.len(),
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            settings: settings.clone(),
            transactions,
            plans,
            categories,
            family,
            metadata,
        })
    }

    /// Check the schema version and that every transaction names a known
    /// category and member
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        for txn in &self.transactions {
            if !self.categories.contains(txn.kind, &txn.category) {
                return Err(format!(
                    "Transaction {} references unknown {} category '{}'",
                    txn.id.short(),
                    txn.kind.as_str(),
                    txn.category
                ));
            }
            if let Some(member) = &txn.family_member {
                if !self.family.iter().any(|m| &m.name == member) {
                    return Err(format!(
                        "Transaction {} references unknown member '{}'",
                        txn.id.short(),
                        member
                    ));
                }
            }
        }

        for plan in &self.plans {
            plan.validate()
                .map_err(|e| format!("Plan {}: {}", plan.month, e))?;
        }

        Ok(())
    }
}

/// Export the full ledger as pretty-printed JSON
pub fn export_full_json<W: Write>(storage: &Storage, settings: &Settings, writer: &mut W) -> LedgerResult<()> {
    let export = FullExport::from_storage(storage, settings)?;
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind};
    use crate::services::test_support::create_test_storage;
    use chrono::NaiveDate;

    fn add_food(storage: &Storage, member: &str) {
        let txn = Transaction::new(
            TransactionKind::Expense,
            Money::from_units(300),
            "Food",
            NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
        )
        .with_member(member);
        storage.transactions.upsert(txn).unwrap();
    }

    #[test]
    fn test_json_export() {
        let (_temp_dir, storage, settings) = create_test_storage();
        add_food(&storage, "Anuraag");

        let mut output = Vec::new();
        export_full_json(&storage, &settings, &mut output).unwrap();

        let export: FullExport = serde_json::from_slice(&output).unwrap();
        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.transaction_count, 1);
        assert_eq!(export.metadata.member_count, 2);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2024-01-06"));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_validate_catches_unknown_member() {
        let (_temp_dir, storage, settings) = create_test_storage();
        add_food(&storage, "Stranger");

        let export = FullExport::from_storage(&storage, &settings).unwrap();
        let err = export.validate().unwrap_err();
        assert!(err.contains("unknown member 'Stranger'"));
    }

    #[test]
    fn test_validate_schema_version() {
        let (_temp_dir, storage, settings) = create_test_storage();
        let mut export = FullExport::from_storage(&storage, &settings).unwrap();
        export.schema_version = "0.1.0".into();
        assert!(export.validate().unwrap_err().contains("Schema version mismatch"));
    }
}
