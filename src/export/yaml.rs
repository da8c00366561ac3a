//! YAML Export functionality
//!
//! Exports the whole ledger to YAML for a human-readable backup.

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::export::json::FullExport;
use crate::storage::Storage;
use std::io::Write;

/// Export the full ledger as YAML, preceded by a comment header
pub fn export_full_yaml<W: Write>(storage: &Storage, settings: &Settings, writer: &mut W) -> LedgerResult<()> {
    let export = FullExport::from_storage(storage, settings)?;

    let header = format!(
        "# FamLedger export\n# Generated: {}\n# App Version: {}\n#\n# Contains every transaction, plan, category and family member.\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export)?;
    Ok(())
}

/// Parse and validate a YAML export
pub fn read_yaml_export(yaml: &str) -> LedgerResult<FullExport> {
    let export: FullExport = serde_yaml::from_str(yaml)?;
    export.validate().map_err(LedgerError::Validation)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Month, MonthlyPlan, PlanEntry, Transaction, TransactionKind};
    use crate::services::test_support::create_test_storage;
    use chrono::NaiveDate;

    #[test]
    fn test_yaml_export() {
        let (_temp_dir, storage, settings) = create_test_storage();

        let txn = Transaction::new(
            TransactionKind::Income,
            Money::from_units(1000),
            "Salary",
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
        .with_member("Mummy");
        storage.transactions.upsert(txn).unwrap();

        let plan = MonthlyPlan::empty(Month::parse("2024-01").unwrap(), true).with_entry(
            TransactionKind::Expense,
            PlanEntry::new("Rent", Money::from_units(400)).with_member("Mummy"),
        );
        storage.plans.replace(plan).unwrap();

        let mut output = Vec::new();
        export_full_yaml(&storage, &settings, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# FamLedger export"));
        assert!(yaml.contains("schema_version"));
        assert!(yaml.contains("Salary"));

        let export = read_yaml_export(&yaml).unwrap();
        assert_eq!(export.transactions.len(), 1);
        assert_eq!(export.plans.len(), 1);
        assert_eq!(export.plans[0].month.to_string(), "2024-01");
    }

    #[test]
    fn test_read_rejects_garbage() {
        assert!(read_yaml_export("not: [valid").is_err());
    }
}
