//! Export module for FamLedger
//!
//! - CSV: transactions, for spreadsheets
//! - JSON: the full ledger, machine-readable
//! - YAML: the full ledger, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_transactions_csv;
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, read_yaml_export};
