//! CLI command for data export

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_full_json, export_full_yaml, export_transactions_csv};
use crate::storage::Storage;
use clap::ValueEnum;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV (transactions only)
    Csv,
    /// JSON (everything)
    Json,
    /// YAML (everything, human-readable)
    Yaml,
}

/// Open `path` for writing, buffered
pub(crate) fn create_output(path: &Path) -> LedgerResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    format: ExportFormat,
    output: &Path,
) -> LedgerResult<()> {
    let mut writer = create_output(output)?;

    match format {
        ExportFormat::Csv => {
            let count = export_transactions_csv(storage, &mut writer)?;
            println!("Exported {} transactions to: {}", count, output.display());
        }
        ExportFormat::Json => {
            export_full_json(storage, settings, &mut writer)?;
            println!("Full ledger exported to: {}", output.display());
        }
        ExportFormat::Yaml => {
            export_full_yaml(storage, settings, &mut writer)?;
            println!("Full ledger exported to: {}", output.display());
        }
    }

    writer.flush()?;
    tracing::info!(format = ?format, path = %output.display(), "export written");
    Ok(())
}
