//! CSV Export functionality
//!
//! Exports transactions in a spreadsheet-friendly layout, oldest first.

use crate::error::LedgerResult;
use crate::storage::Storage;
use std::io::Write;

/// Export every transaction to CSV
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> LedgerResult<usize> {
    let mut transactions = storage.transactions.get_all()?;
    transactions.reverse();

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "ID",
        "Date",
        "Type",
        "Category",
        "Amount",
        "Family Member",
        "Description",
        "Recurring",
    ])?;

    for txn in &transactions {
        csv.write_record([
            txn.id.as_uuid().to_string(),
            txn.date.to_string(),
            txn.kind.as_str().to_string(),
            txn.category.clone(),
            format!("{:.2}", txn.amount.as_f64()),
            txn.family_member.clone().unwrap_or_default(),
            txn.description.clone(),
            txn.is_recurring.to_string(),
        ])?;
    }

    csv.flush()?;
    tracing::debug!(rows = transactions.len(), "exported transactions csv");
    Ok(transactions.len())
}
