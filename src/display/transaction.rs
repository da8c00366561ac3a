//! Transaction display formatting

use tabled::Tabled;

use super::{render_table, truncate};
use crate::aggregation::TransactionGroup;
use crate::models::{Transaction, TransactionKind};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, symbol: &str, date_format: &str) -> Self {
        let sign = match txn.kind {
            TransactionKind::Income => "+",
            TransactionKind::Expense => "-",
        };
        let recurring = if txn.is_recurring { " ↻" } else { "" };
        Self {
            id: txn.id.short(),
            date: txn.date.format(date_format).to_string(),
            kind: txn.kind.to_string(),
            category: txn.category.clone(),
            member: txn.family_member.clone().unwrap_or_default(),
            amount: format!("{}{}", sign, txn.amount.format_with_symbol(symbol)),
            description: format!("{}{}", truncate(&txn.description, 30), recurring),
        }
    }
}

/// Format transactions as a table, in the order given
pub fn format_transaction_table(transactions: &[Transaction], symbol: &str, date_format: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions
        .iter()
        .map(|t| TransactionRow::new(t, symbol, date_format))
        .collect();
    format!("{}\n{} transaction(s)\n", render_table(rows), transactions.len())
}

/// Format grouped transactions, one titled table per group
pub fn format_transaction_groups(groups: &[TransactionGroup], symbol: &str, date_format: &str) -> String {
    if groups.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    for group in groups {
        output.push_str(&format!(
            "{} ({} transaction(s), {})\n",
            group.title,
            group.transactions.len(),
            group.total.format_with_symbol(symbol)
        ));
        let rows = group
            .transactions
            .iter()
            .map(|t| TransactionRow::new(t, symbol, date_format))
            .collect();
        output.push_str(&render_table(rows));
        output.push_str("\n\n");
    }
    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id.short()));
    output.push_str(&format!("Full ID:     {}\n", txn.id.as_uuid()));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(symbol)));
    output.push_str(&format!("Category:    {}\n", txn.category));

    if let Some(member) = &txn.family_member {
        output.push_str(&format!("Member:      {}\n", member));
    }
    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }
    if txn.is_recurring {
        output.push_str("Recurring:   yes\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::{group_by, GroupBy};
    use crate::models::Money;
    use chrono::NaiveDate;

    fn food() -> Transaction {
        Transaction::new(
            TransactionKind::Expense,
            Money::from_units(300),
            "Food",
            NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
        )
        .with_member("Anuraag")
        .with_description("groceries")
    }

    #[test]
    fn test_table_lists_transactions() {
        let txn = food();
        let output = format_transaction_table(&[txn.clone()], "$", "%d/%m/%Y");

        assert!(output.contains(&txn.id.short()));
        assert!(output.contains("06/01/2024"));
        assert!(output.contains("-$300.00"));
        assert!(output.contains("Anuraag"));
        assert!(output.contains("1 transaction(s)"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_transaction_table(&[], "$", "%Y-%m-%d"), "No transactions found.\n");
    }

    #[test]
    fn test_groups() {
        let groups = group_by(&[food()], GroupBy::Category);
        let output = format_transaction_groups(&groups, "₹", "%Y-%m-%d");
        assert!(output.starts_with("Food (1 transaction(s), ₹300.00)"));
    }

    #[test]
    fn test_details() {
        let mut txn = food();
        txn.is_recurring = true;
        let output = format_transaction_details(&txn, "$");
        assert!(output.contains("Amount:      $300.00"));
        assert!(output.contains("Member:      Anuraag"));
        assert!(output.contains("Recurring:   yes"));
    }
}
