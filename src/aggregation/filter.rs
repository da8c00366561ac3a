//! Filtering, searching and grouping of transaction lists

use std::collections::HashMap;
use std::str::FromStr;

use serde::Serialize;

use crate::models::{DateWindow, Money, Month, Transaction};

/// How `group_by` buckets a transaction list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    #[default]
    None,
    Category,
    Date,
    Member,
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "category" => Ok(Self::Category),
            "date" => Ok(Self::Date),
            "member" | "family" => Ok(Self::Member),
            other => Err(format!(
                "unknown grouping '{}'; expected none, category, date or member",
                other
            )),
        }
    }
}

/// A titled group of transactions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionGroup {
    pub title: String,
    pub transactions: Vec<Transaction>,
    /// Sum of the amounts in the group, income and expenses alike
    pub total: Money,
}

const ALL_TRANSACTIONS: &str = "All Transactions";
const UNASSIGNED: &str = "Unassigned";

/// Transactions dated inside `window`, in input order
pub fn within(transactions: &[Transaction], window: &DateWindow) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| window.contains(t.date))
        .cloned()
        .collect()
}

/// Transactions dated inside `month`, in input order
pub fn in_month(transactions: &[Transaction], month: Month) -> Vec<Transaction> {
    within(transactions, &month.window())
}

/// Case-insensitive match of `query` against category, description, member
/// and the plain amount. An empty query matches everything.
pub fn search(transactions: &[Transaction], query: &str) -> Vec<Transaction> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return transactions.to_vec();
    }

    transactions
        .iter()
        .filter(|t| {
            t.category.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle)
                || t.family_member
                    .as_deref()
                    .is_some_and(|m| m.to_lowercase().contains(&needle))
                || amount_text(t.amount).contains(&needle)
        })
        .cloned()
        .collect()
}

/// "300" for whole amounts, "300.5" otherwise
fn amount_text(amount: Money) -> String {
    let cents = amount.cents();
    if cents % 100 == 0 {
        (cents / 100).to_string()
    } else {
        let text = format!("{}.{:02}", cents / 100, (cents % 100).abs());
        text.trim_end_matches('0').to_string()
    }
}

/// Bucket transactions, largest total first.
///
/// `GroupBy::None` yields a single "All Transactions" group. Transactions
/// without a member are grouped under "Unassigned".
pub fn group_by(transactions: &[Transaction], grouping: GroupBy) -> Vec<TransactionGroup> {
    if grouping == GroupBy::None {
        return vec![TransactionGroup {
            title: ALL_TRANSACTIONS.to_string(),
            transactions: transactions.to_vec(),
            total: transactions.iter().map(|t| t.amount).sum(),
        }];
    }

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<TransactionGroup> = Vec::new();

    for txn in transactions {
        let title = match grouping {
            GroupBy::Category => txn.category.clone(),
            GroupBy::Date => txn.date.format("%b %-d, %Y").to_string(),
            GroupBy::Member => txn
                .family_member
                .clone()
                .unwrap_or_else(|| UNASSIGNED.to_string()),
            GroupBy::None => ALL_TRANSACTIONS.to_string(),
        };

        let i = *index.entry(title.clone()).or_insert_with(|| {
            groups.push(TransactionGroup {
                title,
                transactions: Vec::new(),
                total: Money::zero(),
            });
            groups.len() - 1
        });
        groups[i].transactions.push(txn.clone());
        groups[i].total += txn.amount;
    }

    groups.sort_by(|a, b| b.total.cmp(&a.total));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::fixtures::*;

    #[test]
    fn test_within_window() {
        let window = DateWindow::between(date("2024-01-06"), date("2024-01-07"));
        let txns = within(&household(), &window);
        assert_eq!(txns.len(), 2);
        assert!(txns.iter().all(|t| t.is_expense()));

        assert_eq!(within(&household(), &DateWindow::unbounded()).len(), 3);
    }

    #[test]
    fn test_in_month() {
        let mut txns = household();
        txns.push(expense(10, "Food", "Mummy", "2024-02-01"));
        txns.push(expense(10, "Food", "Mummy", "2023-12-31"));

        let january = in_month(&txns, Month::parse("2024-01").unwrap());
        assert_eq!(january.len(), 3);
    }

    #[test]
    fn test_search_fields() {
        let txns = vec![
            expense(300, "Food", "Anuraag", "2024-01-06").with_description("Weekly groceries"),
            expense(45, "Travel", "Mummy", "2024-01-07"),
            Transaction::new(
                crate::models::TransactionKind::Expense,
                Money::from_cents(1250),
                "Others",
                date("2024-01-08"),
            ),
        ];

        assert_eq!(search(&txns, "FOOD").len(), 1);
        assert_eq!(search(&txns, "grocer").len(), 1);
        assert_eq!(search(&txns, "mummy")[0].category, "Travel");
        assert_eq!(search(&txns, "12.5")[0].category, "Others");
        assert_eq!(search(&txns, "45").len(), 1);
        assert_eq!(search(&txns, "  ").len(), 3);
        assert!(search(&txns, "rent").is_empty());
    }

    #[test]
    fn test_group_by_none() {
        let groups = group_by(&household(), GroupBy::None);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title, "All Transactions");
        assert_eq!(groups[0].total, Money::from_units(1500));
    }

    #[test]
    fn test_group_by_member_sorted_by_total() {
        let groups = group_by(&household(), GroupBy::Member);
        let titles: Vec<_> = groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, ["Anuraag", "Mummy"]);
        assert_eq!(groups[0].total, Money::from_units(1300));
    }

    #[test]
    fn test_group_by_date_and_category() {
        let groups = group_by(&household(), GroupBy::Date);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].title, "Jan 5, 2024");

        let groups = group_by(&household(), GroupBy::Category);
        assert_eq!(groups[0].title, "Salary");
        assert_eq!(groups[1].title, "Food");
        assert_eq!(groups[1].transactions.len(), 2);
    }

    #[test]
    fn test_unassigned_member_group() {
        let txns = vec![Transaction::new(
            crate::models::TransactionKind::Expense,
            Money::from_units(5),
            "Food",
            date("2024-01-01"),
        )];
        assert_eq!(group_by(&txns, GroupBy::Member)[0].title, "Unassigned");
    }

    #[test]
    fn test_parse_grouping() {
        assert_eq!("Category".parse::<GroupBy>().unwrap(), GroupBy::Category);
        assert_eq!("family".parse::<GroupBy>().unwrap(), GroupBy::Member);
        assert!("weekday".parse::<GroupBy>().is_err());
    }
}
