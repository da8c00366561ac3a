//! Totals and breakdowns
//!
//! Sums by transaction kind, the expense breakdown by category, and income
//! and expenses per family member.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{FamilyMember, Money, Transaction, TransactionKind};

/// Expense total for one category and its share of all expenses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Money,
    /// Fraction of total expenses in `[0, 1]`
    pub share: f64,
}

/// Income and expenses attributed to one family member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberTotals {
    pub member: String,
    pub income: Money,
    pub expenses: Money,
    /// `income - expenses`
    pub balance: Money,
}

impl MemberTotals {
    pub fn has_activity(&self) -> bool {
        !self.income.is_zero() || !self.expenses.is_zero()
    }
}

/// Which members `member_breakdown` reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberView {
    /// Only members with income or expenses (charts)
    Chart,
    /// Every roster member, including idle ones
    Roster,
}

/// Sum of `amount` over transactions of `kind`. Zero for an empty slice.
pub fn totals_by_type(transactions: &[Transaction], kind: TransactionKind) -> Money {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Expense totals per category, largest first.
///
/// Equal totals keep the order in which their categories first appear.
/// Shares are 0 when there are no expenses.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, Money)> = Vec::new();

    for txn in transactions.iter().filter(|t| t.is_expense()) {
        match index.get(txn.category.as_str()) {
            Some(&i) => totals[i].1 += txn.amount,
            None => {
                index.insert(txn.category.as_str(), totals.len());
                totals.push((txn.category.as_str(), txn.amount));
            }
        }
    }

    let total_expenses: Money = totals.iter().map(|(_, total)| *total).sum();

    let mut breakdown: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category: category.to_string(),
            total,
            share: total.ratio_of(total_expenses),
        })
        .collect();

    // sort_by is stable
    breakdown.sort_by(|a, b| b.total.cmp(&a.total));
    breakdown
}

/// Income, expenses and balance for each roster member, in roster order.
///
/// Transactions naming someone outside the roster are not counted.
pub fn member_breakdown(
    transactions: &[Transaction],
    members: &[FamilyMember],
    view: MemberView,
) -> Vec<MemberTotals> {
    members
        .iter()
        .map(|member| {
            let mut income = Money::zero();
            let mut expenses = Money::zero();
            for txn in transactions.iter().filter(|t| t.is_for_member(&member.name)) {
                match txn.kind {
                    TransactionKind::Income => income += txn.amount,
                    TransactionKind::Expense => expenses += txn.amount,
                }
            }
            MemberTotals {
                member: member.name.clone(),
                income,
                expenses,
                balance: income - expenses,
            }
        })
        .filter(|totals| view == MemberView::Roster || totals.has_activity())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::fixtures::*;

    #[test]
    fn test_totals_saturate_on_oversized_amounts() {
        let huge = Money::parse("90000000000000000").unwrap();
        let mut a = expense(1, "Food", "Mummy", "2024-01-06");
        a.amount = huge;
        let b = a.clone();

        let total = totals_by_type(&[a, b], TransactionKind::Expense);
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_totals_of_empty_list_are_zero() {
        assert_eq!(totals_by_type(&[], TransactionKind::Income), Money::zero());
        assert_eq!(totals_by_type(&[], TransactionKind::Expense), Money::zero());
    }

    #[test]
    fn test_household_totals() {
        let txns = household();
        assert_eq!(totals_by_type(&txns, TransactionKind::Income), Money::from_units(1000));
        assert_eq!(totals_by_type(&txns, TransactionKind::Expense), Money::from_units(500));
    }

    #[test]
    fn test_household_category_breakdown() {
        let breakdown = category_breakdown(&household());
        assert_eq!(
            breakdown,
            vec![CategoryShare {
                category: "Food".into(),
                total: Money::from_units(500),
                share: 1.0,
            }]
        );
    }

    #[test]
    fn test_breakdown_shares_sum_to_one() {
        let txns = vec![
            expense(120, "Rent", "Mummy", "2024-01-01"),
            expense(33, "Food", "Mummy", "2024-01-02"),
            expense(47, "Travel", "Anuraag", "2024-01-03"),
            expense(1, "Others", "Anuraag", "2024-01-03"),
            income(999, "Salary", "Mummy", "2024-01-01"),
        ];
        let breakdown = category_breakdown(&txns);
        let sum: f64 = breakdown.iter().map(|c| c.share).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(breakdown.iter().all(|c| c.share.is_finite()));
    }

    #[test]
    fn test_breakdown_without_expenses_is_empty() {
        let txns = vec![income(10, "Salary", "Mummy", "2024-01-01")];
        assert!(category_breakdown(&txns).is_empty());
        assert!(category_breakdown(&[]).is_empty());
    }

    #[test]
    fn test_breakdown_orders_descending_with_stable_ties() {
        let txns = vec![
            expense(50, "Travel", "Mummy", "2024-01-01"),
            expense(80, "Rent", "Mummy", "2024-01-02"),
            expense(50, "Food", "Mummy", "2024-01-03"),
            expense(30, "Travel", "Mummy", "2024-01-04"),
        ];
        let names: Vec<_> = category_breakdown(&txns)
            .into_iter()
            .map(|c| c.category)
            .collect();
        // Travel 80 was seen before Rent 80; Food 50 comes last
        assert_eq!(names, ["Travel", "Rent", "Food"]);
    }

    #[test]
    fn test_household_member_breakdown() {
        let breakdown = member_breakdown(&household(), &roster(), MemberView::Chart);
        // roster order is Mummy, Anuraag
        assert_eq!(
            breakdown,
            vec![
                MemberTotals {
                    member: "Mummy".into(),
                    income: Money::zero(),
                    expenses: Money::from_units(200),
                    balance: Money::from_units(-200),
                },
                MemberTotals {
                    member: "Anuraag".into(),
                    income: Money::from_units(1000),
                    expenses: Money::from_units(300),
                    balance: Money::from_units(700),
                },
            ]
        );
    }

    #[test]
    fn test_member_views() {
        let txns = vec![expense(10, "Food", "Mummy", "2024-01-01")];
        let chart = member_breakdown(&txns, &roster(), MemberView::Chart);
        let full = member_breakdown(&txns, &roster(), MemberView::Roster);

        assert_eq!(chart.len(), 1);
        assert_eq!(full.len(), 2);
        assert_eq!(full[1].member, "Anuraag");
        assert!(!full[1].has_activity());
    }

    #[test]
    fn test_unknown_members_are_ignored() {
        let txns = vec![expense(10, "Food", "Stranger", "2024-01-01")];
        assert!(member_breakdown(&txns, &roster(), MemberView::Chart).is_empty());
    }
}
