//! Derived summary of a transaction snapshot

use serde::Serialize;

use super::plan::{plan_variance, PlanVariance};
use super::timeline::{timeline, TimelinePoint};
use super::totals::{
    category_breakdown, member_breakdown, totals_by_type, CategoryShare, MemberTotals, MemberView,
};
use crate::models::{FamilyMember, Money, MonthlyPlan, Transaction, TransactionKind};

/// Every figure a dashboard shows, recomputed from its inputs on each call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSummary {
    pub total_income: Money,
    pub total_expenses: Money,
    /// `total_income - total_expenses`
    pub balance: Money,
    pub category_breakdown: Vec<CategoryShare>,
    pub member_breakdown: Vec<MemberTotals>,
    pub timeline: Vec<TimelinePoint>,
    /// Present only when a plan was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance: Option<PlanVariance>,
}

/// Compute the full summary of `transactions`, with plan variance when a
/// plan is given.
pub fn summarize(
    transactions: &[Transaction],
    members: &[FamilyMember],
    plan: Option<&MonthlyPlan>,
) -> DerivedSummary {
    let total_income = totals_by_type(transactions, TransactionKind::Income);
    let total_expenses = totals_by_type(transactions, TransactionKind::Expense);

    tracing::debug!(
        transactions = transactions.len(),
        members = members.len(),
        with_plan = plan.is_some(),
        "summarizing"
    );

    DerivedSummary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        category_breakdown: category_breakdown(transactions),
        member_breakdown: member_breakdown(transactions, members, MemberView::Chart),
        timeline: timeline(transactions),
        variance: plan.map(|p| plan_variance(p, transactions)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::fixtures::*;

    #[test]
    fn test_household_summary() {
        let summary = summarize(&household(), &roster(), None);

        assert_eq!(summary.total_income, Money::from_units(1000));
        assert_eq!(summary.total_expenses, Money::from_units(500));
        assert_eq!(summary.balance, Money::from_units(500));
        assert_eq!(summary.category_breakdown.len(), 1);
        assert_eq!(summary.member_breakdown.len(), 2);
        assert_eq!(summary.timeline.len(), 3);
        assert!(summary.variance.is_none());
    }

    #[test]
    fn test_summary_with_plan() {
        let plan = plan(&[("Salary", 1000)], &[("Food", 400)]);
        let summary = summarize(&household(), &roster(), Some(&plan));

        let variance = summary.variance.unwrap();
        assert_eq!(variance.variance.income, Money::zero());
        assert_eq!(variance.variance.expenses, Money::from_units(100));
    }

    #[test]
    fn test_empty_summary_is_all_zero() {
        let summary = summarize(&[], &roster(), None);
        assert_eq!(summary.total_income, Money::zero());
        assert_eq!(summary.balance, Money::zero());
        assert!(summary.category_breakdown.is_empty());
        assert!(summary.member_breakdown.is_empty());
        assert!(summary.timeline.is_empty());
    }
}
