//! Plan versus actual
//!
//! Compares a monthly plan with the transactions recorded against it.

use std::collections::HashMap;
use std::ops::Sub;

use chrono::Datelike;
use serde::Serialize;

use super::totals::totals_by_type;
use crate::models::{FamilyMember, Money, MonthlyPlan, Transaction, TransactionKind};

/// Income and expenses side by side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FlowTotals {
    pub income: Money,
    pub expenses: Money,
}

impl FlowTotals {
    /// Expected totals of a plan
    pub fn expected(plan: &MonthlyPlan) -> Self {
        Self {
            income: plan.expected_total(TransactionKind::Income),
            expenses: plan.expected_total(TransactionKind::Expense),
        }
    }

    /// Actual totals of a transaction list
    pub fn actual(transactions: &[Transaction]) -> Self {
        Self {
            income: totals_by_type(transactions, TransactionKind::Income),
            expenses: totals_by_type(transactions, TransactionKind::Expense),
        }
    }

    /// `income - expenses`
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }
}

impl Sub for FlowTotals {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            income: self.income - other.income,
            expenses: self.expenses - other.expenses,
        }
    }
}

/// Expected, actual and `actual - expected`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanVariance {
    pub expected: FlowTotals,
    pub actual: FlowTotals,
    pub variance: FlowTotals,
}

impl PlanVariance {
    /// Spending exceeded the plan
    pub fn is_over_budget(&self) -> bool {
        self.variance.expenses.is_positive()
    }

    /// Income fell short of the plan
    pub fn is_income_short(&self) -> bool {
        self.variance.income.is_negative()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsProjection {
    /// Expected income minus expected expenses
    pub projected: Money,
    /// Actual income minus actual expenses
    pub actual: Money,
    /// Expected income times the goal rate
    pub goal: Money,
    /// `actual / goal * 100`, 0 when the goal is not positive
    pub progress_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryProgress {
    pub category: String,
    pub expected: Money,
    pub actual: Money,
    /// `actual / expected * 100`, 0 when nothing was planned
    pub progress_pct: f64,
}

impl CategoryProgress {
    /// Budget status of this category. Spending in a category with nothing
    /// planned is over budget.
    pub fn status(&self, near_pct: f64) -> BudgetStatus {
        if !self.expected.is_positive() && self.actual.is_positive() {
            BudgetStatus::Over
        } else {
            budget_status(self.progress_pct, near_pct)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberPlanComparison {
    pub member: String,
    pub expected: Money,
    pub actual: Money,
    pub variance: Money,
    pub progress_pct: f64,
}

/// Planned versus actual spending for one day of the plan month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyProgress {
    pub day: u32,
    pub budget: Money,
    pub actual: Money,
    pub variance: Money,
}

/// Where a progress percentage sits relative to its budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Under,
    Near,
    Over,
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Under => "under",
            Self::Near => "near",
            Self::Over => "over",
        })
    }
}

/// Classify a progress percentage: over above 100, near from `near_pct`
pub fn budget_status(progress_pct: f64, near_pct: f64) -> BudgetStatus {
    if progress_pct > 100.0 {
        BudgetStatus::Over
    } else if progress_pct >= near_pct {
        BudgetStatus::Near
    } else {
        BudgetStatus::Under
    }
}

/// Expected totals from the plan, actual totals from the transactions, and
/// their difference.
pub fn plan_variance(plan: &MonthlyPlan, transactions: &[Transaction]) -> PlanVariance {
    let expected = FlowTotals::expected(plan);
    let actual = FlowTotals::actual(transactions);
    PlanVariance {
        expected,
        actual,
        variance: actual - expected,
    }
}

/// Projected and actual savings against a goal of `goal_rate` times the
/// expected income.
pub fn savings_projection(
    plan: &MonthlyPlan,
    transactions: &[Transaction],
    goal_rate: f64,
) -> SavingsProjection {
    let variance = plan_variance(plan, transactions);
    let actual = variance.actual.net();
    let goal = variance.expected.income.scale(goal_rate);

    SavingsProjection {
        projected: variance.expected.net(),
        actual,
        goal,
        progress_pct: actual.percent_of(goal),
    }
}

/// Planned and actual spending for every category that is either planned or
/// spent in. Planned categories come first in plan order, then unplanned ones
/// in the order they were first spent in.
pub fn category_progress(plan: &MonthlyPlan, transactions: &[Transaction]) -> Vec<CategoryProgress> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<(&str, Money, Money)> = Vec::new();

    for entry in &plan.expected_expenses {
        let i = *index.entry(entry.category.as_str()).or_insert_with(|| {
            rows.push((entry.category.as_str(), Money::zero(), Money::zero()));
            rows.len() - 1
        });
        rows[i].1 += entry.amount;
    }

    for txn in transactions.iter().filter(|t| t.is_expense()) {
        let i = *index.entry(txn.category.as_str()).or_insert_with(|| {
            rows.push((txn.category.as_str(), Money::zero(), Money::zero()));
            rows.len() - 1
        });
        rows[i].2 += txn.amount;
    }

    rows.into_iter()
        .map(|(category, expected, actual)| CategoryProgress {
            category: category.to_string(),
            expected,
            actual,
            progress_pct: actual.percent_of(expected),
        })
        .collect()
}

/// Planned versus actual spending per roster member
pub fn member_plan_comparison(
    plan: &MonthlyPlan,
    transactions: &[Transaction],
    members: &[FamilyMember],
) -> Vec<MemberPlanComparison> {
    members
        .iter()
        .map(|member| {
            let expected: Money = plan
                .expected_expenses
                .iter()
                .filter(|e| e.is_for_member(&member.name))
                .map(|e| e.amount)
                .sum();
            let actual: Money = transactions
                .iter()
                .filter(|t| t.is_expense() && t.is_for_member(&member.name))
                .map(|t| t.amount)
                .sum();
            MemberPlanComparison {
                member: member.name.clone(),
                expected,
                actual,
                variance: actual - expected,
                progress_pct: actual.percent_of(expected),
            }
        })
        .collect()
}

/// One row per day of the plan month: the even daily share of expected
/// expenses next to what was spent that day. Transactions outside the plan
/// month are ignored.
pub fn daily_progress(plan: &MonthlyPlan, transactions: &[Transaction]) -> Vec<DailyProgress> {
    let days = plan.month.days_in_month();
    let expected = plan.expected_total(TransactionKind::Expense);
    let budget = expected.scale(1.0 / days as f64);

    let mut spent = vec![Money::zero(); days as usize];
    for txn in transactions
        .iter()
        .filter(|t| t.is_expense() && plan.month.contains(t.date))
    {
        spent[txn.date.day0() as usize] += txn.amount;
    }

    spent
        .into_iter()
        .enumerate()
        .map(|(i, actual)| DailyProgress {
            day: i as u32 + 1,
            budget,
            actual,
            variance: actual - budget,
        })
        .collect()
}
