//! Planner Report
//!
//! Puts a month's plan next to the transactions recorded in that month.

use super::amount_cell;
use crate::aggregation::{
    category_progress, daily_progress, member_plan_comparison, plan_timeline,
    plan_variance, savings_projection, BudgetStatus, CategoryProgress, DailyProgress,
    MemberPlanComparison, PlanTimelinePoint, PlanVariance, SavingsProjection,
};
use crate::config::Settings;
use crate::error::LedgerResult;
use crate::models::{Money, Month, MonthlyPlan};
use crate::services::{FamilyService, PlanService, TransactionService};
use crate::storage::Storage;
use std::io::Write;

/// Category progress with its budget status
#[derive(Debug, Clone)]
pub struct CategoryRow {
    pub progress: CategoryProgress,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone)]
pub struct PlannerReport {
    pub month: Month,
    pub plan: MonthlyPlan,
    pub variance: PlanVariance,
    pub savings: SavingsProjection,
    pub categories: Vec<CategoryRow>,
    /// Empty unless the plan is a family plan
    pub members: Vec<MemberPlanComparison>,
    pub timeline: Vec<PlanTimelinePoint>,
    pub daily: Vec<DailyProgress>,
    currency: String,
}

impl PlannerReport {
    pub fn generate(storage: &Storage, settings: &Settings, month: Month) -> LedgerResult<Self> {
        let plan = PlanService::new(storage, settings).get_or_empty(month)?;
        let transactions = TransactionService::new(storage, settings).in_window(&month.window())?;

        let categories = category_progress(&plan, &transactions)
            .into_iter()
            .map(|progress| CategoryRow {
                status: progress.status(settings.near_budget_pct),
                progress,
            })
            .collect();

        let members = if plan.is_family_plan {
            let roster = FamilyService::new(storage).list()?;
            member_plan_comparison(&plan, &transactions, &roster)
        } else {
            Vec::new()
        };

        tracing::debug!(month = %month, transactions = transactions.len(), "planner generated");

        Ok(Self {
            month,
            variance: plan_variance(&plan, &transactions),
            savings: savings_projection(&plan, &transactions, settings.savings_goal_rate),
            categories,
            members,
            timeline: plan_timeline(&plan, &transactions),
            daily: daily_progress(&plan, &transactions),
            plan,
            currency: settings.currency_symbol.clone(),
        })
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency)
    }

    /// Categories at or past the near-budget threshold
    pub fn flagged_categories(&self) -> impl Iterator<Item = &CategoryRow> {
        self.categories
            .iter()
            .filter(|row| row.status != BudgetStatus::Under)
    }

    /// Format for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Monthly Planner: {}\n", self.month));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        if self.plan.is_empty() {
            output.push_str("No plan entries for this month.\n");
        }
        if !self.plan.notes.is_empty() {
            output.push_str(&format!("Notes: {}\n", self.plan.notes));
        }

        output.push_str(&format!(
            "\n{:<12} {:>14} {:>14} {:>14}\n",
            "", "Expected", "Actual", "Variance"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<12} {:>14} {:>14} {:>14}\n",
            "Income",
            self.money(self.variance.expected.income),
            self.money(self.variance.actual.income),
            self.money(self.variance.variance.income)
        ));
        output.push_str(&format!(
            "{:<12} {:>14} {:>14} {:>14}\n",
            "Expenses",
            self.money(self.variance.expected.expenses),
            self.money(self.variance.actual.expenses),
            self.money(self.variance.variance.expenses)
        ));

        output.push_str("\nSavings\n");
        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!("Projected: {:>14}\n", self.money(self.savings.projected)));
        output.push_str(&format!("Actual:    {:>14}\n", self.money(self.savings.actual)));
        output.push_str(&format!(
            "Goal:      {:>14}  ({:.1}% reached)\n",
            self.money(self.savings.goal),
            self.savings.progress_pct
        ));

        if !self.categories.is_empty() {
            output.push_str(&format!(
                "\n{:<24} {:>14} {:>14} {:>8} {:>7}\n",
                "Category", "Planned", "Spent", "%", "Status"
            ));
            output.push_str(&"-".repeat(72));
            output.push('\n');
            for row in &self.categories {
                output.push_str(&format!(
                    "{:<24} {:>14} {:>14} {:>7.1}% {:>7}\n",
                    row.progress.category,
                    self.money(row.progress.expected),
                    self.money(row.progress.actual),
                    row.progress.progress_pct,
                    row.status
                ));
            }
        }

        if !self.members.is_empty() {
            output.push_str(&format!(
                "\n{:<20} {:>14} {:>14} {:>14}\n",
                "Member", "Planned", "Spent", "Variance"
            ));
            output.push_str(&"-".repeat(72));
            output.push('\n');
            for member in &self.members {
                output.push_str(&format!(
                    "{:<20} {:>14} {:>14} {:>14}\n",
                    member.member,
                    self.money(member.expected),
                    self.money(member.actual),
                    self.money(member.variance)
                ));
            }
        }

        let over_days = self.daily.iter().filter(|d| d.variance.is_positive()).count();
        if let Some(first) = self.daily.first() {
            output.push_str(&format!(
                "\nDaily budget {} ; {} of {} days over\n",
                self.money(first.budget),
                over_days,
                self.daily.len()
            ));
        }

        output
    }

    /// Export as CSV: the category table followed by the day-by-day rows
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["section", "label", "expected", "actual", "variance", "status"])?;

        csv.write_record([
            "income".to_string(),
            self.month.to_string(),
            amount_cell(self.variance.expected.income),
            amount_cell(self.variance.actual.income),
            amount_cell(self.variance.variance.income),
            String::new(),
        ])?;
        csv.write_record([
            "expenses".to_string(),
            self.month.to_string(),
            amount_cell(self.variance.expected.expenses),
            amount_cell(self.variance.actual.expenses),
            amount_cell(self.variance.variance.expenses),
            String::new(),
        ])?;
        csv.write_record([
            "savings".to_string(),
            self.month.to_string(),
            amount_cell(self.savings.goal),
            amount_cell(self.savings.actual),
            amount_cell(self.savings.actual - self.savings.goal),
            String::new(),
        ])?;

        for row in &self.categories {
            csv.write_record([
                "category".to_string(),
                row.progress.category.clone(),
                amount_cell(row.progress.expected),
                amount_cell(row.progress.actual),
                amount_cell(row.progress.actual - row.progress.expected),
                row.status.to_string(),
            ])?;
        }

        for member in &self.members {
            csv.write_record([
                "member".to_string(),
                member.member.clone(),
                amount_cell(member.expected),
                amount_cell(member.actual),
                amount_cell(member.variance),
                String::new(),
            ])?;
        }

        for day in &self.daily {
            csv.write_record([
                "day".to_string(),
                day.day.to_string(),
                amount_cell(day.budget),
                amount_cell(day.actual),
                amount_cell(day.variance),
                String::new(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}
