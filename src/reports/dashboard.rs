//! Dashboard Report
//!
//! Totals, category and member breakdowns, the activity timeline and weekday
//! spending averages for a date window. When the window is exactly one
//! calendar month that has a stored plan, the plan variance is included as
//! well.

use super::amount_cell;
use crate::aggregation::{daily_averages, summarize, DerivedSummary, WeekdayAverage};
use crate::config::Settings;
use crate::error::LedgerResult;
use crate::models::{DateWindow, Money, Month};
use crate::services::{FamilyService, TransactionService};
use crate::storage::Storage;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub window: DateWindow,
    pub summary: DerivedSummary,
    pub weekdays: Vec<WeekdayAverage>,
    pub transaction_count: usize,
    /// Month of the plan compared against, if any
    pub plan_month: Option<Month>,
    currency: String,
}

/// The month `window` spans exactly, first day to last
fn whole_month(window: &DateWindow) -> Option<Month> {
    let month = Month::of(window.start?);
    (month.window() == *window).then_some(month)
}

impl DashboardReport {
    pub fn generate(storage: &Storage, settings: &Settings, window: DateWindow) -> LedgerResult<Self> {
        let transactions = TransactionService::new(storage, settings).in_window(&window)?;
        let members = FamilyService::new(storage).list()?;

        let plan = match whole_month(&window) {
            Some(month) => storage.plans.get(month)?,
            None => None,
        };

        let summary = summarize(&transactions, &members, plan.as_ref());
        tracing::debug!(window = %window, transactions = transactions.len(), "dashboard generated");

        Ok(Self {
            window,
            weekdays: daily_averages(&transactions),
            transaction_count: transactions.len(),
            plan_month: plan.map(|p| p.month),
            summary,
            currency: settings.currency_symbol.clone(),
        })
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency)
    }

    /// Format for terminal display
    pub fn format_terminal(&self) -> String {
        let summary = &self.summary;
        let mut output = String::new();

        output.push_str(&format!("Dashboard: {}\n", self.window));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!("Total Income:   {:>14}\n", self.money(summary.total_income)));
        output.push_str(&format!("Total Expenses: {:>14}\n", self.money(summary.total_expenses)));
        output.push_str(&format!("Balance:        {:>14}\n", self.money(summary.balance)));
        output.push_str(&format!("Transactions:   {:>14}\n", self.transaction_count));

        if summary.category_breakdown.is_empty() {
            output.push_str("\nNo expenses in this window.\n");
        } else {
            output.push_str(&format!("\n{:<30} {:>14} {:>8}\n", "Category", "Spent", "%"));
            output.push_str(&"-".repeat(72));
            output.push('\n');
            for share in &summary.category_breakdown {
                output.push_str(&format!(
                    "{:<30} {:>14} {:>7.1}%\n",
                    share.category,
                    self.money(share.total),
                    share.share * 100.0
                ));
            }
        }

        if !summary.member_breakdown.is_empty() {
            output.push_str(&format!(
                "\n{:<20} {:>14} {:>14} {:>14}\n",
                "Member", "Income", "Expenses", "Balance"
            ));
            output.push_str(&"-".repeat(72));
            output.push('\n');
            for member in &summary.member_breakdown {
                output.push_str(&format!(
                    "{:<20} {:>14} {:>14} {:>14}\n",
                    member.member,
                    self.money(member.income),
                    self.money(member.expenses),
                    self.money(member.balance)
                ));
            }
        }

        if let (Some(month), Some(variance)) = (self.plan_month, &summary.variance) {
            output.push_str(&format!("\nPlan {}\n", month));
            output.push_str(&"-".repeat(72));
            output.push('\n');
            output.push_str(&format!(
                "{:<12} {:>14} {:>14} {:>14}\n",
                "", "Expected", "Actual", "Variance"
            ));
            output.push_str(&format!(
                "{:<12} {:>14} {:>14} {:>14}\n",
                "Income",
                self.money(variance.expected.income),
                self.money(variance.actual.income),
                self.money(variance.variance.income)
            ));
            output.push_str(&format!(
                "{:<12} {:>14} {:>14} {:>14}\n",
                "Expenses",
                self.money(variance.expected.expenses),
                self.money(variance.actual.expenses),
                self.money(variance.variance.expenses)
            ));
            if variance.is_over_budget() {
                output.push_str("Spending is over plan.\n");
            }
        }

        if !self.weekdays.is_empty() {
            output.push_str(&format!("\n{:<12} {:>14} {:>8}\n", "Weekday", "Avg spend", "Count"));
            output.push_str(&"-".repeat(72));
            output.push('\n');
            for day in &self.weekdays {
                output.push_str(&format!(
                    "{:<12} {:>14} {:>8}\n",
                    day.weekday_name(),
                    self.money(day.average),
                    day.count
                ));
            }
        }

        output
    }

    /// Export as CSV: one row per figure, tagged with its section.
    ///
    /// Weekday rows carry the average spend in the `expenses` column and the
    /// number of expenses in `count`.
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let summary = &self.summary;
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["section", "label", "income", "expenses", "balance", "share", "count"])?;

        csv.write_record([
            "totals".to_string(),
            self.window.to_string(),
            amount_cell(summary.total_income),
            amount_cell(summary.total_expenses),
            amount_cell(summary.balance),
            String::new(),
            self.transaction_count.to_string(),
        ])?;

        for share in &summary.category_breakdown {
            csv.write_record([
                "category".to_string(),
                share.category.clone(),
                String::new(),
                amount_cell(share.total),
                String::new(),
                format!("{:.4}", share.share),
                String::new(),
            ])?;
        }

        for member in &summary.member_breakdown {
            csv.write_record([
                "member".to_string(),
                member.member.clone(),
                amount_cell(member.income),
                amount_cell(member.expenses),
                amount_cell(member.balance),
                String::new(),
                String::new(),
            ])?;
        }

        for point in &summary.timeline {
            csv.write_record([
                "timeline".to_string(),
                point.date.to_string(),
                amount_cell(point.income),
                amount_cell(point.expense),
                amount_cell(point.income - point.expense),
                String::new(),
                String::new(),
            ])?;
        }

        if let (Some(month), Some(variance)) = (self.plan_month, &summary.variance) {
            for (section, flows) in [
                ("plan_expected", variance.expected),
                ("plan_actual", variance.actual),
                ("plan_variance", variance.variance),
            ] {
                csv.write_record([
                    section.to_string(),
                    month.to_string(),
                    amount_cell(flows.income),
                    amount_cell(flows.expenses),
                    amount_cell(flows.net()),
                    String::new(),
                    String::new(),
                ])?;
            }
        }

        for day in &self.weekdays {
            csv.write_record([
                "weekday".to_string(),
                day.weekday_name().to_string(),
                String::new(),
                amount_cell(day.average),
                String::new(),
                String::new(),
                day.count.to_string(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}
