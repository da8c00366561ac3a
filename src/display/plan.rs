//! Monthly plan display formatting

use tabled::Tabled;

use super::{render_table, truncate};
use crate::models::{MonthlyPlan, PlanEntry, TransactionKind};

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

fn entry_row(kind: TransactionKind, entry: &PlanEntry, symbol: &str) -> EntryRow {
    EntryRow {
        id: entry.id.short(),
        kind: kind.to_string(),
        category: entry.category.clone(),
        member: entry.family_member.clone().unwrap_or_default(),
        date: entry.date.map(|d| d.to_string()).unwrap_or_default(),
        amount: entry.amount.format_with_symbol(symbol),
        description: truncate(&entry.description, 30),
    }
}

/// Format a plan with its entries and expected totals
pub fn format_plan(plan: &MonthlyPlan, symbol: &str) -> String {
    let mut output = String::new();

    let family = if plan.is_family_plan { " (family plan)" } else { "" };
    output.push_str(&format!("Plan for {}{}\n", plan.month, family));
    if !plan.notes.is_empty() {
        output.push_str(&format!("Notes: {}\n", plan.notes));
    }

    if plan.expected_income.is_empty() && plan.expected_expenses.is_empty() {
        output.push_str("\nNo entries yet. Add one with 'famledger plan add'.\n");
        return output;
    }

    let rows = [TransactionKind::Income, TransactionKind::Expense]
        .into_iter()
        .flat_map(|kind| plan.entries(kind).iter().map(move |e| (kind, e)))
        .map(|(kind, e)| entry_row(kind, e, symbol))
        .collect();
    output.push_str(&render_table(rows));
    output.push('\n');

    let income = plan.expected_total(TransactionKind::Income);
    let expenses = plan.expected_total(TransactionKind::Expense);
    output.push_str(&format!("Expected income:   {}\n", income.format_with_symbol(symbol)));
    output.push_str(&format!("Expected expenses: {}\n", expenses.format_with_symbol(symbol)));
    output.push_str(&format!(
        "Projected savings: {}\n",
        (income - expenses).format_with_symbol(symbol)
    ));

    output
}

/// One line per stored plan
pub fn format_plan_list(plans: &[MonthlyPlan], symbol: &str) -> String {
    if plans.is_empty() {
        return "No plans saved.\n".to_string();
    }

    let mut output = String::new();
    for plan in plans {
        output.push_str(&format!(
            "{}  {:>3} entries  income {:>12}  expenses {:>12}\n",
            plan.month,
            plan.expected_income.len() + plan.expected_expenses.len(),
            plan.expected_total(TransactionKind::Income).format_with_symbol(symbol),
            plan.expected_total(TransactionKind::Expense).format_with_symbol(symbol)
        ));
    }
    output
}
