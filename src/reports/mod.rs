//! Reports module for FamLedger
//!
//! Each report gathers its inputs through the services, runs them through the
//! aggregation engine and renders plain-text tables or CSV.

pub mod dashboard;
pub mod planner;
pub mod weekdays;

pub use dashboard::DashboardReport;
pub use planner::{CategoryRow, PlannerReport};
pub use weekdays::WeekdayReport;

use crate::models::Money;

/// Plain decimal amount for spreadsheet cells
pub(crate) fn amount_cell(amount: Money) -> String {
    format!("{:.2}", amount.as_f64())
}
