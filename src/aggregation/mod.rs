//! Budget aggregation engine
//!
//! Pure functions that turn transactions (and optionally a monthly plan) into
//! the figures dashboards and the planner display: totals, category and member
//! breakdowns, timelines, plan variance, savings projection, weekday averages
//! and per-category progress.
//!
//! Nothing here performs I/O or returns an error. Empty inputs yield zeros and
//! every ratio is guarded against a zero denominator, so no output carries a
//! NaN or an infinity. Inputs are validated before they reach this module (see
//! `services`).
//!
//! Sign convention: `variance = actual - expected`. A positive expense
//! variance means the household is over budget.

pub mod filter;
pub mod plan;
pub mod summary;
pub mod timeline;
pub mod totals;

pub use filter::{group_by, in_month, search, within, GroupBy, TransactionGroup};
pub use plan::{
    budget_status, category_progress, daily_progress, member_plan_comparison, plan_variance,
    savings_projection, BudgetStatus, CategoryProgress, DailyProgress, FlowTotals,
    MemberPlanComparison, PlanVariance, SavingsProjection,
};
pub use summary::{summarize, DerivedSummary};
pub use timeline::{daily_averages, plan_timeline, timeline, PlanTimelinePoint, TimelinePoint, WeekdayAverage};
pub use totals::{
    category_breakdown, member_breakdown, totals_by_type, CategoryShare, MemberTotals, MemberView,
};

/// Share of expected income treated as the monthly savings goal
pub const DEFAULT_SAVINGS_GOAL_RATE: f64 = 0.2;
