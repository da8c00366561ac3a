//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the clap
//! argument parsing with the service layer. Handlers receive the `Storage`
//! and `Settings` built in `main`.

pub mod audit;
pub mod category;
pub mod export;
pub mod family;
pub mod plan;
pub mod report;
pub mod transaction;

pub use audit::handle_audit_command;
pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, ExportFormat};
pub use family::{handle_family_command, FamilyCommands};
pub use plan::{handle_plan_command, PlanCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{Local, NaiveDate};
use clap::Args;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{DateRange, DateWindow, Money, Month, RangePreset, TransactionKind};

/// Reporting window options shared by listing and report commands
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// Named range: all, daily, weekly, monthly, quarterly, yearly
    #[arg(short, long, conflicts_with_all = ["start", "end"])]
    pub range: Option<String>,

    /// Window start (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    pub start: Option<String>,

    /// Window end (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    pub end: Option<String>,
}

impl RangeArgs {
    /// Resolve against today, falling back to the configured default range
    pub fn resolve(&self, settings: &Settings) -> LedgerResult<DateWindow> {
        self.resolve_on(settings, Local::now().date_naive())
    }

    pub fn resolve_on(&self, settings: &Settings, today: NaiveDate) -> LedgerResult<DateWindow> {
        let range = match (&self.range, &self.start, &self.end) {
            (_, Some(start), Some(end)) => {
                let (start, end) = (parse_date(start)?, parse_date(end)?);
                if start > end {
                    return Err(LedgerError::Validation(format!(
                        "start {} is after end {}",
                        start, end
                    )));
                }
                DateRange::Custom { start, end }
            }
            (Some(name), _, _) => DateRange::Preset(
                name.parse::<RangePreset>()
                    .map_err(|e| LedgerError::Validation(e.to_string()))?,
            ),
            _ => DateRange::Preset(settings.default_range),
        };
        Ok(range.resolve(today))
    }
}

pub(crate) fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s)))
}

pub(crate) fn parse_amount(s: &str) -> LedgerResult<Money> {
    Money::parse(s).map_err(|e| LedgerError::Validation(e.to_string()))
}

pub(crate) fn parse_kind(s: &str) -> LedgerResult<TransactionKind> {
    s.parse().map_err(LedgerError::Validation)
}

/// The named month, or the current one
pub(crate) fn parse_month(s: Option<&str>) -> LedgerResult<Month> {
    match s {
        Some(s) => Month::parse(s).map_err(|e| LedgerError::Validation(e.to_string())),
        None => Ok(Month::current()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    #[test]
    fn test_default_range_comes_from_settings() {
        let settings = Settings::default();
        let window = RangeArgs::default().resolve_on(&settings, today()).unwrap();
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2024, 3, 31));
    }

    #[test]
    fn test_named_and_custom_ranges() {
        let settings = Settings::default();

        let args = RangeArgs {
            range: Some("all".into()),
            ..Default::default()
        };
        assert_eq!(args.resolve_on(&settings, today()).unwrap(), DateWindow::unbounded());

        let args = RangeArgs {
            range: None,
            start: Some("2024-01-01".into()),
            end: Some("2024-01-31".into()),
        };
        let window = args.resolve_on(&settings, today()).unwrap();
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2024, 1, 31));

        let args = RangeArgs {
            range: None,
            start: Some("2024-02-01".into()),
            end: Some("2024-01-31".into()),
        };
        assert!(args.resolve_on(&settings, today()).unwrap_err().is_validation());

        let args = RangeArgs {
            range: Some("fortnightly".into()),
            ..Default::default()
        };
        assert!(args.resolve_on(&settings, today()).is_err());
    }

    #[test]
    fn test_parsers() {
        assert_eq!(parse_amount("1,250.50").unwrap(), Money::from_cents(125_050));
        assert!(parse_amount("abc").is_err());
        assert!(parse_date("2024-13-01").is_err());
        assert_eq!(parse_kind("Expense").unwrap(), TransactionKind::Expense);
        assert_eq!(parse_month(Some("2024-02")).unwrap().to_string(), "2024-02");
        assert!(parse_month(Some("2024/02")).is_err());
    }
}
