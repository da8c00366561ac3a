//! Weekday Spending Report

use crate::aggregation::{daily_averages, WeekdayAverage};
use crate::config::Settings;
use crate::error::LedgerResult;
use crate::models::DateWindow;
use crate::services::TransactionService;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct WeekdayReport {
    pub window: DateWindow,
    pub days: Vec<WeekdayAverage>,
    currency: String,
}

impl WeekdayReport {
    pub fn generate(storage: &Storage, settings: &Settings, window: DateWindow) -> LedgerResult<Self> {
        let transactions = TransactionService::new(storage, settings).in_window(&window)?;
        Ok(Self {
            window,
            days: daily_averages(&transactions),
            currency: settings.currency_symbol.clone(),
        })
    }

    /// The weekday with the highest average spend
    pub fn busiest(&self) -> Option<&WeekdayAverage> {
        self.days
            .iter()
            .filter(|d| d.count > 0)
            .max_by_key(|d| d.average)
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Spending by Weekday: {}\n", self.window));
        output.push_str(&"=".repeat(56));
        output.push('\n');

        if self.days.is_empty() {
            output.push_str("No transactions in this window.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<12} {:>14} {:>14} {:>8}\n",
            "Weekday", "Average", "Total", "Count"
        ));
        output.push_str(&"-".repeat(56));
        output.push('\n');
        for day in &self.days {
            output.push_str(&format!(
                "{:<12} {:>14} {:>14} {:>8}\n",
                day.weekday_name(),
                day.average.format_with_symbol(&self.currency),
                day.total.format_with_symbol(&self.currency),
                day.count
            ));
        }

        if let Some(day) = self.busiest() {
            output.push_str(&format!("\nHighest average spend: {}\n", day.weekday_name()));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Transaction, TransactionKind};
    use crate::services::test_support::create_test_storage;
    use chrono::{NaiveDate, Weekday};

    #[test]
    fn test_weekday_report() {
        let (_temp_dir, storage, settings) = create_test_storage();

        // 2024-01-06 and 2024-01-13 are Saturdays, 2024-01-07 a Sunday
        for (kind, units, on) in [
            (TransactionKind::Expense, 30, "2024-01-06"),
            (TransactionKind::Expense, 10, "2024-01-13"),
            (TransactionKind::Income, 500, "2024-01-07"),
        ] {
            let category = match kind {
                TransactionKind::Income => "Salary",
                TransactionKind::Expense => "Food",
            };
            let date = NaiveDate::parse_from_str(on, "%Y-%m-%d").unwrap();
            let txn = Transaction::new(kind, Money::from_units(units), category, date)
                .with_member("Mummy");
            storage.transactions.upsert(txn).unwrap();
        }

        let report = WeekdayReport::generate(&storage, &settings, DateWindow::unbounded()).unwrap();
        assert_eq!(report.days.len(), 2);
        assert_eq!(report.days[0].weekday, Weekday::Sun);
        assert_eq!(report.days[0].count, 0);
        assert_eq!(report.days[1].average, Money::from_units(20));
        assert_eq!(report.busiest().unwrap().weekday, Weekday::Sat);

        let output = report.format_terminal();
        assert!(output.contains("Saturday"));
        assert!(output.contains("Highest average spend: Saturday"));
    }

    #[test]
    fn test_empty_window() {
        let (_temp_dir, storage, settings) = create_test_storage();
        let report = WeekdayReport::generate(&storage, &settings, DateWindow::unbounded()).unwrap();
        assert!(report.busiest().is_none());
        assert!(report.format_terminal().contains("No transactions in this window."));
    }
}
