//! Timelines and weekday averages

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::models::{Money, MonthlyPlan, Transaction, TransactionKind};

/// Income and expenses recorded on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub income: Money,
    pub expense: Money,
}

/// Expected and actual figures on one date of a plan month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PlanTimelinePoint {
    pub date: NaiveDate,
    pub expected_income: Money,
    pub actual_income: Money,
    pub expected_expense: Money,
    pub actual_expense: Money,
}

/// Average expense for one day of the week
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeekdayAverage {
    #[serde(serialize_with = "serialize_weekday")]
    pub weekday: Weekday,
    pub average: Money,
    pub total: Money,
    pub count: usize,
}

impl WeekdayAverage {
    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

pub(crate) fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

fn serialize_weekday<S: serde::Serializer>(day: &Weekday, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(weekday_name(*day))
}

/// One point per distinct transaction date, ascending. Dates without
/// transactions get no point.
pub fn timeline(transactions: &[Transaction]) -> Vec<TimelinePoint> {
    let mut buckets: BTreeMap<NaiveDate, (Money, Money)> = BTreeMap::new();

    for txn in transactions {
        let bucket = buckets.entry(txn.date).or_default();
        match txn.kind {
            TransactionKind::Income => bucket.0 += txn.amount,
            TransactionKind::Expense => bucket.1 += txn.amount,
        }
    }

    buckets
        .into_iter()
        .map(|(date, (income, expense))| TimelinePoint {
            date,
            income,
            expense,
        })
        .collect()
}

/// Expected entries and actual transactions merged by date, ascending.
///
/// Undated plan entries fall on the first day of the plan month.
pub fn plan_timeline(plan: &MonthlyPlan, transactions: &[Transaction]) -> Vec<PlanTimelinePoint> {
    fn point(points: &mut BTreeMap<NaiveDate, PlanTimelinePoint>, date: NaiveDate) -> &mut PlanTimelinePoint {
        points.entry(date).or_insert_with(|| PlanTimelinePoint {
            date,
            ..Default::default()
        })
    }

    let mut points = BTreeMap::new();
    let first = plan.month.start_date();

    for entry in &plan.expected_income {
        point(&mut points, entry.date.unwrap_or(first)).expected_income += entry.amount;
    }
    for entry in &plan.expected_expenses {
        point(&mut points, entry.date.unwrap_or(first)).expected_expense += entry.amount;
    }
    for txn in transactions {
        let p = point(&mut points, txn.date);
        match txn.kind {
            TransactionKind::Income => p.actual_income += txn.amount,
            TransactionKind::Expense => p.actual_expense += txn.amount,
        }
    }

    points.into_values().collect()
}

/// Average expense per weekday, Sunday first.
///
/// Every weekday on which some transaction falls gets a row; only expenses
/// count towards its total, so an income-only weekday averages 0.
pub fn daily_averages(transactions: &[Transaction]) -> Vec<WeekdayAverage> {
    let mut buckets: [Option<(Money, usize)>; 7] = [None; 7];

    for txn in transactions {
        let slot = &mut buckets[txn.date.weekday().num_days_from_sunday() as usize];
        let (total, count) = slot.get_or_insert((Money::zero(), 0));
        if txn.is_expense() {
            *total += txn.amount;
            *count += 1;
        }
    }

    let mut day = Weekday::Sun;
    let mut averages = Vec::new();
    for bucket in buckets {
        if let Some((total, count)) = bucket {
            let average = if count > 0 {
                total.scale(1.0 / count as f64)
            } else {
                Money::zero()
            };
            averages.push(WeekdayAverage {
                weekday: day,
                average,
                total,
                count,
            });
        }
        day = day.succ();
    }
    averages
}
