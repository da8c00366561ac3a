//! Calendar months and reporting windows
//!
//! `Month` keys monthly plans (`2025-01`). `DateRange` describes the window a
//! report covers and resolves against a reference date into a `DateWindow`.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month, written `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month; `None` if `month` is outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month in local time
    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    /// Parse from `YYYY-MM`
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidMonth(s.to_string()))?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(PeriodParseError::InvalidMonth(s.to_string()));
        }
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidMonth(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidMonth(s.to_string()))?;
        Self::new(year, month).ok_or_else(|| PeriodParseError::InvalidMonth(s.to_string()))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        // constructor guarantees a valid month
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.next().start_date() - Duration::days(1)
    }

    pub fn days_in_month(&self) -> u32 {
        self.end_date().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The window covering this month
    pub fn window(&self) -> DateWindow {
        DateWindow::between(self.start_date(), self.end_date())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:04}-{:02}", self.year, self.month))
    }
}

impl FromStr for Month {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Month {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

/// Named reporting windows relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePreset {
    All,
    Daily,
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl FromStr for RangePreset {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "daily" | "day" | "today" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "quarterly" | "quarter" => Ok(Self::Quarterly),
            "yearly" | "year" => Ok(Self::Yearly),
            other => Err(PeriodParseError::InvalidRange(other.to_string())),
        }
    }
}

impl fmt::Display for RangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::All => "all",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        })
    }
}

/// A reporting window, either named or explicit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Preset(RangePreset),
    Custom { start: NaiveDate, end: NaiveDate },
}

impl DateRange {
    /// Resolve into concrete bounds relative to `today`
    pub fn resolve(&self, today: NaiveDate) -> DateWindow {
        match self {
            Self::Custom { start, end } => DateWindow::between(*start, *end),
            Self::Preset(preset) => match preset {
                RangePreset::All => DateWindow::unbounded(),
                RangePreset::Daily => DateWindow::between(today, today),
                RangePreset::Weekly => {
                    // weeks start on Sunday
                    let offset = today.weekday().num_days_from_sunday() as i64;
                    let start = today - Duration::days(offset);
                    DateWindow::between(start, start + Duration::days(6))
                }
                RangePreset::Monthly => Month::of(today).window(),
                RangePreset::Quarterly => {
                    let first = (today.month0() / 3) * 3 + 1;
                    let start = Month::new(today.year(), first).unwrap_or_else(|| Month::of(today));
                    DateWindow::between(start.start_date(), start.next().next().end_date())
                }
                RangePreset::Yearly => {
                    let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                    let end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
                    DateWindow::between(start, end)
                }
            },
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preset(preset) => write!(f, "{}", preset),
            Self::Custom { start, end } => write!(f, "{} to {}", start, end),
        }
    }
}

/// Inclusive date bounds; a missing bound is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(s), Some(e)) => write!(f, "{} to {}", s, e),
            (Some(s), None) => write!(f, "from {}", s),
            (None, Some(e)) => write!(f, "until {}", e),
            (None, None) => write!(f, "all time"),
        }
    }
}

/// Errors parsing months and ranges
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodParseError {
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid range '{0}', expected all, daily, weekly, monthly, quarterly or yearly")]
    InvalidRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_month_parse_and_display() {
        let m = Month::parse("2025-01").unwrap();
        assert_eq!(m.year(), 2025);
        assert_eq!(m.month(), 1);
        assert_eq!(m.to_string(), "2025-01");

        assert!(Month::parse("2025-13").is_err());
        assert!(Month::parse("25-01").is_err());
        assert!(Month::parse("2025").is_err());
    }

    #[test]
    fn test_month_bounds() {
        let feb = Month::parse("2024-02").unwrap();
        assert_eq!(feb.start_date(), d(2024, 2, 1));
        assert_eq!(feb.end_date(), d(2024, 2, 29));
        assert_eq!(feb.days_in_month(), 29);
        assert!(feb.contains(d(2024, 2, 15)));
        assert!(!feb.contains(d(2024, 3, 1)));
    }

    #[test]
    fn test_month_navigation() {
        let dec = Month::parse("2024-12").unwrap();
        assert_eq!(dec.next().to_string(), "2025-01");
        assert_eq!(dec.next().prev(), dec);
    }

    #[test]
    fn test_month_serde_as_string() {
        let m = Month::parse("2024-07").unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"2024-07\"");
        let back: Month = serde_json::from_str("\"2024-07\"").unwrap();
        assert_eq!(back, m);
        assert!(serde_json::from_str::<Month>("\"2024-00\"").is_err());
    }

    #[test]
    fn test_weekly_window_starts_sunday() {
        // 2024-01-10 is a Wednesday
        let window = DateRange::Preset(RangePreset::Weekly).resolve(d(2024, 1, 10));
        assert_eq!(window, DateWindow::between(d(2024, 1, 7), d(2024, 1, 13)));
    }

    #[test]
    fn test_quarterly_window() {
        let window = DateRange::Preset(RangePreset::Quarterly).resolve(d(2024, 5, 20));
        assert_eq!(window, DateWindow::between(d(2024, 4, 1), d(2024, 6, 30)));
    }

    #[test]
    fn test_window_contains() {
        let window = DateRange::Custom {
            start: d(2024, 1, 1),
            end: d(2024, 1, 31),
        }
        .resolve(d(2030, 1, 1));
        assert!(window.contains(d(2024, 1, 31)));
        assert!(!window.contains(d(2024, 2, 1)));
        assert!(DateWindow::unbounded().contains(d(1999, 1, 1)));
    }

    #[test]
    fn test_range_preset_parse() {
        assert_eq!("Weekly".parse::<RangePreset>(), Ok(RangePreset::Weekly));
        assert!("fortnightly".parse::<RangePreset>().is_err());
    }
}
