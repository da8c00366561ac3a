//! Monthly plan model
//!
//! A plan lists the income and expenses a household expects in one month.
//! Every mutation replaces the whole plan, so validation always covers every
//! entry.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::EntryId;
use super::money::Money;
use super::period::Month;
use super::transaction::TransactionKind;

/// One expected income or expense line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub id: EntryId,

    pub category: String,

    pub amount: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_member: Option<String>,

    #[serde(default)]
    pub description: String,

    /// Expected date; timelines place undated entries on the first of the month
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl PlanEntry {
    pub fn new(category: impl Into<String>, amount: Money) -> Self {
        Self {
            id: EntryId::new(),
            category: category.into(),
            amount,
            family_member: None,
            description: String::new(),
            date: None,
        }
    }

    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.family_member = Some(member.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn is_for_member(&self, member: &str) -> bool {
        self.family_member.as_deref() == Some(member)
    }
}

/// The expected income and expenses for a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPlan {
    pub month: Month,

    #[serde(default)]
    pub expected_income: Vec<PlanEntry>,

    #[serde(default)]
    pub expected_expenses: Vec<PlanEntry>,

    #[serde(default)]
    pub notes: String,

    /// When set, every entry must name a family member
    #[serde(default)]
    pub is_family_plan: bool,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl MonthlyPlan {
    /// An empty plan for `month`
    pub fn empty(month: Month, is_family_plan: bool) -> Self {
        Self {
            month,
            expected_income: Vec::new(),
            expected_expenses: Vec::new(),
            notes: String::new(),
            is_family_plan,
            updated_at: Utc::now(),
        }
    }

    pub fn entries(&self, kind: TransactionKind) -> &[PlanEntry] {
        match kind {
            TransactionKind::Income => &self.expected_income,
            TransactionKind::Expense => &self.expected_expenses,
        }
    }

    /// Sum of the expected amounts of one kind
    pub fn expected_total(&self, kind: TransactionKind) -> Money {
        self.entries(kind).iter().map(|e| e.amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.expected_income.is_empty() && self.expected_expenses.is_empty() && self.notes.is_empty()
    }

    /// Return a copy with `entry` appended to the `kind` list. In non-family
    /// plans the entry's member is cleared.
    pub fn with_entry(&self, kind: TransactionKind, mut entry: PlanEntry) -> Self {
        if !self.is_family_plan {
            entry.family_member = None;
        }
        let mut updated = self.clone();
        match kind {
            TransactionKind::Income => updated.expected_income.push(entry),
            TransactionKind::Expense => updated.expected_expenses.push(entry),
        }
        updated.updated_at = Utc::now();
        updated
    }

    /// Return a copy without the entry matching `id` (full or short form),
    /// along with the removed entry and its kind
    pub fn without_entry(&self, id: &str) -> Option<(Self, TransactionKind, PlanEntry)> {
        let mut updated = self.clone();
        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            let list = match kind {
                TransactionKind::Income => &mut updated.expected_income,
                TransactionKind::Expense => &mut updated.expected_expenses,
            };
            if let Some(pos) = list.iter().position(|e| e.id.matches(id)) {
                let removed = list.remove(pos);
                updated.updated_at = Utc::now();
                return Some((updated, kind, removed));
            }
        }
        None
    }

    /// Return a copy with replaced notes
    pub fn with_notes(&self, notes: impl Into<String>) -> Self {
        let mut updated = self.clone();
        updated.notes = notes.into();
        updated.updated_at = Utc::now();
        updated
    }

    /// Validate every entry of the plan
    pub fn validate(&self) -> Result<(), PlanValidationError> {
        for (kind, entry) in self
            .expected_income
            .iter()
            .map(|e| (TransactionKind::Income, e))
            .chain(self.expected_expenses.iter().map(|e| (TransactionKind::Expense, e)))
        {
            if entry.category.trim().is_empty() {
                return Err(PlanValidationError::MissingCategory { kind });
            }
            if !entry.amount.is_positive() {
                return Err(PlanValidationError::NonPositiveAmount {
                    kind,
                    category: entry.category.clone(),
                });
            }
            if entry.amount > Money::MAX_AMOUNT {
                return Err(PlanValidationError::AmountTooLarge {
                    kind,
                    category: entry.category.clone(),
                });
            }
            let has_member = entry
                .family_member
                .as_deref()
                .is_some_and(|m| !m.trim().is_empty());
            if self.is_family_plan && !has_member {
                return Err(PlanValidationError::MissingMember {
                    kind,
                    category: entry.category.clone(),
                });
            }
            if let Some(date) = entry.date {
                if !self.month.contains(date) {
                    return Err(PlanValidationError::DateOutsideMonth {
                        date,
                        month: self.month,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Validation errors for monthly plans
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanValidationError {
    #[error("{kind} entry is missing a category")]
    MissingCategory { kind: TransactionKind },

    #[error("{kind} entry '{category}' must have a positive amount")]
    NonPositiveAmount {
        kind: TransactionKind,
        category: String,
    },

    #[error("{kind} entry '{category}' exceeds the maximum amount")]
    AmountTooLarge {
        kind: TransactionKind,
        category: String,
    },

    #[error("{kind} entry '{category}' needs a family member in a family plan")]
    MissingMember {
        kind: TransactionKind,
        category: String,
    },

    #[error("entry date {date} is outside {month}")]
    DateOutsideMonth { date: NaiveDate, month: Month },
}
