//! Transaction model
//!
//! A single recorded income or expense event, attributed to a category and,
//! for households, to a family member.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction. Also selects which category registry the
/// transaction's category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        })
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "exp" | "out" => Ok(Self::Expense),
            other => Err(format!(
                "unknown transaction type '{}', expected 'income' or 'expense'",
                other
            )),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Always non-negative; the direction lives in `kind`
    pub amount: Money,

    /// Category name, looked up in the registry for `kind`
    pub category: String,

    pub date: NaiveDate,

    /// Household member the transaction is attributed to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_member: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub is_recurring: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        kind: TransactionKind,
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            kind,
            amount,
            category: category.into(),
            date,
            family_member: None,
            description: String::new(),
            is_recurring: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style helper to attribute the transaction to a member
    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.family_member = Some(member.into());
        self
    }

    /// Builder-style helper to set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Whether the transaction is attributed to `member` (case-sensitive, the
    /// roster stores canonical names)
    pub fn is_for_member(&self, member: &str) -> bool {
        self.family_member.as_deref() == Some(member)
    }

    /// Signed amount: positive for income, negative for expenses
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Mark the transaction as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the record's own invariants. Registry and roster membership
    /// are checked by the transaction service.
    pub fn validate(&self, require_member: bool) -> Result<(), TransactionValidationError> {
        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::MissingCategory);
        }

        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > Money::MAX_AMOUNT {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }

        let has_member = self
            .family_member
            .as_deref()
            .is_some_and(|m| !m.trim().is_empty());
        if require_member && !has_member {
            return Err(TransactionValidationError::MissingMember);
        }

        if self.description.len() > 200 {
            return Err(TransactionValidationError::DescriptionTooLong(
                self.description.len(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date, self.kind, self.category, self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionValidationError {
    #[error("Category is required")]
    MissingCategory,

    #[error("Amount must be a positive number, got {0}")]
    NonPositiveAmount(Money),

    #[error("Amount {0} exceeds the maximum of {max}", max = Money::MAX_AMOUNT)]
    AmountTooLarge(Money),

    #[error("Family member is required")]
    MissingMember,

    #[error("Description too long ({0} chars, max 200)")]
    DescriptionTooLong(usize),
}
