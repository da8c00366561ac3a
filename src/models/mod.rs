//! Core data models for FamLedger
//!
//! This module contains the data structures of the household finance domain:
//! transactions, category registries, the family roster and monthly plans.

pub mod category;
pub mod family;
pub mod ids;
pub mod money;
pub mod period;
pub mod plan;
pub mod transaction;

pub use category::{CategoryInfo, CategoryRegistry, CategoryValidationError};
pub use family::{FamilyMember, MemberValidationError};
pub use ids::{EntryId, MemberId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use period::{DateRange, DateWindow, Month, PeriodParseError, RangePreset};
pub use plan::{MonthlyPlan, PlanEntry, PlanValidationError};
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
