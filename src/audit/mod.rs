//! Audit log for FamLedger
//!
//! Every create, update and delete of a transaction, monthly plan, category
//! or family member is appended to `audit.log` as one JSON line with the
//! record's before and after state.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
