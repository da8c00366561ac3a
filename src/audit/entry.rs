//! One line of the audit log: who changed what, with before and after snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        })
    }
}

/// Kinds of ledger records that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Transaction,
    MonthlyPlan,
    Category,
    FamilyMember,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            EntityType::Transaction => "Transaction",
            EntityType::MonthlyPlan => "MonthlyPlan",
            EntityType::Category => "Category",
            EntityType::FamilyMember => "FamilyMember",
        })
    }
}

/// One line of the audit log.
///
/// `before` is recorded for updates and deletes, `after` for creates and
/// updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Short id, month key or category/member name
    pub entity_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// e.g. `amount: 30000 -> 32000, category: "Food" -> "Travel"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn new(operation: Operation, entity_type: EntityType, entity_id: String, entity_name: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            after: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Create, entity_type, entity_id.into(), entity_name)
        }
    }

    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
            ..Self::new(Operation::Update, entity_type, entity_id.into(), entity_name)
        }
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            before: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Delete, entity_type, entity_id.into(), entity_name)
        }
    }

    /// `[2024-01-05 10:00:00 UTC] CREATE Transaction txn-1a2b3c4d (Salary)`
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display() {
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(EntityType::MonthlyPlan.to_string(), "MonthlyPlan");
        assert_eq!(format!("{:<8}|", Operation::Create), "CREATE  |");
    }

    #[test]
    fn test_create_and_delete_entries() {
        let data = json!({"category": "Food", "amount": 30000});

        let created = AuditEntry::create(EntityType::Transaction, "txn-1a2b3c4d", None, &data);
        assert_eq!(created.operation, Operation::Create);
        assert!(created.before.is_none());
        assert_eq!(created.after, Some(data.clone()));

        let deleted = AuditEntry::delete(EntityType::Transaction, "txn-1a2b3c4d", None, &data);
        assert_eq!(deleted.operation, Operation::Delete);
        assert_eq!(deleted.before, Some(data));
        assert!(deleted.after.is_none());
    }

    #[test]
    fn test_update_entry() {
        let before = json!({"notes": ""});
        let after = json!({"notes": "school fees due"});

        let entry = AuditEntry::update(
            EntityType::MonthlyPlan,
            "2024-01",
            None,
            &before,
            &after,
            Some("notes changed".to_string()),
        );
        assert!(entry.before.is_some());
        assert!(entry.after.is_some());
        assert_eq!(entry.diff_summary.as_deref(), Some("notes changed"));
    }

    #[test]
    fn test_serialized_entity_type() {
        let entry = AuditEntry::create(EntityType::FamilyMember, "mem-1", None, &json!({}));
        let line = serde_json::to_string(&entry).unwrap();
        assert!(line.contains("\"family_member\""));

        let back: AuditEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(back.entity_type, EntityType::FamilyMember);
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::create(
            EntityType::Category,
            "Pets",
            Some("expense".to_string()),
            &json!({"name": "Pets"}),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("CREATE Category Pets (expense)"));
    }
}
