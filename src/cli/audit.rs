//! Audit log CLI command

use crate::audit::EntityType;
use crate::display::format_audit_entries;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::Storage;

fn parse_entity(s: &str) -> LedgerResult<EntityType> {
    match s.trim().to_lowercase().as_str() {
        "transaction" | "txn" => Ok(EntityType::Transaction),
        "plan" => Ok(EntityType::MonthlyPlan),
        "category" => Ok(EntityType::Category),
        "member" | "family" => Ok(EntityType::FamilyMember),
        other => Err(LedgerError::Validation(format!(
            "unknown record type '{}'; expected transaction, plan, category or member",
            other
        ))),
    }
}

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, limit: usize, entity: Option<&str>) -> LedgerResult<()> {
    let entries = match entity {
        Some(entity) => storage.audit().read_recent_for(parse_entity(entity)?, limit)?,
        None => storage.audit().read_recent(limit)?,
    };
    print!("{}", format_audit_entries(&entries));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entity() {
        assert_eq!(parse_entity("Plan").unwrap(), EntityType::MonthlyPlan);
        assert_eq!(parse_entity("family").unwrap(), EntityType::FamilyMember);
        assert!(parse_entity("account").unwrap_err().is_validation());
    }
}
