//! Family roster service

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::FamilyMember;
use crate::storage::Storage;

pub struct FamilyService<'a> {
    storage: &'a Storage,
}

#[derive(Debug, Clone)]
pub struct MemberInput {
    pub name: String,
    pub role: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl<'a> FamilyService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The roster in display order
    pub fn list(&self) -> LedgerResult<Vec<FamilyMember>> {
        self.storage.family.get_all()
    }

    pub fn add(&self, input: MemberInput) -> LedgerResult<FamilyMember> {
        let mut member = FamilyMember::new(input.name.trim(), input.role.trim());
        if let Some(icon) = input.icon {
            member.icon = icon;
        }
        if let Some(color) = input.color {
            member.color = color;
        }

        member
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        if !self.storage.family.insert(member.clone())? {
            return Err(LedgerError::Duplicate {
                entity_type: "Family member",
                identifier: member.name,
            });
        }
        self.storage.family.save()?;

        self.storage.log_create(
            EntityType::FamilyMember,
            member.id.short(),
            Some(member.name.clone()),
            &member,
        )?;

        tracing::info!(name = %member.name, "family member added");
        Ok(member)
    }

    /// Remove a member from the roster. Transactions that name them are
    /// kept but no longer show up in per-member breakdowns.
    pub fn remove(&self, name: &str) -> LedgerResult<FamilyMember> {
        let member = self
            .storage
            .family
            .remove(name)?
            .ok_or_else(|| LedgerError::member_not_found(name.trim()))?;
        self.storage.family.save()?;

        self.storage.log_delete(
            EntityType::FamilyMember,
            member.id.short(),
            Some(member.name.clone()),
            &member,
        )?;

        if self.storage.transactions.uses_member(&member.name)? {
            tracing::warn!(name = %member.name, "removed member still has transactions");
        }
        Ok(member)
    }
}
