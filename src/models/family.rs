//! Family roster
//!
//! Household members are an attribution dimension for transactions and plan
//! entries. The roster is read-only to the aggregation engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::MemberId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: MemberId,

    /// Display name; also the key stored on transactions
    pub name: String,

    /// Free-form role, e.g. "parent" or "child"
    pub role: String,

    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub color: String,
}

impl FamilyMember {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            role: role.into(),
            icon: "🙂".into(),
            color: "#3B82F6".into(),
        }
    }

    pub fn with_style(mut self, icon: impl Into<String>, color: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.color = color.into();
        self
    }

    /// The roster a fresh household starts with
    pub fn default_roster() -> Vec<FamilyMember> {
        vec![
            FamilyMember::new("Mummy", "parent").with_style("👩", "#EC4899"),
            FamilyMember::new("Anuraag", "child").with_style("👦", "#10B981"),
        ]
    }

    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.name.trim().is_empty() {
            return Err(MemberValidationError::EmptyName);
        }
        if self.name.len() > 50 {
            return Err(MemberValidationError::NameTooLong(self.name.len()));
        }
        if self.role.trim().is_empty() {
            return Err(MemberValidationError::EmptyRole);
        }
        Ok(())
    }
}

impl fmt::Display for FamilyMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemberValidationError {
    #[error("Member name cannot be empty")]
    EmptyName,

    #[error("Member name too long ({0} chars, max 50)")]
    NameTooLong(usize),

    #[error("Member role cannot be empty")]
    EmptyRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let roster = FamilyMember::default_roster();
        let names: Vec<_> = roster.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Mummy", "Anuraag"]);
    }

    #[test]
    fn test_validation() {
        assert!(FamilyMember::new("Papa", "parent").validate().is_ok());
        assert_eq!(
            FamilyMember::new(" ", "parent").validate(),
            Err(MemberValidationError::EmptyName)
        );
        assert_eq!(
            FamilyMember::new("Papa", "").validate(),
            Err(MemberValidationError::EmptyRole)
        );
    }
}
