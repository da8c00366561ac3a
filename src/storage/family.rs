//! Family roster repository
//!
//! Manages loading and saving the roster to `family.json`, in roster order.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::FamilyMember;

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct FamilyData {
    members: Vec<FamilyMember>,
}

impl Default for FamilyData {
    fn default() -> Self {
        Self {
            members: FamilyMember::default_roster(),
        }
    }
}

pub struct FamilyRepository {
    path: PathBuf,
    members: RwLock<Vec<FamilyMember>>,
}

impl FamilyRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            members: RwLock::new(FamilyMember::default_roster()),
        }
    }

    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: FamilyData = read_json(&self.path)?;

        let mut members = self
            .members
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *members = file_data.members;
        Ok(())
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        let file_data = FamilyData {
            members: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// The roster, in insertion order
    pub fn get_all(&self) -> Result<Vec<FamilyMember>, LedgerError> {
        let members = self
            .members
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(members.clone())
    }

    /// Find a member by name (case-insensitive) or member id
    pub fn find(&self, identifier: &str) -> Result<Option<FamilyMember>, LedgerError> {
        let identifier = identifier.trim();
        let members = self
            .members
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(members
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(identifier) || m.id.matches(identifier))
            .cloned())
    }

    /// Append a member; false if the name is already on the roster
    pub fn insert(&self, member: FamilyMember) -> Result<bool, LedgerError> {
        let mut members = self
            .members
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if members.iter().any(|m| m.name.eq_ignore_ascii_case(&member.name)) {
            return Ok(false);
        }
        members.push(member);
        Ok(true)
    }

    pub fn remove(&self, name: &str) -> Result<Option<FamilyMember>, LedgerError> {
        let mut members = self
            .members
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let pos = members.iter().position(|m| m.name.eq_ignore_ascii_case(name.trim()));
        Ok(pos.map(|i| members.remove(i)))
    }
}
