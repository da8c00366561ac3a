//! Monthly plan repository
//!
//! Plans are keyed by month and stored in `plans.json`, oldest month first.
//! A plan is always replaced as a whole.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Month, MonthlyPlan};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PlanData {
    plans: Vec<MonthlyPlan>,
}

pub struct PlanRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<Month, MonthlyPlan>>,
}

impl PlanRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load plans from disk. A month listed twice keeps its last plan.
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: PlanData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        data.extend(file_data.plans.into_iter().map(|p| (p.month, p)));
        Ok(())
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        let file_data = PlanData {
            plans: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, month: Month) -> Result<Option<MonthlyPlan>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.get(&month).cloned())
    }

    /// All plans, oldest month first
    pub fn get_all(&self) -> Result<Vec<MonthlyPlan>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.values().cloned().collect())
    }

    /// Store `plan` under its month, returning the plan it replaced
    pub fn replace(&self, plan: MonthlyPlan) -> Result<Option<MonthlyPlan>, LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(data.insert(plan.month, plan))
    }

    pub fn delete(&self, month: Month) -> Result<Option<MonthlyPlan>, LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(data.remove(&month))
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PlanEntry, TransactionKind};
    use tempfile::TempDir;

    fn month(s: &str) -> Month {
        Month::parse(s).unwrap()
    }

    #[test]
    fn test_replace_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let repo = PlanRepository::new(temp_dir.path().join("plans.json"));
        repo.load().unwrap();

        let plan = MonthlyPlan::empty(month("2024-01"), false);
        assert!(repo.replace(plan.clone()).unwrap().is_none());

        let updated = plan.with_entry(
            TransactionKind::Income,
            PlanEntry::new("Salary", Money::from_units(1000)),
        );
        let previous = repo.replace(updated.clone()).unwrap();
        assert_eq!(previous, Some(plan));
        assert_eq!(repo.get(month("2024-01")).unwrap(), Some(updated));
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_save_and_reload_sorted_by_month() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plans.json");
        let repo = PlanRepository::new(path.clone());
        repo.replace(MonthlyPlan::empty(month("2024-03"), true)).unwrap();
        repo.replace(MonthlyPlan::empty(month("2023-12"), true)).unwrap();
        repo.save().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"2023-12\""));

        let reloaded = PlanRepository::new(path);
        reloaded.load().unwrap();
        let months: Vec<_> = reloaded
            .get_all()
            .unwrap()
            .into_iter()
            .map(|p| p.month.to_string())
            .collect();
        assert_eq!(months, ["2023-12", "2024-03"]);
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repo = PlanRepository::new(temp_dir.path().join("plans.json"));
        repo.replace(MonthlyPlan::empty(month("2024-01"), false)).unwrap();

        assert!(repo.delete(month("2024-01")).unwrap().is_some());
        assert!(repo.delete(month("2024-01")).unwrap().is_none());
    }
}
