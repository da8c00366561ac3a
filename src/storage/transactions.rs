//! Transactions kept in `transactions.json`, keyed by id.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Transaction, TransactionId, TransactionKind};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
}

/// Newest first, then most recently created
fn newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk, replacing what is in memory
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        data.extend(file_data.transactions.into_iter().map(|t| (t.id, t)));
        Ok(())
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        let file_data = TransactionData {
            transactions: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Find a transaction by full UUID or short id (`txn-1a2b3c4d`, or a
    /// prefix of at least four hex digits). Ambiguous prefixes match nothing.
    pub fn find(&self, identifier: &str) -> Result<Option<Transaction>, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut matches = data.values().filter(|t| t.id.matches(identifier));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(Some(txn.clone())),
            _ => Ok(None),
        }
    }

    /// All transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Does any transaction of `kind` use `category`?
    pub fn uses_category(&self, kind: TransactionKind, category: &str) -> Result<bool, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .values()
            .any(|t| t.kind == kind && t.category.eq_ignore_ascii_case(category)))
    }

    /// Does any transaction name `member`?
    pub fn uses_member(&self, member: &str) -> Result<bool, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().any(|t| t.is_for_member(member)))
    }

    /// Store `txn`, replacing any transaction with the same id
    pub fn upsert(&self, txn: Transaction) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(txn.id, txn);
        Ok(())
    }

    pub fn delete(&self, id: TransactionId) -> Result<Option<Transaction>, LedgerError> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id))
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        (temp_dir, repo)
    }

    fn food(day: u32, units: i64) -> Transaction {
        Transaction::new(
            TransactionKind::Expense,
            Money::from_units(units),
            "Food",
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        )
        .with_member("Mummy")
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_get_all_is_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(food(3, 10)).unwrap();
        repo.upsert(food(9, 20)).unwrap();
        repo.upsert(food(5, 30)).unwrap();

        let days: Vec<_> = repo.get_all().unwrap().iter().map(|t| t.date).collect();
        assert!(days.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, repo) = create_test_repo();
        let txn = food(3, 10);
        let id = txn.id;
        repo.upsert(txn).unwrap();

        assert_eq!(repo.find(&id.short()).unwrap().unwrap().id, id);
        assert_eq!(repo.find(&id.as_uuid().to_string()).unwrap().unwrap().id, id);
        assert!(repo.find("txn-zzzz").unwrap().is_none());
        assert!(repo.find("ab").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let txn = food(3, 10);
        let id = txn.id;
        repo.upsert(txn.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(id).unwrap(), Some(txn));
    }

    #[test]
    fn test_delete_and_usage() {
        let (_temp_dir, repo) = create_test_repo();
        let txn = food(3, 10);
        let id = txn.id;
        repo.upsert(txn).unwrap();

        assert!(repo.uses_category(TransactionKind::Expense, "food").unwrap());
        assert!(!repo.uses_category(TransactionKind::Income, "Food").unwrap());
        assert!(repo.uses_member("Mummy").unwrap());

        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.delete(id).unwrap().is_none());
        assert!(!repo.uses_member("Mummy").unwrap());
    }
}
