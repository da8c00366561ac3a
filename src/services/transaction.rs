//! Transaction service
//!
//! Create, edit, delete and list transactions. Every write checks the
//! category against the registry for its kind and the member against the
//! roster before anything is stored.

use chrono::NaiveDate;

use crate::aggregation::{search, within};
use crate::audit::{generate_diff, EntityType};
use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{DateWindow, Money, Transaction, TransactionKind};
use crate::storage::Storage;

use super::{resolve_category, resolve_member};

pub struct TransactionService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

/// Options for listing transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub window: Option<DateWindow>,
    pub kind: Option<TransactionKind>,
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(mut self, window: DateWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionKind,
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub family_member: Option<String>,
    pub description: Option<String>,
    pub is_recurring: bool,
}

/// Fields to change on an existing transaction; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub kind: Option<TransactionKind>,
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub family_member: Option<String>,
    pub description: Option<String>,
    pub is_recurring: Option<bool>,
}

fn audit_name(txn: &Transaction) -> Option<String> {
    Some(format!("{} {} {}", txn.date, txn.kind, txn.category))
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Validate the record and the names it refers to, canonicalizing them
    fn check(&self, txn: &mut Transaction) -> LedgerResult<()> {
        txn.validate(self.settings.family_mode)
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        txn.category = resolve_category(self.storage, txn.kind, &txn.category)?;

        txn.family_member = match txn.family_member.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(resolve_member(self.storage, name)?),
            _ => None,
        };
        Ok(())
    }

    pub fn create(&self, input: CreateTransactionInput) -> LedgerResult<Transaction> {
        let mut txn = Transaction::new(input.kind, input.amount, input.category, input.date);
        txn.family_member = input.family_member;
        txn.description = input.description.unwrap_or_default().trim().to_string();
        txn.is_recurring = input.is_recurring;

        self.check(&mut txn)?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage
            .log_create(EntityType::Transaction, txn.id.short(), audit_name(&txn), &txn)?;

        tracing::info!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, "transaction added");
        Ok(txn)
    }

    /// Find by full or short id
    pub fn find(&self, identifier: &str) -> LedgerResult<Transaction> {
        self.storage
            .transactions
            .find(identifier)?
            .ok_or_else(|| LedgerError::transaction_not_found(identifier))
    }

    /// Transactions matching `filter`, newest first
    pub fn list(&self, filter: &TransactionFilter) -> LedgerResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.get_all()?;

        if let Some(window) = &filter.window {
            transactions = within(&transactions, window);
        }
        if let Some(kind) = filter.kind {
            transactions.retain(|t| t.kind == kind);
        }
        if let Some(query) = &filter.search {
            transactions = search(&transactions, query);
        }
        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Transactions dated inside `window`, newest first
    pub fn in_window(&self, window: &DateWindow) -> LedgerResult<Vec<Transaction>> {
        self.list(&TransactionFilter::new().window(*window))
    }

    pub fn update(&self, identifier: &str, input: UpdateTransactionInput) -> LedgerResult<Transaction> {
        let before = self.find(identifier)?;
        let mut txn = before.clone();

        if let Some(kind) = input.kind {
            txn.kind = kind;
        }
        if let Some(amount) = input.amount {
            txn.amount = amount;
        }
        if let Some(category) = input.category {
            txn.category = category;
        }
        if let Some(date) = input.date {
            txn.date = date;
        }
        if let Some(member) = input.family_member {
            txn.family_member = Some(member);
        }
        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }
        if let Some(recurring) = input.is_recurring {
            txn.is_recurring = recurring;
        }
        txn.touch();

        self.check(&mut txn)?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        let diff = match (serde_json::to_value(&before), serde_json::to_value(&txn)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.storage.log_update(
            EntityType::Transaction,
            txn.id.short(),
            audit_name(&txn),
            &before,
            &txn,
            diff,
        )?;

        tracing::info!(id = %txn.id, "transaction updated");
        Ok(txn)
    }

    pub fn delete(&self, identifier: &str) -> LedgerResult<Transaction> {
        let txn = self.find(identifier)?;

        self.storage.transactions.delete(txn.id)?;
        self.storage.transactions.save()?;

        self.storage
            .log_delete(EntityType::Transaction, txn.id.short(), audit_name(&txn), &txn)?;

        tracing::info!(id = %txn.id, "transaction deleted");
        Ok(txn)
    }
}
