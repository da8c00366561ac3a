//! Monthly plan service
//!
//! Every mutation builds a new plan value, validates the whole plan and
//! stores it in place of the old one. A month without a stored plan reads as
//! an empty plan.

use chrono::NaiveDate;

use crate::audit::{generate_diff, EntityType};
use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Month, MonthlyPlan, PlanEntry, TransactionKind};
use crate::storage::Storage;

use super::{resolve_category, resolve_member};

pub struct PlanService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

#[derive(Debug, Clone)]
pub struct PlanEntryInput {
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Money,
    pub family_member: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl<'a> PlanService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// The stored plan for `month`, or an empty one whose family flag
    /// follows the family-mode setting
    pub fn get_or_empty(&self, month: Month) -> LedgerResult<MonthlyPlan> {
        Ok(self
            .storage
            .plans
            .get(month)?
            .unwrap_or_else(|| MonthlyPlan::empty(month, self.settings.family_mode)))
    }

    /// Stored plans, oldest month first
    pub fn list(&self) -> LedgerResult<Vec<MonthlyPlan>> {
        self.storage.plans.get_all()
    }

    pub fn add_entry(&self, month: Month, input: PlanEntryInput) -> LedgerResult<(MonthlyPlan, PlanEntry)> {
        let before = self.storage.plans.get(month)?;
        let plan = before
            .clone()
            .unwrap_or_else(|| MonthlyPlan::empty(month, self.settings.family_mode));

        let mut entry = PlanEntry::new(
            resolve_category(self.storage, input.kind, &input.category)?,
            input.amount,
        );
        if let Some(member) = input.family_member.as_deref().map(str::trim) {
            if !member.is_empty() {
                entry.family_member = Some(resolve_member(self.storage, member)?);
            }
        }
        entry.description = input.description.unwrap_or_default().trim().to_string();
        entry.date = input.date;

        let updated = plan.with_entry(input.kind, entry);
        let Some(added) = updated.entries(input.kind).last().cloned() else {
            return Err(LedgerError::Plan("entry was not added".into()));
        };

        self.persist(before.as_ref(), &updated)?;
        tracing::info!(month = %month, kind = %input.kind, category = %added.category, "plan entry added");
        Ok((updated, added))
    }

    /// Remove an entry by full or short id
    pub fn remove_entry(&self, month: Month, entry_id: &str) -> LedgerResult<(MonthlyPlan, PlanEntry)> {
        let plan = self
            .storage
            .plans
            .get(month)?
            .ok_or_else(|| LedgerError::plan_not_found(month.to_string()))?;

        let (updated, kind, removed) = plan
            .without_entry(entry_id)
            .ok_or_else(|| LedgerError::entry_not_found(entry_id))?;

        self.persist(Some(&plan), &updated)?;
        tracing::info!(month = %month, kind = %kind, id = %removed.id, "plan entry removed");
        Ok((updated, removed))
    }

    pub fn set_notes(&self, month: Month, notes: &str) -> LedgerResult<MonthlyPlan> {
        let before = self.storage.plans.get(month)?;
        let plan = before
            .clone()
            .unwrap_or_else(|| MonthlyPlan::empty(month, self.settings.family_mode));

        let updated = plan.with_notes(notes.trim());
        self.persist(before.as_ref(), &updated)?;
        Ok(updated)
    }

    pub fn delete(&self, month: Month) -> LedgerResult<MonthlyPlan> {
        let plan = self
            .storage
            .plans
            .delete(month)?
            .ok_or_else(|| LedgerError::plan_not_found(month.to_string()))?;
        self.storage.plans.save()?;

        self.storage
            .log_delete(EntityType::MonthlyPlan, month.to_string(), None, &plan)?;
        tracing::info!(month = %month, "plan deleted");
        Ok(plan)
    }

    /// Validate `updated` as a whole, store it and audit the change
    fn persist(&self, before: Option<&MonthlyPlan>, updated: &MonthlyPlan) -> LedgerResult<()> {
        updated
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.plans.replace(updated.clone())?;
        self.storage.plans.save()?;

        let id = updated.month.to_string();
        match before {
            Some(before) => {
                let diff = match (serde_json::to_value(before), serde_json::to_value(updated)) {
                    (Ok(b), Ok(a)) => generate_diff(&b, &a),
                    _ => None,
                };
                self.storage
                    .log_update(EntityType::MonthlyPlan, id, None, before, updated, diff)
            }
            None => self
                .storage
                .log_create(EntityType::MonthlyPlan, id, None, updated),
        }
    }
}
