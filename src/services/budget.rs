//! Budget store
//!
//! Owns the recurring cutoff table and the two cutoff days. Every mutation
//! validates, applies and persists in one call; if the write fails the
//! in-memory state is put back so it never drifts from storage.

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::error::{KinsenasError, KinsenasResult};
use crate::models::{
    default_budget_rows, BudgetRow, BudgetRowEdit, BudgetRowId, Cutoff, CutoffDay,
    CutoffSettings,
};
use crate::storage::{keys, KeyValueStore};

/// Recurring budget rows plus cutoff days, persisted through `S`
pub struct BudgetStore<S: KeyValueStore> {
    kv: S,
    rows: Vec<BudgetRow>,
    cutoffs: CutoffSettings,
    audit: Option<AuditLogger>,
    audit_error: Option<KinsenasError>,
}

impl<S: KeyValueStore> BudgetStore<S> {
    /// Restore state from `kv`
    ///
    /// Missing or undecodable rows are replaced by the default table. A stored
    /// cutoff day is used only if it lies in `1..=31`.
    pub fn load(kv: S) -> Self {
        let rows = kv
            .get_decoded::<Vec<BudgetRow>>(keys::BUDGET_ROWS)
            .unwrap_or_else(default_budget_rows);

        let mut cutoffs = CutoffSettings::default();
        let stored = [
            (Cutoff::First, keys::BUDGET_FIRST_CUTOFF_DAY),
            (Cutoff::Second, keys::BUDGET_SECOND_CUTOFF_DAY),
        ];
        for (which, key) in stored {
            if let Some(day) = kv.get_decoded::<i64>(key).and_then(CutoffDay::checked) {
                cutoffs.set(which, day);
            }
        }

        Self {
            kv,
            rows,
            cutoffs,
            audit: None,
            audit_error: None,
        }
    }

    /// Record every successful mutation in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Take the error from the most recent audit append that failed
    ///
    /// Audit failures never undo or fail a mutation that was already saved.
    pub fn take_audit_error(&mut self) -> Option<KinsenasError> {
        self.audit_error.take()
    }

    pub fn rows(&self) -> &[BudgetRow] {
        &self.rows
    }

    /// The salary row (always the first row)
    pub fn salary(&self) -> Option<&BudgetRow> {
        self.rows.first()
    }

    pub fn row(&self, id: BudgetRowId) -> Option<&BudgetRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn cutoffs(&self) -> CutoffSettings {
        self.cutoffs
    }

    pub fn cutoff_day(&self, which: Cutoff) -> CutoffDay {
        self.cutoffs.get(which)
    }

    /// Give back the underlying key-value store
    pub fn into_store(self) -> S {
        self.kv
    }

    /// Append a blank row
    pub fn add_row(&mut self) -> KinsenasResult<BudgetRowId> {
        let row = BudgetRow::blank();
        let id = row.id;
        self.rows.push(row);

        if let Err(e) = self.persist_rows() {
            self.rows.pop();
            return Err(e);
        }

        let entry = self
            .rows
            .last()
            .map(|row| AuditEntry::create(EntityType::BudgetRow, row.id.to_string(), None, row));
        if let Some(entry) = entry {
            self.record(entry);
        }

        Ok(id)
    }

    /// Remove the last row, unless it is the only one left
    ///
    /// Returns the removed row, or `None` when the salary row was protected.
    pub fn remove_last_row(&mut self) -> KinsenasResult<Option<BudgetRow>> {
        if self.rows.len() <= 1 {
            return Ok(None);
        }

        let removed = match self.rows.pop() {
            Some(row) => row,
            None => return Ok(None),
        };

        if let Err(e) = self.persist_rows() {
            self.rows.push(removed);
            return Err(e);
        }

        self.record(AuditEntry::delete(
            EntityType::BudgetRow,
            removed.id.to_string(),
            Some(removed.name.clone()),
            &removed,
        ));

        Ok(Some(removed))
    }

    /// Replace one field of a row
    ///
    /// The salary row keeps its name; its amounts stay editable.
    pub fn edit_row(&mut self, id: BudgetRowId, edit: BudgetRowEdit) -> KinsenasResult<()> {
        self.apply_edits(id, vec![edit])
    }

    /// Apply several field edits to one row and persist them as one write
    pub fn apply_edits(
        &mut self,
        id: BudgetRowId,
        edits: Vec<BudgetRowEdit>,
    ) -> KinsenasResult<()> {
        let index = self
            .rows
            .iter()
            .position(|row| row.id == id)
            .ok_or_else(|| KinsenasError::budget_row_not_found(id.to_string()))?;

        if index == 0 {
            let salary_name = &self.rows[0].name;
            let renames_salary = edits
                .iter()
                .any(|edit| matches!(edit, BudgetRowEdit::Name(name) if name != salary_name));
            if renames_salary {
                return Err(KinsenasError::Validation(
                    "The salary row cannot be renamed".into(),
                ));
            }
        }

        let before = self.rows[index].clone();
        for edit in edits {
            edit.apply(&mut self.rows[index]);
        }

        if let Err(e) = self.persist_rows() {
            self.rows[index] = before;
            return Err(e);
        }

        let after = &self.rows[index];
        let diff = match (serde_json::to_value(&before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        let entry = AuditEntry::update(
            EntityType::BudgetRow,
            after.id.to_string(),
            Some(after.name.clone()),
            &before,
            after,
            diff,
        );
        self.record(entry);

        Ok(())
    }

    /// Set a cutoff day, clamping it into `1..=31`
    ///
    /// Both cutoff days are written together.
    pub fn set_cutoff_day(&mut self, which: Cutoff, day: i64) -> KinsenasResult<CutoffDay> {
        let day = CutoffDay::clamped(day);
        let previous = self.cutoffs;
        self.cutoffs.set(which, day);

        if let Err(e) = self.persist_cutoffs(previous) {
            self.cutoffs = previous;
            return Err(e);
        }

        let before = previous.get(which).get();
        self.record(AuditEntry::update(
            EntityType::CutoffDay,
            which.to_string(),
            Some(day.ordinal()),
            &before,
            &day.get(),
            Some(format!("{} -> {}", before, day)),
        ));

        Ok(day)
    }

    /// Sum of both cutoffs over every row
    pub fn monthly_total_value(&self) -> f64 {
        self.rows.iter().map(BudgetRow::monthly_value).sum()
    }

    /// Sum of one cutoff column over every row, salary included
    pub fn cutoff_total(&self, which: Cutoff) -> f64 {
        self.rows.iter().map(|row| row.cutoff_value(which)).sum()
    }

    /// Salary for `which` minus every other row's amount for the same cutoff
    pub fn remaining_after(&self, which: Cutoff) -> f64 {
        let Some((salary, expenses)) = self.rows.split_first() else {
            return 0.0;
        };

        let spent: f64 = expenses.iter().map(|row| row.cutoff_value(which)).sum();
        salary.cutoff_value(which) - spent
    }

    pub fn remaining_after_first_cutoff(&self) -> f64 {
        self.remaining_after(Cutoff::First)
    }

    pub fn remaining_after_second_cutoff(&self) -> f64 {
        self.remaining_after(Cutoff::Second)
    }

    fn persist_rows(&mut self) -> KinsenasResult<()> {
        self.kv.set_encoded(keys::BUDGET_ROWS, &self.rows)
    }

    /// Write both cutoff days; if the second write fails, put the first key
    /// back to `previous` so storage matches the rolled-back state
    fn persist_cutoffs(&mut self, previous: CutoffSettings) -> KinsenasResult<()> {
        self.kv
            .set_encoded(keys::BUDGET_FIRST_CUTOFF_DAY, &self.cutoffs.first)?;

        if let Err(e) = self
            .kv
            .set_encoded(keys::BUDGET_SECOND_CUTOFF_DAY, &self.cutoffs.second)
        {
            if let Err(restore) = self
                .kv
                .set_encoded(keys::BUDGET_FIRST_CUTOFF_DAY, &previous.first)
            {
                return Err(KinsenasError::Storage(format!(
                    "{}; restoring the first cutoff day also failed: {}",
                    e, restore
                )));
            }
            return Err(e);
        }

        Ok(())
    }

    fn record(&mut self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                self.audit_error = Some(e);
            }
        }
    }
}
