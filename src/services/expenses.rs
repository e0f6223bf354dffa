//! Monthly expenses store
//!
//! Holds every month's expense rows and tracks which month is selected. The
//! selected month's rows are a working copy; each mutation writes them back
//! into the month map and persists the whole map.

use std::collections::BTreeMap;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::error::{KinsenasError, KinsenasResult};
use crate::models::{default_month_rows, ExpenseRowId, ExpensesRow, ExpensesRowEdit, Month};
use crate::storage::{keys, KeyValueStore};

/// Month key (`YYYY-MM`) to that month's rows
pub type ExpensesByMonth = BTreeMap<String, Vec<ExpensesRow>>;

/// Per-month expense rows, persisted through `S`
pub struct ExpensesStore<S: KeyValueStore> {
    kv: S,
    by_month: ExpensesByMonth,
    selected: Month,
    rows: Vec<ExpensesRow>,
    audit: Option<AuditLogger>,
    audit_error: Option<KinsenasError>,
}

impl<S: KeyValueStore> ExpensesStore<S> {
    /// Restore the month map from `kv` and select `month`
    ///
    /// A missing or undecodable map starts empty.
    pub fn load(kv: S, month: Month) -> Self {
        let by_month = kv
            .get_decoded::<ExpensesByMonth>(keys::EXPENSES_BY_MONTH)
            .unwrap_or_default();

        let mut store = Self {
            kv,
            by_month,
            selected: month,
            rows: Vec::new(),
            audit: None,
            audit_error: None,
        };
        store.load_rows_for_selected_month();
        store
    }

    /// Restore from `kv` with the current calendar month selected
    pub fn load_current(kv: S) -> Self {
        Self::load(kv, Month::current())
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

    /// Rows of the selected month
    pub fn rows(&self) -> &[ExpensesRow] {
        &self.rows
    }

    pub fn row(&self, id: ExpenseRowId) -> Option<&ExpensesRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn selected_month(&self) -> Month {
        self.selected
    }

    /// e.g. `January 2026`
    pub fn selected_month_title(&self) -> String {
        self.selected.title()
    }

    /// Months that have stored rows, oldest first
    pub fn months(&self) -> Vec<Month> {
        let mut months: Vec<Month> = self
            .by_month
            .keys()
            .filter_map(|key| Month::parse(key).ok())
            .collect();
        months.sort();
        months
    }

    pub fn into_store(self) -> S {
        self.kv
    }

    /// Switch to `month` and load its rows
    pub fn select_month(&mut self, month: Month) {
        self.selected = month;
        self.load_rows_for_selected_month();
    }

    pub fn go_to_previous_month(&mut self) {
        self.select_month(self.selected.prev());
    }

    pub fn go_to_next_month(&mut self) {
        self.select_month(self.selected.next());
    }

    /// Load the selected month's rows, or the default seed for a month that
    /// has never been edited
    ///
    /// The seed is not persisted until the first mutation.
    pub fn load_rows_for_selected_month(&mut self) {
        self.rows = self
            .by_month
            .get(&self.selected.key())
            .cloned()
            .unwrap_or_else(default_month_rows);
    }

    /// Append a blank row to the selected month
    pub fn add_row(&mut self) -> KinsenasResult<ExpenseRowId> {
        let previous = self.rows.clone();
        let row = ExpensesRow::blank();
        let id = row.id;
        self.rows.push(row);
        self.commit(previous)?;

        let entry = self
            .rows
            .last()
            .map(|row| AuditEntry::create(EntityType::ExpenseRow, row.id.to_string(), None, row));
        if let Some(entry) = entry {
            self.record(entry);
        }

        Ok(id)
    }

    /// Remove the selected month's last row, if there is one
    pub fn remove_last_row(&mut self) -> KinsenasResult<Option<ExpensesRow>> {
        if self.rows.is_empty() {
            return Ok(None);
        }

        let previous = self.rows.clone();
        let removed = self.rows.pop();
        self.commit(previous)?;

        if let Some(row) = &removed {
            self.record_delete(row);
        }

        Ok(removed)
    }

    /// Remove rows by position; indices past the end are ignored
    ///
    /// Returns the removed rows in the order they appeared.
    pub fn remove_rows(&mut self, indices: &[usize]) -> KinsenasResult<Vec<ExpensesRow>> {
        let mut indices: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.rows.len())
            .collect();
        indices.sort_unstable();
        indices.dedup();

        if indices.is_empty() {
            return Ok(Vec::new());
        }

        let previous = self.rows.clone();
        let mut removed: Vec<ExpensesRow> = indices
            .iter()
            .rev()
            .map(|&i| self.rows.remove(i))
            .collect();
        removed.reverse();
        self.commit(previous)?;

        for row in &removed {
            self.record_delete(row);
        }

        Ok(removed)
    }

    /// Replace one field of a row in the selected month
    pub fn edit_row(&mut self, id: ExpenseRowId, edit: ExpensesRowEdit) -> KinsenasResult<()> {
        self.apply_edits(id, vec![edit])
    }

    /// Apply several field edits to one row and persist them as one write
    pub fn apply_edits(
        &mut self,
        id: ExpenseRowId,
        edits: Vec<ExpensesRowEdit>,
    ) -> KinsenasResult<()> {
        let index = self
            .rows
            .iter()
            .position(|row| row.id == id)
            .ok_or_else(|| KinsenasError::expense_row_not_found(id.to_string()))?;

        let previous = self.rows.clone();
        for edit in edits {
            edit.apply(&mut self.rows[index]);
        }
        self.commit(previous.clone())?;

        let before = &previous[index];
        let after = &self.rows[index];
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        let entry = AuditEntry::update(
            EntityType::ExpenseRow,
            after.id.to_string(),
            Some(after.name.clone()),
            before,
            after,
            diff,
        )
        .in_month(self.selected.key());
        self.record(entry);

        Ok(())
    }

    /// Sum of the selected month's amounts
    pub fn total_expenses(&self) -> f64 {
        self.rows.iter().map(ExpensesRow::amount_value).sum()
    }

    /// Write the working rows into the month map and persist the whole map,
    /// restoring `previous` if the write fails
    fn commit(&mut self, previous: Vec<ExpensesRow>) -> KinsenasResult<()> {
        let key = self.selected.key();
        let replaced = self.by_month.insert(key.clone(), self.rows.clone());

        if let Err(e) = self.kv.set_encoded(keys::EXPENSES_BY_MONTH, &self.by_month) {
            match replaced {
                Some(rows) => self.by_month.insert(key, rows),
                None => self.by_month.remove(&key),
            };
            self.rows = previous;
            return Err(e);
        }

        Ok(())
    }

    fn record_delete(&mut self, row: &ExpensesRow) {
        self.record(
            AuditEntry::delete(
                EntityType::ExpenseRow,
                row.id.to_string(),
                Some(row.name.clone()),
                row,
            )
            .in_month(self.selected.key()),
        )
    }

    fn record(&mut self, entry: AuditEntry) {
        let entry = if entry.month.is_none() {
            entry.in_month(self.selected.key())
        } else {
            entry
        };

        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                self.audit_error = Some(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::storage::MemoryStore;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    #[derive(Default)]
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Option<Value> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, _value: Value) -> KinsenasResult<()> {
            Err(KinsenasError::Storage(format!("{} is read-only", key)))
        }

        fn remove(&mut self, _key: &str) -> KinsenasResult<()> {
            Err(KinsenasError::Storage("read-only".into()))
        }
    }

    fn jan_2026() -> Month {
        Month::new(2026, 1).unwrap()
    }

    fn fresh() -> ExpensesStore<MemoryStore> {
        ExpensesStore::load(MemoryStore::new(), jan_2026())
    }

    fn saved_map(kv: &MemoryStore) -> ExpensesByMonth {
        kv.get_decoded(keys::EXPENSES_BY_MONTH).unwrap()
    }

    #[test]
    fn test_unvisited_month_gets_default_seed() {
        let store = fresh();
        let names: Vec<_> = store.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Food", "Transportation"]);
        assert!(store.rows().iter().all(|r| r.amount.is_empty()));
    }

    #[test]
    fn test_seed_is_not_persisted_until_mutation() {
        let store = fresh();
        let kv = store.into_store();
        assert!(!kv.contains(keys::EXPENSES_BY_MONTH));
    }

    #[test]
    fn test_add_row_persists_entire_map() {
        let mut store = fresh();
        store.add_row().unwrap();
        store.go_to_next_month();
        store.remove_last_row().unwrap();

        let map = saved_map(&store.into_store());
        assert_eq!(map.len(), 2);
        assert_eq!(map["2026-01"].len(), 3);
        assert_eq!(map["2026-02"].len(), 1);
        assert_eq!(map["2026-02"][0].name, "Food");
    }

    #[test]
    fn test_navigation_reloads_rows() {
        let mut store = fresh();
        let id = store.rows()[0].id;
        store
            .edit_row(id, ExpensesRowEdit::Amount("1500".into()))
            .unwrap();

        store.go_to_previous_month();
        assert_eq!(store.selected_month(), Month::new(2025, 12).unwrap());
        assert_eq!(store.total_expenses(), 0.0);
        assert_eq!(store.selected_month_title(), "December 2025");

        store.go_to_next_month();
        assert_eq!(store.selected_month(), jan_2026());
        assert_eq!(store.rows()[0].id, id);
        assert_eq!(store.total_expenses(), 1500.0);
    }

    #[test]
    fn test_total_ignores_non_numeric_amounts() {
        let mut store = fresh();
        let food = store.rows()[0].id;
        let transport = store.rows()[1].id;
        store
            .edit_row(food, ExpensesRowEdit::Amount("250.75".into()))
            .unwrap();
        store
            .edit_row(transport, ExpensesRowEdit::Amount("a lot".into()))
            .unwrap();

        assert_eq!(store.total_expenses(), 250.75);
        assert_eq!(store.row(transport).unwrap().amount, "a lot");
    }

    #[test]
    fn test_remove_last_row_on_empty_month_is_noop() {
        let mut store = fresh();
        assert!(store.remove_last_row().unwrap().is_some());
        assert!(store.remove_last_row().unwrap().is_some());
        assert!(store.rows().is_empty());

        assert!(store.remove_last_row().unwrap().is_none());
        assert!(store.rows().is_empty());

        let map = saved_map(&store.into_store());
        assert!(map["2026-01"].is_empty());
    }

    #[test]
    fn test_emptied_month_stays_empty_after_reload() {
        let mut store = fresh();
        store.remove_rows(&[0, 1]).unwrap();

        let reloaded = ExpensesStore::load(store.into_store(), jan_2026());
        assert!(reloaded.rows().is_empty());
    }

    #[test]
    fn test_remove_rows_by_index() {
        let mut store = fresh();
        store.add_row().unwrap();
        let third = store.rows()[2].id;

        let removed = store.remove_rows(&[1, 0, 7, 0]).unwrap();
        let names: Vec<_> = removed.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Food", "Transportation"]);
        assert_eq!(store.rows().len(), 1);
        assert_eq!(store.rows()[0].id, third);

        assert!(store.remove_rows(&[5]).unwrap().is_empty());
    }

    #[test]
    fn test_reload_reproduces_rows() {
        let mut store = fresh();
        let id = store.add_row().unwrap();
        store
            .edit_row(id, ExpensesRowEdit::Name("Coffee".into()))
            .unwrap();
        store
            .edit_row(id, ExpensesRowEdit::Amount("  95 ".into()))
            .unwrap();
        let rows = store.rows().to_vec();

        let reloaded = ExpensesStore::load(store.into_store(), jan_2026());
        assert_eq!(reloaded.rows(), rows.as_slice());
    }

    #[test]
    fn test_corrupt_map_starts_empty() {
        let mut kv = MemoryStore::new();
        kv.set(keys::EXPENSES_BY_MONTH, json!([1, 2, 3])).unwrap();

        let store = ExpensesStore::load(kv, jan_2026());
        assert!(store.months().is_empty());
        assert_eq!(store.rows().len(), 2);
    }

    #[test]
    fn test_months_lists_stored_keys() {
        let mut store = fresh();
        store.add_row().unwrap();
        store.select_month(Month::new(2025, 11).unwrap());
        store.add_row().unwrap();

        assert_eq!(
            store.months(),
            [Month::new(2025, 11).unwrap(), jan_2026()]
        );
    }

    #[test]
    fn test_edit_unknown_row() {
        let mut store = fresh();
        let err = store
            .edit_row(ExpenseRowId::new(), ExpensesRowEdit::Name("x".into()))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let mut store = ExpensesStore::load(ReadOnlyStore::default(), jan_2026());

        assert!(store.add_row().is_err());
        assert_eq!(store.rows().len(), 2);
        assert!(store.months().is_empty());

        assert!(store.remove_last_row().is_err());
        assert_eq!(store.rows().len(), 2);

        let id = store.rows()[0].id;
        assert!(store
            .edit_row(id, ExpensesRowEdit::Amount("10".into()))
            .is_err());
        assert_eq!(store.total_expenses(), 0.0);
    }

    #[test]
    fn test_apply_edits_changes_both_fields() {
        let mut store = fresh();
        let id = store.rows()[1].id;
        store
            .apply_edits(
                id,
                vec![
                    ExpensesRowEdit::Name("Jeepney".into()),
                    ExpensesRowEdit::Amount("320".into()),
                ],
            )
            .unwrap();

        let reloaded = ExpensesStore::load(store.into_store(), jan_2026());
        assert_eq!(reloaded.rows()[1].name, "Jeepney");
        assert_eq!(reloaded.total_expenses(), 320.0);
    }

    #[test]
    fn test_failed_apply_edits_rolls_back_every_field() {
        let mut store = ExpensesStore::load(ReadOnlyStore::default(), jan_2026());
        let id = store.rows()[0].id;

        let result = store.apply_edits(
            id,
            vec![
                ExpensesRowEdit::Name("Groceries".into()),
                ExpensesRowEdit::Amount("800".into()),
            ],
        );
        assert!(result.is_err());
        assert_eq!(store.rows()[0].name, "Food");
        assert_eq!(store.rows()[0].amount, "");
    }

    #[test]
    fn test_audit_failure_does_not_fail_saved_mutation() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be opened for appending
        let logger = AuditLogger::new(temp_dir.path().to_path_buf());
        let mut store = fresh().with_audit(logger);

        assert!(store.add_row().is_ok());
        assert!(store.take_audit_error().is_some());

        let map = saved_map(&store.into_store());
        assert_eq!(map["2026-01"].len(), 3);
    }

    #[test]
    fn test_mutations_are_audited_with_month() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let mut store = fresh().with_audit(logger.clone());

        store.add_row().unwrap();
        store.remove_rows(&[0]).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[1].operation, Operation::Delete);
        assert_eq!(entries[1].entity_name.as_deref(), Some("Food"));
        assert!(entries
            .iter()
            .all(|e| e.month.as_deref() == Some("2026-01")));
    }
}
