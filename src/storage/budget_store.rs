//! Typed access to the three persisted records on top of a [`KeyValueStore`].

use serde::de::DeserializeOwned;

use crate::core::view::ActivePeriod;
use crate::domain::{BudgetPeriod, BudgetRecord, Expense};
use crate::errors::Result;

use super::{KeyValueStore, CURRENT_BUDGET_KEY, CURRENT_EXPENSES_KEY, HISTORY_KEY};

/// Everything recovered from storage at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredState {
    pub active: Option<ActivePeriod>,
    pub history: Vec<BudgetRecord>,
}

pub struct BudgetStore<S> {
    store: S,
}

impl<S: KeyValueStore> BudgetStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Reads all records. Never fails: unreadable or corrupt values are logged and
    /// treated as absent (active period) or empty (history).
    pub fn load(&mut self) -> StoredState {
        let period: Option<BudgetPeriod> = self.read_value(CURRENT_BUDGET_KEY);
        let active = match period {
            Some(period) => {
                let expenses: Vec<Expense> =
                    self.read_value(CURRENT_EXPENSES_KEY).unwrap_or_default();
                Some(ActivePeriod { period, expenses })
            }
            None => {
                // Expenses without a period are orphans.
                if let Err(err) = self.store.remove(CURRENT_EXPENSES_KEY) {
                    tracing::error!(error = %err, "failed to drop orphaned expenses");
                }
                None
            }
        };

        let history = match self.read_value::<Vec<BudgetRecord>>(HISTORY_KEY) {
            Some(history) => history,
            None => {
                if let Err(err) = self.save_history(&[]) {
                    tracing::error!(error = %err, "failed to initialise budget history");
                }
                Vec::new()
            }
        };

        tracing::debug!(
            active = active.is_some(),
            records = history.len(),
            "loaded budget state"
        );
        StoredState { active, history }
    }

    /// Writes or clears the active period. Clearing also removes its expenses.
    pub fn save_active(&mut self, active: Option<&ActivePeriod>) -> Result<()> {
        match active {
            Some(active) => {
                let period = serde_json::to_string(&active.period)?;
                let expenses = serde_json::to_string(&active.expenses)?;
                self.store.set(CURRENT_BUDGET_KEY, &period)?;
                self.store.set(CURRENT_EXPENSES_KEY, &expenses)?;
            }
            None => {
                self.store.remove(CURRENT_BUDGET_KEY)?;
                self.store.remove(CURRENT_EXPENSES_KEY)?;
            }
        }
        Ok(())
    }

    pub fn save_history(&mut self, history: &[BudgetRecord]) -> Result<()> {
        let json = serde_json::to_string(history)?;
        self.store.set(HISTORY_KEY, &json)
    }

    fn read_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::error!(key, error = %err, "storage read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "ignoring unreadable stored value");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn active() -> ActivePeriod {
        ActivePeriod {
            period: BudgetPeriod::new(
                "Março/2025",
                None,
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            )
            .unwrap(),
            expenses: vec![Expense::new(1, "Mercado", 120.5)],
        }
    }

    #[test]
    fn empty_store_loads_nothing_and_initialises_history() {
        let mut store = BudgetStore::new(MemoryStore::new());
        let state = store.load();
        assert_eq!(state, StoredState::default());
        assert_eq!(
            store.inner().get(HISTORY_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn active_period_round_trips() {
        let mut store = BudgetStore::new(MemoryStore::new());
        store.save_active(Some(&active())).unwrap();
        let state = store.load();
        assert_eq!(state.active, Some(active()));
    }

    #[test]
    fn orphaned_expenses_are_removed_on_load() {
        let mut raw = MemoryStore::new();
        raw.set(CURRENT_EXPENSES_KEY, r#"[{"id":1,"description":"x","amount":1}]"#)
            .unwrap();
        let mut store = BudgetStore::new(raw);
        let state = store.load();
        assert!(state.active.is_none());
        assert!(!store.inner().contains(CURRENT_EXPENSES_KEY));
    }

    #[test]
    fn corrupt_values_degrade_to_empty() {
        let mut raw = MemoryStore::new();
        raw.set(CURRENT_BUDGET_KEY, "{not json").unwrap();
        raw.set(HISTORY_KEY, "oops").unwrap();
        let mut store = BudgetStore::new(raw);
        let state = store.load();
        assert!(state.active.is_none());
        assert!(state.history.is_empty());
    }

    #[test]
    fn clearing_active_removes_both_keys() {
        let mut store = BudgetStore::new(MemoryStore::new());
        store.save_active(Some(&active())).unwrap();
        store.save_active(None).unwrap();
        assert!(!store.inner().contains(CURRENT_BUDGET_KEY));
        assert!(!store.inner().contains(CURRENT_EXPENSES_KEY));
    }
}
