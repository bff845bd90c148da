pub mod budget_store;
pub mod json_backend;
pub mod memory;

use crate::errors::Result;

/// Key holding the serialized active [`crate::domain::BudgetPeriod`], absent when none is open.
pub const CURRENT_BUDGET_KEY: &str = "currentBudget";
/// Key holding the active period's expense list; only present while a period is active.
pub const CURRENT_EXPENSES_KEY: &str = "currentExpenses";
/// Key holding the archived records, oldest first. Always written.
pub const HISTORY_KEY: &str = "budgetHistory";

/// String-valued key/value persistence. Writes are synchronous and not transactional.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

pub use budget_store::{BudgetStore, StoredState};
pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
