use serde::{Deserialize, Serialize};

use crate::domain::common::sum_amounts;
use crate::domain::{BudgetPeriod, Expense};

/// Immutable archive of a closed period, its expenses, and the total computed at closure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecord {
    pub id: i64,
    pub budget: BudgetPeriod,
    pub expenses: Vec<Expense>,
    /// Fixed at closure; never recomputed from `expenses`.
    pub total: f64,
}

impl BudgetRecord {
    /// Archives `budget` and `expenses`, computing the total once.
    pub fn close(id: i64, budget: BudgetPeriod, expenses: Vec<Expense>) -> Self {
        let total = sum_amounts(&expenses);
        Self {
            id,
            budget,
            expenses,
            total,
        }
    }
}
