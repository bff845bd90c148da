//! The exhaustive set of states the tracker can be in.

use crate::domain::common::sum_amounts;
use crate::domain::{BudgetPeriod, BudgetRecord, Expense};

/// The open, mutable period and the expenses logged against it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePeriod {
    pub period: BudgetPeriod,
    pub expenses: Vec<Expense>,
}

impl ActivePeriod {
    pub fn new(period: BudgetPeriod) -> Self {
        Self {
            period,
            expenses: Vec::new(),
        }
    }

    pub fn total(&self) -> f64 {
        sum_amounts(&self.expenses)
    }
}

/// Mutually exclusive view modes. Holding the active period inside `Tracking` makes
/// "active period while browsing history" unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// First run: no active period and no history yet.
    Setup,
    Tracking(ActivePeriod),
    History { pending_delete: Option<i64> },
    /// Read-only inspection of an archived record.
    Inspecting(BudgetRecord),
}

impl View {
    pub fn history() -> Self {
        View::History {
            pending_delete: None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Setup => "setup",
            View::Tracking(_) => "tracking",
            View::History { .. } => "history",
            View::Inspecting(_) => "inspecting",
        }
    }
}

/// A period and its expenses as shown to the user, live or archived.
#[derive(Debug, Clone, Copy)]
pub struct PeriodView<'a> {
    pub period: &'a BudgetPeriod,
    pub expenses: &'a [Expense],
    pub read_only: bool,
}

impl<'a> PeriodView<'a> {
    pub fn total(&self) -> f64 {
        sum_amounts(self.expenses)
    }

    pub fn context_label(&self) -> &'static str {
        if self.read_only {
            "Monthly history"
        } else {
            "Current budget"
        }
    }
}
