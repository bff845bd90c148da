//! Owner of the application state: the active period, the archive, and the current view.

use std::mem;

use crate::core::services::{ExpenseService, SummaryService};
use crate::core::time::{Clock, SystemClock};
use crate::core::view::{ActivePeriod, PeriodView, View};
use crate::domain::{BudgetPeriod, BudgetRecord, Expense};
use crate::errors::{BudgetError, Result};
use crate::storage::{BudgetStore, KeyValueStore, StoredState};

/// Budget period life cycle, expense entry, and history browsing over one store.
///
/// Every mutation saves the affected records explicitly. Save failures are logged and
/// swallowed; the in-memory state stays authoritative for the session.
pub struct BudgetTracker<S> {
    store: BudgetStore<S>,
    clock: Box<dyn Clock>,
    history: Vec<BudgetRecord>,
    view: View,
}

impl<S: KeyValueStore> BudgetTracker<S> {
    pub fn open(store: S) -> Self {
        Self::with_clock(store, Box::new(SystemClock))
    }

    pub fn with_clock(store: S, clock: Box<dyn Clock>) -> Self {
        let mut store = BudgetStore::new(store);
        let StoredState { active, history } = store.load();
        let view = match active {
            Some(active) => View::Tracking(active),
            None if history.is_empty() => View::Setup,
            None => View::history(),
        };
        tracing::info!(view = view.label(), records = history.len(), "tracker opened");
        Self {
            store,
            clock,
            history,
            view,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn store(&self) -> &S {
        self.store.inner()
    }

    /// Archived records in storage order (oldest first).
    pub fn history(&self) -> &[BudgetRecord] {
        &self.history
    }

    pub fn history_newest_first(&self) -> Vec<&BudgetRecord> {
        SummaryService::newest_first(&self.history)
    }

    pub fn grand_total(&self) -> f64 {
        SummaryService::grand_total(&self.history)
    }

    pub fn record(&self, id: i64) -> Option<&BudgetRecord> {
        self.history.iter().find(|record| record.id == id)
    }

    pub fn active(&self) -> Option<&ActivePeriod> {
        match &self.view {
            View::Tracking(active) => Some(active),
            _ => None,
        }
    }

    /// The period on screen: the active one, or the archived one under inspection.
    pub fn period_view(&self) -> Option<PeriodView<'_>> {
        match &self.view {
            View::Tracking(active) => Some(PeriodView {
                period: &active.period,
                expenses: &active.expenses,
                read_only: false,
            }),
            View::Inspecting(record) => Some(PeriodView {
                period: &record.budget,
                expenses: &record.expenses,
                read_only: true,
            }),
            View::Setup | View::History { .. } => None,
        }
    }

    pub fn start_period(&mut self, period: BudgetPeriod) -> Result<()> {
        if let View::Tracking(active) = &self.view {
            return Err(BudgetError::PeriodAlreadyActive(active.period.month.clone()));
        }
        tracing::info!(month = %period.month, start = %period.start_date, "period started");
        self.view = View::Tracking(ActivePeriod::new(period));
        self.persist_active();
        Ok(())
    }

    /// Archives the active period with its precomputed total and clears the active slot.
    pub fn close_period(&mut self) -> Result<BudgetRecord> {
        match &self.view {
            View::Tracking(_) => {}
            View::Inspecting(record) => {
                return Err(BudgetError::ReadOnly(record.budget.month.clone()))
            }
            View::Setup | View::History { .. } => return Err(BudgetError::NoActivePeriod),
        }
        let View::Tracking(active) = mem::replace(&mut self.view, View::history()) else {
            return Err(BudgetError::NoActivePeriod);
        };
        let record = BudgetRecord::close(self.clock.timestamp_id(), active.period, active.expenses);
        tracing::info!(
            month = %record.budget.month,
            total = record.total,
            expenses = record.expenses.len(),
            "period closed"
        );
        self.history.push(record.clone());
        self.persist_history();
        self.persist_active();
        Ok(record)
    }

    pub fn add_expense(
        &mut self,
        description: &str,
        amount_text: &str,
        receipt: Option<String>,
    ) -> Result<Expense> {
        let id = self.clock.timestamp_id();
        let active = match &mut self.view {
            View::Tracking(active) => active,
            View::Inspecting(record) => {
                return Err(BudgetError::ReadOnly(record.budget.month.clone()))
            }
            View::Setup | View::History { .. } => return Err(BudgetError::NoActivePeriod),
        };
        let expense = ExpenseService::validate(description, amount_text, receipt)?.into_expense(id);
        tracing::info!(
            id,
            amount = expense.amount,
            receipt = expense.has_receipt(),
            "expense added"
        );
        active.expenses.push(expense.clone());
        self.persist_active();
        Ok(expense)
    }

    /// Removes the record with `id`. Returns whether anything was removed.
    pub fn delete_record(&mut self, id: i64) -> bool {
        let before = self.history.len();
        self.history.retain(|record| record.id != id);
        let removed = self.history.len() != before;

        let showing_deleted = match &self.view {
            View::Inspecting(record) => record.id == id,
            View::History {
                pending_delete: Some(pending),
            } => *pending == id,
            _ => false,
        };
        if showing_deleted {
            self.view = View::history();
        }

        if removed {
            tracing::info!(id, "budget record deleted");
            self.persist_history();
        }
        removed
    }

    /// Enters read-only inspection of an archived record.
    pub fn select_record(&mut self, id: i64) -> Result<()> {
        self.ensure_not_tracking("browsing history")?;
        let record = self
            .record(id)
            .cloned()
            .ok_or(BudgetError::RecordNotFound(id))?;
        tracing::debug!(id, month = %record.budget.month, "inspecting record");
        self.view = View::Inspecting(record);
        Ok(())
    }

    /// Leaves inspection, a pending deletion, or the setup prompt for the history list.
    pub fn back(&mut self) {
        if !matches!(self.view, View::Tracking(_)) {
            self.view = View::history();
        }
    }

    pub fn dismiss_setup(&mut self) {
        if matches!(self.view, View::Setup) {
            self.view = View::history();
        }
    }

    /// First step of a deletion: marks `id` as pending and returns the record to name it.
    pub fn request_delete(&mut self, id: i64) -> Result<&BudgetRecord> {
        self.ensure_not_tracking("deleting history")?;
        if self.record(id).is_none() {
            return Err(BudgetError::RecordNotFound(id));
        }
        self.view = View::History {
            pending_delete: Some(id),
        };
        self.record(id).ok_or(BudgetError::RecordNotFound(id))
    }

    pub fn pending_delete(&self) -> Option<&BudgetRecord> {
        match &self.view {
            View::History {
                pending_delete: Some(id),
            } => self.record(*id),
            _ => None,
        }
    }

    pub fn confirm_delete(&mut self) -> Result<BudgetRecord> {
        let record = self
            .pending_delete()
            .cloned()
            .ok_or_else(|| BudgetError::InvalidOperation("no deletion pending".into()))?;
        self.delete_record(record.id);
        Ok(record)
    }

    pub fn cancel_delete(&mut self) {
        if let View::History { pending_delete } = &mut self.view {
            *pending_delete = None;
        }
    }

    /// Fails with `InvalidOperation` while a period is open; history is reachable only after closing it.
    pub fn ensure_not_tracking(&self, action: &str) -> Result<()> {
        match &self.view {
            View::Tracking(active) => Err(BudgetError::InvalidOperation(format!(
                "{} is unavailable while `{}` is open; close it first",
                action, active.period.month
            ))),
            _ => Ok(()),
        }
    }

    fn persist_active(&mut self) {
        let active = match &self.view {
            View::Tracking(active) => Some(active),
            _ => None,
        };
        if let Err(err) = self.store.save_active(active) {
            tracing::error!(error = %err, "failed to persist active period");
        }
    }

    fn persist_history(&mut self) {
        if let Err(err) = self.store.save_history(&self.history) {
            tracing::error!(error = %err, "failed to persist budget history");
        }
    }
}
