use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Displayable;
use crate::errors::{BudgetError, Result};

/// A user-defined tracking window: a month label, an optional savings goal, and a start date.
///
/// Periods carry no identifier; they are identified by being the active one or by the
/// record that archived them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPeriod {
    pub month: String,
    /// Empty when no goal was given.
    #[serde(default)]
    pub goal: String,
    pub start_date: NaiveDate,
}

impl BudgetPeriod {
    /// Builds a period from setup-form input. The month label must not be blank.
    pub fn new(
        month: impl Into<String>,
        goal: Option<&str>,
        start_date: NaiveDate,
    ) -> Result<Self> {
        let month = month.into();
        if month.trim().is_empty() {
            return Err(BudgetError::Validation(
                "the reference month label is required".into(),
            ));
        }
        Ok(Self {
            month,
            goal: goal.map(str::trim).unwrap_or_default().to_string(),
            start_date,
        })
    }

    pub fn goal(&self) -> Option<&str> {
        let trimmed = self.goal.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    /// Month label made safe for use inside a file name.
    pub fn file_label(&self) -> String {
        self.month.replace('/', "-")
    }
}

impl Displayable for BudgetPeriod {
    fn display_label(&self) -> String {
        match self.goal() {
            Some(goal) => format!("{} ({})", self.month, goal),
            None => self.month.clone(),
        }
    }
}
