use std::result::Result as StdResult;

use thiserror::Error;

/// Error type for the tracker, its input validation, and the persistent store.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("No active budget period")]
    NoActivePeriod,
    #[error("A budget period is already active: {0}")]
    PeriodAlreadyActive(String),
    #[error("Period `{0}` is archived and read-only")]
    ReadOnly(String),
    #[error("Budget record not found: {0}")]
    RecordNotFound(i64),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = StdResult<T, BudgetError>;

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::Storage(err.to_string())
    }
}

/// Errors surfaced by the interactive shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error("Command failed: {0}")]
    Command(String),
}
