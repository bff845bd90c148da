//! Plain data types for budget periods, expenses, and archived records.
//! No I/O and no terminal concerns live here.

pub mod common;
pub mod expense;
pub mod period;
pub mod record;

pub use common::{Amounted, Displayable};
pub use expense::Expense;
pub use period::BudgetPeriod;
pub use record::BudgetRecord;
