pub mod expense_service;
pub mod summary_service;

pub use expense_service::{ExpenseDraft, ExpenseService};
pub use summary_service::SummaryService;
