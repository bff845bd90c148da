use crate::domain::BudgetRecord;

/// Read-only aggregations over the archived history.
pub struct SummaryService;

impl SummaryService {
    /// Sum of each record's stored total.
    pub fn grand_total(history: &[BudgetRecord]) -> f64 {
        history.iter().map(|record| record.total).sum()
    }

    /// Display order: most recently closed first. Storage order is untouched.
    pub fn newest_first(history: &[BudgetRecord]) -> Vec<&BudgetRecord> {
        history.iter().rev().collect()
    }
}
