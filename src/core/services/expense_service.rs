//! Input validation for new expenses.

use crate::domain::Expense;
use crate::errors::{BudgetError, Result};

const REQUIRED_FIELDS_MESSAGE: &str = "amount and description are required";

/// Validated expense input waiting for an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub receipt: Option<String>,
}

impl ExpenseDraft {
    pub fn into_expense(self, id: i64) -> Expense {
        Expense::new(id, self.description, self.amount).with_receipt(self.receipt)
    }
}

pub struct ExpenseService;

impl ExpenseService {
    /// Checks form input. The description is trimmed and must be non-empty; the amount
    /// must parse to a finite number. Zero and negative amounts pass.
    pub fn validate(
        description: &str,
        amount_text: &str,
        receipt: Option<String>,
    ) -> Result<ExpenseDraft> {
        let description = description.trim();
        let amount = Self::parse_amount(amount_text);
        let (Some(amount), false) = (amount, description.is_empty()) else {
            return Err(BudgetError::Validation(REQUIRED_FIELDS_MESSAGE.into()));
        };
        if amount <= 0.0 {
            tracing::warn!(amount, description, "accepting non-positive expense amount");
        }
        Ok(ExpenseDraft {
            description: description.to_string(),
            amount,
            receipt,
        })
    }

    /// Parses a decimal amount, accepting `,` as the decimal separator.
    pub fn parse_amount(text: &str) -> Option<f64> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
            trimmed.replace(',', ".")
        } else {
            trimmed.to_string()
        };
        normalized
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_description_and_parses_amount() {
        let draft = ExpenseService::validate("  Mercado ", "120.50", None).unwrap();
        assert_eq!(draft.description, "Mercado");
        assert_eq!(draft.amount, 120.5);
    }

    #[test]
    fn accepts_comma_decimal_separator() {
        assert_eq!(ExpenseService::parse_amount("80,25"), Some(80.25));
        assert_eq!(ExpenseService::parse_amount("1,000.5"), None);
    }

    #[test]
    fn missing_fields_are_reported() {
        for (description, amount) in [("", "10"), ("   ", "10"), ("Luz", ""), ("Luz", "abc")] {
            let err = ExpenseService::validate(description, amount, None)
                .expect_err("invalid input must be rejected");
            assert!(
                matches!(err, BudgetError::Validation(ref message) if message.contains("required")),
                "unexpected error: {err:?}"
            );
        }
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        assert_eq!(ExpenseService::parse_amount("NaN"), None);
        assert_eq!(ExpenseService::parse_amount("inf"), None);
    }

    #[test]
    fn zero_and_negative_amounts_are_kept() {
        assert_eq!(ExpenseService::validate("Refund", "-15", None).unwrap().amount, -15.0);
        assert_eq!(ExpenseService::validate("Free", "0", None).unwrap().amount, 0.0);
    }
}
