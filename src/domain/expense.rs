use serde::{Deserialize, Serialize};

use crate::domain::Amounted;

/// A single logged cost entry. Never mutated after creation.
///
/// `id` is the creation timestamp in milliseconds. Two entries created within the same
/// millisecond would collide; nothing guards against that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    /// Receipt photo as an image data URL (`data:image/jpeg;base64,...`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

impl Expense {
    pub fn new(id: i64, description: impl Into<String>, amount: f64) -> Self {
        Self {
            id,
            description: description.into(),
            amount,
            receipt: None,
        }
    }

    pub fn with_receipt(mut self, receipt: Option<String>) -> Self {
        self.receipt = receipt;
        self
    }

    pub fn has_receipt(&self) -> bool {
        self.receipt.is_some()
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}
