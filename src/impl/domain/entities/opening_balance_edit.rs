use crate::entities::{AccountId, MetricField};

/// New opening balance values for one account, as entered by the user.
#[derive(Debug, Clone, PartialEq, serde_derive::Deserialize)]
pub struct OpeningBalanceEdit {
    pub values: Vec<(MetricField, f64)>,
}

/// What gets handed to the persistence collaborator once an edit is valid.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct OpeningBalanceUpdate {
    pub account_id: AccountId,
    pub values: Vec<(MetricField, f64)>,
}

impl OpeningBalanceEdit {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn set(mut self, field: MetricField, value: f64) -> Self {
        self.values.push((field, value));
        self
    }

    pub fn debit(value: f64) -> Self {
        Self::new().set(MetricField::OpeningDebit, value)
    }

    pub fn credit(value: f64) -> Self {
        Self::new().set(MetricField::OpeningCredit, value)
    }

    pub fn debit_credit(debit: f64, credit: f64) -> Self {
        Self::debit(debit).set(MetricField::OpeningCredit, credit)
    }

    pub fn opening(value: f64) -> Self {
        Self::new().set(MetricField::Opening, value)
    }
}

impl Default for OpeningBalanceEdit {
    fn default() -> Self {
        Self::new()
    }
}
