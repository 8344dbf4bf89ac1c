//! Liabilities — debt positions owned by the external credit collaborator.
//!
//! This engine reads liabilities (they feed net-asset-value and reporting)
//! but never mutates them; principal and interest updates happen upstream.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single debt position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Liability {
    pub id: String,
    /// Free-form type tag, e.g. "credit_card", "student_loan".
    pub kind: String,
    /// Outstanding principal. Never negative.
    pub principal_balance: f64,
    /// Annualized interest rate.
    pub interest_rate: f64,
    pub currency: String,
    #[serde(default)]
    pub minimum_payment: Option<f64>,
    pub opened_on: NaiveDate,
}
