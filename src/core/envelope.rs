//! Envelope record - one budget category tracked by the ledger.
//!
//! An envelope carries a budget cap and a current balance. The ledger guarantees
//! `0 <= balance <= budget` for every envelope it hands out.

use crate::errors::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, de};

/// Identifier assigned by the ledger at creation time. Never reused.
pub type EnvelopeId = u64;

/// A named budget category with a cap and a current balance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Unique identifier, assigned in creation order starting at 1
    pub id: EnvelopeId,
    /// Human-readable label (e.g., "Food", "Rent")
    pub name: String,
    /// Cap for this envelope
    pub budget: f64,
    /// Funds currently available in this envelope
    pub balance: f64,
}

impl Envelope {
    /// Returns true when the balance sits inside `0..=budget`.
    #[must_use]
    pub fn is_within_budget(&self) -> bool {
        self.balance >= 0.0 && self.balance <= self.budget
    }
}

/// Partial update for an existing envelope. Absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct EnvelopeUpdate {
    /// Replacement name
    pub name: Option<String>,
    /// New budget cap; the balance is clamped down when it exceeds the new cap
    #[serde(default, deserialize_with = "present_number")]
    pub budget: Option<f64>,
    /// New balance; must fit inside the (possibly just updated) budget
    #[serde(default, deserialize_with = "present_number")]
    pub balance: Option<f64>,
}

impl EnvelopeUpdate {
    /// Returns true when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.budget.is_none() && self.balance.is_none()
    }
}

/// Deserializes an optional number field where an explicit `null` is an error.
///
/// Pair with `#[serde(default)]`: an absent key stays `None`, a present key must hold a number.
pub fn present_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)?
        .map(Some)
        .ok_or_else(|| de::Error::custom("expected a number, found null"))
}

/// Checks that `amount` is a finite, non-negative number.
///
/// Used for budgets, balances and flat-budget amounts alike.
pub fn validate_non_negative(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(amount)
}

/// Checks that `amount` is a finite, strictly positive number.
pub fn validate_positive(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(amount)
}
