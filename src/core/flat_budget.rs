//! Flat budget calculator - a stateless allowance-versus-expenses summary.
//!
//! Unrelated to the envelope ledger: nothing here is stored, every summary is computed from
//! the inputs of a single request (or from the configured defaults).

use crate::{
    core::envelope::{present_number, validate_non_negative},
    errors::Result,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category name to amount spent.
pub type Expenses = BTreeMap<String, f64>;

/// Message reported when the allowance covers every expense.
pub const WITHIN_BUDGET: &str = "within budget";
/// Message reported when expenses exceed the allowance.
pub const OVERSPENDING: &str = "overspending";

/// Result of comparing an allowance with a set of expenses.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    /// Allowance the expenses are measured against
    pub allowance: f64,
    /// The expenses, echoed back
    pub expenses: Expenses,
    /// Sum of every expense
    pub total_expenses: f64,
    /// `allowance - total_expenses`; negative when overspending
    pub remaining: f64,
    /// [`WITHIN_BUDGET`] or [`OVERSPENDING`]
    pub message: String,
}

/// Inputs used whenever a caller leaves a field out.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlatBudgetDefaults {
    /// Fallback allowance
    pub allowance: f64,
    /// Fallback expense breakdown
    pub expenses: Expenses,
}

impl Default for FlatBudgetDefaults {
    fn default() -> Self {
        let expenses = [
            ("accommodation", 750.0),
            ("transport", 300.0),
            ("groceries", 400.0),
            ("data", 150.0),
        ]
        .into_iter()
        .map(|(category, amount)| (category.to_string(), amount))
        .collect();

        Self {
            allowance: 1650.0,
            expenses,
        }
    }
}

impl FlatBudgetDefaults {
    /// Checks that the allowance and every expense are finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        validate_non_negative(self.allowance)?;
        validate_expenses(&self.expenses)
    }

    /// Summary over the defaults alone.
    #[must_use]
    pub fn summary(&self) -> BudgetSummary {
        calculate(self.allowance, self.expenses.clone())
    }
}

/// Custom summary request; absent fields fall back to [`FlatBudgetDefaults`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FlatBudgetRequest {
    /// Allowance to use instead of the default; `null` is rejected
    #[serde(default, deserialize_with = "present_number")]
    pub allowance: Option<f64>,
    /// Expenses to use instead of the default; `null` also means "use the default"
    pub expenses: Option<Expenses>,
}

impl FlatBudgetRequest {
    /// Validates the supplied fields, fills the gaps from `defaults` and computes the summary.
    pub fn resolve(self, defaults: &FlatBudgetDefaults) -> Result<BudgetSummary> {
        let allowance = match self.allowance {
            Some(allowance) => validate_non_negative(allowance)?,
            None => defaults.allowance,
        };
        let expenses = match self.expenses {
            Some(expenses) => {
                validate_expenses(&expenses)?;
                expenses
            }
            None => defaults.expenses.clone(),
        };
        Ok(calculate(allowance, expenses))
    }
}

/// Sums the expenses and compares them with the allowance.
#[must_use]
pub fn calculate(allowance: f64, expenses: Expenses) -> BudgetSummary {
    let total_expenses: f64 = expenses.values().sum();
    let remaining = allowance - total_expenses;
    let message = if remaining >= 0.0 {
        WITHIN_BUDGET
    } else {
        OVERSPENDING
    };

    BudgetSummary {
        allowance,
        expenses,
        total_expenses,
        remaining,
        message: message.to_string(),
    }
}

fn validate_expenses(expenses: &Expenses) -> Result<()> {
    expenses
        .values()
        .try_for_each(|amount| validate_non_negative(*amount).map(|_| ()))
}
