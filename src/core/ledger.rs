//! Envelope ledger - owns every envelope and the aggregate budget.
//!
//! The ledger is a plain owned value: the HTTP layer wraps it in a lock, tests create a fresh
//! one per case. Every operation validates its whole input before touching any field, so a
//! failed call leaves the ledger exactly as it was.

use crate::{
    core::envelope::{Envelope, EnvelopeId, EnvelopeUpdate, validate_non_negative, validate_positive},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Both sides of a completed transfer, as they look after the move.
///
/// `to_envelope.budget` may be higher than before the transfer: a destination that ends up
/// holding more than its cap has the cap raised to its new balance.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// Envelope the funds left
    pub from_envelope: Envelope,
    /// Envelope the funds arrived in
    pub to_envelope: Envelope,
}

/// Aggregate view over the whole ledger.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    /// Number of existing envelopes
    pub envelope_count: usize,
    /// Sum of all envelope budgets
    pub total_budget: f64,
    /// Sum of all envelope balances
    pub total_balance: f64,
    /// When the summary was taken
    pub generated_at: DateTime<Utc>,
}

/// In-memory collection of envelopes plus the running budget total.
#[derive(Debug)]
pub struct Ledger {
    envelopes: Vec<Envelope>,
    total_budget: f64,
    next_id: EnvelopeId,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Creates an empty ledger. The first envelope gets id 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            envelopes: Vec::new(),
            total_budget: 0.0,
            next_id: 1,
        }
    }

    /// Creates a new envelope whose balance starts full (`balance == budget`).
    ///
    /// The name is trimmed; an empty or whitespace-only name is rejected, as is a negative or
    /// non-finite budget. Ids are handed out in increasing order and never reused.
    pub fn create(&mut self, name: &str, budget: f64) -> Result<Envelope> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_input("envelope name cannot be empty"));
        }
        let budget = validate_non_negative(budget)?;

        let envelope = Envelope {
            id: self.next_id,
            name: name.to_string(),
            budget,
            balance: budget,
        };
        self.next_id += 1;
        self.total_budget += budget;
        self.envelopes.push(envelope.clone());
        Ok(envelope)
    }

    /// All envelopes in creation order.
    #[must_use]
    pub fn list(&self) -> &[Envelope] {
        &self.envelopes
    }

    /// Looks up a single envelope.
    pub fn get(&self, id: EnvelopeId) -> Result<&Envelope> {
        self.envelopes
            .iter()
            .find(|envelope| envelope.id == id)
            .ok_or_else(|| Error::envelope_not_found(id))
    }

    /// Applies a partial update and returns the envelope as it is afterwards.
    ///
    /// Fields are resolved in a fixed order:
    /// 1. `budget`: must be non-negative; the balance is clamped down if it now exceeds the cap.
    /// 2. `balance`: must lie within `0..=budget`, measured against the budget from step 1.
    /// 3. `name`: replaced as given.
    ///
    /// Nothing is written unless every supplied field is valid.
    pub fn update(&mut self, id: EnvelopeId, update: EnvelopeUpdate) -> Result<Envelope> {
        let index = self.position(id)?;
        let current = &self.envelopes[index];

        let budget = match update.budget {
            Some(budget) => validate_non_negative(budget)?,
            None => current.budget,
        };
        let balance = match update.balance {
            Some(balance) => {
                validate_non_negative(balance)?;
                if balance > budget {
                    return Err(Error::invalid_input(format!(
                        "balance {balance} exceeds the envelope budget {budget}"
                    )));
                }
                balance
            }
            None => current.balance.min(budget),
        };

        self.total_budget += budget - current.budget;
        let envelope = &mut self.envelopes[index];
        envelope.budget = budget;
        envelope.balance = balance;
        if let Some(name) = update.name {
            envelope.name = name;
        }
        Ok(envelope.clone())
    }

    /// Removes an envelope for good. Its id is never handed out again.
    pub fn delete(&mut self, id: EnvelopeId) -> Result<Envelope> {
        let index = self.position(id)?;
        let removed = self.envelopes.remove(index);
        self.total_budget -= removed.budget;
        Ok(removed)
    }

    /// Moves `amount` from one envelope's balance to another's.
    ///
    /// The amount must be positive and both envelopes must exist; the source must hold at least
    /// `amount`. When the destination ends up holding more than its cap, its budget is raised to
    /// the new balance (and the running total with it) so the balance never exceeds the budget.
    /// A transfer from an envelope to itself passes the same checks and changes nothing.
    pub fn transfer(
        &mut self,
        from_id: EnvelopeId,
        to_id: EnvelopeId,
        amount: f64,
    ) -> Result<Transfer> {
        let amount = validate_positive(amount)?;
        let from_index = self.position(from_id)?;
        let to_index = self.position(to_id)?;

        let available = self.envelopes[from_index].balance;
        if available < amount {
            return Err(Error::InsufficientFunds {
                current: available,
                required: amount,
            });
        }

        if from_index != to_index {
            self.envelopes[from_index].balance -= amount;

            let destination = &mut self.envelopes[to_index];
            destination.balance += amount;
            if destination.balance > destination.budget {
                self.total_budget += destination.balance - destination.budget;
                destination.budget = destination.balance;
            }
        }

        Ok(Transfer {
            from_envelope: self.envelopes[from_index].clone(),
            to_envelope: self.envelopes[to_index].clone(),
        })
    }

    /// Running sum of every envelope's budget.
    #[must_use]
    pub const fn total_budget(&self) -> f64 {
        self.total_budget
    }

    /// Snapshot of the ledger's aggregates.
    #[must_use]
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            envelope_count: self.envelopes.len(),
            total_budget: self.total_budget,
            total_balance: self.envelopes.iter().map(|envelope| envelope.balance).sum(),
            generated_at: Utc::now(),
        }
    }

    fn position(&self, id: EnvelopeId) -> Result<usize> {
        self.envelopes
            .iter()
            .position(|envelope| envelope.id == id)
            .ok_or_else(|| Error::envelope_not_found(id))
    }
}
