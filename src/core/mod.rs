/// Envelope record and partial-update payload
pub mod envelope;

/// Stateless allowance-versus-expenses calculator
pub mod flat_budget;

/// Envelope ledger: CRUD and transfers over in-memory envelopes
pub mod ledger;
