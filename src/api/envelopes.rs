//! Envelope endpoints under `/api/envelopes`.

use crate::{
    api::{ApiJson, AppState},
    core::{
        envelope::{Envelope, EnvelopeId, EnvelopeUpdate, validate_positive},
        ledger::{LedgerSummary, Transfer},
    },
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// Body of `POST /api/envelopes`.
#[derive(Debug, Deserialize)]
pub struct CreateEnvelopeRequest {
    /// Envelope label
    pub name: String,
    /// Budget cap; the new envelope starts with this as its balance
    pub budget: f64,
}

/// Body of `POST /api/envelopes/transfer`.
///
/// Ids arrive as plain JSON numbers; a number that cannot be an envelope id (negative,
/// fractional) simply names no envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Source envelope
    pub from_id: f64,
    /// Destination envelope
    pub to_id: f64,
    /// Amount to move, strictly positive
    pub amount: f64,
}

// A path segment that is not an id cannot name an envelope.
fn parse_envelope_id(raw: &str) -> Result<EnvelopeId> {
    raw.parse().map_err(|_| Error::envelope_not_found(raw))
}

// Same for a JSON number: only whole, non-negative values can match.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn envelope_id_from_number(value: f64) -> Result<EnvelopeId> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Ok(value as EnvelopeId)
    } else {
        Err(Error::envelope_not_found(value))
    }
}

/// POST /api/envelopes
#[instrument(skip(state))]
pub async fn create_envelope(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateEnvelopeRequest>,
) -> Result<(StatusCode, Json<Envelope>)> {
    let envelope = state
        .ledger
        .write()
        .await
        .create(&request.name, request.budget)?;
    info!(
        id = envelope.id,
        name = %envelope.name,
        budget = envelope.budget,
        "Envelope created"
    );
    Ok((StatusCode::CREATED, Json(envelope)))
}

/// GET /api/envelopes
pub async fn list_envelopes(State(state): State<AppState>) -> Json<Vec<Envelope>> {
    Json(state.ledger.read().await.list().to_vec())
}

/// GET /api/envelopes/:id
#[instrument(skip(state))]
pub async fn get_envelope(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope>> {
    let id = parse_envelope_id(&id)?;
    let ledger = state.ledger.read().await;
    Ok(Json(ledger.get(id)?.clone()))
}

/// PUT /api/envelopes/:id
#[instrument(skip(state))]
pub async fn update_envelope(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<EnvelopeUpdate>,
) -> Result<Json<Envelope>> {
    let id = parse_envelope_id(&id)?;
    if update.is_empty() {
        debug!(id, "Update carries no fields");
    }
    let envelope = state.ledger.write().await.update(id, update)?;
    info!(
        id = envelope.id,
        budget = envelope.budget,
        balance = envelope.balance,
        "Envelope updated"
    );
    Ok(Json(envelope))
}

/// DELETE /api/envelopes/:id
#[instrument(skip(state))]
pub async fn delete_envelope(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_envelope_id(&id)?;
    let removed = state.ledger.write().await.delete(id)?;
    info!(id = removed.id, name = %removed.name, "Envelope deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/envelopes/transfer
#[instrument(skip(state))]
pub async fn transfer_funds(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TransferRequest>,
) -> Result<Json<Transfer>> {
    // Amount problems are reported before unknown ids
    let amount = validate_positive(request.amount)?;
    let from_id = envelope_id_from_number(request.from_id)?;
    let to_id = envelope_id_from_number(request.to_id)?;

    let mut ledger = state.ledger.write().await;
    let budget_before = ledger.get(to_id).map(|envelope| envelope.budget).ok();
    let transfer = ledger.transfer(from_id, to_id, amount)?;
    info!(from = from_id, to = to_id, amount, "Funds transferred");

    let destination = &transfer.to_envelope;
    if let Some(previous) = budget_before.filter(|budget| destination.budget > *budget) {
        info!(
            id = destination.id,
            previous_budget = previous,
            budget = destination.budget,
            "Destination budget raised to hold the transferred funds"
        );
    }
    Ok(Json(transfer))
}

/// GET /api/envelopes/summary
pub async fn ledger_summary(State(state): State<AppState>) -> Json<LedgerSummary> {
    Json(state.ledger.read().await.summary())
}
