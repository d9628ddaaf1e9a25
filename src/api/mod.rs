//! HTTP interface - routing, shared state and request handlers.
//!
//! Handlers stay thin: they extract and validate the request shape, call into [`crate::core`],
//! and turn the outcome into JSON.

/// Envelope CRUD, transfer and ledger summary handlers
pub mod envelopes;
/// Error responses and the JSON body extractor
pub mod error;
/// Flat budget summary handlers
pub mod flat_budget;

use crate::core::{flat_budget::FlatBudgetDefaults, ledger::Ledger};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::{ApiJson, ErrorBody};

/// Shared application state, cloned into every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The one ledger of this process
    pub ledger: Arc<RwLock<Ledger>>,
    /// Inputs for the default flat budget summary
    pub flat_budget: Arc<FlatBudgetDefaults>,
}

impl AppState {
    /// Creates state around an empty ledger.
    #[must_use]
    pub fn new(flat_budget: FlatBudgetDefaults) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(Ledger::new())),
            flat_budget: Arc::new(flat_budget),
        }
    }
}

/// Builds the full route table.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(flat_budget::default_summary))
        .route("/api", get(flat_budget::default_summary))
        .route("/api/flat-budget", post(flat_budget::custom_summary))
        .route("/api/nsfas-budget", post(flat_budget::custom_summary))
        .route("/api/health", get(health_check))
        .route(
            "/api/envelopes",
            get(envelopes::list_envelopes).post(envelopes::create_envelope),
        )
        .route("/api/envelopes/summary", get(envelopes::ledger_summary))
        .route("/api/envelopes/transfer", post(envelopes::transfer_funds))
        .route(
            "/api/envelopes/:id",
            get(envelopes::get_envelope)
                .put(envelopes::update_envelope)
                .delete(envelopes::delete_envelope),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /api/health
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
