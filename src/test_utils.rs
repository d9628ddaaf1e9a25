//! Shared test utilities for the envelope API.
//!
//! This module provides helpers for building ledgers with known contents and for checking
//! the ledger invariants after a mutation.

#![allow(clippy::unwrap_used)]

use crate::{core::ledger::Ledger, errors::Result};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

/// Creates a ledger holding one envelope per `(name, budget)` pair, in order.
/// Ids therefore start at 1 and follow the slice.
pub fn setup_ledger_with(envelopes: &[(&str, f64)]) -> Result<Ledger> {
    let mut ledger = Ledger::new();
    for (name, budget) in envelopes {
        ledger.create(name, *budget)?;
    }
    Ok(ledger)
}

/// Asserts `0 <= balance <= budget` for every envelope and that the running budget total
/// matches a fresh sum over all envelopes.
pub fn assert_ledger_invariants(ledger: &Ledger) {
    for envelope in ledger.list() {
        assert!(
            envelope.is_within_budget(),
            "envelope {} out of bounds: balance {} budget {}",
            envelope.id,
            envelope.balance,
            envelope.budget
        );
    }
    let recomputed: f64 = ledger.list().iter().map(|envelope| envelope.budget).sum();
    assert!(
        (ledger.total_budget() - recomputed).abs() < 1e-9,
        "total budget drifted: cached {} recomputed {}",
        ledger.total_budget(),
        recomputed
    );
}

/// Routes tracing output through the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Sends one request through `app` and returns the status plus the decoded JSON body.
/// An empty response body comes back as `Value::Null`.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    send_raw(app, method, uri, body.map(|json| json.to_string())).await
}

/// Like [`send_json`], but with the request body passed through untouched.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Value) {
    init_test_tracing();
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(text) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(text))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
