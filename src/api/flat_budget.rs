//! Flat budget endpoints: `GET /`, `GET /api` and `POST /api/flat-budget`
//! (also reachable as `POST /api/nsfas-budget`).

use crate::{
    api::{ApiJson, AppState},
    core::flat_budget::{BudgetSummary, FlatBudgetRequest},
    errors::Result,
};
use axum::{Json, extract::State};
use tracing::{debug, instrument};

/// Summary over the configured defaults.
pub async fn default_summary(State(state): State<AppState>) -> Json<BudgetSummary> {
    Json(state.flat_budget.summary())
}

/// Summary over caller-supplied inputs, with defaults filling any gap.
#[instrument(skip(state))]
pub async fn custom_summary(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<FlatBudgetRequest>,
) -> Result<Json<BudgetSummary>> {
    let summary = request.resolve(&state.flat_budget)?;
    debug!(remaining = summary.remaining, "Flat budget computed");
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use crate::{
        api::{AppState, router},
        core::flat_budget::{FlatBudgetDefaults, OVERSPENDING, WITHIN_BUDGET},
        test_utils::*,
    };
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_default_summary_on_both_routes() {
        let app = router(AppState::new(FlatBudgetDefaults::default()));

        for uri in ["/", "/api"] {
            let (status, body) = send_json(&app, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["allowance"], 1650.0);
            assert_eq!(body["totalExpenses"], 1600.0);
            assert_eq!(body["remaining"], 50.0);
            assert_eq!(body["message"], WITHIN_BUDGET);
            assert_eq!(body["expenses"]["groceries"], 400.0);
        }
    }

    #[tokio::test]
    async fn test_default_summary_overspending() {
        let defaults = FlatBudgetDefaults {
            allowance: 500.0,
            ..FlatBudgetDefaults::default()
        };
        let app = router(AppState::new(defaults));

        let (status, body) = send_json(&app, Method::GET, "/api", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], OVERSPENDING);
        assert!(body["remaining"].as_f64().unwrap() < 0.0);
    }

    #[tokio::test]
    async fn test_custom_summary() {
        let app = router(AppState::new(FlatBudgetDefaults::default()));

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/flat-budget",
            Some(json!({ "allowance": 1000, "expenses": { "rent": 700, "food": 450 } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["allowance"], 1000.0);
        assert_eq!(body["totalExpenses"], 1150.0);
        assert_eq!(body["remaining"], -150.0);
        assert_eq!(body["message"], OVERSPENDING);

        let (status, body) =
            send_json(&app, Method::POST, "/api/flat-budget", Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["allowance"], 1650.0);
        assert_eq!(body["totalExpenses"], 1600.0);
    }

    #[tokio::test]
    async fn test_custom_summary_legacy_route_and_null_expenses() {
        let app = router(AppState::new(FlatBudgetDefaults::default()));

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/nsfas-budget",
            Some(json!({ "allowance": 2000, "expenses": null })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["allowance"], 2000.0);
        assert_eq!(body["totalExpenses"], 1600.0);
        assert_eq!(body["remaining"], 400.0);
        assert_eq!(body["message"], WITHIN_BUDGET);
    }

    #[tokio::test]
    async fn test_custom_summary_rejects_bad_shapes() {
        let app = router(AppState::new(FlatBudgetDefaults::default()));

        for payload in [
            json!({ "allowance": -1 }),
            json!({ "allowance": "plenty" }),
            json!({ "allowance": null }),
            json!({ "expenses": [100, 200] }),
            json!({ "expenses": "rent" }),
            json!({ "expenses": { "rent": "cheap" } }),
            json!({ "expenses": { "refund": -10 } }),
        ] {
            let (status, body) =
                send_json(&app, Method::POST, "/api/flat-budget", Some(payload.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
            assert!(body["error"].is_string());
        }
    }
}
