use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::availability::{self, DriverEligibility};
use crate::entities::trip::TripEstimate;
use crate::error::{AppError, AppResult};
use crate::estimation::{surge, EstimateSource, TripQuery};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EstimateRequest {
    pub pickup: String,
    pub destination: String,
    /// Local departure time, `YYYY-MM-DDTHH:MM`
    pub date: Option<String>,
    pub use_remote: bool,
    /// Overrides the stored provider token for this request
    pub credential: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub estimate: TripEstimate,
    pub source: EstimateSource,
    pub drivers: Vec<DriverEligibility>,
}

#[derive(Debug, Serialize)]
pub struct LiveEstimateResponse {
    pub seq: u64,
    pub estimate: TripEstimate,
    pub drivers: Vec<DriverEligibility>,
}

async fn build_query(state: &AppState, req: EstimateRequest) -> TripQuery {
    let credential = match (req.use_remote, req.credential) {
        (false, _) => None,
        (true, Some(token)) if !token.trim().is_empty() => Some(token),
        (true, _) => state.tokens.get().await,
    };

    TripQuery {
        pickup: req.pickup.trim().to_string(),
        destination: req.destination.trim().to_string(),
        departure: req.date.as_deref().and_then(surge::parse_timestamp),
        use_remote: req.use_remote,
        credential,
    }
}

/// Estimate a trip and flag which drivers can take it
pub async fn estimate(
    State(state): State<AppState>,
    Json(payload): Json<EstimateRequest>,
) -> AppResult<Json<EstimateResponse>> {
    if payload.pickup.trim().is_empty() || payload.destination.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Pickup and destination are required".to_string(),
        ));
    }

    let query = build_query(&state, payload).await;
    let outcome = state.estimator.estimate_with_outcome(&query).await;
    let hour = availability::requested_hour(query.departure);

    tracing::debug!(
        source = ?outcome.source(),
        fallback = outcome.is_fallback(),
        kms = outcome.estimate().kms,
        hour,
        "Estimated trip"
    );

    let drivers = availability::eligibility(&state.roster, outcome.estimate(), hour);
    Ok(Json(EstimateResponse {
        source: outcome.source(),
        estimate: outcome.into_estimate(),
        drivers,
    }))
}

/// Feed the debounced estimator with the latest form input
pub async fn submit_live(
    State(state): State<AppState>,
    Json(payload): Json<EstimateRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    let query = build_query(&state, payload).await;
    let seq = state.live.submit(query);

    (StatusCode::ACCEPTED, Json(serde_json::json!({ "seq": seq })))
}

/// Most recent settled estimate from the debounced estimator
pub async fn latest_live(State(state): State<AppState>) -> AppResult<Json<LiveEstimateResponse>> {
    let latest = state
        .live
        .latest()
        .ok_or_else(|| AppError::NotFound("No estimate yet".to_string()))?;

    let hour = availability::requested_hour(latest.departure);
    let drivers = availability::eligibility(&state.roster, &latest.estimate, hour);

    Ok(Json(LiveEstimateResponse {
        seq: latest.seq,
        estimate: latest.estimate,
        drivers,
    }))
}
