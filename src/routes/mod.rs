use axum::{
    routing::{get, post, put, MethodRouter},
    Router,
};

use crate::handlers::{booking, credential, driver, estimate};
use crate::middleware::rate_limit::{provider_quota_governor, ProviderQuotaLayer};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    build_router(state, None)
}

/// Router with the per-client quota on every endpoint that may call the
/// provider. Needs peer addresses, see [`provider_quota_governor`].
pub fn create_rate_limited_router(state: AppState) -> Router {
    build_router(state, Some(provider_quota_governor()))
}

fn build_router(state: AppState, quota: Option<ProviderQuotaLayer>) -> Router {
    let metered = |route: MethodRouter<AppState>| match &quota {
        Some(layer) => route.route_layer(layer.clone()),
        None => route,
    };

    Router::new()
        .route("/api/drivers", get(driver::list_drivers))
        .route("/api/estimate", metered(post(estimate::estimate)))
        .route(
            "/api/estimate/live",
            metered(put(estimate::submit_live)).get(estimate::latest_live),
        )
        .route("/api/bookings", metered(post(booking::create_booking)))
        .route(
            "/api/credential",
            get(credential::status).put(credential::store),
        )
        .with_state(state)
}
