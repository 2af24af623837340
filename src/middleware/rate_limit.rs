//! Per-client quota for the endpoints that can spend Mapbox requests, plus
//! the request log line.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor, GovernorLayer,
};

/// One estimate every 3 s per client IP once the burst is spent
pub const QUOTA_REFILL_SECS: u64 = 3;
pub const QUOTA_BURST: u32 = 20;

pub type ProviderQuotaLayer = GovernorLayer<
    PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware<governor::clock::QuantaInstant>,
    Body,
>;

/// Keyed on the peer address, so the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn provider_quota_governor() -> ProviderQuotaLayer {
    let config = GovernorConfigBuilder::default()
        .per_second(QUOTA_REFILL_SECS)
        .burst_size(QUOTA_BURST)
        .finish()
        .expect("quota refill period and burst are non-zero");

    GovernorLayer::new(Arc::new(config))
}

pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match status {
        StatusCode::TOO_MANY_REQUESTS => tracing::warn!(
            client_ip = %addr.ip(),
            %method,
            path = %path,
            "Estimate quota exhausted for client"
        ),
        s if s.is_server_error() => tracing::error!(
            client_ip = %addr.ip(),
            %method,
            path = %path,
            status = %s,
            elapsed_ms,
            "Request failed"
        ),
        s => tracing::debug!(
            client_ip = %addr.ip(),
            %method,
            path = %path,
            status = %s,
            elapsed_ms,
            "Handled request"
        ),
    }

    response
}
