//! Remote geocoding / directions provider seam.

pub mod mapbox;
#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::utils::geo::Coordinate;

pub use mapbox::MapboxClient;

/// Road distance and travel time reported by a provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteLeg {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Every way the remote provider can let us down. The estimator treats all of
/// them the same and falls back to the local path.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider responded with {0}")]
    Status(StatusCode),

    #[error("could not build provider URL: {0}")]
    Url(String),

    #[error("no {0} returned")]
    NoResult(&'static str),

    #[error("provider did not answer within {0} ms")]
    Timeout(u128),
}

#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Resolve a place description to a coordinate
    async fn geocode(&self, place: &str, credential: &str) -> Result<Coordinate, ProviderError>;

    /// Driving route between two resolved points
    async fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
        credential: &str,
    ) -> Result<RouteLeg, ProviderError>;
}
