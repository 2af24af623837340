//! Trip estimation: remote routing when available, local heuristics otherwise.
//!
//! The public entry point never fails. A remote attempt that errors or times
//! out is thrown away whole and the trip is re-estimated locally.

pub mod pricing;
pub mod surge;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::entities::trip::TripEstimate;
use crate::provider::{ProviderError, RouteProvider};
use crate::utils::geo::{self, Coordinate};

pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(3);

/// Inputs of one estimation call
#[derive(Debug, Clone, Default)]
pub struct TripQuery {
    pub pickup: String,
    pub destination: String,
    pub departure: Option<NaiveDateTime>,
    pub use_remote: bool,
    pub credential: Option<String>,
}

impl TripQuery {
    pub fn new(pickup: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            pickup: pickup.into(),
            destination: destination.into(),
            ..Default::default()
        }
    }

    pub fn departing(mut self, departure: Option<NaiveDateTime>) -> Self {
        self.departure = departure;
        self
    }

    pub fn with_remote(mut self, credential: impl Into<String>) -> Self {
        self.use_remote = true;
        self.credential = Some(credential.into());
        self
    }

    /// Credential to use for the remote path, if that path is enabled at all
    fn remote_credential(&self) -> Option<&str> {
        if !self.use_remote {
            return None;
        }
        self.credential
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateSource {
    Remote,
    Local,
}

/// How an estimate was obtained
#[derive(Debug)]
pub enum EstimateOutcome {
    /// Provider geocoded and routed the trip
    Routed(TripEstimate),
    /// Remote path not requested
    Local(TripEstimate),
    /// Remote path failed; `estimate` came from the local path
    Recovered {
        estimate: TripEstimate,
        cause: ProviderError,
    },
}

impl EstimateOutcome {
    pub fn estimate(&self) -> &TripEstimate {
        match self {
            EstimateOutcome::Routed(e) | EstimateOutcome::Local(e) => e,
            EstimateOutcome::Recovered { estimate, .. } => estimate,
        }
    }

    pub fn into_estimate(self) -> TripEstimate {
        match self {
            EstimateOutcome::Routed(e) | EstimateOutcome::Local(e) => e,
            EstimateOutcome::Recovered { estimate, .. } => estimate,
        }
    }

    pub fn source(&self) -> EstimateSource {
        match self {
            EstimateOutcome::Routed(_) => EstimateSource::Remote,
            _ => EstimateSource::Local,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, EstimateOutcome::Recovered { .. })
    }
}

pub struct EstimationService {
    provider: Option<Arc<dyn RouteProvider>>,
    remote_timeout: Duration,
}

impl EstimationService {
    pub fn new(provider: Arc<dyn RouteProvider>, remote_timeout: Duration) -> Self {
        Self {
            provider: Some(provider),
            remote_timeout,
        }
    }

    /// A service that ignores `use_remote` and always estimates locally
    pub fn local_only() -> Self {
        Self {
            provider: None,
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }

    pub async fn estimate(&self, query: &TripQuery) -> TripEstimate {
        self.estimate_with_outcome(query).await.into_estimate()
    }

    pub async fn estimate_with_outcome(&self, query: &TripQuery) -> EstimateOutcome {
        let (Some(provider), Some(credential)) = (&self.provider, query.remote_credential())
        else {
            return EstimateOutcome::Local(estimate_local(query));
        };

        let attempt = estimate_remote(provider.as_ref(), query, credential);
        let cause = match tokio::time::timeout(self.remote_timeout, attempt).await {
            Ok(Ok(estimate)) => return EstimateOutcome::Routed(estimate),
            Ok(Err(err)) => err,
            Err(_) => ProviderError::Timeout(self.remote_timeout.as_millis()),
        };

        tracing::warn!(error = %cause, "Remote estimate failed, falling back to local estimate");
        EstimateOutcome::Recovered {
            estimate: estimate_local(query),
            cause,
        }
    }
}

/// Estimate from the text alone: haversine when both ends carry coordinates,
/// the length heuristic otherwise.
pub fn estimate_local(query: &TripQuery) -> TripEstimate {
    let pickup_coord = geo::parse_coordinates(&query.pickup);
    let dest_coord = geo::parse_coordinates(&query.destination);

    let kms = match (pickup_coord, dest_coord) {
        (Some(a), Some(b)) => geo::great_circle_km(a, b),
        _ => geo::heuristic_km(&query.pickup, &query.destination),
    };

    TripEstimate {
        kms,
        duration_mins: pricing::duration_minutes_local(kms),
        price: pricing::price(kms, surge::multiplier(query.departure)),
        pickup_coord,
        dest_coord,
    }
}

async fn estimate_remote(
    provider: &dyn RouteProvider,
    query: &TripQuery,
    credential: &str,
) -> Result<TripEstimate, ProviderError> {
    let (from, to) = tokio::try_join!(
        resolve(provider, &query.pickup, credential),
        resolve(provider, &query.destination, credential),
    )?;
    let leg = provider.route(from, to, credential).await?;

    // The provider never prices; surge is applied exactly once, here.
    let kms = pricing::routed_km(leg.distance_meters);
    Ok(TripEstimate {
        kms,
        duration_mins: pricing::duration_minutes_routed(leg.duration_seconds),
        price: pricing::price(kms, surge::multiplier(query.departure)),
        pickup_coord: Some(from),
        dest_coord: Some(to),
    })
}

/// Skip the network when the text already carries coordinates
async fn resolve(
    provider: &dyn RouteProvider,
    place: &str,
    credential: &str,
) -> Result<Coordinate, ProviderError> {
    match geo::parse_coordinates(place) {
        Some(coord) => Ok(coord),
        None => provider.geocode(place, credential).await,
    }
}
