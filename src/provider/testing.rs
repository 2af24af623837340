use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::{ProviderError, RouteLeg, RouteProvider};
use crate::utils::geo::Coordinate;

/// In-process provider with canned answers and call counters
pub(crate) struct ScriptedProvider {
    pub geocoded: Coordinate,
    pub leg: Option<RouteLeg>,
    pub fail_geocode: bool,
    pub delay: Duration,
    pub geocode_calls: AtomicUsize,
    pub route_calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn routing(distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            geocoded: Coordinate { lat: 37.7955, lng: -122.3937 },
            leg: Some(RouteLeg {
                distance_meters,
                duration_seconds,
            }),
            fail_geocode: false,
            delay: Duration::ZERO,
            geocode_calls: AtomicUsize::new(0),
            route_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_geocode() -> Self {
        Self {
            fail_geocode: true,
            ..Self::routing(0.0, 0.0)
        }
    }

    pub fn without_route() -> Self {
        Self {
            leg: None,
            ..Self::routing(0.0, 0.0)
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn geocode_calls(&self) -> usize {
        self.geocode_calls.load(Ordering::SeqCst)
    }

    pub fn route_calls(&self) -> usize {
        self.route_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RouteProvider for ScriptedProvider {
    async fn geocode(&self, _place: &str, _credential: &str) -> Result<Coordinate, ProviderError> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if self.fail_geocode {
            return Err(ProviderError::NoResult("geocode feature"));
        }
        Ok(self.geocoded)
    }

    async fn route(
        &self,
        _from: Coordinate,
        _to: Coordinate,
        _credential: &str,
    ) -> Result<RouteLeg, ProviderError> {
        self.route_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.leg.ok_or(ProviderError::NoResult("route"))
    }
}
