use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{ProviderError, RouteLeg, RouteProvider};
use crate::utils::geo::Coordinate;

pub const DEFAULT_ENDPOINT: &str = "https://api.mapbox.com";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    /// `[lng, lat]`
    center: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

/// Thin HTTP client for the Mapbox geocoding and directions APIs.
#[derive(Debug, Clone)]
pub struct MapboxClient {
    client: Client,
    endpoint: String,
}

impl MapboxClient {
    /// Create a client for the given endpoint (e.g. `https://api.mapbox.com`).
    pub fn new(endpoint: &str, request_timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, ProviderError> {
        Url::parse(&format!("{}{}", self.endpoint, path))
            .map_err(|err| ProviderError::Url(err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ProviderError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl RouteProvider for MapboxClient {
    async fn geocode(&self, place: &str, credential: &str) -> Result<Coordinate, ProviderError> {
        let mut url = self.url("/geocoding/v5/mapbox.places")?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::Url("endpoint cannot carry a path".to_string()))?
            .push(&format!("{place}.json"));
        url.query_pairs_mut()
            .append_pair("access_token", credential)
            .append_pair("limit", "1");

        let body: GeocodeResponse = self.get_json(url).await?;
        let feature = body
            .features
            .first()
            .ok_or(ProviderError::NoResult("geocode feature"))?;

        let [lng, lat] = feature.center;
        let coord =
            Coordinate::new(lat, lng).ok_or(ProviderError::NoResult("valid geocode center"))?;
        tracing::debug!(place, lat, lng, "Geocoded place");
        Ok(coord)
    }

    async fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
        credential: &str,
    ) -> Result<RouteLeg, ProviderError> {
        let mut url = self.url(&format!(
            "/directions/v5/mapbox/driving/{},{};{},{}",
            from.lng, from.lat, to.lng, to.lat
        ))?;
        url.query_pairs_mut()
            .append_pair("access_token", credential)
            .append_pair("overview", "full")
            .append_pair("geometries", "geojson");

        let body: DirectionsResponse = self.get_json(url).await?;
        let route = body.routes.first().ok_or(ProviderError::NoResult("route"))?;

        tracing::debug!(
            distance_m = route.distance,
            duration_s = route.duration,
            "Received driving route"
        );
        Ok(RouteLeg {
            distance_meters: route.distance,
            duration_seconds: route.duration,
        })
    }
}
