use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use ride_fare_estimator::{
    estimation::{EstimateOutcome, EstimationService, TripQuery, estimate_local, surge},
    provider::{MapboxClient, ProviderError, RouteProvider},
    utils::geo::Coordinate,
};

const TOKEN: &str = "pk.valid";

type Params = Query<HashMap<String, String>>;

fn authorized(params: &HashMap<String, String>) -> bool {
    params.get("access_token").map(String::as_str) == Some(TOKEN)
}

async fn geocode(Path(query): Path<String>, Query(params): Params) -> (StatusCode, Json<Value>) {
    if !authorized(&params) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Not Authorized" })));
    }
    assert_eq!(params.get("limit").map(String::as_str), Some("1"));

    let place = query.trim_end_matches(".json");
    let features = match place {
        "Nowhere" => json!([]),
        "Ferry Building" => json!([{ "center": [-122.3937, 37.7955] }]),
        _ => json!([{ "center": [-122.4474, 37.7544] }]),
    };
    (StatusCode::OK, Json(json!({ "features": features })))
}

async fn directions(
    Path(coords): Path<String>,
    Query(params): Params,
) -> (StatusCode, Json<Value>) {
    if !authorized(&params) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Not Authorized" })));
    }
    if coords.starts_with("0,0") {
        return (StatusCode::OK, Json(json!({ "routes": [] })));
    }
    if coords.starts_with("1,1") {
        tokio::time::sleep(Duration::from_secs(2)).await;
    }
    (
        StatusCode::OK,
        Json(json!({ "routes": [{ "distance": 7_450.3, "duration": 1_013.0 }] })),
    )
}

/// Serve a stand-in for the Mapbox API on an ephemeral port
async fn fake_mapbox() -> String {
    let app = Router::new()
        .route("/geocoding/v5/mapbox.places/{query}", get(geocode))
        .route("/directions/v5/mapbox/driving/{coords}", get(directions));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn client() -> MapboxClient {
    MapboxClient::new(&fake_mapbox().await, Duration::from_millis(500)).unwrap()
}

#[tokio::test]
async fn geocodes_first_feature() {
    let client = client().await;
    let coord = client.geocode("Ferry Building", TOKEN).await.unwrap();
    assert_eq!(coord, Coordinate { lat: 37.7955, lng: -122.3937 });
}

#[tokio::test]
async fn empty_feature_list_is_an_error() {
    let client = client().await;
    let err = client.geocode("Nowhere", TOKEN).await.unwrap_err();
    assert!(matches!(err, ProviderError::NoResult(_)), "got {err:?}");
}

#[tokio::test]
async fn rejected_token_is_an_error() {
    let client = client().await;
    let err = client.geocode("Ferry Building", "pk.bogus").await.unwrap_err();
    assert!(matches!(err, ProviderError::Status(StatusCode::UNAUTHORIZED)), "got {err:?}");
}

#[tokio::test]
async fn routes_between_points() {
    let client = client().await;
    let from = Coordinate { lat: 37.7955, lng: -122.3937 };
    let to = Coordinate { lat: 37.7544, lng: -122.4474 };

    let leg = client.route(from, to, TOKEN).await.unwrap();
    assert_eq!(leg.distance_meters, 7_450.3);
    assert_eq!(leg.duration_seconds, 1_013.0);
}

#[tokio::test]
async fn empty_route_list_is_an_error() {
    let client = client().await;
    let origin = Coordinate { lat: 0.0, lng: 0.0 };

    let err = client.route(origin, origin, TOKEN).await.unwrap_err();
    assert!(matches!(err, ProviderError::NoResult("route")), "got {err:?}");
}

#[tokio::test]
async fn slow_route_hits_request_timeout() {
    let client = client().await;
    let slow = Coordinate { lat: 1.0, lng: 1.0 };

    let err = client.route(slow, slow, TOKEN).await.unwrap_err();
    assert!(matches!(err, ProviderError::Http(ref e) if e.is_timeout()), "got {err:?}");
}

#[tokio::test]
async fn service_routes_through_mapbox() {
    let service = EstimationService::new(Arc::new(client().await), Duration::from_secs(3));
    let query = TripQuery::new("Ferry Building", "Twin Peaks")
        .departing(surge::parse_timestamp("2030-05-14T08:30"))
        .with_remote(TOKEN);

    let outcome = service.estimate_with_outcome(&query).await;
    let EstimateOutcome::Routed(estimate) = outcome else {
        panic!("expected a routed estimate");
    };
    assert_eq!(estimate.kms, 7);
    assert_eq!(estimate.duration_mins, 17);
    assert_eq!(estimate.price, 11.76);
    assert_eq!(estimate.pickup_coord, Some(Coordinate { lat: 37.7955, lng: -122.3937 }));
}

#[tokio::test]
async fn service_falls_back_when_token_rejected() {
    let service = EstimationService::new(Arc::new(client().await), Duration::from_secs(3));
    let query = TripQuery::new("Ferry Building", "Twin Peaks").with_remote("pk.bogus");

    let outcome = service.estimate_with_outcome(&query).await;
    assert!(outcome.is_fallback());
    assert_eq!(outcome.into_estimate(), estimate_local(&query));
}

#[tokio::test]
async fn service_falls_back_when_provider_unreachable() {
    // bind and drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = MapboxClient::new(&format!("http://{addr}"), Duration::from_millis(500)).unwrap();
    let service = EstimationService::new(Arc::new(client), Duration::from_secs(3));
    let query = TripQuery::new("Ferry Building", "Twin Peaks").with_remote(TOKEN);

    let outcome = service.estimate_with_outcome(&query).await;
    assert!(matches!(
        outcome,
        EstimateOutcome::Recovered { cause: ProviderError::Http(_), .. }
    ));
}
