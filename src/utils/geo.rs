use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Bounds of the text-length distance proxy, in kilometers
pub const HEURISTIC_MIN_KM: u32 = 2;
pub const HEURISTIC_MAX_KM: u32 = 80;

static COORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?[0-9]+\.?[0-9]*),\s*(-?[0-9]+\.?[0-9]*)").expect("coordinate pattern is valid")
});

/// A WGS84 point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting values outside lat [-90, 90] / lng [-180, 180]
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }
}

/// Extract the first `lat,lng` pair embedded in free text.
///
/// `None` is the normal "no coordinates here" answer and sends the caller down
/// the heuristic distance path. Pairs outside the valid range count as a miss.
pub fn parse_coordinates(text: &str) -> Option<Coordinate> {
    let caps = COORD_PATTERN.captures(text)?;
    let lat: f64 = caps.get(1)?.as_str().parse().ok()?;
    let lng: f64 = caps.get(2)?.as_str().parse().ok()?;

    let coord = Coordinate::new(lat, lng);
    if coord.is_none() {
        tracing::debug!(lat, lng, "Ignoring out-of-range coordinate pair");
    }
    coord
}

/// Calculate distance between two coordinates using Haversine formula
/// Returns distance in kilometers
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance rounded to whole kilometers, never below 1
pub fn great_circle_km(a: Coordinate, b: Coordinate) -> u32 {
    (haversine_distance(a, b).round() as u32).max(1)
}

/// Distance proxy for when one or both endpoints have no coordinates.
///
/// This is a deliberately low-fidelity placeholder derived from the lengths of
/// the two place descriptions; it only keeps the estimate in a plausible band.
/// Lengths are counted in `char`s.
pub fn heuristic_km(pickup: &str, destination: &str) -> u32 {
    let p = pickup.chars().count() as f64;
    let d = destination.chars().count() as f64;
    let len = (p - d).abs() + (p + d) / 30.0;

    ((len * 2.0).round() as u32).clamp(HEURISTIC_MIN_KM, HEURISTIC_MAX_KM)
}
