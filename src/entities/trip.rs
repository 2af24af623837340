use serde::Serialize;

use crate::utils::geo::Coordinate;

/// Distance, duration and fare for one pickup/destination pair.
///
/// `kms >= 1`, `duration_mins >= 5` and `price >= 3` always hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripEstimate {
    pub kms: u32,
    pub duration_mins: u32,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_coord: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest_coord: Option<Coordinate>,
}
