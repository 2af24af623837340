use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::driver::Driver;
use super::trip::TripEstimate;

/// Booking form as submitted by the client. Every field defaults to empty so
/// missing values surface as validation messages instead of decode errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookingRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub pickup: String,
    pub destination: String,
    /// Local departure time, `YYYY-MM-DDTHH:MM`
    pub date: String,
    pub driver_id: Option<String>,
    pub use_remote: bool,
}

#[derive(Debug, Serialize)]
pub struct BookingConfirmation {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub pickup: String,
    pub destination: String,
    pub date: String,
    pub driver: Driver,
    pub estimate: TripEstimate,
    pub created_at: DateTime<Utc>,
}
