use std::collections::HashSet;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::entities::driver::Driver;
use crate::entities::trip::TripEstimate;

/// Trips longer than this are outside every driver's service radius
pub const MAX_SERVICE_KM: u32 = 60;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverEligibility {
    pub id: String,
    pub name: String,
    pub eligible: bool,
}

/// Hour the trip is requested for: the departure's hour, or the current local hour
pub fn requested_hour(departure: Option<NaiveDateTime>) -> u32 {
    departure.map_or_else(|| Local::now().hour(), |at| at.hour())
}

pub fn is_eligible(driver: &Driver, estimate: &TripEstimate, hour: u32) -> bool {
    estimate.kms <= MAX_SERVICE_KM && driver.is_on_shift(hour)
}

/// Ids of drivers that cannot take the trip
pub fn ineligible(drivers: &[Driver], estimate: &TripEstimate, hour: u32) -> HashSet<String> {
    drivers
        .iter()
        .filter(|d| !is_eligible(d, estimate, hour))
        .map(|d| d.id.clone())
        .collect()
}

/// One entry per roster driver, in roster order
pub fn eligibility(
    drivers: &[Driver],
    estimate: &TripEstimate,
    hour: u32,
) -> Vec<DriverEligibility> {
    drivers
        .iter()
        .map(|d| DriverEligibility {
            id: d.id.clone(),
            name: d.name.clone(),
            eligible: is_eligible(d, estimate, hour),
        })
        .collect()
}
