use std::sync::LazyLock;

use chrono::{Duration, NaiveDateTime};
use regex::Regex;

use crate::entities::booking::BookingRequest;
use crate::entities::driver::Driver;
use crate::error::FieldErrors;
use crate::estimation::surge::parse_timestamp;

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone pattern is valid"));
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Bookings must be made at least this far ahead
pub const MIN_LEAD_TIME_MINS: i64 = 60;

/// A booking request whose fields all passed validation
#[derive(Debug)]
pub struct ValidBooking<'a> {
    pub departure: NaiveDateTime,
    pub driver: &'a Driver,
}

/// Check every field and collect one message per failing field
pub fn validate_booking<'a>(
    req: &BookingRequest,
    roster: &'a [Driver],
    now: NaiveDateTime,
) -> Result<ValidBooking<'a>, FieldErrors> {
    let mut errors = FieldErrors::new();

    if req.name.trim().is_empty() {
        errors.insert("name", "Name is required".to_string());
    }

    let phone: String = req
        .phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if phone.is_empty() {
        errors.insert("phone", "Phone is required".to_string());
    } else if !PHONE.is_match(&phone) {
        errors.insert("phone", "Invalid phone".to_string());
    }

    let email = req.email.trim();
    if email.is_empty() {
        errors.insert("email", "Email is required".to_string());
    } else if !EMAIL.is_match(email) {
        errors.insert("email", "Invalid email".to_string());
    }

    if req.pickup.trim().is_empty() {
        errors.insert("pickup", "Pickup is required".to_string());
    }
    if req.destination.trim().is_empty() {
        errors.insert("destination", "Destination is required".to_string());
    }

    let departure = if req.date.trim().is_empty() {
        errors.insert("date", "Date & time required".to_string());
        None
    } else {
        match parse_timestamp(&req.date) {
            None => {
                errors.insert("date", "Invalid date & time".to_string());
                None
            }
            Some(at) if at < now + Duration::minutes(MIN_LEAD_TIME_MINS) => {
                errors.insert("date", "Choose a time at least 1 hour from now".to_string());
                None
            }
            Some(at) => Some(at),
        }
    };

    let driver = match req.driver_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
        None => {
            errors.insert("driver", "Select a driver".to_string());
            None
        }
        Some(id) => {
            let found = roster.iter().find(|d| d.id == id);
            if found.is_none() {
                errors.insert("driver", "Unknown driver".to_string());
            }
            found
        }
    };

    match (departure, driver) {
        (Some(departure), Some(driver)) if errors.is_empty() => {
            Ok(ValidBooking { departure, driver })
        }
        _ => Err(errors),
    }
}
