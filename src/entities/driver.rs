use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::utils::geo::Coordinate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub location: Coordinate,
    /// Inclusive local-hour window, 0..=23
    pub available_from_hour: u32,
    pub available_to_hour: u32,
}

impl Driver {
    pub fn is_on_shift(&self, hour: u32) -> bool {
        (self.available_from_hour..=self.available_to_hour).contains(&hour)
    }
}

/// Roster used when no `ROSTER_PATH` is configured
pub fn default_roster() -> Vec<Driver> {
    let driver = |id: &str, name: &str, lat: f64, lng: f64, from: u32, to: u32| Driver {
        id: id.to_string(),
        name: name.to_string(),
        location: Coordinate { lat, lng },
        available_from_hour: from,
        available_to_hour: to,
    };

    vec![
        driver("1", "John Doe", 37.7749, -122.4194, 6, 22),
        driver("2", "Mike Smith", 37.7849, -122.4094, 8, 20),
        driver("3", "Sarah Johnson", 37.7649, -122.4294, 0, 23),
    ]
}

/// Load the roster once at startup, either from a JSON file or the built-in list
pub fn load_roster(path: Option<&Path>) -> AppResult<Vec<Driver>> {
    let Some(path) = path else {
        return Ok(default_roster());
    };

    let data = std::fs::read_to_string(path)?;
    let drivers: Vec<Driver> = serde_json::from_str(&data)?;

    for d in &drivers {
        if d.available_from_hour > 23 || d.available_to_hour > 23 {
            return Err(AppError::BadRequest(format!(
                "Driver {} has an availability hour outside 0-23",
                d.id
            )));
        }
        if Coordinate::new(d.location.lat, d.location.lng).is_none() {
            return Err(AppError::BadRequest(format!(
                "Driver {} has an invalid location",
                d.id
            )));
        }
    }

    tracing::info!(path = %path.display(), count = drivers.len(), "Loaded driver roster");
    Ok(drivers)
}
