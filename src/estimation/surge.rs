//! Time-of-day surge pricing.

use chrono::{DateTime, NaiveDateTime, Timelike};

/// Parse the departure timestamp sent by the booking form.
///
/// Accepts the local `YYYY-MM-DDTHH:MM[:SS]` shape of a datetime-local input as
/// well as RFC 3339 (the wall-clock time in its own offset is kept).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// Multiplier for a departure time; the first matching band wins
pub fn multiplier(departure: Option<NaiveDateTime>) -> f64 {
    match departure {
        None => 1.0,
        Some(at) => multiplier_for_hour(at.hour()),
    }
}

pub fn multiplier_for_hour(hour: u32) -> f64 {
    match hour {
        7..=9 => 1.4,   // morning peak
        17..=20 => 1.5, // evening peak
        0..=4 => 1.2,   // late night
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32) -> Option<NaiveDateTime> {
        parse_timestamp(&format!("2030-05-14T{hour:02}:30"))
    }

    #[test]
    fn test_reference_hours() {
        assert_eq!(multiplier(at(8)), 1.4);
        assert_eq!(multiplier(at(18)), 1.5);
        assert_eq!(multiplier(at(2)), 1.2);
        assert_eq!(multiplier(at(12)), 1.0);
        assert_eq!(multiplier(None), 1.0);
    }

    #[test]
    fn test_band_edges() {
        for hour in [0, 4] {
            assert_eq!(multiplier_for_hour(hour), 1.2, "hour {hour}");
        }
        for hour in [7, 9] {
            assert_eq!(multiplier_for_hour(hour), 1.4, "hour {hour}");
        }
        for hour in [17, 20] {
            assert_eq!(multiplier_for_hour(hour), 1.5, "hour {hour}");
        }
        for hour in [5, 6, 10, 16, 21, 23] {
            assert_eq!(multiplier_for_hour(hour), 1.0, "hour {hour}");
        }
    }

    #[test]
    fn test_parse_timestamp_shapes() {
        assert_eq!(parse_timestamp("2030-05-14T08:15").map(|t| t.hour()), Some(8));
        assert_eq!(parse_timestamp("2030-05-14T08:15:42").map(|t| t.hour()), Some(8));
        assert_eq!(parse_timestamp("2030-05-14 19:00").map(|t| t.hour()), Some(19));
        assert_eq!(
            parse_timestamp("2030-05-14T18:05:00+02:00").map(|t| t.hour()),
            Some(18)
        );
    }

    #[test]
    fn test_unparseable_timestamp_is_absent() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("tomorrow morning"), None);
        assert_eq!(multiplier(parse_timestamp("not a date")), 1.0);
    }
}
