/// Fare per kilometer in currency units
pub const BASE_RATE_PER_KM: f64 = 1.2;

/// Minimum fare for any trip
pub const MIN_FARE: f64 = 3.0;

/// Duration floors for the local-estimate and routed paths
pub const MIN_LOCAL_DURATION_MINS: u32 = 10;
pub const MIN_ROUTED_DURATION_MINS: u32 = 5;

/// `max(3, kms * 1.2 * multiplier)` rounded to cents
pub fn price(kms: u32, multiplier: f64) -> f64 {
    let raw = f64::from(kms) * BASE_RATE_PER_KM * multiplier;
    round_cents(raw).max(MIN_FARE)
}

pub fn duration_minutes_local(kms: u32) -> u32 {
    let mins = (f64::from(kms) * 2.0 + 5.0).round() as u32;
    mins.max(MIN_LOCAL_DURATION_MINS)
}

pub fn duration_minutes_routed(duration_seconds: f64) -> u32 {
    let mins = (duration_seconds.max(0.0) / 60.0).round() as u32;
    mins.max(MIN_ROUTED_DURATION_MINS)
}

pub fn routed_km(distance_meters: f64) -> u32 {
    ((distance_meters.max(0.0) / 1000.0).round() as u32).max(1)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_floor() {
        for kms in [0, 1, 2] {
            for m in [0.01, 1.0, 1.2, 1.4, 1.5] {
                assert!(price(kms, m) >= MIN_FARE, "kms={kms} m={m}");
            }
        }
        assert_eq!(price(0, 1.5), MIN_FARE);
    }

    #[test]
    fn test_price_rounding() {
        assert_eq!(price(10, 1.0), 12.0);
        assert_eq!(price(10, 1.4), 16.8);
        assert_eq!(price(7, 1.5), 12.6);
        assert_eq!(price(25, 1.2), 36.0);
        assert_eq!(price(3, 1.0), 3.6);
    }

    #[test]
    fn test_local_duration() {
        assert_eq!(duration_minutes_local(1), 10);
        assert_eq!(duration_minutes_local(2), 10);
        assert_eq!(duration_minutes_local(3), 11);
        assert_eq!(duration_minutes_local(40), 85);
    }

    #[test]
    fn test_routed_conversions() {
        assert_eq!(duration_minutes_routed(0.0), 5);
        assert_eq!(duration_minutes_routed(240.0), 5);
        assert_eq!(duration_minutes_routed(1290.0), 22);
        assert_eq!(routed_km(0.0), 1);
        assert_eq!(routed_km(400.0), 1);
        assert_eq!(routed_km(12_600.0), 13);
    }
}
