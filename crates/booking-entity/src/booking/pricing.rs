//! Trip pricing.

/// Charge per kilometre driven.
pub const PER_KM_RATE: f64 = 1.50;

/// Charge per minute of trip duration.
pub const PER_MINUTE_RATE: f64 = 0.25;

/// Price a completed trip. A missing duration contributes nothing.
pub fn trip_cost(distance_km: f64, duration_minutes: Option<i32>) -> f64 {
    distance_km * PER_KM_RATE + f64::from(duration_minutes.unwrap_or(0)) * PER_MINUTE_RATE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_and_duration() {
        assert_eq!(trip_cost(10.0, Some(20)), 20.0);
        assert_eq!(trip_cost(5.0, Some(10)), 10.0);
    }

    #[test]
    fn test_missing_duration_prices_distance_only() {
        assert_eq!(trip_cost(4.0, None), 6.0);
    }

    #[test]
    fn test_zero_trip_is_free() {
        assert_eq!(trip_cost(0.0, Some(0)), 0.0);
    }
}
