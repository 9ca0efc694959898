//! Caller-supplied inputs for creating, completing, and updating bookings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use booking_core::error::AppError;
use booking_core::result::AppResult;

use super::patch::BookingPatch;
use super::pricing::trip_cost;
use super::status::BookingStatus;

/// Data required to create a new booking.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewBooking {
    /// Booking user.
    #[validate(
        length(min = 1, message = "user_id is required"),
        custom(function = "single_segment")
    )]
    pub user_id: String,
    /// Vehicle to book.
    #[validate(
        length(min = 1, message = "vehicle_id is required"),
        custom(function = "single_segment")
    )]
    pub vehicle_id: String,
    /// Scheduled start.
    pub start_time: DateTime<Utc>,
    /// Pickup latitude.
    #[validate(range(
        min = -90.0,
        max = 90.0,
        message = "pickup_latitude must be within [-90, 90]"
    ))]
    pub pickup_latitude: f64,
    /// Pickup longitude.
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "pickup_longitude must be within [-180, 180]"
    ))]
    pub pickup_longitude: f64,
    /// Pickup address.
    #[validate(length(min = 1, message = "pickup_address is required"))]
    pub pickup_address: String,
    /// Planned dropoff latitude.
    #[serde(default)]
    #[validate(range(
        min = -90.0,
        max = 90.0,
        message = "dropoff_latitude must be within [-90, 90]"
    ))]
    pub dropoff_latitude: Option<f64>,
    /// Planned dropoff longitude.
    #[serde(default)]
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "dropoff_longitude must be within [-180, 180]"
    ))]
    pub dropoff_longitude: Option<f64>,
    /// Planned dropoff address.
    #[serde(default)]
    pub dropoff_address: Option<String>,
}

impl NewBooking {
    /// Check field bounds and that dropoff coordinates come in pairs.
    pub fn ensure_valid(&self) -> AppResult<()> {
        self.validate().map_err(validation_error)?;
        ensure_coordinate_pair(self.dropoff_latitude, self.dropoff_longitude)
    }
}

/// Trip details supplied when completing a booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CompleteBooking {
    /// Actual dropoff latitude.
    #[serde(default)]
    #[validate(range(
        min = -90.0,
        max = 90.0,
        message = "dropoff_latitude must be within [-90, 90]"
    ))]
    pub dropoff_latitude: Option<f64>,
    /// Actual dropoff longitude.
    #[serde(default)]
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "dropoff_longitude must be within [-180, 180]"
    ))]
    pub dropoff_longitude: Option<f64>,
    /// Actual dropoff address.
    #[serde(default)]
    pub dropoff_address: Option<String>,
    /// Distance driven, in kilometres.
    #[serde(default)]
    #[validate(range(
        min = 0.0,
        max = 100_000.0,
        message = "distance must be within [0, 100000] km"
    ))]
    pub distance: Option<f64>,
    /// Trip duration, in minutes.
    #[serde(default)]
    #[validate(range(
        min = 0,
        max = 525_600,
        message = "duration must be within [0, 525600] minutes"
    ))]
    pub duration: Option<i32>,
}

impl CompleteBooking {
    /// Check field bounds and that dropoff coordinates come in pairs.
    pub fn ensure_valid(&self) -> AppResult<()> {
        self.validate().map_err(validation_error)?;
        ensure_coordinate_pair(self.dropoff_latitude, self.dropoff_longitude)
    }

    /// Build the completion patch, pricing the trip when a distance is known.
    pub fn into_patch(self, ended_at: DateTime<Utc>) -> BookingPatch {
        let cost = self
            .distance
            .map(|distance| trip_cost(distance, self.duration));

        BookingPatch {
            status: Some(BookingStatus::Completed),
            end_time: Some(ended_at),
            dropoff_latitude: self.dropoff_latitude,
            dropoff_longitude: self.dropoff_longitude,
            dropoff_address: self.dropoff_address,
            distance: self.distance,
            duration: self.duration,
            cost,
        }
    }
}

/// Planning update for a booking that has not finished yet.
///
/// Only dropoff fields are writable here; status, timing, distance,
/// duration and cost change only through lifecycle transitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateBooking {
    /// Planned dropoff latitude.
    #[serde(default)]
    #[validate(range(
        min = -90.0,
        max = 90.0,
        message = "dropoff_latitude must be within [-90, 90]"
    ))]
    pub dropoff_latitude: Option<f64>,
    /// Planned dropoff longitude.
    #[serde(default)]
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "dropoff_longitude must be within [-180, 180]"
    ))]
    pub dropoff_longitude: Option<f64>,
    /// Planned dropoff address.
    #[serde(default)]
    pub dropoff_address: Option<String>,
}

impl UpdateBooking {
    /// Check field bounds and that dropoff coordinates come in pairs.
    pub fn ensure_valid(&self) -> AppResult<()> {
        self.validate().map_err(validation_error)?;
        ensure_coordinate_pair(self.dropoff_latitude, self.dropoff_longitude)
    }

    /// Convert into a sparse patch touching only the supplied fields.
    pub fn into_patch(self) -> BookingPatch {
        BookingPatch {
            dropoff_latitude: self.dropoff_latitude,
            dropoff_longitude: self.dropoff_longitude,
            dropoff_address: self.dropoff_address,
            ..BookingPatch::default()
        }
    }
}

fn ensure_coordinate_pair(latitude: Option<f64>, longitude: Option<f64>) -> AppResult<()> {
    if latitude.is_some() != longitude.is_some() {
        return Err(AppError::validation(
            "dropoff_latitude and dropoff_longitude must be supplied together",
        ));
    }
    Ok(())
}

/// Reject references that would not survive as one URL path segment.
fn single_segment(value: &str) -> Result<(), ValidationError> {
    if value == "." || value == ".." || value.contains(['/', '\\', '?', '#', '%']) {
        let mut error = ValidationError::new("single_segment");
        error.message = Some("must not contain '/', '\\', '?', '#' or '%'".into());
        return Err(error);
    }
    Ok(())
}

fn validation_error(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match (&e.message, e.code.as_ref()) {
                (Some(m), "single_segment") => format!("{field} {m}"),
                (Some(m), _) => m.to_string(),
                (None, _) => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    AppError::validation(messages.join("; "))
}

#[cfg(test)]
mod tests {
    use booking_core::error::ErrorKind;

    use super::*;

    fn sample() -> NewBooking {
        NewBooking {
            user_id: "user-1".to_string(),
            vehicle_id: "vehicle-1".to_string(),
            start_time: Utc::now(),
            pickup_latitude: 40.7128,
            pickup_longitude: -74.006,
            pickup_address: "1 Centre St".to_string(),
            dropoff_latitude: None,
            dropoff_longitude: None,
            dropoff_address: None,
        }
    }

    #[test]
    fn test_valid_booking_passes() {
        assert!(sample().ensure_valid().is_ok());
    }

    #[test]
    fn test_boundary_coordinates_are_accepted() {
        let mut input = sample();
        input.pickup_latitude = -90.0;
        input.pickup_longitude = 180.0;
        input.dropoff_latitude = Some(90.0);
        input.dropoff_longitude = Some(-180.0);
        assert!(input.ensure_valid().is_ok());
    }

    #[test]
    fn test_out_of_range_pickup_is_rejected() {
        let mut input = sample();
        input.pickup_latitude = 91.0;
        let err = input.ensure_valid().expect_err("latitude out of range");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("pickup_latitude"));
    }

    #[test]
    fn test_out_of_range_dropoff_is_rejected() {
        let mut input = sample();
        input.dropoff_latitude = Some(10.0);
        input.dropoff_longitude = Some(-181.0);
        let err = input.ensure_valid().expect_err("longitude out of range");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_half_dropoff_pair_is_rejected() {
        let mut input = sample();
        input.dropoff_latitude = Some(10.0);
        let err = input.ensure_valid().expect_err("unpaired coordinate");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_blank_references_are_rejected() {
        let mut input = sample();
        input.user_id.clear();
        input.pickup_address.clear();
        let err = input.ensure_valid().expect_err("blank fields");
        assert!(err.message.contains("user_id is required"));
        assert!(err.message.contains("pickup_address is required"));
    }

    #[test]
    fn test_references_must_be_single_path_segments() {
        for bad in ["busy/../free", "..", "v1?admin=1", "v1#x", "v%2F1", "a\\b"] {
            let mut input = sample();
            input.vehicle_id = bad.to_string();
            let err = input.ensure_valid().expect_err(bad);
            assert_eq!(err.kind, ErrorKind::Validation);
            assert!(err.message.starts_with("vehicle_id must not contain"), "{bad}");
        }

        let mut input = sample();
        input.user_id = "u1/admin".to_string();
        let err = input.ensure_valid().expect_err("slash in user_id");
        assert!(err.message.contains("user_id must not contain"));

        input.user_id = "user.name-01_x".to_string();
        assert!(input.ensure_valid().is_ok());
    }

    #[test]
    fn test_completion_patch_prices_trip() {
        let now = Utc::now();
        let patch = CompleteBooking {
            distance: Some(10.0),
            duration: Some(20),
            ..CompleteBooking::default()
        }
        .into_patch(now);

        assert_eq!(patch.status, Some(BookingStatus::Completed));
        assert_eq!(patch.end_time, Some(now));
        assert_eq!(patch.cost, Some(20.0));
    }

    #[test]
    fn test_completion_without_distance_has_no_cost() {
        let patch = CompleteBooking {
            duration: Some(20),
            ..CompleteBooking::default()
        }
        .into_patch(Utc::now());
        assert_eq!(patch.cost, None);
        assert_eq!(patch.duration, Some(20));
    }

    #[test]
    fn test_negative_distance_is_rejected() {
        let input = CompleteBooking {
            distance: Some(-1.0),
            ..CompleteBooking::default()
        };
        assert_eq!(
            input.ensure_valid().expect_err("negative").kind,
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_oversized_trip_is_rejected() {
        let input = CompleteBooking {
            distance: Some(f64::MAX),
            duration: Some(10),
            ..CompleteBooking::default()
        };
        let err = input.ensure_valid().expect_err("distance too large");
        assert!(err.message.contains("distance must be within"));

        let input = CompleteBooking {
            distance: Some(5.0),
            duration: Some(i32::MAX),
            ..CompleteBooking::default()
        };
        let err = input.ensure_valid().expect_err("duration too large");
        assert!(err.message.contains("duration must be within"));

        let input = CompleteBooking {
            distance: Some(100_000.0),
            duration: Some(525_600),
            ..CompleteBooking::default()
        };
        assert!(input.ensure_valid().is_ok());
        let cost = input.into_patch(Utc::now()).cost.expect("priced");
        assert!(cost.is_finite());
    }

    #[test]
    fn test_update_patch_only_touches_dropoff() {
        let patch = UpdateBooking {
            dropoff_address: Some("Pier 17".to_string()),
            ..UpdateBooking::default()
        }
        .into_patch();
        assert_eq!(patch.dropoff_address.as_deref(), Some("Pier 17"));
        assert!(patch.status.is_none());
        assert!(patch.cost.is_none());
        assert!(patch.end_time.is_none());
    }
}
