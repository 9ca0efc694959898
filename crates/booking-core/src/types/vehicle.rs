//! Vehicle status values the booking service propagates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status the booking service asks the vehicle service to record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    /// Free for new bookings.
    Available,
    /// Currently driven under an active booking.
    InUse,
}

impl VehicleStatus {
    /// Return the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::InUse => "in_use",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
