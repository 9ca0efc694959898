//! Booking status and its legal transitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use booking_core::error::AppError;

/// Lifecycle status of a booking.
///
/// ```text
/// pending --(confirmation)--> confirmed --(start)--> active --(complete)--> completed
/// {pending, confirmed, active} --(cancel)--> cancelled
/// ```
///
/// Stored as its lowercase tag in a `TEXT` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Created, awaiting external confirmation.
    Pending,
    /// Confirmed, may be started once the start time is reached.
    Confirmed,
    /// Vehicle is in use.
    Active,
    /// Trip finished and priced.
    Completed,
    /// Cancelled before completion.
    Cancelled,
}

impl BookingStatus {
    /// Statuses from which a booking may be cancelled.
    pub const CANCELLABLE: [BookingStatus; 3] = [Self::Pending, Self::Confirmed, Self::Active];

    /// Statuses reported by the active-bookings query.
    pub const IN_PROGRESS: [BookingStatus; 2] = [Self::Confirmed, Self::Active];

    /// All statuses, in lifecycle order.
    pub const ALL: [BookingStatus; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Active,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Check if the booking is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether the state machine has an edge from `self` to `next`.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Confirmed, Self::Active)
                | (Self::Active, Self::Completed)
                | (Self::Pending | Self::Confirmed | Self::Active, Self::Cancelled)
        )
    }

    /// Every status with an edge into `target`, in lifecycle order.
    pub fn sources_of(target: BookingStatus) -> Vec<BookingStatus> {
        Self::ALL
            .into_iter()
            .filter(|from| from.can_transition_to(target))
            .collect()
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(AppError::validation(format!(
                "unknown booking status: {other}"
            ))),
        }
    }
}

impl sqlx::Type<sqlx::Postgres> for BookingStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for BookingStatus {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<'q, sqlx::Postgres>>::encode(self.as_str(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for BookingStatus {
    fn decode(
        value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let tag = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(tag.parse::<BookingStatus>()?)
    }
}
