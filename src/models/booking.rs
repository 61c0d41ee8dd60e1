use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A table reservation. Deleting a booking never removes the row: the
/// soft-delete gate flips `is_deleted`/`deleted_at` so owners can still see
/// cancelled bookings and their history.
///
/// Invariant: `is_deleted == true` exactly when `deleted_at` is set (enforced
/// by a table CHECK as well).
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    pub guests: i32,
    pub special_requests: String,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl std::fmt::Display for Booking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Booking for {} on {}", self.guests, self.date.to_rfc3339())
    }
}
