//! Audit trail for watched entities (bookings, reviews).
//!
//! Every create, update, and delete appends one history record capturing a
//! field snapshot (see [`snapshot`]). History writes are best-effort: the
//! writers in `db::history` return a typed `Result`, and the `log_*` wrappers
//! here are the single place that result is discarded. A failed history write
//! must never fail the triggering mutation.

pub mod snapshot;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::db;
use crate::models::{Booking, Review};

/// Lifecycle transition recorded in a history row. Closed set, stored as the
/// Postgres enum `history_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "history_action", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Created,
    Updated,
    Deleted,
}

impl HistoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryAction::Created => "created",
            HistoryAction::Updated => "updated",
            HistoryAction::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record a booking transition. Failures are logged and swallowed.
pub async fn log_booking(pool: &PgPool, booking: &Booking, action: HistoryAction) {
    if let Err(e) = db::history::record_booking(pool, booking, action).await {
        tracing::warn!(
            booking_id = %booking.id,
            action = %action,
            "failed to record booking history: {e}"
        );
    }
}

/// Record a review transition. Failures are logged and swallowed.
pub async fn log_review(pool: &PgPool, review: &Review, action: HistoryAction) {
    if let Err(e) = db::history::record_review(pool, review, action).await {
        tracing::warn!(
            review_id = %review.id,
            action = %action,
            "failed to record review history: {e}"
        );
    }
}
