use sqlx::PgPool;
use uuid::Uuid;

use crate::audit::{snapshot, HistoryAction};
use crate::models::{Booking, BookingHistory, Review, ReviewHistory};

/// Append one history record for a booking transition.
///
/// The live-entity reference is only set for `created`/`updated`; a `deleted`
/// record points at nothing (the row may be gone by the time history is read)
/// while `booking_pk` keeps the id for lookup. History rows are append-only:
/// no update or delete statements exist in this module.
pub async fn record_booking(
    pool: &PgPool,
    booking: &Booking,
    action: HistoryAction,
) -> Result<BookingHistory, sqlx::Error> {
    let booking_id = match action {
        HistoryAction::Deleted => None,
        _ => Some(booking.id),
    };
    sqlx::query_as::<_, BookingHistory>(
        "INSERT INTO booking_history (id, booking_id, booking_pk, user_id, action, data)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(booking_id)
    .bind(booking.id)
    .bind(booking.user_id)
    .bind(action)
    .bind(snapshot::booking(booking))
    .fetch_one(pool)
    .await
}

/// Append one history record for a review transition.
pub async fn record_review(
    pool: &PgPool,
    review: &Review,
    action: HistoryAction,
) -> Result<ReviewHistory, sqlx::Error> {
    let review_id = match action {
        HistoryAction::Deleted => None,
        _ => Some(review.id),
    };
    sqlx::query_as::<_, ReviewHistory>(
        "INSERT INTO review_history (id, review_id, review_pk, user_id, action, data)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(review_id)
    .bind(review.id)
    .bind(review.user_id)
    .bind(action)
    .bind(snapshot::review(review))
    .fetch_one(pool)
    .await
}

/// History entries for one booking as seen by one actor, newest first.
/// Backs the paginated block on the booking detail page.
pub async fn list_for_booking_owner(
    pool: &PgPool,
    booking_pk: Uuid,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<BookingHistory>, sqlx::Error> {
    sqlx::query_as::<_, BookingHistory>(
        "SELECT * FROM booking_history WHERE booking_pk = $1 AND user_id = $2
         ORDER BY created_at DESC LIMIT $3 OFFSET $4",
    )
    .bind(booking_pk)
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}
