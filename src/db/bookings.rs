use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Booking;

/// Two query surfaces exist for bookings: "active" functions filter
/// `is_deleted = FALSE`, "all" functions see soft-deleted rows too. Owner-facing
/// list/detail use the all-inclusive view so cancelled bookings stay visible.

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    date: DateTime<Utc>,
    guests: i32,
    special_requests: &str,
) -> Result<Booking, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        "INSERT INTO bookings (id, user_id, date, guests, special_requests)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(user_id)
    .bind(date)
    .bind(guests)
    .bind(special_requests)
    .fetch_one(pool)
    .await
}

/// All-inclusive list for the owner, soonest first.
pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        "SELECT * FROM bookings WHERE user_id = $1 ORDER BY date",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// All-inclusive lookup, used by detail and delete so a soft-deleted booking
/// can still be found.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Active-only lookup, used by edit: a cancelled booking cannot be amended.
pub async fn find_active_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        "SELECT * FROM bookings WHERE id = $1 AND is_deleted = FALSE",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    date: DateTime<Utc>,
    guests: i32,
    special_requests: &str,
) -> Result<Booking, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET date = $2, guests = $3, special_requests = $4
         WHERE id = $1 AND is_deleted = FALSE RETURNING *",
    )
    .bind(id)
    .bind(date)
    .bind(guests)
    .bind(special_requests)
    .fetch_one(pool)
    .await
}

/// Soft delete: flags the row and stamps `deleted_at`, touching nothing else.
/// Idempotent; a second call refreshes the timestamp.
pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<Booking, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET is_deleted = TRUE, deleted_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Physical removal. Not reachable from the web surface; history rows survive
/// with their weak reference nulled out.
pub async fn hard_delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM bookings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Review-eligibility check: at least one booking strictly in the past that
/// has not been cancelled. Queries the all-inclusive view and filters the
/// deleted flag explicitly; a cancelled booking does not count.
pub async fn has_completed_booking(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as(
        "SELECT EXISTS (
             SELECT 1 FROM bookings
             WHERE user_id = $1 AND date < now() AND is_deleted = FALSE
         )",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}
