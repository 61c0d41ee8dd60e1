use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Review, ReviewWithAuthor};

/// Public list: active reviews only, newest first, joined with the author's
/// display name (member name, else guest name, else "Anonymous").
pub async fn list_active(pool: &PgPool) -> Result<Vec<ReviewWithAuthor>, sqlx::Error> {
    sqlx::query_as::<_, ReviewWithAuthor>(
        "SELECT r.id, r.user_id, r.guest_name, r.rating, r.comment, r.image_url, r.created_at,
                COALESCE(u.name, NULLIF(r.guest_name, ''), 'Anonymous') AS author
         FROM reviews r
         LEFT JOIN users u ON u.id = r.user_id
         WHERE r.is_deleted = FALSE
         ORDER BY r.created_at DESC",
    )
    .fetch_all(pool)
    .await
}

/// All-inclusive list for the profile page, so an owner can see reviews they
/// previously removed.
pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// All-inclusive lookup.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    user_id: Option<Uuid>,
    guest_name: &str,
    rating: i16,
    comment: &str,
    image_url: Option<&str>,
) -> Result<Review, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "INSERT INTO reviews (id, user_id, guest_name, rating, comment, image_url)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(user_id)
    .bind(guest_name)
    .bind(rating)
    .bind(comment)
    .bind(image_url)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    rating: i16,
    comment: &str,
    image_url: Option<&str>,
) -> Result<Review, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "UPDATE reviews SET rating = $2, comment = $3, image_url = $4
         WHERE id = $1 AND is_deleted = FALSE RETURNING *",
    )
    .bind(id)
    .bind(rating)
    .bind(comment)
    .bind(image_url)
    .fetch_one(pool)
    .await
}

/// Soft delete; same contract as `bookings::soft_delete`.
pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<Review, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "UPDATE reviews SET is_deleted = TRUE, deleted_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Physical removal; not exposed to end users.
pub async fn hard_delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
