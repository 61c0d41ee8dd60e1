use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{MenuCategory, MenuItem};

pub async fn list_categories(pool: &PgPool) -> Result<Vec<MenuCategory>, sqlx::Error> {
    sqlx::query_as::<_, MenuCategory>("SELECT * FROM menu_categories ORDER BY position, name")
        .fetch_all(pool)
        .await
}

pub async fn list_items_by_category(
    pool: &PgPool,
    category_id: Uuid,
) -> Result<Vec<MenuItem>, sqlx::Error> {
    sqlx::query_as::<_, MenuItem>(
        "SELECT * FROM menu_items WHERE category_id = $1 ORDER BY name",
    )
    .bind(category_id)
    .fetch_all(pool)
    .await
}

pub async fn find_item_by_id(pool: &PgPool, id: Uuid) -> Result<Option<MenuItem>, sqlx::Error> {
    sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
