use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: Uuid,
    pub name: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: String,
    pub price_cents: i32,
    pub allergens: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MenuItem {
    /// Parse the comma-separated allergen field. An empty value or the
    /// literal "none" means no declared allergens.
    pub fn allergen_list(&self) -> Vec<String> {
        let raw = self.allergens.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
            return Vec::new();
        }
        raw.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn price_display(&self) -> String {
        format!("{}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }
}
