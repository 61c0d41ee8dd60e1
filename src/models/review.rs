use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A diner review. `user_id` is NULL for guest-authored reviews, which carry
/// `guest_name` instead; guest reviews have no owner and can never be edited
/// or deleted through the web surface.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub guest_name: String,
    pub rating: i16,
    pub comment: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl std::fmt::Display for Review {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = if !self.guest_name.is_empty() {
            self.guest_name.as_str()
        } else if self.user_id.is_some() {
            "Member"
        } else {
            "Anonymous"
        };
        write!(f, "Review({name}, {})", self.rating)
    }
}

/// Review row joined with its author's display name (the user's name for
/// member reviews, `guest_name` otherwise).
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ReviewWithAuthor {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub guest_name: String,
    pub rating: i16,
    pub comment: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author: String,
}
