use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::HistoryAction;

/// Append-only audit record for a review lifecycle transition. Same shape as
/// `BookingHistory`; `review_pk` outlives the review row itself.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ReviewHistory {
    pub id: Uuid,
    pub review_id: Option<Uuid>,
    pub review_pk: Uuid,
    pub user_id: Option<Uuid>,
    pub action: HistoryAction,
    pub data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
