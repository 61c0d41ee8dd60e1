use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::HistoryAction;

/// Append-only audit record for a booking lifecycle transition.
///
/// `booking_id` is a weak reference (`ON DELETE SET NULL`) and is written as
/// NULL for `deleted` records; `booking_pk` always carries the originating
/// booking's id so history survives the row.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct BookingHistory {
    pub id: Uuid,
    pub booking_id: Option<Uuid>,
    pub booking_pk: Uuid,
    pub user_id: Option<Uuid>,
    pub action: HistoryAction,
    pub data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
