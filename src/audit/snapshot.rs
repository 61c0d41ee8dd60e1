//! History snapshot building.
//!
//! Each entity type declares an explicit, versioned field list here. Snapshots
//! copy exactly those fields, so adding a column to an entity does not leak it
//! into history until the list is revised. Values are reduced to JSON-safe
//! scalars: timestamps become RFC 3339 strings, foreign keys become id
//! strings, media references keep their stored URL.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::{Booking, Review};

/// Booking snapshot field list, v1. The surrogate id and the soft-delete
/// bookkeeping columns are intentionally absent.
pub const BOOKING_FIELDS_V1: [&str; 5] = ["user", "date", "guests", "special_requests", "created_at"];

/// Review snapshot field list, v1.
pub const REVIEW_FIELDS_V1: [&str; 6] =
    ["user", "guest_name", "rating", "comment", "image", "created_at"];

pub fn booking(b: &Booking) -> Value {
    let mut data = Map::new();
    data.insert("user".into(), id_ref(Some(b.user_id)));
    data.insert("date".into(), datetime(b.date));
    data.insert("guests".into(), Value::from(b.guests));
    data.insert("special_requests".into(), Value::from(b.special_requests.clone()));
    data.insert("created_at".into(), datetime(b.created_at));
    debug_assert!(data.keys().eq(BOOKING_FIELDS_V1));
    Value::Object(data)
}

pub fn review(r: &Review) -> Value {
    let mut data = Map::new();
    data.insert("user".into(), id_ref(r.user_id));
    data.insert("guest_name".into(), Value::from(r.guest_name.clone()));
    data.insert("rating".into(), Value::from(r.rating));
    data.insert("comment".into(), Value::from(r.comment.clone()));
    data.insert("image".into(), url_ref(r.image_url.as_deref()));
    data.insert("created_at".into(), datetime(r.created_at));
    debug_assert!(data.keys().eq(REVIEW_FIELDS_V1));
    Value::Object(data)
}

fn datetime(dt: DateTime<Utc>) -> Value {
    Value::from(dt.to_rfc3339())
}

fn id_ref(id: Option<Uuid>) -> Value {
    id.map(|u| Value::from(u.to_string())).unwrap_or(Value::Null)
}

fn url_ref(url: Option<&str>) -> Value {
    url.map(Value::from).unwrap_or(Value::Null)
}
