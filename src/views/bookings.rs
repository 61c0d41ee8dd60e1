use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::{AuthUser, OptionalAuthUser};
use crate::db;
use crate::error::AppError;
use crate::flash;
use crate::models::Booking;
use crate::state::SharedState;

const HISTORY_PAGE_SIZE: i64 = 25;

#[derive(Template)]
#[template(path = "bookings/list.html")]
struct BookingListTemplate {
    flash: Option<String>,
    user_name: Option<String>,
    bookings: Vec<BookingRow>,
}

#[derive(Template)]
#[template(path = "bookings/detail.html")]
struct BookingDetailTemplate {
    flash: Option<String>,
    user_name: Option<String>,
    booking: BookingRow,
    history: Vec<HistoryItem>,
    page: i64,
    has_prev: bool,
    has_next: bool,
}

#[derive(Template)]
#[template(path = "bookings/form.html")]
struct BookingFormTemplate {
    flash: Option<String>,
    user_name: Option<String>,
    action: String,
    errors: Vec<String>,
    values: BookingFormValues,
}

pub struct BookingRow {
    pub id: Uuid,
    pub date_display: String,
    pub guests: i32,
    pub special_requests: String,
    pub is_deleted: bool,
}

pub struct HistoryItem {
    pub action: String,
    pub timestamp_display: String,
    pub data_pretty: String,
}

/// Raw form echo for re-rendering after validation errors.
pub struct BookingFormValues {
    pub date: String,
    pub time: String,
    pub guests: String,
    pub special_requests: String,
}

impl BookingFormValues {
    pub fn empty() -> Self {
        Self {
            date: String::new(),
            time: String::new(),
            guests: "2".to_string(),
            special_requests: String::new(),
        }
    }

    fn from_booking(booking: &Booking) -> Self {
        Self {
            date: booking.date.format("%Y-%m-%d").to_string(),
            time: booking.date.format("%H:%M").to_string(),
            guests: booking.guests.to_string(),
            special_requests: booking.special_requests.clone(),
        }
    }
}

fn display_date(date: DateTime<Utc>) -> String {
    date.format("%d %B %Y at %H:%M").to_string()
}

fn row(booking: &Booking) -> BookingRow {
    BookingRow {
        id: booking.id,
        date_display: display_date(booking.date),
        guests: booking.guests,
        special_requests: booking.special_requests.clone(),
        is_deleted: booking.is_deleted,
    }
}

pub fn render_form(
    action: &str,
    errors: Vec<String>,
    values: BookingFormValues,
    user_name: Option<String>,
) -> Html<String> {
    let template = BookingFormTemplate {
        flash: None,
        user_name,
        action: action.to_string(),
        errors,
        values,
    };
    Html(template.render().unwrap_or_default())
}

/// Owner's bookings through the all-inclusive view, so cancelled ones still
/// show with their status.
pub async fn list_page(
    auth: AuthUser,
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let bookings = db::bookings::list_for_user(&state.pool, auth.user_id).await?;

    let (jar, flash) = flash::take(jar);
    let template = BookingListTemplate {
        flash,
        user_name: Some(auth.name),
        bookings: bookings.iter().map(row).collect(),
    };
    Ok((jar, Html(template.render().unwrap_or_default())).into_response())
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

pub async fn detail_page(
    auth: AuthUser,
    State(state): State<SharedState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let Some(booking) = db::bookings::find_by_id(&state.pool, id).await? else {
        let jar = flash::set(
            jar,
            "No booking found matching the query. You can create a new booking.",
        );
        return Ok((jar, Redirect::to("/bookings")).into_response());
    };

    if booking.user_id != auth.user_id {
        return Err(AppError::Forbidden(
            "You do not have access to this booking".to_string(),
        ));
    }

    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * HISTORY_PAGE_SIZE;
    let entries = db::history::list_for_booking_owner(
        &state.pool,
        booking.id,
        auth.user_id,
        HISTORY_PAGE_SIZE,
        offset,
    )
    .await?;

    let has_next = entries.len() as i64 == HISTORY_PAGE_SIZE;
    let history = entries
        .into_iter()
        .map(|h| HistoryItem {
            action: h.action.as_str().to_string(),
            timestamp_display: h.created_at.to_rfc3339(),
            data_pretty: h
                .data
                .as_ref()
                .and_then(|d| serde_json::to_string_pretty(d).ok())
                .unwrap_or_default(),
        })
        .collect();

    let (jar, flash) = flash::take(jar);
    let template = BookingDetailTemplate {
        flash,
        user_name: Some(auth.name),
        booking: row(&booking),
        history,
        page,
        has_prev: page > 1,
        has_next,
    };
    Ok((jar, Html(template.render().unwrap_or_default())).into_response())
}

/// The booking form is visible to everyone; submitting it requires login.
pub async fn new_page(
    OptionalAuthUser(auth): OptionalAuthUser,
    jar: CookieJar,
) -> impl IntoResponse {
    let (jar, flash) = flash::take(jar);
    let template = BookingFormTemplate {
        flash,
        user_name: auth.map(|a| a.name),
        action: "/bookings/new".to_string(),
        errors: Vec::new(),
        values: BookingFormValues::empty(),
    };
    (jar, Html(template.render().unwrap_or_default()))
}

pub async fn edit_page(
    auth: AuthUser,
    State(state): State<SharedState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let Some(booking) = db::bookings::find_by_id(&state.pool, id).await? else {
        let jar = flash::set(jar, "No booking found matching the query.");
        return Ok((jar, Redirect::to("/bookings")).into_response());
    };

    if booking.user_id != auth.user_id {
        return Err(AppError::Forbidden(
            "You do not have access to this booking".to_string(),
        ));
    }

    if booking.is_deleted {
        let jar = flash::set(jar, "Cancelled bookings cannot be changed.");
        return Ok((jar, Redirect::to(&format!("/bookings/{id}"))).into_response());
    }

    let (jar, flash) = flash::take(jar);
    let template = BookingFormTemplate {
        flash,
        user_name: Some(auth.name),
        action: format!("/bookings/{id}/edit"),
        errors: Vec::new(),
        values: BookingFormValues::from_booking(&booking),
    };
    Ok((jar, Html(template.render().unwrap_or_default())).into_response())
}
