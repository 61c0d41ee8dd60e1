use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::CookieJar;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::audit::{self, HistoryAction};
use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::flash;
use crate::state::SharedState;
use crate::views;
use crate::views::bookings::BookingFormValues;

/// Split date/time inputs, combined server-side. Guests arrives as text so a
/// bad value surfaces as a field error instead of a rejected request.
#[derive(Deserialize)]
pub struct BookingForm {
    pub date: String,
    pub time: String,
    pub guests: String,
    #[serde(default)]
    pub special_requests: String,
}

struct ValidBooking {
    date: DateTime<Utc>,
    guests: i32,
    special_requests: String,
}

fn validate(form: &BookingForm) -> Result<ValidBooking, Vec<String>> {
    let mut errors = Vec::new();

    let date = NaiveDate::parse_from_str(form.date.trim(), "%Y-%m-%d");
    let time = NaiveTime::parse_from_str(form.time.trim(), "%H:%M");
    let when = match (date, time) {
        (Ok(d), Ok(t)) => Some(d.and_time(t).and_utc()),
        _ => {
            errors.push("Enter a valid date and time.".to_string());
            None
        }
    };

    if let Some(when) = when {
        if when < Utc::now() {
            errors.push("Booking date/time cannot be in the past.".to_string());
        }
    }

    let guests = match form.guests.trim().parse::<i32>() {
        Ok(n) if n >= 1 => Some(n),
        _ => {
            errors.push("Number of guests must be at least 1.".to_string());
            None
        }
    };

    match (when, guests, errors.is_empty()) {
        (Some(date), Some(guests), true) => Ok(ValidBooking {
            date,
            guests,
            special_requests: form.special_requests.trim().to_string(),
        }),
        _ => Err(errors),
    }
}

fn form_values(form: &BookingForm) -> BookingFormValues {
    BookingFormValues {
        date: form.date.clone(),
        time: form.time.clone(),
        guests: form.guests.clone(),
        special_requests: form.special_requests.clone(),
    }
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<BookingForm>,
) -> Result<Response, AppError> {
    let valid = match validate(&form) {
        Ok(valid) => valid,
        Err(errors) => {
            return Ok(views::bookings::render_form(
                "/bookings/new",
                errors,
                form_values(&form),
                Some(auth.name),
            )
            .into_response());
        }
    };

    let booking = db::bookings::create(
        &state.pool,
        auth.user_id,
        valid.date,
        valid.guests,
        &valid.special_requests,
    )
    .await?;

    audit::log_booking(&state.pool, &booking, HistoryAction::Created).await;

    let jar = flash::set(jar, "Booking created successfully.");
    Ok((jar, Redirect::to(&format!("/bookings/{}", booking.id))).into_response())
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    Form(form): Form<BookingForm>,
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

    let valid = match validate(&form) {
        Ok(valid) => valid,
        Err(errors) => {
            return Ok(views::bookings::render_form(
                &format!("/bookings/{id}/edit"),
                errors,
                form_values(&form),
                Some(auth.name),
            )
            .into_response());
        }
    };

    let booking = db::bookings::update(
        &state.pool,
        id,
        valid.date,
        valid.guests,
        &valid.special_requests,
    )
    .await?;

    audit::log_booking(&state.pool, &booking, HistoryAction::Updated).await;

    let jar = flash::set(jar, "Your booking was updated.");
    Ok((jar, Redirect::to(&format!("/bookings/{id}"))).into_response())
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    // All-inclusive lookup so a repeated cancellation still resolves the row.
    let Some(booking) = db::bookings::find_by_id(&state.pool, id).await? else {
        let jar = flash::set(jar, "No booking found matching the query.");
        return Ok((jar, Redirect::to("/bookings")).into_response());
    };

    if booking.user_id != auth.user_id {
        return Err(AppError::Forbidden(
            "You do not have access to this booking".to_string(),
        ));
    }

    let already_cancelled = booking.is_deleted;
    let booking = db::bookings::soft_delete(&state.pool, id).await?;

    // Guard against double-appending a `deleted` record when the row was
    // already cancelled; the soft delete itself just refreshed `deleted_at`.
    if !already_cancelled {
        audit::log_booking(&state.pool, &booking, HistoryAction::Deleted).await;
    }

    let mut email_sent = false;
    if let Some(mailer) = &state.system_mailer {
        match db::users::find_by_id(&state.pool, booking.user_id).await {
            Ok(Some(user)) => {
                match mailer
                    .send_booking_cancellation(&user.email, &user.name, &booking)
                    .await
                {
                    Ok(()) => email_sent = true,
                    Err(e) => {
                        tracing::warn!(booking_id = %booking.id, "failed to send cancellation email: {e}");
                    }
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(booking_id = %booking.id, "failed to load owner for cancellation email: {e}");
            }
        }
    }

    let message = if email_sent {
        "Booking cancelled successfully. A confirmation email has been sent."
    } else {
        "Booking cancelled successfully."
    };
    let jar = flash::set(jar, message);
    Ok((jar, Redirect::to("/bookings")).into_response())
}
