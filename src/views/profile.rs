use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::CookieJar;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::flash;
use crate::state::SharedState;
use crate::views::bookings::BookingRow;

#[derive(Template)]
#[template(path = "profile.html")]
struct ProfileTemplate {
    flash: Option<String>,
    user_name: Option<String>,
    email: String,
    bookings: Vec<BookingRow>,
    reviews: Vec<OwnReviewRow>,
}

pub struct OwnReviewRow {
    pub rating: i16,
    pub comment: String,
    pub created_display: String,
    pub is_deleted: bool,
}

/// Profile uses the all-inclusive views on purpose: users can see bookings
/// and reviews they previously removed.
pub async fn profile_page(
    auth: AuthUser,
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    let bookings = db::bookings::list_for_user(&state.pool, auth.user_id).await?;
    let reviews = db::reviews::list_for_user(&state.pool, auth.user_id).await?;

    let booking_rows = bookings
        .iter()
        .map(|b| BookingRow {
            id: b.id,
            date_display: b.date.format("%d %B %Y at %H:%M").to_string(),
            guests: b.guests,
            special_requests: b.special_requests.clone(),
            is_deleted: b.is_deleted,
        })
        .collect();

    let review_rows = reviews
        .into_iter()
        .map(|r| OwnReviewRow {
            rating: r.rating,
            comment: r.comment,
            created_display: r.created_at.format("%d %B %Y").to_string(),
            is_deleted: r.is_deleted,
        })
        .collect();

    let (jar, flash) = flash::take(jar);
    let template = ProfileTemplate {
        flash,
        user_name: Some(user.name),
        email: user.email,
        bookings: booking_rows,
        reviews: review_rows,
    };
    Ok((jar, Html(template.render().unwrap_or_default())).into_response())
}
