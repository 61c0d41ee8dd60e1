use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use uuid::Uuid;

use crate::audit::{self, HistoryAction};
use crate::auth::extractor::{AuthUser, OptionalAuthUser};
use crate::db;
use crate::error::AppError;
use crate::flash;
use crate::models::Review;
use crate::state::SharedState;
use crate::views;
use crate::views::reviews::ReviewFormValues;

#[derive(Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub guest_name: String,
    pub rating: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub image_url: String,
}

fn parse_rating(raw: &str) -> Option<i16> {
    match raw.trim().parse::<i16>() {
        Ok(n) if (1..=5).contains(&n) => Some(n),
        _ => None,
    }
}

fn form_values(form: &ReviewForm) -> ReviewFormValues {
    ReviewFormValues {
        guest_name: form.guest_name.clone(),
        rating: form.rating.clone(),
        comment: form.comment.clone(),
        image_url: form.image_url.clone(),
    }
}

/// Owner gate shared by edit and delete. Guest-authored reviews have no owner
/// and are never editable through the web surface.
fn require_owner(review: &Review, auth: &AuthUser) -> Result<(), AppError> {
    if review.user_id == Some(auth.user_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You do not have access to this review".to_string(),
        ))
    }
}

pub async fn create(
    OptionalAuthUser(auth): OptionalAuthUser,
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<ReviewForm>,
) -> Result<Response, AppError> {
    let signed_in = auth.is_some();
    let mut errors = Vec::new();

    let rating = match parse_rating(&form.rating) {
        Some(rating) => rating,
        None => {
            errors.push("Rating must be between 1 and 5.".to_string());
            0
        }
    };

    let guest_name = form.guest_name.trim().to_string();
    if !signed_in && guest_name.is_empty() {
        errors.push("Please tell us your name.".to_string());
    }

    if !errors.is_empty() {
        return Ok(
            views::reviews::render_form("/reviews/new", errors, form_values(&form), signed_in)
                .into_response(),
        );
    }

    // Members may only review after a completed (and not cancelled) booking.
    if let Some(auth) = &auth {
        let eligible = db::bookings::has_completed_booking(&state.pool, auth.user_id).await?;
        if !eligible {
            let jar = flash::set(
                jar,
                "You can only leave a review after completing a booking.",
            );
            return Ok((jar, Redirect::to("/reviews")).into_response());
        }
    }

    let user_id = auth.as_ref().map(|a| a.user_id);
    let guest_name = if signed_in { "" } else { guest_name.as_str() };
    let image_url = non_empty(&form.image_url);

    let review = db::reviews::create(
        &state.pool,
        user_id,
        guest_name,
        rating,
        form.comment.trim(),
        image_url,
    )
    .await?;

    audit::log_review(&state.pool, &review, HistoryAction::Created).await;

    let jar = flash::set(jar, "Thanks for your review!");
    Ok((jar, Redirect::to("/reviews")).into_response())
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    Form(form): Form<ReviewForm>,
) -> Result<Response, AppError> {
    let review = db::reviews::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    require_owner(&review, &auth)?;

    if review.is_deleted {
        return Err(AppError::NotFound("Review not found".to_string()));
    }

    let Some(rating) = parse_rating(&form.rating) else {
        let errors = vec!["Rating must be between 1 and 5.".to_string()];
        return Ok(views::reviews::render_form(
            &format!("/reviews/{id}/edit"),
            errors,
            form_values(&form),
            true,
        )
        .into_response());
    };

    let review = db::reviews::update(
        &state.pool,
        id,
        rating,
        form.comment.trim(),
        non_empty(&form.image_url),
    )
    .await?;

    audit::log_review(&state.pool, &review, HistoryAction::Updated).await;

    let jar = flash::set(jar, "Your review was updated.");
    Ok((jar, Redirect::to("/reviews")).into_response())
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let review = db::reviews::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    require_owner(&review, &auth)?;

    let already_deleted = review.is_deleted;
    let review = db::reviews::soft_delete(&state.pool, id).await?;

    if !already_deleted {
        audit::log_review(&state.pool, &review, HistoryAction::Deleted).await;
    }

    let jar = flash::set(jar, "Your review was removed.");
    Ok((jar, Redirect::to("/reviews")).into_response())
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
