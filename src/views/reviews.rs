use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::auth::extractor::{AuthUser, OptionalAuthUser};
use crate::db;
use crate::error::AppError;
use crate::flash;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "reviews/list.html")]
struct ReviewListTemplate {
    flash: Option<String>,
    user_name: Option<String>,
    reviews: Vec<ReviewRow>,
}

#[derive(Template)]
#[template(path = "reviews/form.html")]
struct ReviewFormTemplate {
    flash: Option<String>,
    user_name: Option<String>,
    action: String,
    errors: Vec<String>,
    values: ReviewFormValues,
    signed_in: bool,
}

pub struct ReviewRow {
    pub id: Uuid,
    pub author: String,
    pub rating: i16,
    pub comment: String,
    pub image_url: Option<String>,
    pub created_display: String,
    pub can_manage: bool,
}

pub struct ReviewFormValues {
    pub guest_name: String,
    pub rating: String,
    pub comment: String,
    pub image_url: String,
}

impl ReviewFormValues {
    pub fn empty() -> Self {
        Self {
            guest_name: String::new(),
            rating: "5".to_string(),
            comment: String::new(),
            image_url: String::new(),
        }
    }
}

pub fn render_form(
    action: &str,
    errors: Vec<String>,
    values: ReviewFormValues,
    signed_in: bool,
) -> Html<String> {
    let template = ReviewFormTemplate {
        flash: None,
        user_name: None,
        action: action.to_string(),
        errors,
        values,
        signed_in,
    };
    Html(template.render().unwrap_or_default())
}

/// Public review list: active reviews only, open to anonymous visitors.
pub async fn list_page(
    OptionalAuthUser(auth): OptionalAuthUser,
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let reviews = db::reviews::list_active(&state.pool).await?;

    let current = auth.as_ref().map(|a| a.user_id);
    let rows = reviews
        .into_iter()
        .map(|r| ReviewRow {
            id: r.id,
            author: r.author,
            rating: r.rating,
            comment: r.comment,
            image_url: r.image_url,
            created_display: r.created_at.format("%d %B %Y").to_string(),
            can_manage: r.user_id.is_some() && r.user_id == current,
        })
        .collect();

    let (jar, flash) = flash::take(jar);
    let template = ReviewListTemplate {
        flash,
        user_name: auth.map(|a| a.name),
        reviews: rows,
    };
    Ok((jar, Html(template.render().unwrap_or_default())).into_response())
}

pub async fn new_page(
    OptionalAuthUser(auth): OptionalAuthUser,
    jar: CookieJar,
) -> impl IntoResponse {
    let (jar, flash) = flash::take(jar);
    let template = ReviewFormTemplate {
        flash,
        user_name: auth.as_ref().map(|a| a.name.clone()),
        action: "/reviews/new".to_string(),
        errors: Vec::new(),
        values: ReviewFormValues::empty(),
        signed_in: auth.is_some(),
    };
    (jar, Html(template.render().unwrap_or_default()))
}

pub async fn edit_page(
    auth: AuthUser,
    State(state): State<SharedState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let review = db::reviews::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    if review.user_id != Some(auth.user_id) {
        return Err(AppError::Forbidden(
            "You do not have access to this review".to_string(),
        ));
    }

    if review.is_deleted {
        let jar = flash::set(jar, "This review has been removed.");
        return Ok((jar, Redirect::to("/reviews")).into_response());
    }

    let (jar, flash) = flash::take(jar);
    let template = ReviewFormTemplate {
        flash,
        user_name: Some(auth.name),
        action: format!("/reviews/{id}/edit"),
        errors: Vec::new(),
        values: ReviewFormValues {
            guest_name: String::new(),
            rating: review.rating.to_string(),
            comment: review.comment,
            image_url: review.image_url.unwrap_or_default(),
        },
        signed_in: true,
    };
    Ok((jar, Html(template.render().unwrap_or_default())).into_response())
}
