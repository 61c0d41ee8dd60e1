use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{encode_token, Claims};
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::flash;
use crate::state::SharedState;
use crate::views;

#[derive(Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
}

fn auth_cookies(jar: CookieJar, access_token: &str, refresh_token: &str) -> CookieJar {
    let access = Cookie::build(("access_token", access_token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(15))
        .build();

    let refresh = Cookie::build(("refresh_token", refresh_token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(7))
        .build();

    jar.add(access).add(refresh)
}

fn clear_auth_cookies(jar: CookieJar) -> CookieJar {
    let access = Cookie::build(("access_token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    let refresh = Cookie::build(("refresh_token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    jar.add(access).add(refresh)
}

fn generate_refresh_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Only resume to same-site paths after login; anything else falls back to
/// the booking list.
fn safe_next(next: Option<&str>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/bookings".to_string(),
    }
}

pub async fn signup(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(req): Form<SignupForm>,
) -> Result<Response, AppError> {
    let name = req.name.trim();
    let email = req.email.trim();

    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push("Name is required.".to_string());
    }
    if email.is_empty() || !email.contains('@') {
        errors.push("A valid email address is required.".to_string());
    }
    if req.password.len() < 8 {
        errors.push("Password must be at least 8 characters.".to_string());
    }
    if !errors.is_empty() {
        return Ok(views::auth::render_signup(errors, name, email).into_response());
    }

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let user = match db::users::create(&state.pool, email, &pw_hash, name).await {
        Ok(user) => user,
        Err(sqlx::Error::Database(ref db_err)) if db_err.is_unique_violation() => {
            let errors = vec!["An account with this email already exists.".to_string()];
            return Ok(views::auth::render_signup(errors, name, email).into_response());
        }
        Err(e) => return Err(AppError::Database(e)),
    };

    // Welcome mail is best-effort; signup succeeds regardless.
    if let Some(mailer) = &state.system_mailer {
        let mailer = mailer.clone();
        let email = user.email.clone();
        let name = user.name.clone();
        let base_url = state.config.base_url.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_welcome(&email, &name, &base_url).await {
                tracing::warn!("failed to send welcome email: {e}");
            }
        });
    }

    let jar = flash::set(jar, "Account created. You can now log in.");
    Ok((jar, Redirect::to("/auth/login")).into_response())
}

pub async fn login(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(req): Form<LoginForm>,
) -> Result<Response, AppError> {
    let render_failure = |msg: &str| {
        views::auth::render_login(Some(msg.to_string()), req.next.clone()).into_response()
    };

    if state.login_limiter.check(&req.email).is_err() {
        return Ok(render_failure(
            "Too many login attempts. Please try again later.",
        ));
    }

    let Some(user) = db::users::find_by_email(&state.pool, &req.email).await? else {
        state.login_limiter.record_failure(&req.email);
        return Ok(render_failure("Invalid email or password."));
    };

    let valid = password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)?;
    if !valid {
        state.login_limiter.record_failure(&req.email);
        return Ok(render_failure("Invalid email or password."));
    }
    state.login_limiter.record_success(&req.email);

    let claims = Claims::new(user.id, user.name.clone());
    let access_token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    let refresh = generate_refresh_token();
    let refresh_hash = hash_token(&refresh);
    db::refresh_tokens::create(
        &state.pool,
        user.id,
        &refresh_hash,
        Utc::now() + Duration::days(7),
    )
    .await?;

    let jar = auth_cookies(jar, &access_token, &refresh);
    let destination = safe_next(req.next.as_deref());
    Ok((jar, Redirect::to(&destination)).into_response())
}

pub async fn logout(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    if let Some(cookie) = jar.get("refresh_token") {
        let token_hash = hash_token(cookie.value());
        db::refresh_tokens::delete_by_hash(&state.pool, &token_hash).await?;
    }

    Ok((clear_auth_cookies(jar), Redirect::to("/")))
}

/// Rotate the refresh token and mint a new access token. Reusing an already
/// rotated token revokes every session for that user.
pub async fn refresh(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let refresh_value = jar
        .get("refresh_token")
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::Unauthorized("Missing refresh token".to_string()))?;

    let token_hash = hash_token(&refresh_value);

    let stored = db::refresh_tokens::find_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    if stored.used {
        tracing::warn!(
            "Refresh token reuse detected for user {}. Revoking all sessions.",
            stored.user_id
        );
        db::refresh_tokens::delete_all_for_user(&state.pool, stored.user_id).await?;
        return Err(AppError::Unauthorized(
            "Refresh token reuse detected. All sessions revoked.".to_string(),
        ));
    }

    if stored.expires_at < Utc::now() {
        return Err(AppError::Unauthorized("Refresh token expired".to_string()));
    }

    db::refresh_tokens::mark_used(&state.pool, stored.id).await?;

    let user = db::users::find_by_id(&state.pool, stored.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    let claims = Claims::new(user.id, user.name.clone());
    let access_token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    let new_refresh = generate_refresh_token();
    let new_refresh_hash = hash_token(&new_refresh);
    db::refresh_tokens::create(
        &state.pool,
        user.id,
        &new_refresh_hash,
        Utc::now() + Duration::days(7),
    )
    .await?;

    let jar = auth_cookies(jar, &access_token, &new_refresh);
    Ok((
        jar,
        Json(AuthResponse {
            access_token,
            refresh_token: new_refresh,
        }),
    ))
}

pub async fn change_password(
    auth: AuthUser,
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(req): Form<ChangePasswordForm>,
) -> Result<Response, AppError> {
    if req.new_password.len() < 8 {
        let jar = flash::set(jar, "New password must be at least 8 characters.");
        return Ok((jar, Redirect::to("/profile")).into_response());
    }

    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    let valid =
        password::verify(&req.current_password, &user.password_hash).map_err(AppError::Internal)?;
    if !valid {
        let jar = flash::set(jar, "Current password is incorrect.");
        return Ok((jar, Redirect::to("/profile")).into_response());
    }

    let pw_hash = password::hash(&req.new_password).map_err(AppError::Internal)?;
    db::users::update_password(&state.pool, user.id, &pw_hash).await?;

    // Revoke existing sessions, then keep this one alive with fresh tokens.
    db::refresh_tokens::delete_all_for_user(&state.pool, user.id).await?;

    let claims = Claims::new(user.id, user.name.clone());
    let access_token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;
    let refresh = generate_refresh_token();
    let refresh_hash = hash_token(&refresh);
    db::refresh_tokens::create(
        &state.pool,
        user.id,
        &refresh_hash,
        Utc::now() + Duration::days(7),
    )
    .await?;

    let jar = auth_cookies(jar, &access_token, &refresh);
    let jar = flash::set(jar, "Password updated.");
    Ok((jar, Redirect::to("/profile")).into_response())
}
