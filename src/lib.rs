pub mod config;
pub mod error;
pub mod state;
pub mod auth;
pub mod db;
pub mod models;
pub mod audit;
pub mod middleware;
pub mod routes;
pub mod views;
pub mod email;
pub mod flash;
pub mod rate_limit;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use sqlx::PgPool;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::email::SystemMailer;
use crate::middleware::auth_redirect::redirect_unauthorized;
use crate::rate_limit::LoginRateLimiter;
use crate::state::{AppState, SharedState};

pub fn build_app(pool: PgPool, config: Config) -> Router {
    // Build system mailer; the site runs fine without SMTP, emails are
    // best-effort everywhere.
    let system_mailer = config.smtp.as_ref().and_then(|smtp| {
        match SystemMailer::new(smtp, &config.site_name) {
            Ok(mailer) => {
                tracing::info!("System SMTP configured");
                Some(Arc::new(mailer))
            }
            Err(e) => {
                tracing::warn!("System SMTP not available: {e}");
                None
            }
        }
    });

    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        system_mailer,
        login_limiter: LoginRateLimiter::new(),
    });

    // Browser routes get the 401-to-login redirect; /auth/refresh must keep
    // answering with a bare 401 for token rotation.
    let browser = views::page_routes()
        .merge(routes::form_routes())
        .layer(axum::middleware::from_fn(redirect_unauthorized));

    Router::new()
        .merge(browser)
        .merge(routes::api_routes())
        .nest_service("/static", ServeDir::new("static"))
        .route("/health", axum::routing::get(health))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
