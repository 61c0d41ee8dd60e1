pub mod auth;
pub mod bookings;
pub mod reviews;

use axum::routing::post;
use axum::Router;

use crate::state::SharedState;

/// Form-post endpoints for the browser surface. These sit behind the
/// 401-to-login redirect layer together with the page routes.
pub fn form_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/profile/password", post(auth::change_password))
        // Bookings
        .route("/bookings/new", post(bookings::create))
        .route("/bookings/{id}/edit", post(bookings::update))
        .route("/bookings/{id}/delete", post(bookings::delete))
        // Reviews
        .route("/reviews/new", post(reviews::create))
        .route("/reviews/{id}/edit", post(reviews::update))
        .route("/reviews/{id}/delete", post(reviews::delete))
}

/// JSON endpoints that must answer with bare status codes, not redirects.
pub fn api_routes() -> Router<SharedState> {
    Router::new().route("/auth/refresh", post(auth::refresh))
}
