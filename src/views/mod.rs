pub mod home;
pub mod auth;
pub mod bookings;
pub mod reviews;
pub mod menu;
pub mod profile;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn page_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(home::index))
        // Auth
        .route("/auth/login", get(auth::login_page))
        .route("/auth/signup", get(auth::signup_page))
        // Menu
        .route("/menu", get(menu::list_page))
        .route("/menu/{id}", get(menu::item_page))
        // Bookings
        .route("/bookings", get(bookings::list_page))
        .route("/bookings/new", get(bookings::new_page))
        .route("/bookings/{id}", get(bookings::detail_page))
        .route("/bookings/{id}/edit", get(bookings::edit_page))
        // Reviews
        .route("/reviews", get(reviews::list_page))
        .route("/reviews/new", get(reviews::new_page))
        .route("/reviews/{id}/edit", get(reviews::edit_page))
        // Profile
        .route("/profile", get(profile::profile_page))
}
