use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::auth::jwt;
use crate::flash;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    flash: Option<String>,
    user_name: Option<String>,
    error: Option<String>,
    next: Option<String>,
}

#[derive(Template)]
#[template(path = "auth/signup.html")]
struct SignupTemplate {
    flash: Option<String>,
    user_name: Option<String>,
    errors: Vec<String>,
    name: String,
    email: String,
}

#[derive(Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Re-render the login form after a failed POST, keeping `next` intact.
pub fn render_login(error: Option<String>, next: Option<String>) -> Html<String> {
    let template = LoginTemplate {
        flash: None,
        user_name: None,
        error,
        next,
    };
    Html(template.render().unwrap_or_default())
}

pub fn render_signup(errors: Vec<String>, name: &str, email: &str) -> Html<String> {
    let template = SignupTemplate {
        flash: None,
        user_name: None,
        errors,
        name: name.to_string(),
        email: email.to_string(),
    };
    Html(template.render().unwrap_or_default())
}

pub async fn login_page(
    State(state): State<SharedState>,
    jar: CookieJar,
    Query(query): Query<NextQuery>,
) -> Response {
    // Already signed in: nothing to do here.
    if let Some(cookie) = jar.get("access_token") {
        if jwt::decode_token(cookie.value(), &state.config.jwt_secret).is_ok() {
            return Redirect::to("/bookings").into_response();
        }
    }

    let (jar, flash) = flash::take(jar);
    let template = LoginTemplate {
        flash,
        user_name: None,
        error: None,
        next: query.next,
    };
    (jar, Html(template.render().unwrap_or_default())).into_response()
}

pub async fn signup_page(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = flash::take(jar);
    let template = SignupTemplate {
        flash,
        user_name: None,
        errors: Vec::new(),
        name: String::new(),
        email: String::new(),
    };
    (jar, Html(template.render().unwrap_or_default()))
}
