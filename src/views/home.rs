use askama::Template;
use axum::response::{Html, IntoResponse};
use axum_extra::extract::CookieJar;

use crate::auth::extractor::OptionalAuthUser;
use crate::flash;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    flash: Option<String>,
    user_name: Option<String>,
}

pub async fn index(OptionalAuthUser(auth): OptionalAuthUser, jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = flash::take(jar);
    let template = HomeTemplate {
        flash,
        user_name: auth.map(|a| a.name),
    };
    (jar, Html(template.render().unwrap_or_default()))
}
