//! One-shot flash messages carried in a cookie: set on the redirect leg of a
//! POST, read and cleared by the next page render.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

const FLASH_COOKIE: &str = "flash";

/// Add a flash message to the jar. The value is form-urlencoded so arbitrary
/// text survives the cookie round trip.
pub fn set(jar: CookieJar, message: &str) -> CookieJar {
    let encoded: String = form_urlencoded::byte_serialize(message.as_bytes()).collect();
    let cookie = Cookie::build((FLASH_COOKIE, encoded))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Remove and return the pending flash message, if any.
pub fn take(jar: CookieJar) -> (CookieJar, Option<String>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let decoded = form_urlencoded::parse(cookie.value().as_bytes())
        .map(|(k, v)| format!("{k}{v}"))
        .collect::<String>();
    let removal = Cookie::build((FLASH_COOKIE, "")).path("/").build();
    (jar.remove(removal), Some(decoded))
}
