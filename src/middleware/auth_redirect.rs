use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

/// Middleware for browser routes: a 401 becomes a redirect to the login page,
/// carrying the original destination so the user resumes there after login.
pub async fn redirect_unauthorized(req: Request, next: Next) -> Response {
    let next_path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    let response = next.run(req).await;
    if response.status() == StatusCode::UNAUTHORIZED {
        let encoded: String = form_urlencoded::byte_serialize(next_path.as_bytes()).collect();
        Redirect::to(&format!("/auth/login?next={encoded}")).into_response()
    } else {
        response
    }
}
