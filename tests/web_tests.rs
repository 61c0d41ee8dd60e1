mod common;

use chrono::{DateTime, Duration, Utc};
use reqwest::StatusCode;
use uuid::Uuid;

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    common::cleanup(app).await;
}

// ── Auth & access control ───────────────────────────────────────

#[tokio::test]
async fn signup_then_login() {
    let app = common::spawn_app().await;

    let status = app.signup("Alice", "alice@test.com", "password123").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let session = app.login("alice@test.com", "password123").await;
    assert!(!session.access_token.is_empty());
    assert!(!session.refresh_token.is_empty());

    common::cleanup(app).await;
}

#[tokio::test]
async fn signup_rejects_short_password() {
    let app = common::spawn_app().await;

    let status = app.signup("Alice", "alice@test.com", "short").await;
    // Form re-renders with field errors instead of redirecting.
    assert_eq!(status, StatusCode::OK);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    common::cleanup(app).await;
}

#[tokio::test]
async fn anonymous_booking_list_redirects_to_login() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/bookings")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp.headers()["location"].to_str().unwrap();
    assert!(
        location.starts_with("/auth/login?next=%2Fbookings"),
        "unexpected redirect target: {location}"
    );

    common::cleanup(app).await;
}

#[tokio::test]
async fn anonymous_review_list_is_public() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/reviews")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    common::cleanup(app).await;
}

#[tokio::test]
async fn booking_form_page_is_public_but_post_requires_login() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/bookings/new")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .client
        .post(app.url("/bookings/new"))
        .form(&[("date", "2030-01-01"), ("time", "19:00"), ("guests", "2")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp.headers()["location"].to_str().unwrap();
    assert!(location.starts_with("/auth/login?next="));

    common::cleanup(app).await;
}

// ── Token refresh ───────────────────────────────────────────────

#[tokio::test]
async fn refresh_token_rotation() {
    let app = common::spawn_app().await;
    let session = app.register_user("Alice", "alice@test.com", "password123").await;

    let resp = app
        .client
        .post(app.url("/auth/refresh"))
        .header("cookie", format!("refresh_token={}", session.refresh_token))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    let new_refresh = body["refresh_token"].as_str().unwrap().to_string();
    assert_ne!(new_refresh, session.refresh_token);

    // Replaying the rotated token must revoke all sessions.
    let resp = app
        .client
        .post(app.url("/auth/refresh"))
        .header("cookie", format!("refresh_token={}", session.refresh_token))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // The freshly issued token died with them.
    let resp = app
        .client
        .post(app.url("/auth/refresh"))
        .header("cookie", format!("refresh_token={new_refresh}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    common::cleanup(app).await;
}

// ── Booking lifecycle & audit trail ─────────────────────────────

async fn booking_history_rows(
    app: &common::TestApp,
    booking_pk: Uuid,
) -> Vec<(Option<Uuid>, String, Option<serde_json::Value>)> {
    sqlx::query_as(
        "SELECT booking_id, action::text, data FROM booking_history
         WHERE booking_pk = $1 ORDER BY created_at",
    )
    .bind(booking_pk)
    .fetch_all(&app.pool)
    .await
    .unwrap()
}

#[tokio::test]
async fn create_booking_writes_created_history() {
    let app = common::spawn_app().await;
    let session = app.register_user("Alice", "alice@test.com", "password123").await;
    let alice = app.user_id("alice@test.com").await;

    let id = app
        .create_booking(&session, Utc::now() + Duration::hours(3), 4, "window seat")
        .await;

    let rows = booking_history_rows(&app, id).await;
    assert_eq!(rows.len(), 1);
    let (booking_id, action, data) = &rows[0];
    assert_eq!(*booking_id, Some(id));
    assert_eq!(action, "created");

    let data = data.as_ref().unwrap();
    assert_eq!(data["guests"], 4);
    assert_eq!(data["special_requests"], "window seat");
    assert_eq!(data["user"], alice.to_string());
    // Timestamps are stored as RFC 3339 strings.
    let date = data["date"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(date).is_ok());
    assert!(data.get("id").is_none());

    common::cleanup(app).await;
}

#[tokio::test]
async fn update_booking_writes_updated_history() {
    let app = common::spawn_app().await;
    let session = app.register_user("Alice", "alice@test.com", "password123").await;

    let id = app
        .create_booking(&session, Utc::now() + Duration::hours(3), 2, "")
        .await;

    let when = Utc::now() + Duration::hours(5);
    let date_field = when.format("%Y-%m-%d").to_string();
    let time_field = when.format("%H:%M").to_string();
    let resp = app
        .post_form_auth(
            &format!("/bookings/{id}/edit"),
            &session,
            &[
                ("date", date_field.as_str()),
                ("time", time_field.as_str()),
                ("guests", "6"),
                ("special_requests", "birthday"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let rows = booking_history_rows(&app, id).await;
    let actions: Vec<&str> = rows.iter().map(|(_, a, _)| a.as_str()).collect();
    assert_eq!(actions, ["created", "updated"]);
    let updated = rows[1].2.as_ref().unwrap();
    assert_eq!(updated["guests"], 6);

    common::cleanup(app).await;
}

#[tokio::test]
async fn soft_delete_keeps_row_and_writes_deleted_history() {
    let app = common::spawn_app().await;
    let session = app.register_user("Alice", "alice@test.com", "password123").await;

    let id = app
        .create_booking(&session, Utc::now() + Duration::hours(3), 2, "")
        .await;

    let resp = app
        .post_form_auth(&format!("/bookings/{id}/delete"), &session, &[])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    // Row is retained, flagged, and timestamped.
    let (is_deleted, deleted_at): (bool, Option<DateTime<Utc>>) =
        sqlx::query_as("SELECT is_deleted, deleted_at FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert!(is_deleted);
    assert!(deleted_at.is_some());

    // Gone from the active view, still present in the all-inclusive view.
    let active: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM bookings WHERE id = $1 AND is_deleted = FALSE",
    )
    .bind(id)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(active, 0);

    // The owner can still open the detail page of a cancelled booking.
    let resp = app.get_auth(&format!("/bookings/{id}"), &session).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Exactly one `deleted` record, with the entity reference nulled out but
    // the denormalized pk intact.
    let rows = booking_history_rows(&app, id).await;
    let actions: Vec<&str> = rows.iter().map(|(_, a, _)| a.as_str()).collect();
    assert_eq!(actions, ["created", "deleted"]);
    let (booking_id, _, data) = &rows[1];
    assert_eq!(*booking_id, None);
    assert!(data.is_some());

    common::cleanup(app).await;
}

#[tokio::test]
async fn repeated_delete_is_idempotent_and_guarded() {
    let app = common::spawn_app().await;
    let session = app.register_user("Alice", "alice@test.com", "password123").await;

    let id = app
        .create_booking(&session, Utc::now() + Duration::hours(3), 2, "")
        .await;

    app.post_form_auth(&format!("/bookings/{id}/delete"), &session, &[])
        .await;
    let (first_deleted_at,): (Option<DateTime<Utc>>,) =
        sqlx::query_as("SELECT deleted_at FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_one(&app.pool)
            .await
            .unwrap();

    let resp = app
        .post_form_auth(&format!("/bookings/{id}/delete"), &session, &[])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let (is_deleted, second_deleted_at): (bool, Option<DateTime<Utc>>) =
        sqlx::query_as("SELECT is_deleted, deleted_at FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert!(is_deleted);
    assert!(second_deleted_at >= first_deleted_at);

    // The call site guards against double-appending the `deleted` record.
    let deleted_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM booking_history WHERE booking_pk = $1 AND action = 'deleted'",
    )
    .bind(id)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(deleted_count, 1);

    common::cleanup(app).await;
}

#[tokio::test]
async fn foreign_booking_is_forbidden_and_unchanged() {
    let app = common::spawn_app().await;
    let alice = app.register_user("Alice", "alice@test.com", "password123").await;
    let bob = app.register_user("Bob", "bob@test.com", "password456").await;

    let id = app
        .create_booking(&alice, Utc::now() + Duration::hours(3), 2, "")
        .await;

    let resp = app.get_auth(&format!("/bookings/{id}"), &bob).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .post_form_auth(
            &format!("/bookings/{id}/edit"),
            &bob,
            &[("date", "2030-01-01"), ("time", "19:00"), ("guests", "9")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .post_form_auth(&format!("/bookings/{id}/delete"), &bob, &[])
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let (guests, is_deleted): (i32, bool) =
        sqlx::query_as("SELECT guests, is_deleted FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(guests, 2);
    assert!(!is_deleted);

    common::cleanup(app).await;
}

#[tokio::test]
async fn booking_in_the_past_is_rejected() {
    let app = common::spawn_app().await;
    let session = app.register_user("Alice", "alice@test.com", "password123").await;

    let when = Utc::now() - Duration::hours(3);
    let date_field = when.format("%Y-%m-%d").to_string();
    let time_field = when.format("%H:%M").to_string();
    let resp = app
        .post_form_auth(
            "/bookings/new",
            &session,
            &[
                ("date", date_field.as_str()),
                ("time", time_field.as_str()),
                ("guests", "2"),
            ],
        )
        .await;

    // Re-rendered form with a field error, no redirect, no row.
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Booking date/time cannot be in the past."));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    common::cleanup(app).await;
}

#[tokio::test]
async fn hard_delete_orphans_history() {
    let app = common::spawn_app().await;
    let session = app.register_user("Alice", "alice@test.com", "password123").await;

    let id = app
        .create_booking(&session, Utc::now() + Duration::hours(3), 2, "")
        .await;

    let booking = yourtable::db::bookings::find_by_id(&app.pool, id)
        .await
        .unwrap()
        .unwrap();
    yourtable::db::bookings::hard_delete(&app.pool, id).await.unwrap();
    // The deleted record carries no live reference, so it can still be
    // written after the row is gone.
    yourtable::db::history::record_booking(&app.pool, &booking, yourtable::audit::HistoryAction::Deleted)
        .await
        .unwrap();

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE id = $1")
        .bind(id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    let rows = booking_history_rows(&app, id).await;
    let actions: Vec<&str> = rows.iter().map(|(_, a, _)| a.as_str()).collect();
    assert_eq!(actions, ["created", "deleted"]);
    // FK was nulled on the surviving `created` record; the pk column keeps
    // pointing at the removed booking.
    assert!(rows.iter().all(|(booking_id, _, _)| booking_id.is_none()));

    common::cleanup(app).await;
}

// ── Reviews ─────────────────────────────────────────────────────

#[tokio::test]
async fn guest_can_review_with_name() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/reviews/new"))
        .form(&[
            ("guest_name", "Walk-in"),
            ("rating", "5"),
            ("comment", "Great meal"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/reviews");

    let (user_id, guest_name, rating): (Option<Uuid>, String, i16) =
        sqlx::query_as("SELECT user_id, guest_name, rating FROM reviews")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(user_id, None);
    assert_eq!(guest_name, "Walk-in");
    assert_eq!(rating, 5);

    let history: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM review_history WHERE action = 'created'",
    )
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(history, 1);

    common::cleanup(app).await;
}

#[tokio::test]
async fn guest_review_without_name_is_rejected() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/reviews/new"))
        .form(&[("rating", "5"), ("comment", "anonymous drive-by")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Please tell us your name."));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    common::cleanup(app).await;
}

#[tokio::test]
async fn member_review_requires_completed_booking() {
    let app = common::spawn_app().await;
    let session = app.register_user("Alice", "alice@test.com", "password123").await;
    let alice = app.user_id("alice@test.com").await;

    // No bookings at all: rejected.
    let resp = app
        .post_form_auth("/reviews/new", &session, &[("rating", "5"), ("comment", "!")])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/reviews");
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    // A future booking does not count either.
    app.create_booking(&session, Utc::now() + Duration::hours(3), 2, "")
        .await;
    let resp = app
        .post_form_auth("/reviews/new", &session, &[("rating", "5"), ("comment", "!")])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    // A past booking that was cancelled does not count.
    let past = app
        .insert_booking_row(alice, Utc::now() - Duration::hours(30), 2)
        .await;
    app.post_form_auth(&format!("/bookings/{past}/delete"), &session, &[])
        .await;
    let resp = app
        .post_form_auth("/reviews/new", &session, &[("rating", "5"), ("comment", "!")])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    // A live past booking finally qualifies.
    app.insert_booking_row(alice, Utc::now() - Duration::hours(5), 2)
        .await;
    let resp = app
        .post_form_auth(
            "/reviews/new",
            &session,
            &[("rating", "4"), ("comment", "Very good service")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let (user_id, rating): (Option<Uuid>, i16) =
        sqlx::query_as("SELECT user_id, rating FROM reviews")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(user_id, Some(alice));
    assert_eq!(rating, 4);

    common::cleanup(app).await;
}

#[tokio::test]
async fn review_edit_and_delete_are_owner_only() {
    let app = common::spawn_app().await;
    let alice = app.register_user("Alice", "alice@test.com", "password123").await;
    let bob = app.register_user("Bob", "bob@test.com", "password456").await;
    let alice_id = app.user_id("alice@test.com").await;

    // Make Alice eligible, then review.
    app.insert_booking_row(alice_id, Utc::now() - Duration::hours(5), 2)
        .await;
    app.post_form_auth(
        "/reviews/new",
        &alice,
        &[("rating", "3"), ("comment", "Initial review")],
    )
    .await;
    let review_id: Uuid = sqlx::query_scalar("SELECT id FROM reviews")
        .fetch_one(&app.pool)
        .await
        .unwrap();

    // Bob cannot edit or delete Alice's review.
    let resp = app
        .post_form_auth(
            &format!("/reviews/{review_id}/edit"),
            &bob,
            &[("rating", "1"), ("comment", "Trying to hijack")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .post_form_auth(&format!("/reviews/{review_id}/delete"), &bob, &[])
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let (rating, is_deleted): (i16, bool) =
        sqlx::query_as("SELECT rating, is_deleted FROM reviews WHERE id = $1")
            .bind(review_id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(rating, 3);
    assert!(!is_deleted);

    // Alice can.
    let resp = app
        .post_form_auth(
            &format!("/reviews/{review_id}/edit"),
            &alice,
            &[("rating", "5"), ("comment", "Updated review - much better!")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = app
        .post_form_auth(&format!("/reviews/{review_id}/delete"), &alice, &[])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let actions: Vec<String> = sqlx::query_scalar(
        "SELECT action::text FROM review_history WHERE review_pk = $1 ORDER BY created_at",
    )
    .bind(review_id)
    .fetch_all(&app.pool)
    .await
    .unwrap();
    assert_eq!(actions, ["created", "updated", "deleted"]);

    common::cleanup(app).await;
}

#[tokio::test]
async fn guest_review_is_never_editable() {
    let app = common::spawn_app().await;
    let session = app.register_user("Alice", "alice@test.com", "password123").await;

    app.client
        .post(app.url("/reviews/new"))
        .form(&[("guest_name", "Walk-in"), ("rating", "5")])
        .send()
        .await
        .unwrap();
    let review_id: Uuid = sqlx::query_scalar("SELECT id FROM reviews")
        .fetch_one(&app.pool)
        .await
        .unwrap();

    // An owner-less review is foreign to everyone.
    let resp = app
        .post_form_auth(
            &format!("/reviews/{review_id}/edit"),
            &session,
            &[("rating", "1"), ("comment", "takeover")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .post_form_auth(&format!("/reviews/{review_id}/delete"), &session, &[])
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    common::cleanup(app).await;
}

#[tokio::test]
async fn deleted_review_leaves_public_list() {
    let app = common::spawn_app().await;
    let session = app.register_user("Alice", "alice@test.com", "password123").await;
    let alice_id = app.user_id("alice@test.com").await;

    app.insert_booking_row(alice_id, Utc::now() - Duration::hours(5), 2)
        .await;
    app.post_form_auth(
        "/reviews/new",
        &session,
        &[("rating", "5"), ("comment", "a marker comment")],
    )
    .await;
    let review_id: Uuid = sqlx::query_scalar("SELECT id FROM reviews")
        .fetch_one(&app.pool)
        .await
        .unwrap();

    let body = app.client.get(app.url("/reviews")).send().await.unwrap().text().await.unwrap();
    assert!(body.contains("a marker comment"));

    app.post_form_auth(&format!("/reviews/{review_id}/delete"), &session, &[])
        .await;

    // Gone from the public list, but the row survives for the profile view.
    let body = app.client.get(app.url("/reviews")).send().await.unwrap().text().await.unwrap();
    assert!(!body.contains("a marker comment"));

    let (is_deleted,): (bool,) =
        sqlx::query_as("SELECT is_deleted FROM reviews WHERE id = $1")
            .bind(review_id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert!(is_deleted);

    let body = app.get_auth("/profile", &session).await.text().await.unwrap();
    assert!(body.contains("a marker comment"));

    common::cleanup(app).await;
}

// ── Pages ───────────────────────────────────────────────────────

#[tokio::test]
async fn menu_shows_seeded_items() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/menu")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Tagliatelle al Ragu"));
    assert!(body.contains("Allergens:"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn profile_requires_auth_and_shows_cancelled_bookings() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/profile")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let session = app.register_user("Alice", "alice@test.com", "password123").await;
    let id = app
        .create_booking(&session, Utc::now() + Duration::hours(3), 2, "")
        .await;
    app.post_form_auth(&format!("/bookings/{id}/delete"), &session, &[])
        .await;

    let resp = app.get_auth("/profile", &session).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Cancelled"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn booking_detail_unknown_id_redirects_with_message() {
    let app = common::spawn_app().await;
    let session = app.register_user("Alice", "alice@test.com", "password123").await;

    let missing = Uuid::now_v7();
    let resp = app.get_auth(&format!("/bookings/{missing}"), &session).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/bookings");

    common::cleanup(app).await;
}

#[tokio::test]
async fn booking_detail_shows_owner_history() {
    let app = common::spawn_app().await;
    let session = app.register_user("Alice", "alice@test.com", "password123").await;

    let id = app
        .create_booking(&session, Utc::now() + Duration::hours(3), 2, "")
        .await;

    let body = app
        .get_auth(&format!("/bookings/{id}"), &session)
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("created"));
    assert!(body.contains("guests"));

    common::cleanup(app).await;
}

// ── Model behavior ──────────────────────────────────────────────

#[test]
fn guest_review_display_uses_guest_name() {
    let review = yourtable::models::Review {
        id: Uuid::nil(),
        user_id: None,
        guest_name: "Walk-in".to_string(),
        rating: 5,
        comment: "Great meal".to_string(),
        image_url: None,
        created_at: Utc::now(),
        is_deleted: false,
        deleted_at: None,
    };
    assert_eq!(review.to_string(), "Review(Walk-in, 5)");

    let anonymous = yourtable::models::Review {
        guest_name: String::new(),
        ..review
    };
    assert_eq!(anonymous.to_string(), "Review(Anonymous, 5)");
}

#[test]
fn menu_item_allergen_parsing() {
    let item = yourtable::models::MenuItem {
        id: Uuid::nil(),
        category_id: Uuid::nil(),
        name: "Tiramisu".to_string(),
        description: String::new(),
        price_cents: 750,
        allergens: "gluten, egg , dairy".to_string(),
        image_url: None,
        created_at: Utc::now(),
    };
    assert_eq!(item.allergen_list(), ["gluten", "egg", "dairy"]);
    assert_eq!(item.price_display(), "7.50");

    let none = yourtable::models::MenuItem {
        allergens: "None".to_string(),
        ..item
    };
    assert!(none.allergen_list().is_empty());
}
