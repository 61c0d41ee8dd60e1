use std::net::SocketAddr;

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use yourtable::config::Config;

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
}

/// Auth cookies captured from a login response. The site marks its cookies
/// Secure, so tests carry them by hand in a `cookie` header instead of a
/// cookie store.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
}

impl Session {
    pub fn cookie_header(&self) -> String {
        format!(
            "access_token={}; refresh_token={}",
            self.access_token, self.refresh_token
        )
    }
}

fn cookie_value(resp: &reqwest::Response, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    resp.headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|raw| {
            let raw = raw.strip_prefix(&prefix)?;
            Some(raw.split(';').next().unwrap_or("").to_string())
        })
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Sign up a user through the form endpoint.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> StatusCode {
        let resp = self
            .client
            .post(self.url("/auth/signup"))
            .form(&[("name", name), ("email", email), ("password", password)])
            .send()
            .await
            .expect("signup request failed");
        resp.status()
    }

    /// Log in through the form endpoint and capture the auth cookies.
    pub async fn login(&self, email: &str, password: &str) -> Session {
        let resp = self
            .client
            .post(self.url("/auth/login"))
            .form(&[("email", email), ("password", password)])
            .send()
            .await
            .expect("login request failed");
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "login did not redirect");
        let access_token = cookie_value(&resp, "access_token").expect("missing access token");
        let refresh_token = cookie_value(&resp, "refresh_token").expect("missing refresh token");
        Session {
            access_token,
            refresh_token,
        }
    }

    /// Sign up and log in one user, returning their session.
    pub async fn register_user(&self, name: &str, email: &str, password: &str) -> Session {
        let status = self.signup(name, email, password).await;
        assert_eq!(status, StatusCode::SEE_OTHER, "signup failed");
        self.login(email, password).await
    }

    /// Create a booking through the form endpoint; returns the new id parsed
    /// from the redirect target.
    pub async fn create_booking(
        &self,
        session: &Session,
        date: DateTime<Utc>,
        guests: u32,
        special_requests: &str,
    ) -> Uuid {
        let date_field = date.format("%Y-%m-%d").to_string();
        let time_field = date.format("%H:%M").to_string();
        let guests_field = guests.to_string();
        let resp = self
            .client
            .post(self.url("/bookings/new"))
            .header("cookie", session.cookie_header())
            .form(&[
                ("date", date_field.as_str()),
                ("time", time_field.as_str()),
                ("guests", guests_field.as_str()),
                ("special_requests", special_requests),
            ])
            .send()
            .await
            .expect("create booking failed");
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "create booking did not redirect");
        let location = resp
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .expect("missing redirect location");
        location
            .rsplit('/')
            .next()
            .and_then(|id| Uuid::parse_str(id).ok())
            .expect("redirect did not point at a booking")
    }

    /// Authenticated GET.
    pub async fn get_auth(&self, path: &str, session: &Session) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .header("cookie", session.cookie_header())
            .send()
            .await
            .expect("get request failed")
    }

    /// Authenticated form POST.
    pub async fn post_form_auth(
        &self,
        path: &str,
        session: &Session,
        form: &[(&str, &str)],
    ) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header("cookie", session.cookie_header())
            .form(form)
            .send()
            .await
            .expect("post request failed")
    }

    /// Insert a booking row directly, bypassing form validation. Used to set
    /// up past bookings, which the HTTP surface rightly refuses to create.
    pub async fn insert_booking_row(
        &self,
        user_id: Uuid,
        date: DateTime<Utc>,
        guests: i32,
    ) -> Uuid {
        let id = Uuid::now_v7();
        sqlx::query(
            "INSERT INTO bookings (id, user_id, date, guests, special_requests)
             VALUES ($1, $2, $3, $4, '')",
        )
        .bind(id)
        .bind(user_id)
        .bind(date)
        .bind(guests)
        .execute(&self.pool)
        .await
        .expect("failed to insert booking row");
        id
    }

    /// Look up a user id by email, straight from the database.
    pub async fn user_id(&self, email: &str) -> Uuid {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .expect("user not found")
    }
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    // Create a unique test database
    let db_name = format!(
        "yourtable_test_{}",
        Uuid::now_v7().to_string().replace('-', "")
    );

    // Connect to default postgres DB to create test DB
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    // Connect to test DB and run migrations
    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let config = Config {
        database_url: test_url,
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        base_url: "http://localhost:0".to_string(),
        site_name: "YourTable".to_string(),
        max_body_size: 1_048_576,
        log_level: "warn".to_string(),
        smtp: None,
    };

    let app = yourtable::build_app(pool.clone(), config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_name,
    }
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
