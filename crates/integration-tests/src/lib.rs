//! Integration tests for Craftloom.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p craftloom-cli -- migrate
//!
//! # Start the server
//! cargo run -p craftloom-web
//!
//! # Run integration tests
//! cargo test -p craftloom-integration-tests -- --ignored
//! ```
//!
//! All tests are `#[ignore]`d by default because they need a running
//! server; `CRAFTLOOM_BASE_URL` overrides the default target.

use reqwest::{Client, redirect::Policy};
use uuid::Uuid;

/// Base URL for the server under test (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("CRAFTLOOM_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A test client against a running server.
///
/// Redirects are not followed so tests can assert on `Location` headers;
/// cookies are kept so a login carries across requests.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Create a fresh context with its own cookie jar.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn new() -> Self {
        // The rate limiter keys on proxy headers, so supply one. Each
        // context gets its own address to keep parallel tests from
        // tripping the per-IP auth limiter over each other.
        let [a, b, c, ..] = *Uuid::new_v4().as_bytes();
        let forwarded = format!("10.{a}.{b}.{c}");
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            reqwest::header::HeaderValue::from_str(&forwarded)
                .expect("forwarded address is a valid header value"),
        );

        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url(),
        }
    }

    /// Absolute URL for a path on the server under test.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Register a fresh account and leave its session in the cookie jar.
    ///
    /// Returns the generated username.
    ///
    /// # Panics
    ///
    /// Panics if registration does not redirect to the home page.
    pub async fn register_user(&self, is_artist: bool) -> String {
        let username = format!("it_{}", &Uuid::new_v4().simple().to_string()[..12]);
        let email = format!("{username}@example.com");

        let mut form = vec![
            ("username", username.clone()),
            ("email", email),
            ("password", "integration-pw".to_string()),
            ("password_confirm", "integration-pw".to_string()),
        ];
        if is_artist {
            form.push(("is_artist", "on".to_string()));
        }

        let resp = self
            .client
            .post(self.url("/auth/register"))
            .form(&form)
            .send()
            .await
            .expect("Failed to register");

        assert!(
            resp.status().is_redirection(),
            "registration did not redirect: {}",
            resp.status()
        );
        assert_eq!(location(&resp), "/");

        username
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The `Location` header of a redirect response.
///
/// # Panics
///
/// Panics if the header is absent or not valid UTF-8.
#[must_use]
pub fn location(resp: &reqwest::Response) -> String {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .expect("non-UTF-8 Location header")
        .to_string()
}
