//! In-process integration tests for Questline.
//!
//! Tests drive the full router from [`questline_web::app`] with
//! `tower::ServiceExt::oneshot`, so no server or network is needed.
//! [`TestApp`] carries the session cookie between requests like a browser.
//!
//! ```bash
//! cargo test -p questline-integration-tests
//! ```

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use questline_web::catalog::Catalog;
use questline_web::config::WebConfig;
use questline_web::middleware::session::SESSION_COOKIE_NAME;
use questline_web::state::AppState;
use tower::ServiceExt;

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// The application plus one browser's cookie jar.
pub struct TestApp {
    router: Router,
    session_cookie: Option<String>,
}

impl TestApp {
    /// App with local config and counters short enough to stream in a test.
    #[must_use]
    pub fn new() -> Self {
        let mut config = WebConfig::local();
        config.counter.duration = Duration::from_millis(60);
        config.counter.frame_interval = Duration::from_millis(5);
        Self::with_config(config)
    }

    #[must_use]
    pub fn with_config(config: WebConfig) -> Self {
        let state = AppState::new(config, Catalog::default());
        Self {
            router: questline_web::app(state),
            session_cookie: None,
        }
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Request::get(path), Body::empty()).await
    }

    /// Send a POST with an urlencoded form body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn post_form(&mut self, path: &str, form: &str) -> TestResponse {
        let builder =
            Request::post(path).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(builder, Body::from(form.to_owned())).await
    }

    /// Sign in with a fixed name and email and return the redirect response.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn sign_in(&mut self) -> TestResponse {
        self.post_form("/auth/login", "name=Robin+Reader&email=robin%40example.com")
            .await
    }

    /// Whether the jar currently holds a session cookie.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.session_cookie.is_some()
    }

    async fn send(
        &mut self,
        mut builder: axum::http::request::Builder,
        body: Body,
    ) -> TestResponse {
        if let Some(cookie) = &self.session_cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder.body(body).expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        self.store_cookies(response.headers());

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("readable body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn store_cookies(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            let pair = value.split(';').next().unwrap_or_default().trim();
            let Some((name, cookie_value)) = pair.split_once('=') else {
                continue;
            };
            if name != SESSION_COOKIE_NAME {
                continue;
            }
            let expired = value.to_ascii_lowercase().contains("max-age=0");
            self.session_cookie = if cookie_value.is_empty() || expired {
                None
            } else {
                Some(pair.to_owned())
            };
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
