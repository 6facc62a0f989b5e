//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Home page (animated stats, featured games)
//! GET  /health                    - Health check
//!
//! # Games
//! GET  /games                     - Game catalog
//! GET  /games/{slug}              - Play page (plan-gated)
//!
//! # Pricing
//! GET  /pricing                   - Pricing cards (?plan= highlights a tier)
//! POST /pricing/{plan}/subscribe  - Switch plan (requires sign-in)
//!
//! # Auth
//! GET  /auth/login                - Sign-in page
//! POST /auth/login                - Sign in
//! POST /auth/logout               - Sign out
//!
//! # API
//! GET  /api/counters/{key}        - SSE stream of counter values
//! ```

pub mod api;
pub mod auth;
pub mod games;
pub mod home;
pub mod pricing;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the game routes router.
pub fn game_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(games::index))
        .route("/{slug}", get(games::show))
}

/// Create the pricing routes router.
pub fn pricing_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pricing::index))
        .route("/{plan}/subscribe", post(pricing::subscribe))
}

/// Create the API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/counters/{key}", get(api::counters::stream))
}

/// Create all page and API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .nest("/games", game_routes())
        .nest("/pricing", pricing_routes())
        .nest("/auth", auth_routes())
        .nest("/api", api_routes())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
