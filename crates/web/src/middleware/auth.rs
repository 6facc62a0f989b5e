//! Authentication extractors and session helpers.
//!
//! The session is the source of truth for "is logged in" and "current plan";
//! both are read fresh on every request.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Where visitors go to sign in.
pub const LOGIN_PATH: &str = "/auth/login";

/// Where visitors land after sign-in when no return path was recorded.
pub const DEFAULT_RETURN_PATH: &str = "/games";

/// Extractor that requires a signed-in user.
///
/// Anonymous HTML requests are redirected to the login page after the
/// requested path is recorded as the return URL.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but the visitor is anonymous.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        if let Some(user) = current_user(session).await {
            return Ok(Self(user));
        }

        if parts.uri.path().starts_with("/api/") {
            return Err(AuthRejection::Unauthorized);
        }

        // Only GETs can be replayed after sign-in; a POST target would 405.
        let return_to = if parts.method == axum::http::Method::GET {
            parts
                .uri
                .path_and_query()
                .map_or(DEFAULT_RETURN_PATH, |pq| pq.as_str())
        } else {
            DEFAULT_RETURN_PATH
        };
        if let Err(e) = set_return_url(session, return_to).await {
            tracing::warn!("Failed to record return URL: {e}");
        }

        Err(AuthRejection::RedirectToLogin)
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this never rejects the request.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => current_user(session).await,
            None => None,
        };

        Ok(Self(user))
    }
}

async fn current_user(session: &Session) -> Option<CurrentUser> {
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Store the signed-in user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Remove the signed-in user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}

/// Remember where to send the visitor after they sign in.
///
/// Paths that are not same-origin relative paths are ignored.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_return_url(
    session: &Session,
    path: &str,
) -> Result<(), tower_sessions::session::Error> {
    match sanitize_return_url(path) {
        Some(path) => session.insert(session_keys::RETURN_URL, path).await,
        None => Ok(()),
    }
}

/// Take the recorded return path, falling back to [`DEFAULT_RETURN_PATH`].
///
/// The stored value is removed so it is used at most once.
pub async fn take_return_url(session: &Session) -> String {
    session
        .remove::<String>(session_keys::RETURN_URL)
        .await
        .ok()
        .flatten()
        .and_then(|path| sanitize_return_url(&path).map(str::to_owned))
        .unwrap_or_else(|| DEFAULT_RETURN_PATH.to_string())
}

/// Accept only local absolute paths.
///
/// Rejects scheme-relative (`//host`) and backslash tricks (`/\host`) that
/// browsers resolve to another origin, and never returns to the login page.
#[must_use]
pub fn sanitize_return_url(path: &str) -> Option<&str> {
    let path = path.trim();
    let mut chars = path.chars();
    if chars.next() != Some('/') {
        return None;
    }
    if matches!(chars.next(), Some('/' | '\\')) {
        return None;
    }
    if path.chars().any(char::is_control) || path.starts_with(LOGIN_PATH) {
        return None;
    }
    Some(path)
}
