//! Sign-in and sign-out handlers.
//!
//! Sign-in is name + email only. On success the visitor is sent to the path
//! recorded by whichever gate sent them here.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Redirect, Response},
};
use questline_core::Email;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::components::PageLayout;
use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user, take_return_url};
use crate::models::CurrentUser;
use crate::models::flash::{notify_error, notify_info};

/// Longest display name accepted at sign-in.
pub const MAX_NAME_LEN: usize = 80;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub name: String,
    pub email: String,
}

impl LoginForm {
    /// Validate the form into a new session user.
    ///
    /// # Errors
    ///
    /// Returns a message suitable for showing to the visitor.
    pub fn into_user(self) -> std::result::Result<CurrentUser, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Please tell us your name.".to_string());
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(format!("Names can be at most {MAX_NAME_LEN} characters."));
        }
        let email = Email::parse(&self.email).map_err(|e| format!("That email won't work: {e}."))?;
        Ok(CurrentUser::new(name.to_string(), email))
    }
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub layout: PageLayout,
}

/// Display the login page. Signed-in users go straight to their return path.
#[instrument(skip(session, user))]
pub async fn login_page(session: Session, OptionalAuth(user): OptionalAuth) -> Response {
    if user.is_some() {
        return Redirect::to(&take_return_url(&session).await).into_response();
    }

    LoginTemplate {
        layout: PageLayout::load(&session, None).await,
    }
    .into_response()
}

/// Handle login form submission.
///
/// An invalid form is not an error: the visitor is sent back to the login
/// page with a notification.
///
/// # Errors
///
/// Returns [`crate::error::AppError::Session`] if the session cannot be read or written.
#[instrument(skip(session, form))]
pub async fn login(session: Session, Form(form): Form<LoginForm>) -> Result<Redirect> {
    let user = match form.into_user() {
        Ok(user) => user,
        Err(message) => {
            tracing::debug!(%message, "Rejected sign-in form");
            notify_error(&session, message).await?;
            return Ok(Redirect::to(crate::middleware::auth::LOGIN_PATH));
        }
    };

    // New session id on privilege change.
    session.cycle_id().await?;
    set_current_user(&session, &user).await?;
    set_sentry_user(&user.id);
    notify_info(&session, format!("Welcome, {}!", user.name)).await?;

    let destination = take_return_url(&session).await;
    tracing::info!(user_id = %user.id, %destination, "User signed in");
    Ok(Redirect::to(&destination))
}

/// Handle logout.
///
/// # Errors
///
/// Returns [`crate::error::AppError::Session`] if the session cannot be written.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    notify_info(&session, "You've been signed out.").await?;
    Ok(Redirect::to("/"))
}
