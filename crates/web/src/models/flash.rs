//! One-shot notifications carried across a redirect.
//!
//! A handler records a message in the session, redirects, and the next page
//! takes it out again, so each message renders exactly once.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::session::keys;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Info,
    Error,
}

impl FlashLevel {
    /// CSS modifier class for the toast.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Info => "toast--info",
            Self::Error => "toast--error",
        }
    }
}

/// A notification waiting to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Queue an error notification for the next page.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn notify_error(
    session: &Session,
    message: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    store(session, FlashLevel::Error, message.into()).await
}

/// Queue an informational notification for the next page.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn notify_info(
    session: &Session,
    message: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    store(session, FlashLevel::Info, message.into()).await
}

/// Remove and return the pending notification, if any.
///
/// Session read failures are logged and treated as "no notification".
pub async fn take_flash(session: &Session) -> Option<Flash> {
    match session.remove::<Flash>(keys::FLASH).await {
        Ok(flash) => flash,
        Err(e) => {
            tracing::warn!("Failed to read flash message: {e}");
            None
        }
    }
}

async fn store(
    session: &Session,
    level: FlashLevel,
    message: String,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::FLASH, Flash { level, message }).await
}
