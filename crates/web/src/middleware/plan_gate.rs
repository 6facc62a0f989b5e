//! Enforce plan requirements on gated pages.
//!
//! The decision comes from [`questline_core::gate`]; this module performs the
//! side effects: recording the return path, queueing a notification and
//! redirecting.

use axum::response::{IntoResponse, Redirect, Response};
use questline_core::gate::{self, GateOutcome};
use questline_core::{PlanRequirement, SubscriptionPlan};
use tower_sessions::Session;

use super::auth::{LOGIN_PATH, set_return_url};
use crate::models::CurrentUser;
use crate::models::flash::{notify_error, notify_info};

/// Why a gated page was not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// Visitor must sign in first.
    SignIn,
    /// Signed-in user must move up to (at least) this plan.
    Upgrade(PlanRequirement),
}

impl GateRejection {
    /// Where the visitor is sent.
    #[must_use]
    pub fn location(self) -> String {
        match self {
            Self::SignIn => LOGIN_PATH.to_string(),
            Self::Upgrade(required) => format!("/pricing?plan={required}"),
        }
    }
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        Redirect::to(&self.location()).into_response()
    }
}

/// Check `user` against `required` for the page at `path`.
///
/// `resource` names the thing being gated in the notification text.
///
/// # Errors
///
/// Returns a [`GateRejection`] (a redirect) when the visitor may not proceed.
/// Session write failures are logged and do not change the outcome.
pub async fn require_plan(
    session: &Session,
    user: Option<&CurrentUser>,
    required: PlanRequirement,
    path: &str,
    resource: &str,
) -> Result<(), GateRejection> {
    let plan = user.map_or(SubscriptionPlan::Free, CurrentUser::effective_plan);

    match gate::guard(user.is_some(), plan, required) {
        GateOutcome::Allow => Ok(()),
        GateOutcome::SignIn => {
            tracing::info!(%required, path, "Anonymous visitor sent to sign in");
            if let Err(e) = set_return_url(session, path).await {
                tracing::warn!("Failed to record return URL: {e}");
            }
            let message = format!("Please sign in to play {resource}.");
            if let Err(e) = notify_error(session, message).await {
                tracing::warn!("Failed to queue notification: {e}");
            }
            Err(GateRejection::SignIn)
        }
        GateOutcome::Upgrade => {
            let required_name = required
                .plan()
                .map_or("a paid", SubscriptionPlan::display_name);
            tracing::info!(%required, current = %plan, path, "User needs a plan upgrade");
            // Subscribing sends the user back here.
            if let Err(e) = set_return_url(session, path).await {
                tracing::warn!("Failed to record return URL: {e}");
            }
            if let Err(e) = notify_info(
                session,
                format!("{resource} needs the {required_name} plan. Upgrade to start playing."),
            )
            .await
            {
                tracing::warn!("Failed to queue notification: {e}");
            }
            Err(GateRejection::Upgrade(required))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use questline_core::Email;
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::middleware::auth::take_return_url;
    use crate::models::FlashLevel;
    use crate::models::flash::take_flash;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn user(plan: Option<SubscriptionPlan>) -> CurrentUser {
        let email = Email::parse("kai@example.com").unwrap();
        let mut user = CurrentUser::new("Kai".to_string(), email);
        user.plan = plan;
        user
    }

    #[tokio::test]
    async fn test_public_game_needs_nothing() {
        let session = session();
        let result = require_plan(&session, None, PlanRequirement::All, "/games/a", "A").await;
        assert_eq!(result, Ok(()));
        assert!(take_flash(&session).await.is_none());
    }

    #[tokio::test]
    async fn test_anonymous_visitor_records_return_path() {
        let session = session();
        let required = PlanRequirement::Plan(SubscriptionPlan::Premium);
        let path = "/games/code-quest";
        let result = require_plan(&session, None, required, path, "Code Quest").await;

        assert_eq!(result, Err(GateRejection::SignIn));
        assert_eq!(take_return_url(&session).await, "/games/code-quest");
        let flash = take_flash(&session).await.unwrap();
        assert_eq!(flash.level, FlashLevel::Error);
        assert!(flash.message.contains("Code Quest"));
    }

    #[tokio::test]
    async fn test_low_plan_is_sent_to_pricing() {
        let session = session();
        let member = user(Some(SubscriptionPlan::Premium));
        let required = PlanRequirement::Plan(SubscriptionPlan::Scale);
        let result =
            require_plan(&session, Some(&member), required, "/games/t", "Team Trivia").await;

        let rejection = result.unwrap_err();
        assert_eq!(rejection.location(), "/pricing?plan=scale");
        let flash = take_flash(&session).await.unwrap();
        assert_eq!(flash.level, FlashLevel::Info);
        assert!(flash.message.contains("Scale"));
        assert_eq!(take_return_url(&session).await, "/games/t");
    }

    #[tokio::test]
    async fn test_user_without_plan_plays_free_games() {
        let session = session();
        let member = user(None);
        let required = PlanRequirement::Plan(SubscriptionPlan::Free);
        assert_eq!(
            require_plan(&session, Some(&member), required, "/games/f", "F").await,
            Ok(())
        );
    }
}
