//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use questline_core::{Email, SubscriptionPlan, UserId};

/// Session-stored user identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    /// `None` until the user picks a plan.
    pub plan: Option<SubscriptionPlan>,
}

impl CurrentUser {
    /// Create a newly signed-in user with no plan.
    #[must_use]
    pub fn new(name: String, email: Email) -> Self {
        Self {
            id: UserId::generate(),
            name,
            email,
            plan: None,
        }
    }

    /// The plan used for gating. No plan counts as `Free`.
    #[must_use]
    pub fn effective_plan(&self) -> SubscriptionPlan {
        self.plan.unwrap_or_default()
    }
}

/// Session keys.
pub mod keys {
    /// Key for storing the current signed-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the path to return to after signing in.
    pub const RETURN_URL: &str = "return_url";

    /// Key for the one-shot notification shown on the next page.
    pub const FLASH: &str = "flash";
}
