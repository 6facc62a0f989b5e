//! Data shared by every full page: header nav, notification, footer.

use tower_sessions::Session;

use super::FooterView;
use crate::models::flash::take_flash;
use crate::models::{CurrentUser, Flash};

/// The signed-in user as shown in the header.
#[derive(Debug, Clone)]
pub struct NavUser {
    pub name: String,
    pub plan_name: &'static str,
}

/// Shared page chrome rendered by `base.html`.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub user: Option<NavUser>,
    pub flash: Option<Flash>,
    pub footer: FooterView,
}

impl PageLayout {
    /// Build the chrome for a page, consuming any pending notification.
    pub async fn load(session: &Session, user: Option<&CurrentUser>) -> Self {
        Self {
            user: user.map(|u| NavUser {
                name: u.name.clone(),
                plan_name: u.effective_plan().display_name(),
            }),
            flash: take_flash(session).await,
            footer: FooterView::default(),
        }
    }
}
