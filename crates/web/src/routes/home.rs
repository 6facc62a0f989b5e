//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use crate::components::{GameTileView, PageLayout, StatCounterView};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: PageLayout,
    pub stats: Vec<StatCounterView>,
    pub featured: Vec<GameTileView>,
}

/// Display the home page.
#[instrument(skip(state, session, user))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
) -> impl IntoResponse {
    let plan = user.as_ref().map(CurrentUser::effective_plan);
    let catalog = state.catalog();

    HomeTemplate {
        layout: PageLayout::load(&session, user.as_ref()).await,
        stats: catalog.stats.iter().map(StatCounterView::new).collect(),
        featured: catalog
            .featured()
            .map(|game| GameTileView::new(game, plan))
            .collect(),
    }
}
