//! Game catalog and play page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::components::{GameTileView, PageLayout};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{OptionalAuth, require_plan};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Game catalog template.
#[derive(Template, WebTemplate)]
#[template(path = "games/index.html")]
pub struct GamesIndexTemplate {
    pub layout: PageLayout,
    pub tiles: Vec<GameTileView>,
}

/// Play page template.
#[derive(Template, WebTemplate)]
#[template(path = "games/show.html")]
pub struct GameShowTemplate {
    pub layout: PageLayout,
    pub tile: GameTileView,
}

/// Display every game, locking the ones the visitor's plan doesn't cover.
#[instrument(skip(state, session, user))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
) -> impl IntoResponse {
    let plan = user.as_ref().map(CurrentUser::effective_plan);

    GamesIndexTemplate {
        layout: PageLayout::load(&session, user.as_ref()).await,
        tiles: state
            .catalog()
            .games
            .iter()
            .map(|game| GameTileView::new(game, plan))
            .collect(),
    }
}

/// Display the play page for a game the visitor's plan covers.
///
/// Anonymous visitors are sent to sign in; signed-in users below the required
/// plan are sent to pricing.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] for an unknown slug.
#[instrument(skip(state, session, user))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Path(slug): Path<String>,
) -> Result<Response> {
    let game = state
        .catalog()
        .game(&slug)
        .ok_or_else(|| AppError::NotFound(format!("game {slug}")))?;

    let path = format!("/games/{}", game.slug);
    if let Err(rejection) =
        require_plan(&session, user.as_ref(), game.required_plan, &path, game.title).await
    {
        return Ok(rejection.into_response());
    }

    let plan = user.as_ref().map(CurrentUser::effective_plan);
    Ok(GameShowTemplate {
        layout: PageLayout::load(&session, user.as_ref()).await,
        tile: GameTileView::new(game, plan),
    }
    .into_response())
}
