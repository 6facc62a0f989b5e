//! Pricing page and the demo plan switch.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use questline_core::{PlanRequirement, SubscriptionPlan};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::components::{PageLayout, PricingCardView};
use crate::error::{AppError, Result, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth, set_current_user, take_return_url};
use crate::models::flash::notify_info;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Query parameters for the pricing page.
#[derive(Debug, Deserialize)]
pub struct PricingQuery {
    /// Plan the visitor was sent here for.
    pub plan: Option<String>,
}

impl PricingQuery {
    /// The plan to highlight. Unknown names and `all` are ignored.
    fn focus(&self) -> Option<SubscriptionPlan> {
        self.plan
            .as_deref()
            .and_then(|raw| raw.parse::<PlanRequirement>().ok())
            .and_then(PlanRequirement::plan)
    }
}

/// Pricing page template.
#[derive(Template, WebTemplate)]
#[template(path = "pricing.html")]
pub struct PricingTemplate {
    pub layout: PageLayout,
    pub cards: Vec<PricingCardView>,
}

/// Display the pricing cards.
#[instrument(skip(state, session, user))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<PricingQuery>,
) -> impl IntoResponse {
    let current = user.as_ref().map(CurrentUser::effective_plan);
    let focus = query.focus();

    PricingTemplate {
        layout: PageLayout::load(&session, user.as_ref()).await,
        cards: state
            .catalog()
            .tiers
            .iter()
            .map(|tier| PricingCardView::new(tier, current, focus))
            .collect(),
    }
}

/// Put the signed-in user on `plan`.
///
/// There is no billing; this only updates the session so gated games can be
/// tried end to end.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] for an unknown plan name and
/// [`AppError::Session`] if the session cannot be written.
#[instrument(skip(session, user), fields(user_id = %user.id))]
pub async fn subscribe(
    session: Session,
    RequireAuth(mut user): RequireAuth,
    Path(plan): Path<String>,
) -> Result<Redirect> {
    let plan: SubscriptionPlan = plan
        .parse()
        .map_err(|e: questline_core::PlanError| AppError::BadRequest(e.to_string()))?;

    let previous = user.effective_plan();
    user.plan = Some(plan);
    set_current_user(&session, &user).await?;
    set_sentry_user(&user.id);
    notify_info(
        &session,
        format!("You're now on the {} plan.", plan.display_name()),
    )
    .await?;

    tracing::info!(%previous, %plan, "Plan changed");
    Ok(Redirect::to(&take_return_url(&session).await))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(plan: Option<&str>) -> PricingQuery {
        PricingQuery {
            plan: plan.map(str::to_string),
        }
    }

    #[test]
    fn test_focus_parses_plan_names() {
        assert_eq!(query(Some("scale")).focus(), Some(SubscriptionPlan::Scale));
        assert_eq!(query(Some("Growth")).focus(), Some(SubscriptionPlan::Growth));
    }

    #[test]
    fn test_focus_ignores_unknown_and_all() {
        assert_eq!(query(None).focus(), None);
        assert_eq!(query(Some("all")).focus(), None);
        assert_eq!(query(Some("platinum")).focus(), None);
    }
}
