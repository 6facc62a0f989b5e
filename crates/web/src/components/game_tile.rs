//! Game tile component.

use questline_core::SubscriptionPlan;
use questline_core::gate;

use crate::catalog::Game;

/// Display data for one game tile.
#[derive(Debug, Clone)]
pub struct GameTileView {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub category: &'static str,
    pub image_path: &'static str,
    pub href: String,
    /// Plan badge (e.g. "Premium"); `None` for games anyone can play.
    pub badge: Option<&'static str>,
    pub is_new: bool,
    /// Render with a lock overlay for this visitor.
    pub locked: bool,
}

impl GameTileView {
    /// Build a tile as seen by a visitor on `user_plan` (`None` = anonymous).
    #[must_use]
    pub fn new(game: &Game, user_plan: Option<SubscriptionPlan>) -> Self {
        let badge = game
            .required_plan
            .plan()
            .filter(|plan| gate::is_paid_plan(*plan))
            .map(SubscriptionPlan::display_name);

        Self {
            slug: game.slug,
            title: game.title,
            summary: game.summary,
            category: game.category,
            image_path: game.image_path,
            href: format!("/games/{}", game.slug),
            badge,
            is_new: game.is_new,
            locked: gate::is_locked(user_plan, game.required_plan),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_open_game_has_no_badge_or_lock() {
        let catalog = Catalog::default();
        let tile = GameTileView::new(catalog.game("word-sprint").unwrap(), None);
        assert_eq!(tile.badge, None);
        assert!(!tile.locked);
        assert_eq!(tile.href, "/games/word-sprint");
    }

    #[test]
    fn test_free_account_game_is_not_badged() {
        let catalog = Catalog::default();
        let tile = GameTileView::new(catalog.game("fraction-frenzy").unwrap(), None);
        assert_eq!(tile.badge, None);
        assert!(!tile.locked);
    }

    #[test]
    fn test_premium_game_locks_for_free_plan() {
        let catalog = Catalog::default();
        let game = catalog.game("planet-hopper").unwrap();

        let tile = GameTileView::new(game, Some(SubscriptionPlan::Free));
        assert_eq!(tile.badge, Some("Premium"));
        assert!(tile.locked);

        let tile = GameTileView::new(game, Some(SubscriptionPlan::Growth));
        assert!(!tile.locked);
    }

    #[test]
    fn test_higher_tier_game_locks_for_premium_plan() {
        let catalog = Catalog::default();
        let tile = GameTileView::new(
            catalog.game("market-mogul").unwrap(),
            Some(SubscriptionPlan::Premium),
        );
        assert_eq!(tile.badge, Some("Growth"));
        assert!(tile.locked);
    }
}
