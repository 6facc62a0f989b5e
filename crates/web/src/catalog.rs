//! Static site content: games, pricing tiers and headline stats.
//!
//! Loaded once at startup into [`crate::state::AppState`].

use questline_core::{CurrencyCode, PlanRequirement, Price, SubscriptionPlan};

/// A playable learning game.
#[derive(Debug, Clone)]
pub struct Game {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub category: &'static str,
    pub image_path: &'static str,
    pub required_plan: PlanRequirement,
    pub is_new: bool,
    /// Shown on the home page.
    pub featured: bool,
}

/// A number shown with an animated counter on the home page.
#[derive(Debug, Clone)]
pub struct Stat {
    pub key: &'static str,
    pub label: &'static str,
    pub target: i64,
    pub suffix: &'static str,
    /// Stagger between counters, in milliseconds.
    pub delay_ms: u64,
}

/// A subscription tier as sold on the pricing page.
#[derive(Debug, Clone)]
pub struct PricingTier {
    pub plan: SubscriptionPlan,
    pub tagline: &'static str,
    /// `None` means the tier is quoted by sales.
    pub monthly: Option<Price>,
    pub features: Vec<&'static str>,
    pub highlighted: bool,
}

/// All static content served by the site.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub games: Vec<Game>,
    pub stats: Vec<Stat>,
    pub tiers: Vec<PricingTier>,
}

impl Catalog {
    /// Look up a game by slug.
    #[must_use]
    pub fn game(&self, slug: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.slug == slug)
    }

    /// Look up a headline stat by key.
    #[must_use]
    pub fn stat(&self, key: &str) -> Option<&Stat> {
        self.stats.iter().find(|s| s.key == key)
    }

    /// Games flagged for the home page.
    pub fn featured(&self) -> impl Iterator<Item = &Game> {
        self.games.iter().filter(|g| g.featured)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            games: default_games(),
            stats: default_stats(),
            tiers: default_tiers(),
        }
    }
}

fn default_games() -> Vec<Game> {
    vec![
        Game {
            slug: "word-sprint",
            title: "Word Sprint",
            summary: "Race the clock to build words from scrambled tiles.",
            category: "Language",
            image_path: "/static/images/games/word-sprint.svg",
            required_plan: PlanRequirement::All,
            is_new: false,
            featured: true,
        },
        Game {
            slug: "fraction-frenzy",
            title: "Fraction Frenzy",
            summary: "Slice pizzas to match fractions before the oven timer rings.",
            category: "Math",
            image_path: "/static/images/games/fraction-frenzy.svg",
            required_plan: PlanRequirement::Plan(SubscriptionPlan::Free),
            is_new: false,
            featured: true,
        },
        Game {
            slug: "planet-hopper",
            title: "Planet Hopper",
            summary: "Navigate the solar system and learn what makes each world unique.",
            category: "Science",
            image_path: "/static/images/games/planet-hopper.svg",
            required_plan: PlanRequirement::Plan(SubscriptionPlan::Premium),
            is_new: true,
            featured: true,
        },
        Game {
            slug: "code-quest",
            title: "Code Quest",
            summary: "Guide a robot through mazes with drag-and-drop programs.",
            category: "Coding",
            image_path: "/static/images/games/code-quest.svg",
            required_plan: PlanRequirement::Plan(SubscriptionPlan::Premium),
            is_new: false,
            featured: true,
        },
        Game {
            slug: "market-mogul",
            title: "Market Mogul",
            summary: "Run a lemonade empire and learn supply, demand and margins.",
            category: "Economics",
            image_path: "/static/images/games/market-mogul.svg",
            required_plan: PlanRequirement::Plan(SubscriptionPlan::Growth),
            is_new: true,
            featured: false,
        },
        Game {
            slug: "team-trivia",
            title: "Team Trivia",
            summary: "Live classroom trivia with leaderboards for up to 40 players.",
            category: "Classroom",
            image_path: "/static/images/games/team-trivia.svg",
            required_plan: PlanRequirement::Plan(SubscriptionPlan::Scale),
            is_new: false,
            featured: false,
        },
        Game {
            slug: "district-challenge",
            title: "District Challenge",
            summary: "Season-long competitions across every school in a district.",
            category: "Classroom",
            image_path: "/static/images/games/district-challenge.svg",
            required_plan: PlanRequirement::Plan(SubscriptionPlan::Enterprise),
            is_new: false,
            featured: false,
        },
    ]
}

fn default_stats() -> Vec<Stat> {
    vec![
        Stat {
            key: "learners",
            label: "Active learners",
            target: 48_500,
            suffix: "+",
            delay_ms: 0,
        },
        Stat {
            key: "games",
            label: "Games played this week",
            target: 312_000,
            suffix: "",
            delay_ms: 150,
        },
        Stat {
            key: "schools",
            label: "Partner schools",
            target: 1_250,
            suffix: "",
            delay_ms: 300,
        },
    ]
}

fn default_tiers() -> Vec<PricingTier> {
    vec![
        PricingTier {
            plan: SubscriptionPlan::Free,
            tagline: "Try the basics",
            monthly: Some(Price::from_cents(0, CurrencyCode::USD)),
            features: vec!["Open games", "Progress saved on one device"],
            highlighted: false,
        },
        PricingTier {
            plan: SubscriptionPlan::Premium,
            tagline: "For curious learners",
            monthly: Some(Price::from_cents(900, CurrencyCode::USD)),
            features: vec![
                "Every premium game",
                "Progress synced everywhere",
                "Ad-free play",
            ],
            highlighted: true,
        },
        PricingTier {
            plan: SubscriptionPlan::Growth,
            tagline: "For families and tutors",
            monthly: Some(Price::from_cents(1900, CurrencyCode::USD)),
            features: vec!["Up to 5 learner profiles", "Business and economics games"],
            highlighted: false,
        },
        PricingTier {
            plan: SubscriptionPlan::Scale,
            tagline: "For classrooms",
            monthly: Some(Price::from_cents(4900, CurrencyCode::USD)),
            features: vec!["Live classroom games", "Teacher dashboard", "40 seats"],
            highlighted: false,
        },
        PricingTier {
            plan: SubscriptionPlan::Enterprise,
            tagline: "For schools and districts",
            monthly: None,
            features: vec!["District competitions", "SSO", "Dedicated support"],
            highlighted: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_are_unique() {
        let catalog = Catalog::default();
        for game in &catalog.games {
            assert_eq!(
                catalog.games.iter().filter(|g| g.slug == game.slug).count(),
                1,
                "duplicate slug {}",
                game.slug
            );
        }
    }

    #[test]
    fn test_every_plan_has_a_tier() {
        let catalog = Catalog::default();
        for plan in SubscriptionPlan::ALL {
            assert!(catalog.tiers.iter().any(|t| t.plan == plan));
        }
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::default();
        assert!(catalog.game("code-quest").is_some());
        assert!(catalog.game("missing").is_none());
        assert_eq!(catalog.stat("schools").map(|s| s.target), Some(1_250));
        assert_eq!(catalog.featured().count(), 4);
    }

    #[test]
    fn test_featured_follows_flag() {
        let mut catalog = Catalog::default();
        for game in &mut catalog.games {
            game.featured = game.slug == "market-mogul";
        }
        let slugs: Vec<&str> = catalog.featured().map(|g| g.slug).collect();
        assert_eq!(slugs, ["market-mogul"]);
    }
}
