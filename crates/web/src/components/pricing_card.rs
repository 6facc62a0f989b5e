//! Pricing card component.

use questline_core::SubscriptionPlan;

use crate::catalog::PricingTier;

/// Display data for one pricing card.
#[derive(Debug, Clone)]
pub struct PricingCardView {
    /// Machine name used in the subscribe URL.
    pub plan: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
    /// "$9.00", "Free" or "Contact sales".
    pub price_label: String,
    /// Show the "/month" suffix.
    pub per_month: bool,
    pub features: Vec<&'static str>,
    pub highlighted: bool,
    pub is_current: bool,
    pub cta_label: &'static str,
}

impl PricingCardView {
    /// Build a card for `tier`.
    ///
    /// `current` is the viewer's plan, if signed in. `focus` is the plan the
    /// visitor was sent here for; when set it takes the highlight.
    #[must_use]
    pub fn new(
        tier: &PricingTier,
        current: Option<SubscriptionPlan>,
        focus: Option<SubscriptionPlan>,
    ) -> Self {
        let (price_label, per_month) = match &tier.monthly {
            Some(price) if price.is_free() => ("Free".to_string(), false),
            Some(price) => (price.display(), true),
            None => ("Contact sales".to_string(), false),
        };

        let is_current = current == Some(tier.plan);
        let cta_label = match current {
            Some(plan) if plan == tier.plan => "Current plan",
            Some(plan) if plan > tier.plan => "Switch plan",
            _ if tier.monthly.is_none() => "Talk to us",
            _ if tier.plan.is_paid() => "Upgrade",
            _ => "Get started",
        };

        Self {
            plan: tier.plan.as_str(),
            name: tier.plan.display_name(),
            tagline: tier.tagline,
            price_label,
            per_month,
            features: tier.features.clone(),
            highlighted: focus.map_or(tier.highlighted, |plan| plan == tier.plan),
            is_current,
            cta_label,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn card(
        plan: SubscriptionPlan,
        current: Option<SubscriptionPlan>,
        focus: Option<SubscriptionPlan>,
    ) -> PricingCardView {
        let catalog = Catalog::default();
        let tier = catalog.tiers.iter().find(|t| t.plan == plan).unwrap();
        PricingCardView::new(tier, current, focus)
    }

    #[test]
    fn test_price_labels() {
        assert_eq!(card(SubscriptionPlan::Free, None, None).price_label, "Free");
        let premium = card(SubscriptionPlan::Premium, None, None);
        assert_eq!(premium.price_label, "$9.00");
        assert!(premium.per_month);
        assert_eq!(
            card(SubscriptionPlan::Enterprise, None, None).price_label,
            "Contact sales"
        );
    }

    #[test]
    fn test_current_plan_marker() {
        let view = card(SubscriptionPlan::Growth, Some(SubscriptionPlan::Growth), None);
        assert!(view.is_current);
        assert_eq!(view.cta_label, "Current plan");

        let view = card(SubscriptionPlan::Premium, Some(SubscriptionPlan::Growth), None);
        assert_eq!(view.cta_label, "Switch plan");

        let view = card(SubscriptionPlan::Scale, Some(SubscriptionPlan::Growth), None);
        assert_eq!(view.cta_label, "Upgrade");
    }

    #[test]
    fn test_focus_moves_highlight() {
        assert!(card(SubscriptionPlan::Premium, None, None).highlighted);
        assert!(!card(SubscriptionPlan::Premium, None, Some(SubscriptionPlan::Scale)).highlighted);
        assert!(card(SubscriptionPlan::Scale, None, Some(SubscriptionPlan::Scale)).highlighted);
    }
}
