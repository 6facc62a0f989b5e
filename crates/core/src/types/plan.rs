//! Subscription plans and plan requirements.
//!
//! Plans form a closed, totally ordered set. The ordering is carried by the
//! enum discriminant, so comparing two plans is an integer comparison and a
//! plan outside the known set cannot be constructed.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`SubscriptionPlan`] or [`PlanRequirement`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The input does not name a known plan.
    #[error("unknown subscription plan: {0}")]
    Unknown(String),
}

/// A subscription tier, in ascending order of capability.
///
/// ```
/// use questline_core::SubscriptionPlan;
///
/// assert!(SubscriptionPlan::Enterprise > SubscriptionPlan::Growth);
/// assert_eq!(SubscriptionPlan::Scale.rank(), 3);
/// assert!("platinum".parse::<SubscriptionPlan>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SubscriptionPlan {
    #[default]
    Free = 0,
    Premium = 1,
    Growth = 2,
    Scale = 3,
    Enterprise = 4,
}

impl SubscriptionPlan {
    /// Every plan, lowest tier first.
    pub const ALL: [Self; 5] = [
        Self::Free,
        Self::Premium,
        Self::Growth,
        Self::Scale,
        Self::Enterprise,
    ];

    /// Position of this plan in the tier order (0 for `Free`).
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Returns true for every tier above `Free`.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        !matches!(self, Self::Free)
    }

    /// Machine name, as used in URLs and serialized data.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Premium => "premium",
            Self::Growth => "growth",
            Self::Scale => "scale",
            Self::Enterprise => "enterprise",
        }
    }

    /// Human-readable name for badges and pricing cards.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Premium => "Premium",
            Self::Growth => "Growth",
            Self::Scale => "Scale",
            Self::Enterprise => "Enterprise",
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionPlan {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|plan| plan.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PlanError::Unknown(s.to_owned()))
    }
}

/// The plan a resource demands before it can be used.
///
/// `All` means the resource is unrestricted, even for anonymous visitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum PlanRequirement {
    #[default]
    All,
    Plan(SubscriptionPlan),
}

impl PlanRequirement {
    /// The required plan, or `None` when unrestricted.
    #[must_use]
    pub const fn plan(self) -> Option<SubscriptionPlan> {
        match self {
            Self::All => None,
            Self::Plan(plan) => Some(plan),
        }
    }

    /// Machine name: `"all"` or the plan name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Plan(plan) => plan.as_str(),
        }
    }
}

impl From<SubscriptionPlan> for PlanRequirement {
    fn from(plan: SubscriptionPlan) -> Self {
        Self::Plan(plan)
    }
}

impl fmt::Display for PlanRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanRequirement {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Plan)
    }
}

impl TryFrom<String> for PlanRequirement {
    type Error = PlanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlanRequirement> for String {
    fn from(requirement: PlanRequirement) -> Self {
        requirement.as_str().to_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_ascending() {
        let ranks: Vec<u8> = SubscriptionPlan::ALL.iter().map(|p| p.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4]);
        assert!(SubscriptionPlan::Free < SubscriptionPlan::Premium);
        assert!(SubscriptionPlan::Scale < SubscriptionPlan::Enterprise);
    }

    #[test]
    fn test_is_paid() {
        assert!(!SubscriptionPlan::Free.is_paid());
        assert!(SubscriptionPlan::Premium.is_paid());
        assert!(SubscriptionPlan::Enterprise.is_paid());
    }

    #[test]
    fn test_parse_known_plans() {
        for plan in SubscriptionPlan::ALL {
            assert_eq!(plan.as_str().parse::<SubscriptionPlan>().unwrap(), plan);
        }
        assert_eq!(
            "Growth".parse::<SubscriptionPlan>().unwrap(),
            SubscriptionPlan::Growth
        );
    }

    #[test]
    fn test_parse_unknown_plan() {
        assert_eq!(
            "platinum".parse::<SubscriptionPlan>(),
            Err(PlanError::Unknown("platinum".to_string()))
        );
        assert!("".parse::<SubscriptionPlan>().is_err());
    }

    #[test]
    fn test_default_plan_is_free() {
        assert_eq!(SubscriptionPlan::default(), SubscriptionPlan::Free);
    }

    #[test]
    fn test_plan_serializes_lowercase() {
        let json = serde_json::to_string(&SubscriptionPlan::Scale).unwrap();
        assert_eq!(json, "\"scale\"");
        assert!(serde_json::from_str::<SubscriptionPlan>("\"gold\"").is_err());
    }

    #[test]
    fn test_requirement_parse() {
        assert_eq!(
            "all".parse::<PlanRequirement>().unwrap(),
            PlanRequirement::All
        );
        assert_eq!(
            "premium".parse::<PlanRequirement>().unwrap(),
            PlanRequirement::Plan(SubscriptionPlan::Premium)
        );
        assert!("nobody".parse::<PlanRequirement>().is_err());
    }

    #[test]
    fn test_requirement_serde() {
        let json = serde_json::to_string(&PlanRequirement::All).unwrap();
        assert_eq!(json, "\"all\"");

        let parsed: PlanRequirement = serde_json::from_str("\"enterprise\"").unwrap();
        assert_eq!(parsed.plan(), Some(SubscriptionPlan::Enterprise));

        assert!(serde_json::from_str::<PlanRequirement>("\"vip\"").is_err());
    }
}
