//! Plan gating: decide whether a visitor may use a plan-restricted resource.
//!
//! Everything here is a pure function of its inputs. The web layer reads the
//! login flag and plan from the session on every request and acts on the
//! returned [`GateOutcome`] (redirects and notifications live there).

use serde::Serialize;

use crate::types::{PlanRequirement, SubscriptionPlan};

/// Returns true for every paid tier (premium and above).
#[must_use]
pub const fn is_paid_plan(plan: SubscriptionPlan) -> bool {
    plan.is_paid()
}

/// Returns true when `user_plan` meets `required`.
///
/// `All` and `Free` requirements are met by everyone. Otherwise the user's
/// tier must rank at or above the required tier.
///
/// ```
/// use questline_core::gate::satisfies;
/// use questline_core::{PlanRequirement, SubscriptionPlan};
///
/// assert!(satisfies(SubscriptionPlan::Enterprise, SubscriptionPlan::Growth.into()));
/// assert!(!satisfies(SubscriptionPlan::Growth, SubscriptionPlan::Scale.into()));
/// assert!(satisfies(SubscriptionPlan::Free, PlanRequirement::All));
/// ```
#[must_use]
pub const fn satisfies(user_plan: SubscriptionPlan, required: PlanRequirement) -> bool {
    match required {
        PlanRequirement::All | PlanRequirement::Plan(SubscriptionPlan::Free) => true,
        PlanRequirement::Plan(plan) => user_plan.rank() >= plan.rank(),
    }
}

/// Result of evaluating a plan gate for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    /// The visitor is signed in.
    pub authenticated: bool,
    /// The visitor's plan meets the requirement.
    pub authorized: bool,
    /// Signed in but on a plan that is too low.
    pub needs_upgrade: bool,
}

/// What the caller should do with an [`AccessDecision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Render the resource.
    Allow,
    /// Record the return path and send the visitor to sign in.
    SignIn,
    /// Send the signed-in user to pick a higher plan.
    Upgrade,
}

impl AccessDecision {
    /// Map the decision to the action the caller should take.
    ///
    /// A visitor who is not signed in is always sent to sign in first, even
    /// when their (absent) plan would satisfy the requirement.
    #[must_use]
    pub const fn outcome(self) -> GateOutcome {
        if !self.authenticated {
            GateOutcome::SignIn
        } else if self.needs_upgrade {
            GateOutcome::Upgrade
        } else {
            GateOutcome::Allow
        }
    }
}

/// Evaluate the gate for a visitor.
///
/// `user_plan` is the effective plan (a user without a plan counts as `Free`).
#[must_use]
pub const fn decide_access(
    is_logged_in: bool,
    user_plan: SubscriptionPlan,
    required: PlanRequirement,
) -> AccessDecision {
    let authorized = matches!(required, PlanRequirement::All) || satisfies(user_plan, required);

    AccessDecision {
        authenticated: is_logged_in,
        authorized,
        needs_upgrade: is_logged_in && !authorized,
    }
}

/// Decide what to do with a request for a resource requiring `required`.
///
/// `All` resources are public and skip the sign-in check entirely. Any
/// concrete plan, `Free` included, needs a signed-in user.
#[must_use]
pub const fn guard(
    is_logged_in: bool,
    user_plan: SubscriptionPlan,
    required: PlanRequirement,
) -> GateOutcome {
    if matches!(required, PlanRequirement::All) {
        return GateOutcome::Allow;
    }
    decide_access(is_logged_in, user_plan, required).outcome()
}

/// Whether a tile for `required` should render with a lock for this visitor.
///
/// Any paid requirement the visitor's plan does not meet is locked, so a
/// premium user sees growth, scale and enterprise games locked.
#[must_use]
pub const fn is_locked(user_plan: Option<SubscriptionPlan>, required: PlanRequirement) -> bool {
    match required {
        PlanRequirement::All | PlanRequirement::Plan(SubscriptionPlan::Free) => false,
        PlanRequirement::Plan(_) => match user_plan {
            Some(plan) => !satisfies(plan, required),
            None => true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use SubscriptionPlan::{Enterprise, Free, Growth, Premium, Scale};

    fn req(plan: SubscriptionPlan) -> PlanRequirement {
        PlanRequirement::Plan(plan)
    }

    #[test]
    fn test_all_requirement_always_satisfied() {
        for plan in SubscriptionPlan::ALL {
            assert!(satisfies(plan, PlanRequirement::All));
        }
    }

    #[test]
    fn test_free_requirement_always_satisfied() {
        for plan in SubscriptionPlan::ALL {
            assert!(satisfies(plan, req(Free)));
        }
    }

    #[test]
    fn test_tier_comparisons() {
        assert!(!satisfies(Free, req(Premium)));
        assert!(satisfies(Premium, req(Premium)));
        assert!(satisfies(Enterprise, req(Growth)));
        assert!(!satisfies(Growth, req(Scale)));
        assert!(satisfies(Scale, req(Scale)));
    }

    #[test]
    fn test_satisfies_matches_rank_order() {
        for user in SubscriptionPlan::ALL {
            for required in SubscriptionPlan::ALL {
                assert_eq!(satisfies(user, req(required)), user >= required);
            }
        }
    }

    #[test]
    fn test_satisfies_is_repeatable() {
        let first = satisfies(Growth, req(Scale));
        for _ in 0..100 {
            assert_eq!(satisfies(Growth, req(Scale)), first);
        }
    }

    #[test]
    fn test_is_paid_plan() {
        assert!(!is_paid_plan(Free));
        for plan in [Premium, Growth, Scale, Enterprise] {
            assert!(is_paid_plan(plan));
        }
    }

    #[test]
    fn test_decide_access_anonymous() {
        assert_eq!(
            decide_access(false, Free, req(Growth)),
            AccessDecision {
                authenticated: false,
                authorized: false,
                needs_upgrade: false,
            }
        );
    }

    #[test]
    fn test_decide_access_needs_upgrade() {
        assert_eq!(
            decide_access(true, Free, req(Growth)),
            AccessDecision {
                authenticated: true,
                authorized: false,
                needs_upgrade: true,
            }
        );
    }

    #[test]
    fn test_decide_access_unrestricted() {
        let decision = decide_access(false, Free, PlanRequirement::All);
        assert!(decision.authorized);
        assert!(!decision.needs_upgrade);
    }

    #[test]
    fn test_outcomes() {
        assert_eq!(
            decide_access(false, Free, req(Premium)).outcome(),
            GateOutcome::SignIn
        );
        assert_eq!(
            decide_access(false, Free, req(Free)).outcome(),
            GateOutcome::SignIn
        );
        assert_eq!(
            decide_access(true, Premium, req(Scale)).outcome(),
            GateOutcome::Upgrade
        );
        assert_eq!(
            decide_access(true, Enterprise, req(Scale)).outcome(),
            GateOutcome::Allow
        );
    }

    #[test]
    fn test_guard() {
        assert_eq!(guard(false, Free, PlanRequirement::All), GateOutcome::Allow);
        assert_eq!(guard(false, Free, req(Free)), GateOutcome::SignIn);
        assert_eq!(guard(true, Free, req(Free)), GateOutcome::Allow);
        assert_eq!(guard(true, Growth, req(Scale)), GateOutcome::Upgrade);
        assert_eq!(guard(true, Scale, req(Scale)), GateOutcome::Allow);
    }

    #[test]
    fn test_is_locked() {
        assert!(!is_locked(None, PlanRequirement::All));
        assert!(!is_locked(None, req(Free)));
        assert!(is_locked(None, req(Premium)));
        assert!(is_locked(Some(Free), req(Premium)));
        assert!(!is_locked(Some(Premium), req(Premium)));
        assert!(is_locked(Some(Premium), req(Growth)));
        assert!(!is_locked(Some(Enterprise), req(Scale)));
    }
}
