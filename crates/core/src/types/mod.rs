//! Core types for Questline.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod plan;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use plan::{PlanError, PlanRequirement, SubscriptionPlan};
pub use price::{CurrencyCode, Price};
