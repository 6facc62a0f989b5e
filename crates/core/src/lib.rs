//! Questline Core - Shared types and logic.
//!
//! This crate holds everything the web server needs that does not touch I/O:
//!
//! - [`types`] - Subscription plans, plan requirements, prices, ids and emails
//! - [`gate`] - Plan gating decisions (who may play which game)
//! - [`counter`] - The eased counter state machine behind animated stats
//!
//! No HTTP, no sessions, no clocks of its own. Callers pass `Instant`s in.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod counter;
pub mod gate;
pub mod types;

pub use types::*;
