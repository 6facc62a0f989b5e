//! View models for the reusable page components.
//!
//! Each component pairs a struct here with an Askama partial under
//! `templates/partials/`. Structs hold display-ready values so the partials
//! stay free of logic.

pub mod footer;
pub mod game_tile;
pub mod layout;
pub mod pricing_card;
pub mod stat_counter;

pub use footer::{FooterColumn, FooterLink, FooterView};
pub use game_tile::GameTileView;
pub use layout::{NavUser, PageLayout};
pub use pricing_card::PricingCardView;
pub use stat_counter::StatCounterView;
