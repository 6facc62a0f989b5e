//! Background services.

pub mod counter;

pub use counter::{CounterFrame, CounterHandle, spawn_counter};
