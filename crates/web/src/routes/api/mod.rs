//! JSON and streaming API handlers.

pub mod counters;
