//! Process start-up: configuration, logging and adapter wiring.

pub mod config;
pub mod tracing;
pub mod wiring;
