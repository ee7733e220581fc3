//! Spark Application Orchestration Layer
//!
//! This crate contains business logic use cases and their wiring over ports.

pub mod app;
pub mod app_paths;
pub mod deps;
pub mod usecases;

pub use app::App;
pub use deps::AppDeps;
