//! Spark: search grocery listings across stores and keep a shopping list.

pub mod bootstrap;
pub mod cli;
