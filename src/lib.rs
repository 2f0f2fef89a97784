//! Survey analytics engine: filter, aggregate, score, and narrate two
//! survey datasets (mental health in tech, developer careers) behind a
//! small HTTP API.
//!
//! The pipeline is Dataset -> filter -> (aggregate | index) ->
//! insights; every stage is a pure function of its inputs and datasets
//! are immutable after load.

pub mod analysis;
pub mod config;
pub mod core;
pub mod export;
pub mod filters;
pub mod insights;
pub mod loader;
pub mod logging;
pub mod models;
