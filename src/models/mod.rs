//! Shared data models spanning the pipeline layers.

pub mod columns;
pub mod dataset;
pub mod group;
pub mod record;

pub use dataset::Dataset;
pub use group::GroupKey;
pub use record::{FieldValue, Record};
