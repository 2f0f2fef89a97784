//! Filter engine: composable per-field predicates over a dataset.

pub mod age;
pub mod spec;

pub use age::{derive_age_groups, AgeBucket};
pub use spec::{apply, Constraint, FilterSpec};
