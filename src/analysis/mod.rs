//! Statistical aggregation, correlation, outlier trimming, and
//! composite indices over filtered survey datasets.

pub mod aggregate;
pub mod correlation;
pub mod index;
pub mod outliers;

pub use aggregate::{
    aggregate, rate_of_any, summarize_groups, AggregateOp, AggregationResult, GroupStats,
    GroupSummary,
};
pub use correlation::column_correlation;
pub use index::{
    build_index, build_index_with_fallback, CompositeIndex, IndexComponent, IndexFormula,
    IndexScore,
};
pub use outliers::{trim_field_for_display, trim_for_display};

use serde::{Deserialize, Serialize};

/// Tagged analysis outcome.
///
/// Callers branch on the tag instead of re-checking column presence.
/// `DemoFallback` carries deterministic placeholder data for demo
/// deployments and is never blended with `Computed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum Computation<T> {
    Computed(T),
    DemoFallback(T),
    Unavailable { missing: Vec<String> },
}

impl<T> Computation<T> {
    /// The real result, when one was computed. Demo fallback data is
    /// deliberately not surfaced here.
    pub fn ok(&self) -> Option<&T> {
        match self {
            Computation::Computed(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_ok(self) -> Option<T> {
        match self {
            Computation::Computed(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Computation::Unavailable { .. })
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Computation::DemoFallback(_))
    }
}
