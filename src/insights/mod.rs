//! Insight generation interfaces.

pub mod generator;
pub mod rules;

pub use generator::{
    comparison_insights, format_insights, survey_insights, trend_insights, INSUFFICIENT_DATA,
};
pub use rules::{classify_correlation, CorrelationRule, TrendStrength};
