//! Strongly-typed insight rule tables.
//!
//! Thresholds and templates live in data so the evaluation priority
//! can be tested directly instead of hiding in conditionals.

use serde::{Deserialize, Serialize};

pub const STRONG_CORRELATION: f64 = 0.7;
pub const MODERATE_CORRELATION: f64 = 0.3;

/// Group-mean variance above this reads as "high variance".
pub const HIGH_VARIANCE_THRESHOLD: f64 = 1.0;

/// Ranking insights report at most this many groups per direction.
pub const RANKING_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStrength {
    StrongPositive,
    ModeratePositive,
    ModerateNegative,
    StrongNegative,
    NoClearTrend,
}

/// One row of the correlation rule table.
pub struct CorrelationRule {
    pub strength: TrendStrength,
    pub applies: fn(f64) -> bool,
    /// Template with `{x}`, `{y}` and `{r}` placeholders.
    pub template: &'static str,
}

impl CorrelationRule {
    pub fn render(&self, x: &str, y: &str, r: f64) -> String {
        self.template
            .replace("{x}", x)
            .replace("{y}", y)
            .replace("{r}", &format!("{r:.2}"))
    }
}

fn strong_positive(r: f64) -> bool {
    r >= STRONG_CORRELATION
}

fn strong_negative(r: f64) -> bool {
    r <= -STRONG_CORRELATION
}

fn moderate_positive(r: f64) -> bool {
    r >= MODERATE_CORRELATION
}

fn moderate_negative(r: f64) -> bool {
    r <= -MODERATE_CORRELATION
}

fn always(_: f64) -> bool {
    true
}

/// Priority-ordered: the first matching rule wins, so boundary values
/// (|r| = 0.3 or 0.7) land in the higher-magnitude band.
pub const CORRELATION_RULES: &[CorrelationRule] = &[
    CorrelationRule {
        strength: TrendStrength::StrongPositive,
        applies: strong_positive,
        template: "There is a strong positive trend between {x} and {y} (correlation {r}).",
    },
    CorrelationRule {
        strength: TrendStrength::StrongNegative,
        applies: strong_negative,
        template: "There is a strong negative trend between {x} and {y} (correlation {r}).",
    },
    CorrelationRule {
        strength: TrendStrength::ModeratePositive,
        applies: moderate_positive,
        template: "There is a moderate positive trend between {x} and {y} (correlation {r}).",
    },
    CorrelationRule {
        strength: TrendStrength::ModerateNegative,
        applies: moderate_negative,
        template: "There is a moderate negative trend between {x} and {y} (correlation {r}).",
    },
    CorrelationRule {
        strength: TrendStrength::NoClearTrend,
        applies: always,
        template: "There is no clear linear trend between {x} and {y} (correlation {r}).",
    },
];

/// First matching rule in priority order. The table ends with a
/// catch-all, so every finite r classifies.
pub fn classify_correlation(r: f64) -> &'static CorrelationRule {
    CORRELATION_RULES
        .iter()
        .find(|rule| (rule.applies)(r))
        .unwrap_or(&CORRELATION_RULES[CORRELATION_RULES.len() - 1])
}
