//! Unit tests for the correlation rule table

use mindmetrics::insights::{classify_correlation, TrendStrength};

#[test]
fn strong_bands_start_at_the_boundary() {
    assert_eq!(classify_correlation(0.75).strength, TrendStrength::StrongPositive);
    assert_eq!(classify_correlation(0.7).strength, TrendStrength::StrongPositive);
    assert_eq!(classify_correlation(-0.7).strength, TrendStrength::StrongNegative);
    assert_eq!(classify_correlation(-0.9).strength, TrendStrength::StrongNegative);
}

#[test]
fn moderate_bands_start_at_the_boundary() {
    assert_eq!(classify_correlation(0.3).strength, TrendStrength::ModeratePositive);
    assert_eq!(classify_correlation(0.69).strength, TrendStrength::ModeratePositive);
    assert_eq!(classify_correlation(-0.3).strength, TrendStrength::ModerateNegative);
    assert_eq!(classify_correlation(-0.5).strength, TrendStrength::ModerateNegative);
}

#[test]
fn weak_correlations_have_no_clear_trend() {
    assert_eq!(classify_correlation(0.29).strength, TrendStrength::NoClearTrend);
    assert_eq!(classify_correlation(0.0).strength, TrendStrength::NoClearTrend);
    assert_eq!(classify_correlation(-0.29).strength, TrendStrength::NoClearTrend);
}

#[test]
fn rendered_statement_embeds_fields_and_coefficient() {
    let rule = classify_correlation(0.75);
    let statement = rule.render("age", "compensation", 0.75);
    assert_eq!(
        statement,
        "There is a strong positive trend between age and compensation (correlation 0.75)."
    );
}
