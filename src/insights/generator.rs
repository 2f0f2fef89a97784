//! Templated natural-language insight generation.
//!
//! Stateless rule evaluation in a fixed priority order. Every
//! statement embeds the literal numbers it asserts, so the claims can
//! be re-derived from the same aggregation. Missing columns or an
//! empty dataset yield a single sentinel message; internal computation
//! failures become a descriptive error string at this boundary and are
//! never propagated.

use super::rules::{classify_correlation, HIGH_VARIANCE_THRESHOLD, RANKING_DEPTH};
use crate::analysis::aggregate::{self, AggregateOp};
use crate::analysis::{correlation, Computation};
use crate::filters::{self, FilterSpec};
use crate::models::{columns, Dataset};
use std::collections::HashMap;
use thiserror::Error;

pub const INSUFFICIENT_DATA: &str = "Insufficient data to generate insights.";
pub const INSUFFICIENT_COMPARISON_DATA: &str =
    "Insufficient data to generate comparison insights.";

#[derive(Debug, Error)]
enum InsightError {
    #[error("{0}")]
    Computation(String),
}

fn finite(value: f64, what: &str) -> Result<f64, InsightError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InsightError::Computation(format!(
            "non-finite {what} while formatting insight"
        )))
    }
}

/// Insights about a metric column, optionally across groups and
/// against a numeric x column.
pub fn trend_insights(
    dataset: &Dataset,
    x_field: &str,
    y_field: &str,
    group_field: Option<&str>,
) -> Vec<String> {
    match try_trend_insights(dataset, x_field, y_field, group_field) {
        Ok(insights) => insights,
        Err(reason) => vec![format!("Error generating insights: {reason}")],
    }
}

fn try_trend_insights(
    dataset: &Dataset,
    x_field: &str,
    y_field: &str,
    group_field: Option<&str>,
) -> Result<Vec<String>, InsightError> {
    if dataset.is_empty() || !dataset.has_column(x_field) || !dataset.has_column(y_field) {
        return Ok(vec![INSUFFICIENT_DATA.to_string()]);
    }

    let mut insights = Vec::new();

    let y_values = dataset.numeric_values(y_field);
    if let Some(mean) = aggregate::mean(&y_values) {
        let mean = finite(mean, "mean")?;
        insights.push(format!("The average {y_field} is {mean:.2}."));

        let max = y_values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = y_values.iter().cloned().fold(f64::INFINITY, f64::min);
        insights.push(format!(
            "The highest {y_field} is {max:.2}, while the lowest is {min:.2}.",
            max = finite(max, "maximum")?,
            min = finite(min, "minimum")?,
        ));
    }

    if let Some(group_field) = group_field {
        if dataset.has_column(group_field) {
            if let Computation::Computed(means) =
                aggregate::aggregate(dataset, &[group_field], y_field, &AggregateOp::Mean)
            {
                let top = means.top_n(1);
                let bottom = means.bottom_n(1);
                if let (Some((top_key, top_mean)), Some((bottom_key, bottom_mean))) =
                    (top.first(), bottom.first())
                {
                    insights.push(format!(
                        "{top_key} has the highest average {y_field} at {:.2}.",
                        finite(*top_mean, "group mean")?
                    ));
                    insights.push(format!(
                        "{bottom_key} has the lowest average {y_field} at {:.2}.",
                        finite(*bottom_mean, "group mean")?
                    ));
                    let diff_pct =
                        finite((top_mean - bottom_mean) / bottom_mean * 100.0, "difference")?;
                    insights.push(format!(
                        "The difference between the highest and lowest group is {diff_pct:.1}%."
                    ));
                }
            }
        }
    }

    if let Some(r) = correlation::column_correlation(dataset, x_field, y_field) {
        let r = finite(r, "correlation")?;
        insights.push(classify_correlation(r).render(x_field, y_field, r));
    }

    if insights.is_empty() {
        insights.push(INSUFFICIENT_DATA.to_string());
    }
    Ok(insights)
}

/// Top/bottom ranking of categories by the mean of a value column.
pub fn comparison_insights(
    dataset: &Dataset,
    category_field: &str,
    value_field: &str,
) -> Vec<String> {
    match try_comparison_insights(dataset, category_field, value_field) {
        Ok(insights) => insights,
        Err(reason) => vec![format!("Error generating comparison insights: {reason}")],
    }
}

fn try_comparison_insights(
    dataset: &Dataset,
    category_field: &str,
    value_field: &str,
) -> Result<Vec<String>, InsightError> {
    if dataset.is_empty()
        || !dataset.has_column(category_field)
        || !dataset.has_column(value_field)
    {
        return Ok(vec![INSUFFICIENT_COMPARISON_DATA.to_string()]);
    }

    let means = match aggregate::aggregate(dataset, &[category_field], value_field, &AggregateOp::Mean)
    {
        Computation::Computed(result) => result,
        _ => return Ok(vec![INSUFFICIENT_COMPARISON_DATA.to_string()]),
    };

    let top = means.top_n(RANKING_DEPTH);
    if top.is_empty() {
        return Ok(vec![INSUFFICIENT_COMPARISON_DATA.to_string()]);
    }

    let mut insights = Vec::new();
    insights.push("Top performing categories:".to_string());
    for (key, value) in top.iter().copied() {
        let count = means.get(key).map(|s| s.count).unwrap_or(0);
        insights.push(format!(
            "- {key}: {:.2} (based on {count} data points)",
            finite(value, "category mean")?
        ));
    }

    insights.push("Categories with lowest performance:".to_string());
    for (key, value) in means.bottom_n(RANKING_DEPTH) {
        let count = means.get(key).map(|s| s.count).unwrap_or(0);
        insights.push(format!(
            "- {key}: {:.2} (based on {count} data points)",
            finite(value, "category mean")?
        ));
    }

    if let Some(overall) = aggregate::mean(&dataset.numeric_values(value_field)) {
        insights.push(format!(
            "The overall average across all categories is {:.2}.",
            finite(overall, "overall mean")?
        ));
    }

    let group_means: Vec<f64> = means.iter().filter_map(|(_, s)| s.value).collect();
    if let Some(variance) = aggregate::sample_variance(&group_means) {
        let variance = finite(variance, "variance")?;
        if variance > HIGH_VARIANCE_THRESHOLD {
            insights.push(format!(
                "There is high variance between categories ({variance:.2}), suggesting significant differences."
            ));
        } else {
            insights.push(format!(
                "There is relatively low variance between categories ({variance:.2})."
            ));
        }
    }

    Ok(insights)
}

/// The survey-specific battery over both datasets. Each rule is
/// guarded by column presence and skipped, not failed, when its
/// columns are absent.
pub fn survey_insights(mental_health: &Dataset, career: &Dataset) -> Vec<String> {
    match try_survey_insights(mental_health, career) {
        Ok(insights) => insights,
        Err(reason) => vec![format!("Error generating mental health insights: {reason}")],
    }
}

fn try_survey_insights(
    mental_health: &Dataset,
    career: &Dataset,
) -> Result<Vec<String>, InsightError> {
    if mental_health.is_empty() && career.is_empty() {
        return Ok(vec![INSUFFICIENT_DATA.to_string()]);
    }

    let mut insights = Vec::new();

    if let Some(rate) = overall_rate(mental_health, columns::TREATMENT, &["Yes"]) {
        insights.push(format!(
            "{:.1}% of tech professionals have sought treatment for mental health issues.",
            finite(rate, "treatment rate")?
        ));
    }

    if let Some(rate) = overall_rate(
        mental_health,
        columns::WORK_INTERFERE,
        &["Often", "Sometimes"],
    ) {
        insights.push(format!(
            "{:.1}% report that mental health issues interfere with work sometimes or often.",
            finite(rate, "interference rate")?
        ));
    }

    if let Computation::Computed(by_size) = aggregate::rate_of_any(
        mental_health,
        &[columns::NO_EMPLOYEES],
        columns::MENTAL_HEALTH_CONSEQUENCE,
        &["Yes"],
    ) {
        if let Some((best, rate)) = by_size.bottom_n(1).first() {
            insights.push(format!(
                "Companies with {best} employees have the lowest rate of negative mental health consequences ({:.1}%).",
                finite(*rate, "consequence rate")?
            ));
        }
        if let Some((worst, rate)) = by_size.top_n(1).first() {
            insights.push(format!(
                "Companies with {worst} employees have the highest rate of negative mental health consequences ({:.1}%).",
                finite(*rate, "consequence rate")?
            ));
        }
    }

    if mental_health.has_column(columns::REMOTE_WORK)
        && mental_health.has_column(columns::WORK_INTERFERE)
    {
        let remote = filters::apply(
            mental_health,
            &FilterSpec::new().with_one_of(columns::REMOTE_WORK, ["Yes"]),
        );
        let on_site = filters::apply(
            mental_health,
            &FilterSpec::new().with_one_of(columns::REMOTE_WORK, ["No"]),
        );
        if !remote.is_empty() && !on_site.is_empty() {
            let remote_rate =
                overall_rate(&remote, columns::WORK_INTERFERE, &["Often", "Sometimes"])
                    .unwrap_or(0.0);
            let on_site_rate =
                overall_rate(&on_site, columns::WORK_INTERFERE, &["Often", "Sometimes"])
                    .unwrap_or(0.0);
            if remote_rate < on_site_rate {
                insights.push(format!(
                    "Remote workers report {:.1}% less work interference from mental health issues compared to non-remote workers.",
                    finite(on_site_rate - remote_rate, "interference difference")?
                ));
            } else {
                insights.push(format!(
                    "Remote workers report {:.1}% more work interference from mental health issues compared to non-remote workers.",
                    finite(remote_rate - on_site_rate, "interference difference")?
                ));
            }
        }
    }

    if let Computation::Computed(by_role) = aggregate::rate_of_any(
        career,
        &[columns::DEV_TYPE],
        columns::MENTAL_HEALTH,
        &["Poor", "Fair"],
    ) {
        if let Some((best, rate)) = by_role.bottom_n(1).first() {
            insights.push(format!(
                "{best}s report the lowest rates of poor mental health ({:.1}%).",
                finite(*rate, "poor mental health rate")?
            ));
        }
        if let Some((worst, rate)) = by_role.top_n(1).first() {
            insights.push(format!(
                "{worst}s report the highest rates of poor mental health ({:.1}%).",
                finite(*rate, "poor mental health rate")?
            ));
        }
    }

    if let Some((level, ratio)) = satisfaction_ratio(career) {
        insights.push(format!(
            "Professionals who are '{level}' with their jobs report the highest ratio of excellent to poor mental health ({:.2}).",
            finite(ratio, "satisfaction ratio")?
        ));
    }

    if insights.is_empty() {
        insights.push(INSUFFICIENT_DATA.to_string());
    }
    Ok(insights)
}

/// Whole-dataset rate of membership in a value set, or `None` when the
/// column is absent or the dataset is empty.
fn overall_rate(dataset: &Dataset, field: &str, targets: &[&str]) -> Option<f64> {
    if dataset.is_empty() || !dataset.has_column(field) {
        return None;
    }
    let rates = aggregate::rate_of_any(dataset, &[], field, targets).into_ok()?;
    let rate = rates.iter().next().and_then(|(_, stats)| stats.value);
    rate
}

/// Job-satisfaction level with the highest excellent-to-poor mental
/// health ratio. Levels with no "Poor" answers are skipped to keep the
/// ratio finite.
fn satisfaction_ratio(career: &Dataset) -> Option<(String, f64)> {
    if !career.has_column(columns::JOB_SATISFACTION) || !career.has_column(columns::MENTAL_HEALTH)
    {
        return None;
    }

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for record in career.records() {
        let level = record.value(columns::JOB_SATISFACTION);
        if level.is_unknown() {
            continue;
        }
        let level = level.group_label();
        let entry = counts.entry(level.clone()).or_insert_with(|| {
            order.push(level);
            (0, 0)
        });
        match record.value(columns::MENTAL_HEALTH).as_text() {
            Some("Excellent") => entry.0 += 1,
            Some("Poor") => entry.1 += 1,
            _ => {}
        }
    }

    let mut best: Option<(String, f64)> = None;
    for level in order {
        let (excellent, poor) = counts[&level];
        if poor == 0 {
            continue;
        }
        let ratio = excellent as f64 / poor as f64;
        if best.as_ref().is_none_or(|(_, b)| ratio > *b) {
            best = Some((level, ratio));
        }
    }
    best
}

/// Markdown rendering of an insight list for direct text display.
pub fn format_insights(insights: &[String]) -> String {
    if insights.is_empty() {
        return "No insights available.".to_string();
    }

    let mut text = String::from("## Key Insights\n\n");
    let mut number = 1;
    for insight in insights {
        if insight.starts_with('-') {
            text.push_str(insight);
            text.push('\n');
        } else {
            text.push_str(&format!("{number}. {insight}\n\n"));
            number += 1;
        }
    }
    text
}
