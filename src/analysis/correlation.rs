//! Pearson correlation between two numeric columns.

use crate::models::Dataset;

/// Pairwise-complete observations: records where both sides are known.
pub fn paired_values(dataset: &Dataset, x_field: &str, y_field: &str) -> Vec<(f64, f64)> {
    dataset
        .records()
        .iter()
        .filter_map(|record| {
            let x = record.value(x_field).as_f64()?;
            let y = record.value(y_field).as_f64()?;
            Some((x, y))
        })
        .collect()
}

/// Pearson r; `None` when there are fewer than two points or either
/// side has zero variance.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / nf;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

pub fn column_correlation(dataset: &Dataset, x_field: &str, y_field: &str) -> Option<f64> {
    pearson(&paired_values(dataset, x_field, y_field))
}
