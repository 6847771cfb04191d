//! Statistical functions over the non-null values of a numeric column.
//!
//! All functions take plain `f64` slices so the report engine and the basic
//! analysis share one implementation regardless of the source dtype.

use crate::types::{DescribeStats, HistogramBin};

/// Arithmetic mean, `None` for an empty slice.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (ddof = 1), `None` with fewer than two values.
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    Some(variance.sqrt())
}

/// Central moments m2, m3 and m4 (population normalization).
fn central_moments(values: &[f64]) -> Option<(f64, f64, f64)> {
    let mean = mean(values)?;
    let n = values.len() as f64;
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for v in values {
        let d = v - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    Some((m2 / n, m3 / n, m4 / n))
}

/// Adjusted Fisher-Pearson skewness, `None` with fewer than three values.
///
/// A constant column has zero skewness.
pub(crate) fn skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }
    let (m2, m3, _) = central_moments(values)?;
    if m2 == 0.0 {
        return Some(0.0);
    }
    let g1 = m3 / m2.powf(1.5);
    let n = n as f64;
    Some(g1 * (n * (n - 1.0)).sqrt() / (n - 2.0))
}

/// Unbiased excess kurtosis, `None` with fewer than four values.
pub(crate) fn kurtosis(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 4 {
        return None;
    }
    let (m2, _, m4) = central_moments(values)?;
    if m2 == 0.0 {
        return Some(0.0);
    }
    let g2 = m4 / (m2 * m2) - 3.0;
    let n = n as f64;
    Some(((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0)))
}

/// Quantile of an already sorted slice using linear interpolation
/// between the two nearest ranks.
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let weight = pos - lower as f64;
    if sorted[lower] == sorted[upper] {
        return Some(sorted[lower]);
    }
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Detect outliers with the 1.5 × IQR rule.
///
/// Returns `true` only when more than 5% of the values fall outside the
/// fences, so a single stray value in a large column is not flagged.
pub(crate) fn has_outliers(values: &[f64]) -> bool {
    if values.len() < 4 {
        return false;
    }
    let sorted = sorted_copy(values);
    let (Some(q1), Some(q3)) = (quantile_sorted(&sorted, 0.25), quantile_sorted(&sorted, 0.75))
    else {
        return false;
    };
    let iqr = q3 - q1;
    let lower_bound = q1 - 1.5 * iqr;
    let upper_bound = q3 + 1.5 * iqr;

    let outlier_count = values
        .iter()
        .filter(|v| **v < lower_bound || **v > upper_bound)
        .count();

    outlier_count > values.len() / 20
}

/// Equal-width histogram with `bins` buckets spanning `[min, max]`.
///
/// The last bucket is closed on the right. A constant column produces a
/// single bucket holding every value.
pub(crate) fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

/// `count/mean/std/min/25%/50%/75%/max` for one column, `None` when it has no values.
pub(crate) fn describe(column: &str, values: &[f64]) -> Option<DescribeStats> {
    let sorted = sorted_copy(values);
    Some(DescribeStats {
        column: column.to_string(),
        count: sorted.len(),
        mean: mean(&sorted)?,
        std: sample_std(&sorted),
        min: *sorted.first()?,
        q25: quantile_sorted(&sorted, 0.25)?,
        q50: quantile_sorted(&sorted, 0.5)?,
        q75: quantile_sorted(&sorted, 0.75)?,
        max: *sorted.last()?,
    })
}

/// Pearson correlation over paired observations.
///
/// `None` when fewer than two pairs are given or either side has zero variance.
pub(crate) fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len();
    if n < 2 {
        return None;
    }
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
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
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    // ==================== mean / std tests ====================

    #[test]
    fn test_mean_and_std_basic() {
        // Mean = 3, Variance = 10 / 4 = 2.5
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(mean(&values), Some(3.0));
        assert!(approx(sample_std(&values).unwrap(), 2.5f64.sqrt()));
    }

    #[test]
    fn test_std_single_value_is_undefined() {
        assert_eq!(sample_std(&[5.0]), None);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_std_identical_values() {
        assert_eq!(sample_std(&[5.0, 5.0, 5.0, 5.0]), Some(0.0));
    }

    // ==================== shape tests ====================

    #[test]
    fn test_skewness_symmetric_is_zero() {
        assert!(approx(skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 0.0));
    }

    #[test]
    fn test_skewness_right_tail_is_positive() {
        let values = [1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 10.0, 25.0];
        assert!(skewness(&values).unwrap() > 1.0);
    }

    #[test]
    fn test_skewness_needs_three_values() {
        assert_eq!(skewness(&[1.0, 2.0]), None);
        assert_eq!(skewness(&[4.0, 4.0, 4.0]), Some(0.0));
    }

    #[test]
    fn test_kurtosis_uniform_is_negative() {
        // Excess kurtosis of 1..=5 with bias correction is -1.2
        assert!(approx(kurtosis(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), -1.2));
        assert_eq!(kurtosis(&[1.0, 2.0, 3.0]), None);
    }

    // ==================== quantile / describe tests ====================

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile_sorted(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&sorted, 1.0), Some(4.0));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn test_quantile_between_equal_infinities() {
        let sorted = [1.0, f64::INFINITY, f64::INFINITY];
        assert_eq!(quantile_sorted(&sorted, 0.75), Some(f64::INFINITY));
        let stats = describe("v", &[f64::INFINITY, 1.0]).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.max, f64::INFINITY);
        assert_eq!(stats.min, 1.0);
    }

    #[test]
    fn test_describe_titanic_ages() {
        let stats = describe("Age", &[22.0, 38.0, 26.0, 35.0, 35.0]).unwrap();
        assert_eq!(stats.count, 5);
        assert!(approx(stats.mean, 31.2));
        assert_eq!(stats.min, 22.0);
        assert_eq!(stats.q25, 26.0);
        assert_eq!(stats.q50, 35.0);
        assert_eq!(stats.q75, 35.0);
        assert_eq!(stats.max, 38.0);
        assert!(approx(stats.std.unwrap(), 6.833_740));
    }

    #[test]
    fn test_describe_empty_is_none() {
        assert!(describe("x", &[]).is_none());
    }

    // ==================== outlier / histogram tests ====================

    #[test]
    fn test_has_outliers() {
        let clean: Vec<f64> = (1..=20).map(f64::from).collect();
        assert!(!has_outliers(&clean));

        let mut dirty = clean.clone();
        dirty.extend([500.0, 900.0]);
        assert!(has_outliers(&dirty));
    }

    #[test]
    fn test_has_outliers_small_sample() {
        assert!(!has_outliers(&[1.0, 2.0, 100.0]));
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let bins = histogram(&values, 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[4].upper, 10.0);
        // max lands in the last, right-closed bucket
        assert_eq!(bins[4].count, 3);
    }

    #[test]
    fn test_histogram_constant_column() {
        let bins = histogram(&[0.2; 5], 10);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 5);
    }

    // ==================== pearson tests ====================

    #[test]
    fn test_pearson_perfect() {
        let pairs = [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)];
        assert!(approx(pearson(&pairs).unwrap(), 1.0));
        let inverse = [(1.0, 3.0), (2.0, 2.0), (3.0, 1.0)];
        assert!(approx(pearson(&inverse).unwrap(), -1.0));
    }

    #[test]
    fn test_pearson_undefined_cases() {
        assert_eq!(pearson(&[(1.0, 2.0)]), None);
        assert_eq!(pearson(&[(1.0, 2.0), (2.0, 2.0), (3.0, 2.0)]), None);
    }
}
