use average::Variance;
use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::Serialize;

/// Descriptive statistics of an unordered sample.
///
/// All the percentiles are nearest-rank, so every one of them is an actual sample value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
#[must_use]
pub struct Statistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,

    /// Population standard deviation.
    pub std_dev: f64,

    pub percentile_25: f64,
    pub percentile_50: f64,
    pub percentile_75: f64,
    pub percentile_90: f64,
    pub percentile_95: f64,
}

impl Statistics {
    /// Compute the statistics, or all zeros for an empty sample.
    pub fn compute(values: impl IntoIterator<Item = f64>) -> Self {
        let sorted = values.into_iter().map(OrderedFloat).sorted_unstable().collect_vec();
        let (Some(min), Some(max)) = (sorted.first(), sorted.last()) else {
            return Self::default();
        };
        let variance: Variance = sorted.iter().map(|value| value.0).collect();
        let percentile = |p| nearest_rank(&sorted, p).unwrap_or_default().0;
        Self {
            count: sorted.len(),
            mean: variance.mean(),
            median: percentile(50.0),
            min: min.0,
            max: max.0,
            std_dev: variance.population_variance().sqrt(),
            percentile_25: percentile(25.0),
            percentile_50: percentile(50.0),
            percentile_75: percentile(75.0),
            percentile_90: percentile(90.0),
            percentile_95: percentile(95.0),
        }
    }
}

/// Nearest-rank percentile of an ascending sample: `sorted[ceil(p / 100 × n) − 1]`,
/// with the index clamped to the sample bounds.
#[must_use]
#[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn nearest_rank<T: Copy>(sorted: &[T], p: f64) -> Option<T> {
    let last_index = sorted.len().checked_sub(1)?;
    let rank = ((p / 100.0) * sorted.len() as f64).ceil() as i64;
    let index = usize::try_from(rank - 1).unwrap_or(0).min(last_index);
    Some(sorted[index])
}

/// Percentile rank of `value` within an ascending sample: the share of the sample which is
/// strictly below `value`, in `0.0..=100.0`.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn percentile_rank<T: PartialOrd>(sorted: &[T], value: &T) -> f64 {
    let index = sorted.partition_point(|sample| sample < value);
    if index == sorted.len() { 100.0 } else { index as f64 / sorted.len() as f64 * 100.0 }
}
