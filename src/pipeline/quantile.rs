//! Quantiles and distribution summaries
//!
//! Quantiles interpolate linearly between the two closest ranks, so the
//! median of an even-length sample is the mean of its two middle values.

use serde::Serialize;

/// Quantile `q` (0.0 to 1.0) of ascending-sorted values.
///
/// Returns `None` for an empty slice.
pub fn quantile_sorted(sorted_values: &[f64], q: f64) -> Option<f64> {
    debug_assert!(
        sorted_values.windows(2).all(|w| w[0] <= w[1]),
        "values must be sorted in ascending order"
    );

    if sorted_values.is_empty() {
        return None;
    }

    let q = q.clamp(0.0, 1.0);
    let position = q * (sorted_values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * fraction)
}

/// Quantile of unsorted values
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    let sorted = sorted_copy(values);
    quantile_sorted(&sorted, q)
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

pub(crate) fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Five-number summary plus count and mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl DistributionStats {
    /// Summarize unsorted values; `None` when there are none
    pub fn new(values: &[f64]) -> Option<Self> {
        let sorted = sorted_copy(values);
        Self::from_sorted(&sorted)
    }

    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let mean = sorted_values.iter().sum::<f64>() / count as f64;

        Some(Self {
            count,
            min,
            max,
            mean,
            q1: quantile_sorted(sorted_values, 0.25)?,
            median: quantile_sorted(sorted_values, 0.5)?,
            q3: quantile_sorted(sorted_values, 0.75)?,
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_quartiles_interpolate() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.25), Some(1.75));
        assert_eq!(quantile(&values, 0.75), Some(3.25));
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 1.0), Some(4.0));
    }

    #[test]
    fn test_ninetieth_percentile() {
        let values: Vec<f64> = (1..=11).map(f64::from).collect();
        assert_eq!(quantile(&values, 0.9), Some(10.0));
    }

    #[test]
    fn test_distribution_stats() {
        let stats = DistributionStats::new(&[7.25, 71.2833, 7.925, 53.1, 8.05]).unwrap();
        assert_eq!(stats.count, 5);
        assert_eq!(stats.min, 7.25);
        assert_eq!(stats.max, 71.2833);
        assert_eq!(stats.median, 8.05);
        assert_eq!(stats.q1, 7.925);
        assert_eq!(stats.q3, 53.1);
        assert!((stats.iqr() - 45.175).abs() < 1e-9);
    }

    #[test]
    fn test_constant_sample_has_zero_iqr() {
        let stats = DistributionStats::new(&[10.0; 4]).unwrap();
        assert_eq!(stats.iqr(), 0.0);
        assert_eq!(stats.median, 10.0);
    }

    #[test]
    fn test_empty_stats() {
        assert!(DistributionStats::new(&[]).is_none());
    }
}
