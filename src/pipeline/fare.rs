//! Fare distributions and the two outlier-exclusion policies
//!
//! Outlier exclusion never mutates the source column: it produces a separate
//! "no outliers" view next to the full "with outliers" view, so counts of
//! excluded values remain available.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::group::{partition_values, GroupKey};
use super::manifest::Manifest;
use super::quantile::{quantile_sorted, sorted_copy, DistributionStats};
use crate::error::{AnalysisError, ValidationError};

/// Default fence multiplier for box-plot outliers
pub const DEFAULT_FENCE_MULTIPLIER: f64 = 1.5;

/// Default percentile for the histogram cutoff
pub const DEFAULT_CUTOFF_PERCENTILE: f64 = 90.0;

/// Rule deciding which values count as outliers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutlierPolicy {
    /// Keep values within `multiplier × IQR` of the median (inclusive)
    BoxPlotFences { multiplier: f64 },
    /// Keep values strictly below the given percentile (0-100)
    PercentileCutoff { percentile: f64 },
}

impl OutlierPolicy {
    pub const fn box_plot_fences() -> Self {
        OutlierPolicy::BoxPlotFences {
            multiplier: DEFAULT_FENCE_MULTIPLIER,
        }
    }

    pub const fn percentile_cutoff() -> Self {
        OutlierPolicy::PercentileCutoff {
            percentile: DEFAULT_CUTOFF_PERCENTILE,
        }
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        match *self {
            OutlierPolicy::BoxPlotFences { multiplier } => {
                if !multiplier.is_finite() || multiplier < 0.0 {
                    return Err(ValidationError::InvalidConfig(format!(
                        "fence multiplier must be a non-negative number, got {}",
                        multiplier
                    ))
                    .into());
                }
            }
            OutlierPolicy::PercentileCutoff { percentile } => {
                if !(percentile > 0.0 && percentile <= 100.0) {
                    return Err(ValidationError::InvalidConfig(format!(
                        "cutoff percentile must be in (0, 100], got {}",
                        percentile
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Compute the retention rule from a reference sample.
    ///
    /// Returns `None` when the reference is empty.
    pub fn retention(&self, reference: &[f64]) -> Option<Retention> {
        let sorted = sorted_copy(reference);
        match *self {
            OutlierPolicy::BoxPlotFences { multiplier } => {
                let q1 = quantile_sorted(&sorted, 0.25)?;
                let median = quantile_sorted(&sorted, 0.5)?;
                let q3 = quantile_sorted(&sorted, 0.75)?;
                let reach = multiplier * (q3 - q1);
                Some(Retention::Within {
                    lower: median - reach,
                    upper: median + reach,
                })
            }
            OutlierPolicy::PercentileCutoff { percentile } => {
                let cutoff = quantile_sorted(&sorted, percentile / 100.0)?;
                Some(Retention::Below { cutoff })
            }
        }
    }
}

impl fmt::Display for OutlierPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlierPolicy::BoxPlotFences { multiplier } => {
                write!(f, "median ± {}×IQR", multiplier)
            }
            OutlierPolicy::PercentileCutoff { percentile } => write!(f, "< P{}", percentile),
        }
    }
}

/// Concrete bounds derived from an [`OutlierPolicy`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Retention {
    Within { lower: f64, upper: f64 },
    Below { cutoff: f64 },
}

impl Retention {
    pub fn keeps(&self, value: f64) -> bool {
        match *self {
            Retention::Within { lower, upper } => value >= lower && value <= upper,
            Retention::Below { cutoff } => value < cutoff,
        }
    }
}

/// Values kept by an outlier policy, with the number it dropped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierView {
    pub retention: Retention,
    pub retained: Vec<f64>,
    pub excluded: usize,
}

/// Apply a policy to `values`, deriving its bounds from `values` themselves
pub fn exclude_outliers(values: &[f64], policy: OutlierPolicy) -> Option<OutlierView> {
    exclude_outliers_against(values, values, policy)
}

/// Apply a policy to `values` with bounds derived from `reference`
/// (e.g. a group filtered by a percentile of the full column)
pub fn exclude_outliers_against(
    values: &[f64],
    reference: &[f64],
    policy: OutlierPolicy,
) -> Option<OutlierView> {
    let retention = policy.retention(reference)?;
    let retained: Vec<f64> = values.iter().copied().filter(|v| retention.keeps(*v)).collect();
    let excluded = values.len() - retained.len();

    Some(OutlierView {
        retention,
        retained,
        excluded,
    })
}

/// Fare distribution of one group, with and without outliers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareSummary {
    /// All fares in the group
    pub with_outliers: DistributionStats,
    /// Fares kept by the policy; `None` when the policy kept nothing
    pub without_outliers: Option<DistributionStats>,
    pub retention: Retention,
    pub excluded: usize,
}

/// Fare summary per group.
///
/// Box-plot fences are computed within each group. A percentile cutoff is
/// computed over the full fare column and applied to every group.
/// Rows with a missing fare are left out.
pub fn fare_summary(
    manifest: &Manifest,
    key: &GroupKey,
    policy: OutlierPolicy,
) -> Result<BTreeMap<String, FareSummary>, AnalysisError> {
    manifest.ensure_not_empty()?;
    policy.validate()?;

    let fares = manifest.fares()?;
    let labels = key.labels(manifest)?;
    let all_fares: Vec<f64> = fares.iter().flatten().copied().collect();
    let groups = partition_values(labels, &fares);

    let mut summaries = BTreeMap::new();
    for (label, values) in groups {
        let reference: &[f64] = match policy {
            OutlierPolicy::BoxPlotFences { .. } => &values,
            OutlierPolicy::PercentileCutoff { .. } => &all_fares,
        };

        let (Some(with_outliers), Some(view)) = (
            DistributionStats::new(&values),
            exclude_outliers_against(&values, reference, policy),
        ) else {
            continue;
        };

        summaries.insert(
            label,
            FareSummary {
                with_outliers,
                without_outliers: DistributionStats::new(&view.retained),
                retention: view.retention,
                excluded: view.excluded,
            },
        );
    }

    Ok(summaries)
}
