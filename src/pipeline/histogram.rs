//! Fixed-width histograms over numeric columns

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::fare::{exclude_outliers_against, OutlierPolicy};
use super::group::{partition_values, GroupKey};
use super::manifest::Manifest;
use crate::error::{AnalysisError, ValidationError};

/// Label of the single histogram produced when no grouping key is given
pub const ALL_ROWS_LABEL: &str = "all";

/// Default fare bin width
pub const DEFAULT_BIN_WIDTH: f64 = 50.0;

/// Default age bin width (five-year bands)
pub const DEFAULT_AGE_BIN_WIDTH: f64 = 5.0;

/// Upper bound on the number of bins a single histogram may have
pub const MAX_BINS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramOptions {
    pub bin_width: f64,
    /// Applied to the full column before binning
    pub outlier_policy: Option<OutlierPolicy>,
    /// Normalize counts so each histogram integrates to 1
    pub density: bool,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            bin_width: DEFAULT_BIN_WIDTH,
            outlier_policy: Some(OutlierPolicy::percentile_cutoff()),
            density: false,
        }
    }
}

impl HistogramOptions {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.bin_width.is_finite() || self.bin_width <= 0.0 {
            return Err(ValidationError::InvalidConfig(format!(
                "bin width must be a positive number, got {}",
                self.bin_width
            ))
            .into());
        }
        if let Some(policy) = &self.outlier_policy {
            policy.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Bin edges; bin `i` covers `[edges[i], edges[i + 1])`, the last bin is closed
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<Vec<f64>>,
    /// Values beyond the last edge
    pub out_of_range: usize,
}

/// Edges starting at `min` and stepping by `width` while below `max`.
///
/// At least two edges are always produced so there is one bin. A range
/// needing more than [`MAX_BINS`] bins at this width is rejected.
pub fn bin_edges(min: f64, max: f64, width: f64) -> Result<Vec<f64>, AnalysisError> {
    let steps = ((max - min) / width).ceil().max(0.0);
    if !steps.is_finite() || steps > MAX_BINS as f64 {
        return Err(ValidationError::InvalidConfig(format!(
            "bin width {} over the range {} to {} needs more than {} bins",
            width, min, max, MAX_BINS
        ))
        .into());
    }

    let mut edges: Vec<f64> = (0..steps as usize).map(|i| min + i as f64 * width).collect();
    if edges.len() < 2 {
        edges = vec![min, min + width];
    }
    Ok(edges)
}

impl Histogram {
    pub fn from_values(values: &[f64], edges: &[f64], density: bool) -> Self {
        let bins = edges.len().saturating_sub(1);
        let mut counts = vec![0usize; bins];
        let mut out_of_range = 0usize;

        if let (Some(&first), Some(&last)) = (edges.first(), edges.last()) {
            for &value in values {
                if bins == 0 || value < first || value > last {
                    out_of_range += 1;
                    continue;
                }
                let idx = edges.partition_point(|e| *e <= value).saturating_sub(1);
                counts[idx.min(bins - 1)] += 1;
            }
        } else {
            out_of_range = values.len();
        }

        let density = density.then(|| {
            let in_range: usize = counts.iter().sum();
            counts
                .iter()
                .enumerate()
                .map(|(i, &count)| {
                    let width = edges[i + 1] - edges[i];
                    if in_range == 0 || width <= 0.0 {
                        0.0
                    } else {
                        count as f64 / (in_range as f64 * width)
                    }
                })
                .collect()
        });

        Self {
            edges: edges.to_vec(),
            counts,
            density,
            out_of_range,
        }
    }
}

/// Histogram of a numeric column, optionally one per group.
///
/// All groups share the same edges, spanning the retained values of the whole
/// column. Without a key a single histogram is returned under
/// [`ALL_ROWS_LABEL`].
pub fn value_histogram(
    manifest: &Manifest,
    value_column: &str,
    key: Option<&GroupKey>,
    options: &HistogramOptions,
) -> Result<BTreeMap<String, Histogram>, AnalysisError> {
    manifest.ensure_not_empty()?;
    options.validate()?;

    let mut values = manifest.values(value_column)?;
    let present: Vec<f64> = values.iter().flatten().copied().collect();

    if let Some(policy) = options.outlier_policy {
        if let Some(view) = exclude_outliers_against(&present, &present, policy) {
            for value in values.iter_mut() {
                if value.is_some_and(|v| !view.retention.keeps(v)) {
                    *value = None;
                }
            }
        }
    }

    let retained: Vec<f64> = values.iter().flatten().copied().collect();
    let (Some(min), Some(max)) = (
        retained.iter().copied().reduce(f64::min),
        retained.iter().copied().reduce(f64::max),
    ) else {
        return Ok(BTreeMap::new());
    };
    let edges = bin_edges(min, max, options.bin_width)?;

    let labels = match key {
        Some(key) => key.labels(manifest)?,
        None => vec![Some(ALL_ROWS_LABEL.to_string()); values.len()],
    };

    Ok(partition_values(labels, &values)
        .into_iter()
        .map(|(label, group)| (label, Histogram::from_values(&group, &edges, options.density)))
        .collect())
}

/// Fare histogram, optionally one per group
pub fn fare_histogram(
    manifest: &Manifest,
    key: Option<&GroupKey>,
    options: &HistogramOptions,
) -> Result<BTreeMap<String, Histogram>, AnalysisError> {
    let fare_column = manifest.columns().fare.clone();
    value_histogram(manifest, &fare_column, key, options)
}
