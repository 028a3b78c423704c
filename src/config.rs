//! Analysis configuration
//!
//! Loaded from a JSON file or built from defaults. Every field is optional in
//! the file; missing fields take their default.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::pipeline::{ColumnNames, HistogramOptions, OutlierPolicy, DEFAULT_AGE_BIN_WIDTH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Manifest column names
    pub columns: ColumnNames,
    /// Outlier policy for the per-group fare box summaries
    pub box_policy: OutlierPolicy,
    /// Fare histogram binning and cutoff
    pub histogram: HistogramOptions,
    /// Width of the age bands in the per-class age histograms
    pub age_bin_width: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            box_policy: OutlierPolicy::box_plot_fences(),
            histogram: HistogramOptions::default(),
            age_bin_width: DEFAULT_AGE_BIN_WIDTH,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).context("Failed to parse analysis configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid configuration file: {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.box_policy.validate()?;
        self.histogram.validate()?;
        self.age_histogram().validate()
    }

    /// Age histograms use plain fixed-width bands over every known age
    pub fn age_histogram(&self) -> HistogramOptions {
        HistogramOptions {
            bin_width: self.age_bin_width,
            outlier_policy: None,
            density: false,
        }
    }
}
