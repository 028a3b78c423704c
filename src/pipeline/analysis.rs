//! The standard manifest survey: every aggregation the exploratory notebooks
//! chart, computed in one pass and tagged with the chart it feeds.

use std::collections::BTreeMap;

use serde::Serialize;

use super::crosstab::{crosstab, Crosstab, Normalize};
use super::estimated::{estimated_age_counts, EstimatedAges};
use super::fare::{fare_summary, FareSummary};
use super::group::GroupKey;
use super::histogram::{fare_histogram, value_histogram, Histogram};
use super::manifest::Manifest;
use super::ordering::order_for_key;
use super::stats::{mean_by_group, median_by_two_keys, scatter_points};
use super::survival::{survival_counts_by_group, survival_rate_by_group, SurvivalCounts};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::report::ChartKind;

/// A finished aggregation, ready for a sink
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum AnalysisResult {
    SurvivalRates {
        group: String,
        rates: Vec<(String, f64)>,
    },
    SurvivalCounts {
        group: String,
        counts: Vec<(String, SurvivalCounts)>,
    },
    Crosstab(Crosstab),
    FareSummaries {
        group: String,
        summaries: Vec<(String, FareSummary)>,
    },
    MedianGrid {
        outer: String,
        inner: String,
        value: String,
        grid: BTreeMap<String, BTreeMap<String, f64>>,
    },
    GroupMeans {
        group: String,
        value: String,
        means: Vec<(String, f64)>,
    },
    Histograms {
        group: Option<String>,
        value: String,
        histograms: Vec<(String, Histogram)>,
    },
    EstimatedAges {
        group: String,
        estimated: EstimatedAges,
    },
    Scatter {
        x: String,
        y: String,
        points: Vec<(f64, f64)>,
    },
}

impl AnalysisResult {
    pub fn title(&self) -> String {
        match self {
            AnalysisResult::SurvivalRates { group, .. } => format!("Survival rate by {}", group),
            AnalysisResult::SurvivalCounts { group, .. } => {
                format!("Survivor counts by {}", group)
            }
            AnalysisResult::Crosstab(table) => {
                format!("{} × {} ({})", table.row_key, table.column_key, table.normalize)
            }
            AnalysisResult::FareSummaries { group, .. } => format!("Fare by {}", group),
            AnalysisResult::MedianGrid {
                outer,
                inner,
                value,
                ..
            } => format!("Median {} by {} and {}", value, outer, inner),
            AnalysisResult::GroupMeans { group, value, .. } => {
                format!("Mean {} by {}", value, group)
            }
            AnalysisResult::Histograms { group, value, .. } => match group {
                Some(group) => format!("{} distribution by {}", value, group),
                None => format!("{} distribution", value),
            },
            AnalysisResult::EstimatedAges { group, .. } => {
                format!("Estimated ages by {}", group)
            }
            AnalysisResult::Scatter { x, y, .. } => format!("{} against {}", y, x),
        }
    }

    /// The chart this result was computed for
    pub fn chart_kind(&self) -> ChartKind {
        match self {
            AnalysisResult::SurvivalRates { .. } => ChartKind::Bar,
            AnalysisResult::SurvivalCounts { .. } => ChartKind::StackedBar,
            AnalysisResult::Crosstab(_) => ChartKind::StackedBar,
            AnalysisResult::FareSummaries { .. } => ChartKind::Box,
            AnalysisResult::MedianGrid { .. } => ChartKind::Bar,
            AnalysisResult::GroupMeans { .. } => ChartKind::Bar,
            AnalysisResult::Histograms { .. } => ChartKind::Histogram,
            AnalysisResult::EstimatedAges { .. } => ChartKind::Bar,
            AnalysisResult::Scatter { .. } => ChartKind::Scatter,
        }
    }
}

pub fn survival_rates(manifest: &Manifest, key: &GroupKey) -> Result<AnalysisResult, AnalysisError> {
    let rates = survival_rate_by_group(manifest, key)?;
    Ok(AnalysisResult::SurvivalRates {
        group: key.name(manifest),
        rates: order_for_key(key, &rates),
    })
}

pub fn survival_counts(
    manifest: &Manifest,
    key: &GroupKey,
) -> Result<AnalysisResult, AnalysisError> {
    let counts = survival_counts_by_group(manifest, key)?;
    Ok(AnalysisResult::SurvivalCounts {
        group: key.name(manifest),
        counts: order_for_key(key, &counts),
    })
}

/// Run every aggregation of the standard survey.
///
/// Fails on the first error; no partial survey is returned.
pub fn run_survey(
    manifest: &Manifest,
    config: &AnalysisConfig,
) -> Result<Vec<AnalysisResult>, AnalysisError> {
    manifest.ensure_not_empty()?;
    config.validate()?;

    let fare_column = manifest.columns().fare.clone();
    let mut results = Vec::new();

    // Who survived
    results.push(survival_counts(manifest, &GroupKey::Deck)?);
    for key in [
        GroupKey::Deck,
        GroupKey::PassengerClass,
        GroupKey::Sex,
        GroupKey::AgeGroup,
        GroupKey::Embarked,
    ] {
        results.push(survival_rates(manifest, &key)?);
    }
    results.push(AnalysisResult::Crosstab(crosstab(
        manifest,
        &GroupKey::Sex,
        &GroupKey::Survived,
        Normalize::Rows,
        true,
    )?));
    results.push(AnalysisResult::Crosstab(crosstab(
        manifest,
        &GroupKey::PassengerClass,
        &GroupKey::Sex,
        Normalize::Rows,
        false,
    )?));
    results.push(AnalysisResult::Crosstab(crosstab(
        manifest,
        &GroupKey::PassengerClass,
        &GroupKey::Embarked,
        Normalize::None,
        true,
    )?));

    // What people paid
    let by_class = fare_summary(manifest, &GroupKey::PassengerClass, config.box_policy)?;
    results.push(AnalysisResult::FareSummaries {
        group: GroupKey::PassengerClass.name(manifest),
        summaries: order_for_key(&GroupKey::PassengerClass, &by_class),
    });

    let by_port = fare_summary(manifest, &GroupKey::Embarked, config.box_policy)?;
    results.push(AnalysisResult::FareSummaries {
        group: GroupKey::Embarked.name(manifest),
        summaries: order_for_key(&GroupKey::Embarked, &by_port),
    });

    results.push(AnalysisResult::MedianGrid {
        outer: GroupKey::Embarked.name(manifest),
        inner: GroupKey::PassengerClass.name(manifest),
        value: fare_column.clone(),
        grid: median_by_two_keys(
            manifest,
            &GroupKey::Embarked,
            &GroupKey::PassengerClass,
            &fare_column,
        )?,
    });

    let means = mean_by_group(manifest, &GroupKey::PassengerClass, &fare_column)?;
    results.push(AnalysisResult::GroupMeans {
        group: GroupKey::PassengerClass.name(manifest),
        value: fare_column.clone(),
        means: order_for_key(&GroupKey::PassengerClass, &means),
    });

    let histograms = fare_histogram(manifest, Some(&GroupKey::Embarked), &config.histogram)?;
    results.push(AnalysisResult::Histograms {
        group: Some(GroupKey::Embarked.name(manifest)),
        value: fare_column.clone(),
        histograms: order_for_key(&GroupKey::Embarked, &histograms),
    });

    let age_column = manifest.columns().age.clone();
    let age_histograms = value_histogram(
        manifest,
        &age_column,
        Some(&GroupKey::PassengerClass),
        &config.age_histogram(),
    )?;
    results.push(AnalysisResult::Histograms {
        group: Some(GroupKey::PassengerClass.name(manifest)),
        value: age_column.clone(),
        histograms: order_for_key(&GroupKey::PassengerClass, &age_histograms),
    });

    results.push(AnalysisResult::Scatter {
        points: scatter_points(manifest, &age_column, &fare_column)?,
        x: age_column,
        y: fare_column,
    });

    // How reliable the ages are
    results.push(AnalysisResult::EstimatedAges {
        group: GroupKey::PassengerClass.name(manifest),
        estimated: estimated_age_counts(manifest, &GroupKey::PassengerClass)?,
    });

    Ok(results)
}
