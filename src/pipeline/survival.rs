//! Grouped survival counts and rates

use std::collections::BTreeMap;

use serde::Serialize;

use super::group::GroupKey;
use super::manifest::Manifest;
use crate::error::AnalysisError;

/// Survivors and deaths within one group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SurvivalCounts {
    pub survived: usize,
    pub died: usize,
}

impl SurvivalCounts {
    pub fn total(&self) -> usize {
        self.survived + self.died
    }

    /// Fraction of the group that survived, in `[0, 1]`
    pub fn rate(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.survived as f64 / self.total() as f64
    }
}

/// Count survivors and deaths per group.
///
/// Rows without a group value (e.g. unknown port) are left out.
pub fn survival_counts_by_group(
    manifest: &Manifest,
    key: &GroupKey,
) -> Result<BTreeMap<String, SurvivalCounts>, AnalysisError> {
    manifest.ensure_not_empty()?;

    let labels = key.labels(manifest)?;
    let survived = manifest.survived()?;

    let mut groups: BTreeMap<String, SurvivalCounts> = BTreeMap::new();
    for (label, survived) in labels.into_iter().zip(survived) {
        let Some(label) = label else { continue };
        let counts = groups.entry(label).or_default();
        if survived {
            counts.survived += 1;
        } else {
            counts.died += 1;
        }
    }

    Ok(groups)
}

/// Survival rate per group.
///
/// Each group present in the input appears exactly once. The map is keyed in
/// label order; use the ordering helpers for a fixed display order.
pub fn survival_rate_by_group(
    manifest: &Manifest,
    key: &GroupKey,
) -> Result<BTreeMap<String, f64>, AnalysisError> {
    let counts = survival_counts_by_group(manifest, key)?;
    Ok(counts
        .into_iter()
        .map(|(label, counts)| (label, counts.rate()))
        .collect())
}
