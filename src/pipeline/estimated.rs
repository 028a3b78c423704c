//! Estimated-age analysis
//!
//! Ages in the manifest are fractional when they are exact (infants) or
//! estimated (`xx.5`). An age is treated as estimated when it is missing or a
//! whole number, which is how the exploratory notebooks approximated it.

use std::collections::BTreeMap;

use serde::Serialize;

use super::group::GroupKey;
use super::manifest::Manifest;
use crate::error::AnalysisError;

pub fn is_estimated_age(age: Option<f64>) -> bool {
    match age {
        None => true,
        Some(age) => age == age.ceil(),
    }
}

/// Estimated-age counts per group, with a min-max scaled view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimatedAges {
    /// Groups with at least one estimated age
    pub counts: BTreeMap<String, usize>,
    /// `1 + (count - min) / (max - min)`; all 1.0 when every count is equal
    pub normalized: BTreeMap<String, f64>,
}

pub fn estimated_age_counts(
    manifest: &Manifest,
    key: &GroupKey,
) -> Result<EstimatedAges, AnalysisError> {
    manifest.ensure_not_empty()?;

    let ages = manifest.ages()?;
    let labels = key.labels(manifest)?;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for (label, age) in labels.into_iter().zip(ages) {
        if let Some(label) = label {
            if is_estimated_age(age) {
                *counts.entry(label).or_default() += 1;
            }
        }
    }

    let min = counts.values().copied().min().unwrap_or(0) as f64;
    let max = counts.values().copied().max().unwrap_or(0) as f64;
    let normalized = counts
        .iter()
        .map(|(label, &count)| {
            let scaled = if max > min {
                1.0 + (count as f64 - min) / (max - min)
            } else {
                1.0
            };
            (label.clone(), scaled)
        })
        .collect();

    Ok(EstimatedAges { counts, normalized })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_is_estimated() {
        assert!(is_estimated_age(None));
        assert!(is_estimated_age(Some(22.0)));
        assert!(!is_estimated_age(Some(28.5)));
        assert!(!is_estimated_age(Some(0.83)));
    }

    #[test]
    fn test_counts_and_scaling() {
        let df = df! {
            "Pclass" => [1i32, 1, 2, 3, 3, 3],
            "Age" => [Some(38.0f64), Some(0.92), None, None, Some(20.5), Some(4.0)],
        }
        .unwrap();
        let manifest = Manifest::new(&df);

        let estimated = estimated_age_counts(&manifest, &GroupKey::PassengerClass).unwrap();
        assert_eq!(estimated.counts["1"], 1);
        assert_eq!(estimated.counts["2"], 1);
        assert_eq!(estimated.counts["3"], 2);
        assert_eq!(estimated.normalized["1"], 1.0);
        assert_eq!(estimated.normalized["3"], 2.0);
    }

    #[test]
    fn test_equal_counts_scale_to_one() {
        let df = df! {
            "Sex" => ["male", "female"],
            "Age" => [Some(30.0f64), None],
        }
        .unwrap();
        let manifest = Manifest::new(&df);

        let estimated = estimated_age_counts(&manifest, &GroupKey::Sex).unwrap();
        assert!(estimated.normalized.values().all(|v| *v == 1.0));
    }
}
