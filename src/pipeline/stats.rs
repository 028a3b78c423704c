//! Grouped medians and means of numeric columns

use std::collections::BTreeMap;

use super::group::{partition_values, GroupKey};
use super::manifest::Manifest;
use super::quantile::median;
use crate::error::AnalysisError;

/// Median of `value_column` for every `(outer, inner)` pair present in the data.
///
/// Pairs that never occur (or whose values are all missing) are absent from
/// the result rather than zero-filled.
pub fn median_by_two_keys(
    manifest: &Manifest,
    outer_key: &GroupKey,
    inner_key: &GroupKey,
    value_column: &str,
) -> Result<BTreeMap<String, BTreeMap<String, f64>>, AnalysisError> {
    manifest.ensure_not_empty()?;

    let values = manifest.values(value_column)?;
    let outer = outer_key.labels(manifest)?;
    let inner = inner_key.labels(manifest)?;

    let mut pairs: BTreeMap<(String, String), Vec<f64>> = BTreeMap::new();
    for ((o, i), value) in outer.into_iter().zip(inner).zip(values) {
        if let (Some(o), Some(i), Some(value)) = (o, i, value) {
            pairs.entry((o, i)).or_default().push(value);
        }
    }

    let mut grid: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for ((o, i), values) in pairs {
        if let Some(m) = median(&values) {
            grid.entry(o).or_default().insert(i, m);
        }
    }

    Ok(grid)
}

/// Mean of `value_column` per group, ignoring missing values
pub fn mean_by_group(
    manifest: &Manifest,
    key: &GroupKey,
    value_column: &str,
) -> Result<BTreeMap<String, f64>, AnalysisError> {
    manifest.ensure_not_empty()?;

    let values = manifest.values(value_column)?;
    let labels = key.labels(manifest)?;

    Ok(partition_values(labels, &values)
        .into_iter()
        .map(|(label, values)| {
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            (label, mean)
        })
        .collect())
}

/// Median of `value_column` per group, ignoring missing values
pub fn median_by_group(
    manifest: &Manifest,
    key: &GroupKey,
    value_column: &str,
) -> Result<BTreeMap<String, f64>, AnalysisError> {
    manifest.ensure_not_empty()?;

    let values = manifest.values(value_column)?;
    let labels = key.labels(manifest)?;

    Ok(partition_values(labels, &values)
        .into_iter()
        .filter_map(|(label, values)| median(&values).map(|m| (label, m)))
        .collect())
}

/// `(x, y)` pairs for rows where both columns have a value
pub fn scatter_points(
    manifest: &Manifest,
    x_column: &str,
    y_column: &str,
) -> Result<Vec<(f64, f64)>, AnalysisError> {
    manifest.ensure_not_empty()?;

    let xs = manifest.values(x_column)?;
    let ys = manifest.values(y_column)?;

    Ok(xs
        .into_iter()
        .zip(ys)
        .filter_map(|(x, y)| Some((x?, y?)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_mean_skips_missing_values() {
        let df = df! {
            "Pclass" => [1i32, 1, 3, 3],
            "Fare" => [Some(80.0f64), None, Some(7.0), Some(9.0)],
        }
        .unwrap();
        let manifest = Manifest::new(&df);

        let means = mean_by_group(&manifest, &GroupKey::PassengerClass, "Fare").unwrap();
        assert_eq!(means["1"], 80.0);
        assert_eq!(means["3"], 8.0);
    }

    #[test]
    fn test_median_by_group() {
        let df = df! {
            "Sex" => ["male", "male", "male", "female"],
            "Age" => [20.0f64, 30.0, 40.0, 25.0],
        }
        .unwrap();
        let manifest = Manifest::new(&df);

        let medians = median_by_group(&manifest, &GroupKey::Sex, "Age").unwrap();
        assert_eq!(medians["male"], 30.0);
        assert_eq!(medians["female"], 25.0);
    }

    #[test]
    fn test_scatter_drops_incomplete_rows() {
        let df = df! {
            "Age" => [Some(22.0f64), None, Some(35.0)],
            "Fare" => [Some(7.25f64), Some(8.05), None],
        }
        .unwrap();
        let manifest = Manifest::new(&df);

        let points = scatter_points(&manifest, "Age", "Fare").unwrap();
        assert_eq!(points, vec![(22.0, 7.25)]);
    }
}
