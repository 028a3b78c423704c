//! Contingency tables between two grouping keys

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::group::GroupKey;
use super::manifest::Manifest;
use crate::error::AnalysisError;

/// Label of the totals row/column added when margins are requested
pub const MARGIN_LABEL: &str = "All";

/// How cell counts are turned into proportions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalize {
    /// Raw counts
    #[default]
    None,
    /// Each row sums to 1
    Rows,
    /// Each column sums to 1
    Columns,
    /// The whole table sums to 1
    All,
}

impl fmt::Display for Normalize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Normalize::None => write!(f, "none"),
            Normalize::Rows => write!(f, "rows"),
            Normalize::Columns => write!(f, "columns"),
            Normalize::All => write!(f, "all"),
        }
    }
}

impl FromStr for Normalize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Normalize::None),
            "rows" | "index" => Ok(Normalize::Rows),
            "columns" => Ok(Normalize::Columns),
            "all" => Ok(Normalize::All),
            _ => Err(format!(
                "Unknown normalization: '{}'. Use 'none', 'rows', 'columns' or 'all'.",
                s
            )),
        }
    }
}

/// A row-key × column-key table of counts or proportions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Crosstab {
    pub row_key: String,
    pub column_key: String,
    pub normalize: Normalize,
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    /// `cells[row][column]`, aligned with the label vectors
    pub cells: Vec<Vec<f64>>,
}

impl Crosstab {
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        let c = self.column_labels.iter().position(|l| l == column)?;
        self.cells.get(r)?.get(c).copied()
    }

    pub fn row(&self, row: &str) -> Option<&[f64]> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        self.cells.get(r).map(Vec::as_slice)
    }
}

/// Cross-tabulate two keys.
///
/// Margins follow the normalization: with row normalization only a totals
/// row is added (the overall column distribution), with column normalization
/// only a totals column, otherwise both.
pub fn crosstab(
    manifest: &Manifest,
    row_key: &GroupKey,
    column_key: &GroupKey,
    normalize: Normalize,
    margins: bool,
) -> Result<Crosstab, AnalysisError> {
    manifest.ensure_not_empty()?;

    let row_values = row_key.labels(manifest)?;
    let column_values = column_key.labels(manifest)?;

    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();
    let mut row_set = BTreeSet::new();
    let mut column_set = BTreeSet::new();
    for (r, c) in row_values.into_iter().zip(column_values) {
        if let (Some(r), Some(c)) = (r, c) {
            row_set.insert(r.clone());
            column_set.insert(c.clone());
            *counts.entry((r, c)).or_default() += 1;
        }
    }

    let row_labels: Vec<String> = row_set.into_iter().collect();
    let column_labels: Vec<String> = column_set.into_iter().collect();

    let counts: Vec<Vec<f64>> = row_labels
        .iter()
        .map(|r| {
            column_labels
                .iter()
                .map(|c| counts.get(&(r.clone(), c.clone())).copied().unwrap_or(0) as f64)
                .collect()
        })
        .collect();

    let row_totals: Vec<f64> = counts.iter().map(|row| row.iter().sum()).collect();
    let column_totals: Vec<f64> = (0..column_labels.len())
        .map(|c| counts.iter().map(|row| row[c]).sum())
        .collect();
    let grand_total: f64 = row_totals.iter().sum();

    let mut cells: Vec<Vec<f64>> = counts
        .iter()
        .enumerate()
        .map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(|(c, &count)| match normalize {
                    Normalize::None => count,
                    Normalize::Rows => safe_div(count, row_totals[r]),
                    Normalize::Columns => safe_div(count, column_totals[c]),
                    Normalize::All => safe_div(count, grand_total),
                })
                .collect()
        })
        .collect();

    let mut row_labels = row_labels;
    let mut column_labels = column_labels;

    if margins {
        let add_column = normalize != Normalize::Rows;
        let add_row = normalize != Normalize::Columns;

        if add_column {
            for (r, row) in cells.iter_mut().enumerate() {
                row.push(match normalize {
                    Normalize::None => row_totals[r],
                    _ => safe_div(row_totals[r], grand_total),
                });
            }
            column_labels.push(MARGIN_LABEL.to_string());
        }

        if add_row {
            let mut totals: Vec<f64> = column_totals
                .iter()
                .map(|&t| match normalize {
                    Normalize::None => t,
                    _ => safe_div(t, grand_total),
                })
                .collect();
            if add_column {
                totals.push(match normalize {
                    Normalize::None => grand_total,
                    _ => 1.0,
                });
            }
            cells.push(totals);
            row_labels.push(MARGIN_LABEL.to_string());
        }
    }

    Ok(Crosstab {
        row_key: row_key.name(manifest),
        column_key: column_key.name(manifest),
        normalize,
        row_labels,
        column_labels,
        cells,
    })
}

fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
