//! Manifest loader for CSV and Parquet files

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use polars::prelude::*;

use crate::utils::{finish_loading, loading_spinner, print_warning};

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Open a manifest lazily (CSV or Parquet based on extension)
///
/// `infer_schema_length` of 0 scans the whole CSV to infer column types.
pub fn scan_manifest(path: &Path, infer_schema_length: usize) -> Result<LazyFrame> {
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match file_extension(path).as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        other => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            other
        ),
    };

    Ok(lf)
}

/// Read the whole manifest into memory
pub fn load_manifest(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    scan_manifest(path, infer_schema_length)?
        .collect()
        .with_context(|| format!("Failed to read manifest: {}", path.display()))
}

/// Load the manifest behind a spinner.
///
/// Returns the frame with its row count, column count and estimated memory in MB.
pub fn load_manifest_with_progress(
    path: &Path,
    infer_schema_length: usize,
) -> Result<(DataFrame, usize, usize, f64)> {
    let spinner = loading_spinner(path);
    let df = load_manifest(path, infer_schema_length)?;
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    finish_loading(&spinner, rows);

    Ok((df, rows, cols, memory_mb))
}

/// Column names from the file header without reading the rows
pub fn get_column_names(path: &Path) -> Result<Vec<String>> {
    let schema = scan_manifest(path, 100)?
        .collect_schema()
        .with_context(|| format!("Failed to read schema: {}", path.display()))?;

    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}

/// Per-column null counts, largest first
pub fn missing_value_counts(df: &DataFrame) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = df
        .get_columns()
        .iter()
        .map(|column| (column.name().to_string(), column.null_count()))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Display shape, memory and missing-value statistics about the manifest
pub fn display_dataset_stats(df: &DataFrame) {
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    for (column, nulls) in missing_value_counts(df) {
        if nulls > 0 {
            print_warning(&format!(
                "'{}' is missing in {} of {} rows ({:.1}%)",
                column,
                nulls,
                rows,
                nulls as f64 / rows.max(1) as f64 * 100.0
            ));
        }
    }
}
