//! Integration tests for manifest loading

#[path = "common/mod.rs"]
mod common;

use common::{create_manifest_dataframe, create_temp_csv, create_temp_parquet};
use manifest_survival::pipeline::*;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_load_csv() {
    let mut df = create_manifest_dataframe();
    let (_temp_dir, path) = create_temp_csv(&mut df);

    let loaded = load_manifest(&path, 100).unwrap();

    assert_eq!(loaded.shape(), (20, 8));
    assert_eq!(loaded.column("Cabin").unwrap().null_count(), 15);
}

#[test]
fn test_load_parquet() {
    let mut df = create_manifest_dataframe();
    let (_temp_dir, path) = create_temp_parquet(&mut df);

    let loaded = load_manifest(&path, 100).unwrap();

    assert!(loaded.equals_missing(&df));
}

#[test]
fn test_loaded_csv_gives_same_rates() {
    let mut df = create_manifest_dataframe();
    let expected = survival_rate_by_group(&Manifest::new(&df), &GroupKey::Deck).unwrap();
    let (_temp_dir, path) = create_temp_csv(&mut df);

    let (loaded, rows, cols, _memory_mb) = load_manifest_with_progress(&path, 0).unwrap();

    assert_eq!((rows, cols), (20, 8));
    let actual = survival_rate_by_group(&Manifest::new(&loaded), &GroupKey::Deck).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn test_column_names_from_header() {
    let mut df = create_manifest_dataframe();
    let (_temp_dir, path) = create_temp_csv(&mut df);

    let names = get_column_names(&path).unwrap();

    assert_eq!(
        names,
        vec!["PassengerId", "Survived", "Pclass", "Sex", "Age", "Cabin", "Fare", "Embarked"]
    );
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("manifest.xlsx");
    std::fs::write(&path, "not a table").unwrap();

    let err = load_manifest(&path, 100).unwrap_err();
    assert!(err.to_string().contains("Unsupported file format"));
}

#[test]
fn test_missing_file() {
    assert!(load_manifest(Path::new("/nonexistent/manifest.csv"), 100).is_err());
}

#[test]
fn test_missing_value_counts_sorted() {
    let df = create_manifest_dataframe();

    let counts = missing_value_counts(&df);

    assert_eq!(counts[0], ("Cabin".to_string(), 15));
    assert_eq!(counts[1], ("Age".to_string(), 3));
    assert!(counts[2..].iter().all(|(_, nulls)| *nulls == 0));
}
