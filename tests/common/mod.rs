//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// The first twenty passengers of the Kaggle training manifest.
///
/// Two ages (rows 5 and 13) are made fractional so the estimated-age
/// analysis has something to tell apart.
///
/// Known characteristics:
/// - 10 of 20 survived
/// - men: 1 of 9 survived, women: 9 of 11 survived
/// - decks: C (3, all survived), E (1, died), G (1, survived), unknown (15, 6 survived)
/// - children under 14: rows 8, 11, 17 (one survived)
/// - ports: S 15, C 3, Q 2 (Q only carries third class)
pub fn create_manifest_dataframe() -> DataFrame {
    df! {
        "PassengerId" => (1i64..=20).collect::<Vec<_>>(),
        "Survived" => [0i64, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 1, 0, 1, 0, 1],
        "Pclass" => [3i64, 1, 3, 1, 3, 3, 1, 3, 3, 2, 3, 1, 3, 3, 3, 2, 3, 2, 3, 3],
        "Sex" => [
            "male", "female", "female", "female", "male", "male", "male", "male", "female", "female",
            "female", "female", "male", "male", "female", "female", "male", "male", "female", "female",
        ],
        "Age" => [
            Some(22.0f64), Some(38.0), Some(26.0), Some(35.0), Some(34.5), None, Some(54.0), Some(2.0),
            Some(27.0), Some(14.0), Some(4.0), Some(58.0), Some(20.5), Some(39.0), Some(14.0),
            Some(55.0), Some(2.0), None, Some(31.0), None,
        ],
        "Cabin" => [
            None, Some("C85"), None, Some("C123"), None, None, Some("E46"), None, None, None,
            Some("G6"), Some("C103"), None, None, None, None, None, None, None, None,
        ],
        "Fare" => [
            7.25f64, 71.2833, 7.925, 53.1, 8.05, 8.4583, 51.8625, 21.075, 11.1333, 30.0708,
            16.7, 26.55, 8.05, 31.275, 7.8542, 16.0, 29.125, 13.0, 18.0, 7.225,
        ],
        "Embarked" => [
            "S", "C", "S", "S", "S", "Q", "S", "S", "S", "C",
            "S", "S", "S", "S", "S", "S", "Q", "S", "S", "C",
        ],
    }
    .unwrap()
}

/// Minimal sex/survival frame
pub fn create_sex_survival_dataframe() -> DataFrame {
    df! {
        "Sex" => ["male", "male", "female", "female"],
        "Survived" => [0i32, 1, 1, 1],
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("manifest.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("manifest.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert two floats agree to within 1e-9
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
