//! Column lookup and validated extraction from the manifest table
//!
//! Every extractor fails fast with a [`ValidationError`] naming the column when
//! it is absent, has an unusable type, or holds a value outside its domain.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::passenger::{PassengerClass, Port, Sex};
use crate::error::{AnalysisError, ValidationError};

/// Names of the manifest columns the aggregator reads.
///
/// Defaults match the Kaggle Titanic headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub survived: String,
    pub sex: String,
    pub age: String,
    pub passenger_class: String,
    pub cabin: String,
    pub fare: String,
    pub embarked: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            survived: "Survived".to_string(),
            sex: "Sex".to_string(),
            age: "Age".to_string(),
            passenger_class: "Pclass".to_string(),
            cabin: "Cabin".to_string(),
            fare: "Fare".to_string(),
            embarked: "Embarked".to_string(),
        }
    }
}

/// Look up a column, reporting the available columns when it is missing
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, AnalysisError> {
    df.column(name).map_err(|_| {
        ValidationError::MissingColumn {
            column: name.to_string(),
            available: df
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
        .into()
    })
}

fn wrong_type(column: &str, dtype: &DataType, expected: &'static str) -> AnalysisError {
    ValidationError::WrongType {
        column: column.to_string(),
        dtype: dtype.to_string(),
        expected,
    }
    .into()
}

fn out_of_domain(column: &str, row: usize, value: String, expected: &'static str) -> AnalysisError {
    ValidationError::OutOfDomain {
        column: column.to_string(),
        row,
        value,
        expected,
    }
    .into()
}

fn display_value(value: Option<f64>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

/// Read a numeric column as `f64`, keeping nulls.
///
/// NaN and infinite values are rejected; every present value is finite.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, AnalysisError> {
    let column = require_column(df, name)?;
    let dtype = column.dtype();

    let numeric = dtype.is_primitive_numeric() || matches!(dtype, DataType::Boolean | DataType::Null);
    if !numeric {
        return Err(wrong_type(name, dtype, "a numeric column"));
    }

    let float_col = column
        .cast(&DataType::Float64)
        .map_err(|_| wrong_type(name, dtype, "a numeric column"))?;
    let values: Vec<Option<f64>> = float_col
        .f64()
        .map_err(|_| wrong_type(name, dtype, "a numeric column"))?
        .into_iter()
        .collect();

    if let Some((row, value)) = values
        .iter()
        .enumerate()
        .find(|(_, v)| v.is_some_and(|v| !v.is_finite()))
    {
        return Err(out_of_domain(name, row, display_value(*value), "a finite number"));
    }

    Ok(values)
}

/// Read any column as text, keeping nulls
pub fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, AnalysisError> {
    let column = require_column(df, name)?;
    let dtype = column.dtype();

    let text_col = column
        .cast(&DataType::String)
        .map_err(|_| wrong_type(name, dtype, "a text column"))?;
    let values = text_col
        .str()
        .map_err(|_| wrong_type(name, dtype, "a text column"))?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect();

    Ok(values)
}

/// Survival flags; every row must hold 0 or 1
pub fn survived_flags(df: &DataFrame, name: &str) -> Result<Vec<bool>, AnalysisError> {
    numeric_values(df, name)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| match value {
            Some(v) if v == 0.0 => Ok(false),
            Some(v) if v == 1.0 => Ok(true),
            other => Err(out_of_domain(name, row, display_value(other), "0 or 1")),
        })
        .collect()
}

/// Passenger sex; every row must be `male` or `female`
pub fn sex_values(df: &DataFrame, name: &str) -> Result<Vec<Sex>, AnalysisError> {
    text_values(df, name)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .as_deref()
                .and_then(|s| s.parse::<Sex>().ok())
                .ok_or_else(|| {
                    out_of_domain(
                        name,
                        row,
                        value.clone().unwrap_or_else(|| "null".to_string()),
                        "'male' or 'female'",
                    )
                })
        })
        .collect()
}

/// Ticket class; every row must be 1, 2 or 3
pub fn class_values(df: &DataFrame, name: &str) -> Result<Vec<PassengerClass>, AnalysisError> {
    numeric_values(df, name)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .filter(|v| v.fract() == 0.0)
                .and_then(|v| PassengerClass::from_code(v as i64))
                .ok_or_else(|| out_of_domain(name, row, display_value(value), "1, 2 or 3"))
        })
        .collect()
}

/// Optional non-negative quantity (age, fare); nulls are kept, negatives rejected
pub fn non_negative_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, AnalysisError> {
    let values = numeric_values(df, name)?;

    if let Some((row, value)) = values
        .iter()
        .enumerate()
        .find(|(_, v)| v.is_some_and(|v| !v.is_finite() || v < 0.0))
    {
        return Err(out_of_domain(name, row, display_value(*value), "a non-negative number"));
    }

    Ok(values)
}

/// Optional port of embarkation; blanks count as missing
pub fn port_values(df: &DataFrame, name: &str) -> Result<Vec<Option<Port>>, AnalysisError> {
    text_values(df, name)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| match value.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(code) => code
                .parse::<Port>()
                .map(Some)
                .map_err(|_| out_of_domain(name, row, code.to_string(), "'S', 'C' or 'Q'")),
        })
        .collect()
}
