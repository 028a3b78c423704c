//! Read-only view over a loaded passenger manifest

use polars::prelude::*;

use super::columns::{
    class_values, non_negative_values, numeric_values, port_values, sex_values, survived_flags,
    text_values, ColumnNames,
};
use super::passenger::{PassengerClass, Port, Sex};
use crate::error::AnalysisError;

/// A borrowed passenger table plus the names of the columns to read.
///
/// The frame is never mutated; derived features such as the deck are
/// recomputed from their source columns on every call.
#[derive(Debug, Clone)]
pub struct Manifest<'a> {
    frame: &'a DataFrame,
    columns: ColumnNames,
}

impl<'a> Manifest<'a> {
    /// View a frame that uses the default Kaggle column names
    pub fn new(frame: &'a DataFrame) -> Self {
        Self::with_columns(frame, ColumnNames::default())
    }

    pub fn with_columns(frame: &'a DataFrame, columns: ColumnNames) -> Self {
        Self { frame, columns }
    }

    pub fn frame(&self) -> &'a DataFrame {
        self.frame
    }

    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Fail with [`AnalysisError::EmptyInput`] when there are no rows
    pub fn ensure_not_empty(&self) -> Result<(), AnalysisError> {
        if self.frame.height() == 0 {
            return Err(AnalysisError::EmptyInput);
        }
        Ok(())
    }

    pub fn survived(&self) -> Result<Vec<bool>, AnalysisError> {
        survived_flags(self.frame, &self.columns.survived)
    }

    pub fn sexes(&self) -> Result<Vec<Sex>, AnalysisError> {
        sex_values(self.frame, &self.columns.sex)
    }

    pub fn classes(&self) -> Result<Vec<PassengerClass>, AnalysisError> {
        class_values(self.frame, &self.columns.passenger_class)
    }

    pub fn ages(&self) -> Result<Vec<Option<f64>>, AnalysisError> {
        non_negative_values(self.frame, &self.columns.age)
    }

    pub fn fares(&self) -> Result<Vec<Option<f64>>, AnalysisError> {
        non_negative_values(self.frame, &self.columns.fare)
    }

    pub fn cabins(&self) -> Result<Vec<Option<String>>, AnalysisError> {
        text_values(self.frame, &self.columns.cabin)
    }

    pub fn ports(&self) -> Result<Vec<Option<Port>>, AnalysisError> {
        port_values(self.frame, &self.columns.embarked)
    }

    /// Any numeric column by name. Known quantity columns (fare, age) are
    /// additionally checked to be non-negative.
    pub fn values(&self, column: &str) -> Result<Vec<Option<f64>>, AnalysisError> {
        if column == self.columns.fare || column == self.columns.age {
            non_negative_values(self.frame, column)
        } else {
            numeric_values(self.frame, column)
        }
    }

    /// Overall fraction of survivors
    pub fn survival_rate(&self) -> Result<f64, AnalysisError> {
        self.ensure_not_empty()?;
        let survived = self.survived()?;
        let survivors = survived.iter().filter(|s| **s).count();
        Ok(survivors as f64 / survived.len() as f64)
    }
}
