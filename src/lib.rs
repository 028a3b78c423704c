//! Manifest survival: survival and fare aggregation library
//!
//! Derives categorical features (deck, men/women/children) from a passenger
//! manifest and computes grouped survival rates, crosstabs, fare summaries
//! with explicit outlier policies, and median-fare grids, ready to hand to
//! a charting or reporting sink.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, ValidationError};
