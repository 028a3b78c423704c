//! Chart kinds and the sink interface for finished results

use std::fmt;

use anyhow::Result;
use serde::Serialize;

use crate::pipeline::AnalysisResult;

/// Chart a result is meant to be drawn as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    StackedBar,
    Pie,
    Box,
    Histogram,
    Scatter,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::StackedBar => write!(f, "stacked bar"),
            ChartKind::Pie => write!(f, "pie"),
            ChartKind::Box => write!(f, "box"),
            ChartKind::Histogram => write!(f, "histogram"),
            ChartKind::Scatter => write!(f, "scatter"),
        }
    }
}

/// Consumer of finished aggregation results (a renderer, an exporter, ...).
///
/// `emit` is called once per result; sinks hold no state shared with the
/// aggregations.
pub trait ReportSink {
    fn emit(&mut self, result: &AnalysisResult) -> Result<()>;

    /// Called after the last result
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Hand every result to the sink, then finish it
pub fn emit_all<S: ReportSink + ?Sized>(sink: &mut S, results: &[AnalysisResult]) -> Result<()> {
    for result in results {
        sink.emit(result)?;
    }
    sink.finish()
}
