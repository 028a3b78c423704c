//! JSON export of analysis results

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use super::chart::{ChartKind, ReportSink};
use crate::config::AnalysisConfig;
use crate::pipeline::AnalysisResult;
use crate::utils::print_success;

/// Metadata about the survey run
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the export (RFC 3339)
    pub timestamp: String,
    /// Crate version that produced the export
    pub version: String,
    /// Input file the manifest was loaded from
    pub input_file: String,
    /// Number of passengers in the manifest
    pub rows: usize,
    /// Configuration the survey ran with
    pub config: AnalysisConfig,
}

impl ExportMetadata {
    pub fn new(input_file: &Path, rows: usize, config: &AnalysisConfig) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: input_file.display().to_string(),
            rows,
            config: config.clone(),
        }
    }
}

/// One exported result with its chart tag
#[derive(Debug, Clone, Serialize)]
pub struct ExportEntry {
    pub title: String,
    pub chart: ChartKind,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Complete export document
#[derive(Debug, Clone, Serialize)]
pub struct SurveyExport {
    pub metadata: ExportMetadata,
    pub results: Vec<ExportEntry>,
}

/// Collects results and writes them as one JSON document on `finish`
#[derive(Debug)]
pub struct JsonSink {
    output_path: PathBuf,
    export: SurveyExport,
}

impl JsonSink {
    pub fn new(output_path: impl Into<PathBuf>, metadata: ExportMetadata) -> Self {
        Self {
            output_path: output_path.into(),
            export: SurveyExport {
                metadata,
                results: Vec::new(),
            },
        }
    }

    pub fn export(&self) -> &SurveyExport {
        &self.export
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.export).context("Failed to serialize survey results")
    }

    pub fn write(&self) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(&self.output_path, json).with_context(|| {
            format!(
                "Failed to write survey export: {}",
                self.output_path.display()
            )
        })?;
        print_success(&format!("Saved results to {}", self.output_path.display()));
        Ok(())
    }
}

impl ReportSink for JsonSink {
    fn emit(&mut self, result: &AnalysisResult) -> Result<()> {
        self.export.results.push(ExportEntry {
            title: result.title(),
            chart: result.chart_kind(),
            result: result.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.write()
    }
}

/// Derive the export path next to the input: `data.csv` → `data_survey.json`
pub fn default_export_path(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("manifest");
    parent.join(format!("{}_survey.json", stem))
}
