//! Terminal rendering of analysis results

use std::collections::BTreeSet;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use super::chart::ReportSink;
use crate::pipeline::{AnalysisResult, DistributionStats};
use crate::utils::{print_banner, print_completion, print_info, print_step_header};

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|name| Cell::new(name).add_attribute(Attribute::Bold))
        .collect()
}

fn number(value: f64) -> Cell {
    Cell::new(format!("{:.2}", value)).set_alignment(CellAlignment::Right)
}

fn percent(rate: f64) -> Cell {
    let color = if rate >= 0.5 {
        Color::Green
    } else if rate >= 0.3 {
        Color::Yellow
    } else {
        Color::Red
    };
    Cell::new(format!("{:.1}%", rate * 100.0))
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

fn stats_cells(stats: Option<&DistributionStats>) -> Vec<Cell> {
    match stats {
        Some(s) => vec![
            Cell::new(s.count),
            number(s.min),
            number(s.q1),
            number(s.median),
            number(s.q3),
            number(s.max),
        ],
        None => (0..6).map(|_| Cell::new("-")).collect(),
    }
}

/// Build the table for a single result
pub fn render_table(result: &AnalysisResult) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    match result {
        AnalysisResult::SurvivalRates { group, rates } => {
            table.set_header(header(&[group.as_str(), "Survival rate"]));
            for (label, rate) in rates {
                table.add_row(vec![Cell::new(label), percent(*rate)]);
            }
        }
        AnalysisResult::SurvivalCounts { group, counts } => {
            table.set_header(header(&[group.as_str(), "Survived", "Died", "Total"]));
            for (label, c) in counts {
                table.add_row(vec![
                    Cell::new(label),
                    Cell::new(c.survived).fg(Color::Green),
                    Cell::new(c.died).fg(Color::Red),
                    Cell::new(c.total()).add_attribute(Attribute::Bold),
                ]);
            }
        }
        AnalysisResult::Crosstab(crosstab) => {
            let mut names = vec![crosstab.row_key.as_str()];
            names.extend(crosstab.column_labels.iter().map(String::as_str));
            table.set_header(header(&names));
            for (label, row) in crosstab.row_labels.iter().zip(&crosstab.cells) {
                let mut cells = vec![Cell::new(label)];
                cells.extend(row.iter().map(|v| number(*v)));
                table.add_row(cells);
            }
        }
        AnalysisResult::FareSummaries { group, summaries } => {
            table.set_header(header(&[
                group.as_str(),
                "View",
                "Count",
                "Min",
                "Q1",
                "Median",
                "Q3",
                "Max",
                "Excluded",
            ]));
            for (label, summary) in summaries {
                let mut full = vec![Cell::new(label), Cell::new("with outliers")];
                full.extend(stats_cells(Some(&summary.with_outliers)));
                full.push(Cell::new(""));
                table.add_row(full);

                let mut trimmed = vec![Cell::new(""), Cell::new("no outliers")];
                trimmed.extend(stats_cells(summary.without_outliers.as_ref()));
                trimmed.push(Cell::new(summary.excluded).fg(if summary.excluded == 0 {
                    Color::White
                } else {
                    Color::Yellow
                }));
                table.add_row(trimmed);
            }
        }
        AnalysisResult::MedianGrid {
            outer, inner, grid, ..
        } => {
            let inner_labels: BTreeSet<&String> =
                grid.values().flat_map(|row| row.keys()).collect();
            let corner = format!("{} \\ {}", outer, inner);
            let mut names = vec![corner.as_str()];
            names.extend(inner_labels.iter().map(|l| l.as_str()));
            table.set_header(header(&names));
            for (label, row) in grid {
                let mut cells = vec![Cell::new(label)];
                cells.extend(inner_labels.iter().map(|inner| match row.get(*inner) {
                    Some(median) => number(*median),
                    None => Cell::new("-"),
                }));
                table.add_row(cells);
            }
        }
        AnalysisResult::GroupMeans { group, value, means } => {
            let column = format!("Mean {}", value);
            table.set_header(header(&[group.as_str(), column.as_str()]));
            for (label, mean) in means {
                table.add_row(vec![Cell::new(label), number(*mean)]);
            }
        }
        AnalysisResult::Histograms {
            group, histograms, ..
        } => {
            let group = group.as_deref().unwrap_or("Group");
            table.set_header(header(&[group, "Bin", "Count", "Density"]));
            for (label, histogram) in histograms {
                for (i, count) in histogram.counts.iter().enumerate() {
                    let density = histogram
                        .density
                        .as_ref()
                        .and_then(|d| d.get(i))
                        .map_or_else(|| Cell::new("-"), |d| Cell::new(format!("{:.4}", d)));
                    table.add_row(vec![
                        Cell::new(if i == 0 { label.as_str() } else { "" }),
                        Cell::new(format!(
                            "{:.0}–{:.0}",
                            histogram.edges[i],
                            histogram.edges[i + 1]
                        )),
                        Cell::new(count),
                        density,
                    ]);
                }
            }
        }
        AnalysisResult::EstimatedAges { group, estimated } => {
            table.set_header(header(&[group.as_str(), "Estimated ages", "Scaled"]));
            for (label, count) in &estimated.counts {
                let scaled = estimated.normalized.get(label).copied().unwrap_or(1.0);
                table.add_row(vec![Cell::new(label), Cell::new(count), number(scaled)]);
            }
        }
        AnalysisResult::Scatter { x, y, points } => {
            table.set_header(header(&["Points", x.as_str(), y.as_str()]));
            let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
            let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
            let (x_stats, y_stats) = (DistributionStats::new(&xs), DistributionStats::new(&ys));
            table.add_row(vec![
                Cell::new(points.len()),
                Cell::new(
                    x_stats.map_or_else(|| "-".to_string(), |s| format!("{:.1}–{:.1}", s.min, s.max)),
                ),
                Cell::new(
                    y_stats.map_or_else(|| "-".to_string(), |s| format!("{:.1}–{:.1}", s.min, s.max)),
                ),
            ]);
        }
    }

    table
}

/// Prints each result as a numbered, indented table
#[derive(Debug, Default)]
pub struct TableSink {
    emitted: usize,
}

impl TableSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl ReportSink for TableSink {
    fn emit(&mut self, result: &AnalysisResult) -> Result<()> {
        if self.emitted == 0 {
            print_banner(env!("CARGO_PKG_VERSION"));
        }
        self.emitted += 1;
        print_step_header(self.emitted, &result.title());
        println!(
            "    {} {}",
            style("chart:").dim(),
            style(result.chart_kind()).cyan()
        );

        let table = render_table(result);
        if table.row_iter().next().is_none() {
            print_info("No groups to show");
            return Ok(());
        }

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        print_completion(self.emitted);
        Ok(())
    }
}
