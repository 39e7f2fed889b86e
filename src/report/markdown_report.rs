//! @ai:module:intent Markdown scorecard output
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter, MarkdownReporterTrait, percent
//! @ai:module:stateless true

use crate::metrics::{RunMetadata, ScoreReport, Scorecard};
use anyhow::{Context, Result};
use std::fmt::{self, Write as FmtWrite};
use std::path::Path;

/// @ai:intent Trait for Markdown scorecard output
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Render a scorecard as a Markdown document
    fn render(&self, scorecard: &Scorecard) -> Result<String>;

    /// @ai:intent Write a scorecard to a Markdown file
    fn generate(&self, scorecard: &Scorecard, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates Markdown reports from scorecards
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    fn write_header(out: &mut String, metadata: Option<&RunMetadata>) -> fmt::Result {
        writeln!(out, "# TamilNadai Evaluation Results")?;
        writeln!(out)?;

        match metadata {
            Some(meta) => {
                writeln!(out, "**Model:** {} ({})", meta.model, meta.provider)?;
                writeln!(out, "**Split:** {}", meta.split)?;
                writeln!(out, "**Date:** {}", meta.timestamp)?;
                writeln!(
                    out,
                    "**Examples:** {} ({} failed calls, {:.1}s)",
                    meta.total_examples, meta.errors, meta.elapsed_seconds
                )?;
            }
            None => writeln!(out, "Scored offline from a predictions file.")?,
        }

        writeln!(out)
    }

    fn write_detection(out: &mut String, report: &ScoreReport) -> fmt::Result {
        let det = &report.detection;

        writeln!(out, "## Detection")?;
        writeln!(out)?;
        writeln!(out, "| Metric | Value |")?;
        writeln!(out, "|--------|-------|")?;
        writeln!(out, "| Precision | {} |", percent(det.precision, 2))?;
        writeln!(out, "| Recall | {} |", percent(det.recall, 2))?;
        writeln!(out, "| F1 | {} |", percent(det.f1, 2))?;
        writeln!(out)?;
        writeln!(out, "| TP | FP | FN | TN |")?;
        writeln!(out, "|----|----|----|----|")?;
        writeln!(
            out,
            "| {} | {} | {} | {} |",
            det.true_positives, det.false_positives, det.false_negatives, det.true_negatives
        )?;
        writeln!(out)
    }

    fn write_correction(out: &mut String, report: &ScoreReport) -> fmt::Result {
        writeln!(out, "## Correction")?;
        writeln!(out)?;
        writeln!(
            out,
            "Exact match: {} / {} ({})",
            report.correction.exact_match,
            report.correction.attempted,
            percent(report.correction.accuracy, 2)
        )?;
        writeln!(out)?;
        writeln!(out, "## False Positive Rate")?;
        writeln!(out)?;
        writeln!(
            out,
            "{} of {} evaluated examples ({} predictions supplied)",
            percent(report.false_positive_rate, 2),
            report.total_evaluated,
            report.total_predictions
        )?;
        writeln!(out)
    }

    fn write_categories(out: &mut String, report: &ScoreReport) -> fmt::Result {
        if report.per_category.is_empty() {
            return Ok(());
        }

        writeln!(out, "## Per Category")?;
        writeln!(out)?;
        writeln!(out, "| Category | Total | Detected | Recall | Exact | Correction Accuracy |")?;
        writeln!(out, "|----------|-------|----------|--------|-------|---------------------|")?;

        for (category, stats) in &report.per_category {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                category,
                stats.total,
                stats.detected,
                percent(stats.recall, 1),
                stats.exact_match,
                percent(stats.correction_accuracy, 1)
            )?;
        }

        writeln!(out)
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:effects pure
    fn render(&self, scorecard: &Scorecard) -> Result<String> {
        let mut out = String::new();
        let report = &scorecard.report;

        Self::write_header(&mut out, scorecard.metadata.as_ref())
            .and_then(|_| Self::write_detection(&mut out, report))
            .and_then(|_| Self::write_correction(&mut out, report))
            .and_then(|_| Self::write_categories(&mut out, report))
            .context("Failed to format Markdown report")?;

        Ok(out)
    }

    /// @ai:effects fs:write
    fn generate(&self, scorecard: &Scorecard, output_path: &Path) -> Result<()> {
        let markdown = self.render(scorecard)?;
        std::fs::write(output_path, markdown)
            .with_context(|| format!("Failed to write report: {}", output_path.display()))?;
        Ok(())
    }
}

/// @ai:intent Format a 0..1 ratio as a percentage
/// @ai:effects pure
pub fn percent(value: f64, places: usize) -> String {
    format!("{:.*}%", places, value * 100.0)
}
