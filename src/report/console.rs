//! @ai:module:intent Plain-text scorecard summary for the terminal
//! @ai:module:layer presentation
//! @ai:module:public_api render_summary
//! @ai:module:stateless true

use crate::metrics::Scorecard;
use crate::report::markdown_report::percent;
use anyhow::{Context, Result};
use std::fmt::Write as FmtWrite;

/// @ai:intent Render the console summary printed after `score` and `run`
/// @ai:effects pure
pub fn render_summary(scorecard: &Scorecard) -> Result<String> {
    let mut out = String::new();
    write_summary(&mut out, scorecard).context("Failed to format console summary")?;
    Ok(out)
}

fn write_summary(out: &mut String, scorecard: &Scorecard) -> std::fmt::Result {
    let report = &scorecard.report;
    let det = &report.detection;
    let cor = &report.correction;
    let rule = "=".repeat(60);

    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "TAMILNADAI EVALUATION RESULTS")?;
    writeln!(out, "{}", rule)?;

    if let Some(meta) = &scorecard.metadata {
        writeln!(out)?;
        writeln!(out, "Model: {} ({})  Split: {}", meta.model, meta.provider, meta.split)?;
        writeln!(out, "Failed calls: {}  Elapsed: {:.1}s", meta.errors, meta.elapsed_seconds)?;
    }

    writeln!(out)?;
    writeln!(out, "Total evaluated: {}", report.total_evaluated)?;
    writeln!(out, "Total predictions: {}", report.total_predictions)?;

    writeln!(out)?;
    writeln!(out, "--- Detection ---")?;
    writeln!(out, "  Precision:  {}", percent(det.precision, 2))?;
    writeln!(out, "  Recall:     {}", percent(det.recall, 2))?;
    writeln!(out, "  F1:         {}", percent(det.f1, 2))?;
    writeln!(
        out,
        "  TP: {}  FP: {}  FN: {}  TN: {}",
        det.true_positives, det.false_positives, det.false_negatives, det.true_negatives
    )?;

    writeln!(out)?;
    writeln!(out, "--- Correction ---")?;
    writeln!(out, "  Exact match: {} / {}", cor.exact_match, cor.attempted)?;
    writeln!(out, "  Accuracy:    {}", percent(cor.accuracy, 2))?;

    writeln!(out)?;
    writeln!(out, "--- False Positive Rate ---")?;
    writeln!(out, "  FPR: {}", percent(report.false_positive_rate, 2))?;

    if !report.per_category.is_empty() {
        writeln!(out)?;
        writeln!(out, "--- Per Category ---")?;
        writeln!(
            out,
            "  {:<25} {:>5} {:>4} {:>7} {:>7} {:>7}",
            "Category", "Total", "Det", "Recall", "ExMatch", "CorAcc"
        )?;
        writeln!(
            out,
            "  {} {} {} {} {} {}",
            "-".repeat(25),
            "-".repeat(5),
            "-".repeat(4),
            "-".repeat(7),
            "-".repeat(7),
            "-".repeat(7)
        )?;
        for (category, stats) in &report.per_category {
            writeln!(
                out,
                "  {:<25} {:>5} {:>4} {:>7} {:>7} {:>7}",
                category,
                stats.total,
                stats.detected,
                percent(stats.recall, 1),
                stats.exact_match,
                percent(stats.correction_accuracy, 1)
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{CategoryStats, ScoreReport};

    #[test]
    fn test_summary_sections() {
        let mut report = ScoreReport::default();
        report.detection.true_positives = 1;
        report.detection.precision = 1.0;
        report.per_category.insert(
            "spacing".to_string(),
            CategoryStats {
                total: 2,
                detected: 1,
                recall: 0.5,
                exact_match: 1,
                correction_accuracy: 1.0,
            },
        );

        let text = render_summary(&Scorecard::offline(report)).unwrap();

        assert!(text.contains("TAMILNADAI EVALUATION RESULTS"));
        assert!(text.contains("  Precision:  100.00%"));
        assert!(text.contains("TP: 1  FP: 0  FN: 0  TN: 0"));
        assert!(text.contains("--- Per Category ---"));
        assert!(text.contains("spacing"));
        assert!(text.contains("  50.0%"));
        assert!(!text.contains("Model:"));
    }

    #[test]
    fn test_summary_with_run_metadata() {
        let card = Scorecard::with_metadata(
            ScoreReport::default(),
            crate::metrics::RunMetadata {
                model: "gpt-4o".to_string(),
                provider: "openai".to_string(),
                split: "test".to_string(),
                total_examples: 0,
                errors: 2,
                elapsed_seconds: 3.4,
                timestamp: "20260101_120000".to_string(),
            },
        );

        let text = render_summary(&card).unwrap();
        assert!(text.contains("Model: gpt-4o (openai)  Split: test"));
        assert!(text.contains("Failed calls: 2  Elapsed: 3.4s"));
    }

    #[test]
    fn test_summary_without_categories() {
        let text = render_summary(&Scorecard::offline(ScoreReport::default())).unwrap();
        assert!(text.contains("FPR: 0.00%"));
        assert!(!text.contains("Per Category"));
    }
}
