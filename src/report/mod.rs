//! @ai:module:intent Report generation for scorecards
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, JsonReporter, MarkdownReporter, ChartGenerator, render_summary

pub mod charts;
pub mod console;
pub mod json_report;
pub mod markdown_report;

pub use charts::{ChartGenerator, ChartGeneratorTrait};
pub use console::render_summary;
pub use json_report::{find_scorecards, load_scorecard, JsonReporter, JsonReporterTrait, SCORECARD_SUFFIX};
pub use markdown_report::{percent, MarkdownReporter, MarkdownReporterTrait};

use crate::metrics::Scorecard;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    json: JsonReporter,
    markdown: MarkdownReporter,
    charts: ChartGenerator,
}

impl ReportGenerator {
    /// @ai:intent Create a new report generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            json: JsonReporter::new(),
            markdown: MarkdownReporter::new(),
            charts: ChartGenerator::new(),
        }
    }

    /// @ai:intent Write scorecard.json, scorecard.md and the category chart into `output_dir`
    /// @ai:effects fs:write
    pub fn generate_all(&self, scorecard: &Scorecard, output_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create report directory: {}", output_dir.display()))?;

        self.json
            .generate(scorecard, &output_dir.join("scorecard.json"))?;
        self.markdown
            .generate(scorecard, &output_dir.join("scorecard.md"))?;
        self.charts.generate_all(scorecard, output_dir)?;

        tracing::info!("Reports generated in {}", output_dir.display());
        Ok(())
    }

    /// @ai:intent Render `<stem>.md` and `<stem>_by_category.png` for a saved scorecard file
    /// @ai:pre source is a `*_score.json` path
    /// @ai:post files land next to `source`, or in `output_dir` when given
    /// @ai:effects fs:write
    pub fn render_beside(
        &self,
        scorecard: &Scorecard,
        source: &Path,
        output_dir: Option<&Path>,
    ) -> Result<Vec<PathBuf>> {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .with_context(|| format!("Invalid scorecard file name: {}", source.display()))?;
        let dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create report directory: {}", dir.display()))?;
        }

        let markdown_path = dir.join(format!("{}.md", stem));
        self.markdown.generate(scorecard, &markdown_path)?;
        let mut written = vec![markdown_path];

        let chart_path = dir.join(format!("{}_{}", stem, charts::CATEGORY_CHART));
        if self.charts.category_chart(scorecard, &chart_path)? {
            written.push(chart_path);
        }

        tracing::info!("Rendered {} ({} files)", source.display(), written.len());
        Ok(written)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{CategoryStats, ScoreReport};
    use tempfile::TempDir;

    #[test]
    fn test_generate_all_writes_every_report() {
        let mut report = ScoreReport::default();
        report.per_category.insert(
            "sandhi".to_string(),
            CategoryStats {
                total: 1,
                detected: 1,
                recall: 1.0,
                exact_match: 0,
                correction_accuracy: 0.0,
            },
        );

        let temp = TempDir::new().unwrap();
        let out = temp.path().join("reports");
        ReportGenerator::new()
            .generate_all(&Scorecard::offline(report), &out)
            .unwrap();

        assert!(out.join("scorecard.json").exists());
        assert!(out.join("scorecard.md").exists());
        assert!(out.join(charts::CATEGORY_CHART).exists());
    }

    #[test]
    fn test_render_beside_uses_source_stem() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("gpt-4o_20260101_120000_score.json");
        let card = Scorecard::offline(ScoreReport::default());
        JsonReporter::new().generate(&card, &source).unwrap();

        let written = ReportGenerator::new()
            .render_beside(&card, &source, None)
            .unwrap();

        // no categories, so no chart
        assert_eq!(
            written,
            vec![temp.path().join("gpt-4o_20260101_120000_score.md")]
        );
        assert!(written[0].exists());
    }

    #[test]
    fn test_render_beside_into_output_dir() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("rendered");
        let card = Scorecard::offline(ScoreReport::default());

        let written = ReportGenerator::new()
            .render_beside(&card, Path::new("results/run_score.json"), Some(out.as_path()))
            .unwrap();

        assert_eq!(written, vec![out.join("run_score.md")]);
        assert!(out.join("run_score.md").exists());
    }
}
