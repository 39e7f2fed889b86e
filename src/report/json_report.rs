//! @ai:module:intent JSON scorecard output
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter, JsonReporterTrait, load_scorecard, find_scorecards
//! @ai:module:stateless true

use crate::metrics::Scorecard;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const SCORECARD_SUFFIX: &str = "_score.json";

/// @ai:intent Trait for JSON scorecard output
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Render a scorecard as pretty JSON
    fn render(&self, scorecard: &Scorecard) -> Result<String>;

    /// @ai:intent Write a scorecard to a file
    fn generate(&self, scorecard: &Scorecard, output_path: &Path) -> Result<()>;
}

/// @ai:intent Writes scorecards as indented UTF-8 JSON
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:effects pure
    fn render(&self, scorecard: &Scorecard) -> Result<String> {
        serde_json::to_string_pretty(scorecard).context("Failed to serialize scorecard")
    }

    /// @ai:effects fs:write
    fn generate(&self, scorecard: &Scorecard, output_path: &Path) -> Result<()> {
        let json = self.render(scorecard)?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write scorecard: {}", output_path.display()))?;
        Ok(())
    }
}

/// @ai:intent Read a scorecard saved by `score` or `run`
/// @ai:effects fs:read
pub fn load_scorecard(path: &Path) -> Result<Scorecard> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scorecard: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse scorecard: {}", path.display()))
}

/// @ai:intent Find saved scorecards under a results directory, sorted by path
/// @ai:effects fs:read
pub fn find_scorecards(dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .map(|name| name.ends_with(SCORECARD_SUFFIX))
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{CategoryStats, RunMetadata, ScoreReport};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn scorecard() -> Scorecard {
        let mut report = ScoreReport {
            total_evaluated: 2,
            total_predictions: 2,
            ..Default::default()
        };
        report.per_category.insert(
            "சந்தி".to_string(),
            CategoryStats {
                total: 1,
                detected: 1,
                recall: 1.0,
                exact_match: 1,
                correction_accuracy: 1.0,
            },
        );

        Scorecard::with_metadata(
            report,
            RunMetadata {
                model: "gpt-4o-mini".to_string(),
                provider: "openai".to_string(),
                split: "test".to_string(),
                total_examples: 2,
                errors: 0,
                elapsed_seconds: 1.5,
                timestamp: "20260101_120000".to_string(),
            },
        )
    }

    #[test]
    fn test_generate_and_reload() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("gpt-4o-mini_20260101_120000_score.json");

        reporter.generate(&scorecard(), &output).unwrap();
        let loaded = load_scorecard(&output).unwrap();

        assert_eq!(loaded, scorecard());
    }

    #[test]
    fn test_render_keeps_tamil_text_and_flat_layout() {
        let json = JsonReporter::new().render(&scorecard()).unwrap();

        assert!(json.contains("\"சந்தி\""));
        assert!(json.contains("\"false_positive_rate\""));
        assert!(json.contains("\"metadata\""));
        assert!(!json.contains("\"report\""));
    }

    #[test]
    fn test_offline_scorecard_has_no_metadata_key() {
        let card = Scorecard::offline(ScoreReport::default());
        let json = JsonReporter::new().render(&card).unwrap();
        assert!(!json.contains("metadata"));
    }

    #[test]
    fn test_find_scorecards_walks_subdirectories() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("older");
        std::fs::create_dir_all(&nested).unwrap();

        std::fs::write(temp.path().join("gpt-4o_20260101_120000_score.json"), "{}").unwrap();
        std::fs::write(temp.path().join("gpt-4o_20260101_120000.jsonl"), "").unwrap();
        std::fs::write(nested.join("gemini-2-0-flash_20251201_080000_score.json"), "{}").unwrap();

        let found = find_scorecards(temp.path());
        assert_eq!(
            found,
            vec![
                temp.path().join("gpt-4o_20260101_120000_score.json"),
                nested.join("gemini-2-0-flash_20251201_080000_score.json"),
            ]
        );
    }

    #[test]
    fn test_load_scorecard_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken_score.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = format!("{:#}", load_scorecard(&path).unwrap_err());
        assert!(err.contains("broken_score.json"));
    }
}
