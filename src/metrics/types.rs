//! @ai:module:intent Metric types for benchmark scorecards
//! @ai:module:layer domain
//! @ai:module:public_api ScoreReport, DetectionStats, CorrectionStats, CategoryStats, RunMetadata, Scorecard
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// @ai:intent Detection confusion matrix and derived ratios
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionStats {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_negatives: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// @ai:intent Exactness of corrections among detected errors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrectionStats {
    /// Error examples the model changed (true positives)
    pub attempted: usize,
    pub exact_match: usize,
    pub accuracy: f64,
}

/// @ai:intent Recall and correction accuracy for one category of error examples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub total: usize,
    pub detected: usize,
    pub recall: f64,
    pub exact_match: usize,
    pub correction_accuracy: f64,
}

/// @ai:intent Result of one scoring pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub detection: DetectionStats,
    pub correction: CorrectionStats,
    pub false_positive_rate: f64,
    pub total_evaluated: usize,
    pub total_predictions: usize,
    pub per_category: BTreeMap<String, CategoryStats>,
}

/// @ai:intent Provenance of a scorecard produced by an evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub model: String,
    pub provider: String,
    pub split: String,
    pub total_examples: usize,
    /// Model calls that failed and were scored as empty output
    pub errors: usize,
    pub elapsed_seconds: f64,
    /// `YYYYmmdd_HHMMSS`, also used in result file names
    pub timestamp: String,
}

/// @ai:intent Score report plus optional run metadata, as saved to `*_score.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    #[serde(flatten)]
    pub report: ScoreReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RunMetadata>,
}

impl Scorecard {
    /// @ai:intent Wrap a report that came from offline scoring
    /// @ai:effects pure
    pub fn offline(report: ScoreReport) -> Self {
        Self {
            report,
            metadata: None,
        }
    }

    /// @ai:intent Wrap a report produced by an evaluation run
    /// @ai:effects pure
    pub fn with_metadata(report: ScoreReport, metadata: RunMetadata) -> Self {
        Self {
            report,
            metadata: Some(metadata),
        }
    }
}

/// @ai:intent Ratio with 0.0 for an empty denominator
/// @ai:effects pure
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// @ai:intent Round to a fixed number of decimal places, exact ties to the even digit
/// @ai:effects pure
///
/// The direction is decided by the exact stored value, not a scaled copy.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}
