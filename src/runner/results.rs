//! @ai:module:intent File layout of one evaluation run under the results directory
//! @ai:module:layer infrastructure
//! @ai:module:public_api RunFiles, run_timestamp

use crate::report::SCORECARD_SUFFIX;
use crate::runner::providers::model_short_name;
use std::path::{Path, PathBuf};

/// Timestamp format shared by file names and `RunMetadata::timestamp`
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// @ai:intent Local time formatted for run file names
/// @ai:effects time
pub fn run_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// @ai:intent Predictions and scorecard paths for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFiles {
    pub predictions: PathBuf,
    pub scorecard: PathBuf,
}

impl RunFiles {
    /// @ai:intent `<dir>/<model-short>_<timestamp>.jsonl` and `..._score.json`
    /// @ai:effects pure
    pub fn new(results_dir: &Path, model: &str, timestamp: &str) -> Self {
        let base = format!("{}_{}", model_short_name(model), timestamp);
        Self {
            predictions: results_dir.join(format!("{}.jsonl", base)),
            scorecard: results_dir.join(format!("{}{}", base, SCORECARD_SUFFIX)),
        }
    }
}
