//! @ai:module:intent Scoring and scorecard types
//! @ai:module:layer application
//! @ai:module:public_api Scorer, ScorerTrait, ConfusionTally, ScoreReport, Scorecard, RunMetadata

pub mod aggregator;
pub mod types;

pub use aggregator::{CategoryTally, ConfusionTally, Scorer, ScorerTrait};
pub use types::{
    ratio, round_to, CategoryStats, CorrectionStats, DetectionStats, RunMetadata, ScoreReport,
    Scorecard,
};
