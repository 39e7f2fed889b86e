//! @ai:module:intent Confusion-matrix accumulation and metric computation
//! @ai:module:layer application
//! @ai:module:public_api Scorer, ScorerTrait, ConfusionTally, CategoryTally
//! @ai:module:stateless true

use crate::dataset::{GoldRecord, PredictionSet};
use crate::evaluator::{classify, Outcome};
use crate::metrics::types::{
    ratio, round_to, CategoryStats, CorrectionStats, DetectionStats, ScoreReport,
};
use std::collections::BTreeMap;

const RATIO_PLACES: usize = 4;
const CATEGORY_RATIO_PLACES: usize = 3;

/// @ai:intent Trait for scoring predictions against a gold list
pub trait ScorerTrait: Send + Sync {
    /// @ai:intent Score predictions against gold records
    fn score(&self, gold: &[GoldRecord], predictions: &PredictionSet) -> ScoreReport;
}

/// @ai:intent Error-example counts for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTally {
    pub detected: usize,
    pub missed: usize,
    pub exact_match: usize,
}

impl CategoryTally {
    fn merge(self, other: Self) -> Self {
        Self {
            detected: self.detected + other.detected,
            missed: self.missed + other.missed,
            exact_match: self.exact_match + other.exact_match,
        }
    }

    fn to_stats(self) -> CategoryStats {
        let total = self.detected + self.missed;

        CategoryStats {
            total,
            detected: self.detected,
            recall: round_to(ratio(self.detected, total), CATEGORY_RATIO_PLACES),
            exact_match: self.exact_match,
            correction_accuracy: round_to(
                ratio(self.exact_match, self.detected),
                CATEGORY_RATIO_PLACES,
            ),
        }
    }
}

/// @ai:intent Raw counts from classifying gold records
/// @ai:effects pure
///
/// `merge` is associative and commutative, so tallies of any partition of the
/// gold list combine to the tally of the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfusionTally {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_negatives: usize,
    pub exact_matches: usize,
    pub categories: BTreeMap<String, CategoryTally>,
}

impl ConfusionTally {
    /// @ai:intent Count one classified record
    /// @ai:post exactly one of TP/FP/FN/TN is incremented
    /// @ai:effects state:write
    pub fn record(&mut self, category: &str, outcome: Outcome) {
        match outcome {
            Outcome::TruePositive { exact_match } => {
                self.true_positives += 1;
                let cat = self.categories.entry(category.to_string()).or_default();
                cat.detected += 1;

                if exact_match {
                    self.exact_matches += 1;
                    cat.exact_match += 1;
                }
            }
            Outcome::FalseNegative => {
                self.false_negatives += 1;
                self.categories
                    .entry(category.to_string())
                    .or_default()
                    .missed += 1;
            }
            Outcome::FalsePositive => self.false_positives += 1,
            Outcome::TrueNegative => self.true_negatives += 1,
        }
    }

    /// @ai:intent Combine two tallies
    /// @ai:effects pure
    pub fn merge(mut self, other: Self) -> Self {
        self.true_positives += other.true_positives;
        self.false_positives += other.false_positives;
        self.false_negatives += other.false_negatives;
        self.true_negatives += other.true_negatives;
        self.exact_matches += other.exact_matches;

        for (category, tally) in other.categories {
            let entry = self.categories.entry(category).or_default();
            *entry = entry.merge(tally);
        }

        self
    }

    /// Records counted so far.
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.false_negatives + self.true_negatives
    }

    /// @ai:intent Derive the report; ratios default to 0.0 on empty denominators
    /// @ai:effects pure
    pub fn into_report(self, total_predictions: usize) -> ScoreReport {
        let tp = self.true_positives;
        let fp = self.false_positives;
        let fn_ = self.false_negatives;
        let tn = self.true_negatives;

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        // Correction accuracy is measured over detected errors only
        let correction_accuracy = ratio(self.exact_matches, tp);
        let false_positive_rate = ratio(fp, fp + tn);
        let total_evaluated = self.total();

        let per_category = self
            .categories
            .into_iter()
            .map(|(category, tally)| (category, tally.to_stats()))
            .collect();

        ScoreReport {
            detection: DetectionStats {
                true_positives: tp,
                false_positives: fp,
                false_negatives: fn_,
                true_negatives: tn,
                precision: round_to(precision, RATIO_PLACES),
                recall: round_to(recall, RATIO_PLACES),
                f1: round_to(f1, RATIO_PLACES),
            },
            correction: CorrectionStats {
                attempted: tp,
                exact_match: self.exact_matches,
                accuracy: round_to(correction_accuracy, RATIO_PLACES),
            },
            false_positive_rate: round_to(false_positive_rate, RATIO_PLACES),
            total_evaluated,
            total_predictions,
            per_category,
        }
    }
}

/// @ai:intent Scores predictions with a single fold over the gold records
pub struct Scorer;

impl Scorer {
    /// @ai:intent Create a new scorer
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Classify every gold record and accumulate the counts
    /// @ai:effects pure
    pub fn tally(gold: &[GoldRecord], predictions: &PredictionSet) -> ConfusionTally {
        gold.iter().fold(ConfusionTally::default(), |mut tally, record| {
            let outcome = classify(record, predictions.get(&record.id));
            tally.record(&record.category, outcome);
            tally
        })
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScorerTrait for Scorer {
    /// @ai:intent Score predictions against gold records
    /// @ai:effects pure
    fn score(&self, gold: &[GoldRecord], predictions: &PredictionSet) -> ScoreReport {
        let tally = Self::tally(gold, predictions);
        tracing::debug!(
            tp = tally.true_positives,
            fp = tally.false_positives,
            fn_ = tally.false_negatives,
            tn = tally.true_negatives,
            "Scored {} records",
            tally.total()
        );
        tally.into_report(predictions.len())
    }
}
