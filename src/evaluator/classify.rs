//! @ai:module:intent Classify one model output against one gold record
//! @ai:module:layer domain
//! @ai:module:public_api Outcome, classify, model_says_error
//! @ai:module:stateless true

use crate::dataset::GoldRecord;
use crate::evaluator::normalize::same_sentence;

/// @ai:intent Confusion-matrix cell a record falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Error example the model changed; `exact_match` when it equals the gold correction
    TruePositive { exact_match: bool },
    FalseNegative,
    FalsePositive,
    TrueNegative,
}

impl Outcome {
    /// @ai:intent Convert outcome to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::TruePositive { .. } => "true_positive",
            Outcome::FalseNegative => "false_negative",
            Outcome::FalsePositive => "false_positive",
            Outcome::TrueNegative => "true_negative",
        }
    }

    pub fn is_exact_match(&self) -> bool {
        matches!(self, Outcome::TruePositive { exact_match: true })
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent A model flags an error only by returning changed, non-empty text
/// @ai:effects pure
pub fn model_says_error(input_sentence: &str, output: &str) -> bool {
    !output.is_empty() && !same_sentence(output, input_sentence)
}

/// @ai:intent Classify a model output for a gold record
/// @ai:effects pure
pub fn classify(record: &GoldRecord, output: &str) -> Outcome {
    let flagged = model_says_error(record.input_sentence(), output);

    match (record.is_error_example, flagged) {
        (true, true) => Outcome::TruePositive {
            exact_match: same_sentence(output, record.gold_target()),
        },
        (true, false) => Outcome::FalseNegative,
        (false, true) => Outcome::FalsePositive,
        (false, false) => Outcome::TrueNegative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_record() -> GoldRecord {
        GoldRecord::error_example("g1", "அப்படி செய்தான்.", "அப்படிச் செய்தான்.", "sandhi")
    }

    fn correct_record() -> GoldRecord {
        GoldRecord::correct_example("g2", "அது கனமானது.", "sandhi")
    }

    #[test]
    fn test_exact_correction_is_true_positive_match() {
        let outcome = classify(&error_record(), "அப்படிச் செய்தான்.");
        assert_eq!(outcome, Outcome::TruePositive { exact_match: true });
        assert!(outcome.is_exact_match());
    }

    #[test]
    fn test_spacing_differences_are_ignored() {
        let outcome = classify(&error_record(), "  அப்படிச்   செய்தான். ");
        assert_eq!(outcome, Outcome::TruePositive { exact_match: true });
    }

    #[test]
    fn test_echo_is_false_negative() {
        assert_eq!(classify(&error_record(), "அப்படி செய்தான்."), Outcome::FalseNegative);
        assert_eq!(classify(&error_record(), "அப்படி  செய்தான். "), Outcome::FalseNegative);
    }

    #[test]
    fn test_empty_output_is_no_error() {
        assert_eq!(classify(&error_record(), ""), Outcome::FalseNegative);
        assert_eq!(classify(&correct_record(), ""), Outcome::TrueNegative);
    }

    #[test]
    fn test_whitespace_only_output_counts_as_change() {
        // non-empty output that normalizes to "" differs from the input
        assert_eq!(
            classify(&error_record(), "   "),
            Outcome::TruePositive { exact_match: false }
        );
    }

    #[test]
    fn test_wrong_change_is_true_positive_without_match() {
        let outcome = classify(&error_record(), "அப்படியே செய்தான்.");
        assert_eq!(outcome, Outcome::TruePositive { exact_match: false });
    }

    #[test]
    fn test_correct_sentence_outcomes() {
        assert_eq!(classify(&correct_record(), "அது கனமானது."), Outcome::TrueNegative);
        assert_eq!(classify(&correct_record(), "அது கனமானதே."), Outcome::FalsePositive);
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::FalsePositive.to_string(), "false_positive");
        assert_eq!(Outcome::TruePositive { exact_match: false }.as_str(), "true_positive");
    }
}
