//! @ai:module:intent Gold record and prediction types for the benchmark dataset
//! @ai:module:layer domain
//! @ai:module:public_api GoldRecord, Prediction, PredictionSet
//! @ai:module:stateless true

use crate::dataset::error::{DatasetError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Category assigned to records that do not carry one.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// @ai:intent One benchmark item with defaults already applied
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldRecord {
    pub id: String,
    pub is_error_example: bool,
    pub error_sentence: String,
    pub correct_sentence: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split: Option<String>,
    /// Provenance tier label, e.g. `tier1_grammar_xml`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub needs_review: bool,
}

impl GoldRecord {
    /// @ai:intent Build an error example (sentence with a known correction)
    /// @ai:effects pure
    pub fn error_example(id: &str, error_sentence: &str, correct_sentence: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            is_error_example: true,
            error_sentence: error_sentence.to_string(),
            correct_sentence: correct_sentence.to_string(),
            category: category.to_string(),
            split: None,
            origin: None,
            rule_id: None,
            error_type: None,
            needs_review: false,
        }
    }

    /// @ai:intent Build a correct example (no correction expected)
    /// @ai:effects pure
    pub fn correct_example(id: &str, correct_sentence: &str, category: &str) -> Self {
        Self {
            is_error_example: false,
            error_sentence: String::new(),
            ..Self::error_example(id, "", correct_sentence, category)
        }
    }

    /// @ai:intent Assign the dataset split
    /// @ai:effects pure
    pub fn with_split(mut self, split: &str) -> Self {
        self.split = Some(split.to_string());
        self
    }

    /// @ai:intent The sentence shown to the model
    /// @ai:effects pure
    pub fn input_sentence(&self) -> &str {
        if self.is_error_example {
            &self.error_sentence
        } else {
            &self.correct_sentence
        }
    }

    /// @ai:intent The expected correction, empty when none is needed
    /// @ai:effects pure
    pub fn gold_target(&self) -> &str {
        if self.is_error_example {
            &self.correct_sentence
        } else {
            ""
        }
    }
}

/// @ai:intent Gold record as it appears on disk, every field optional
#[derive(Debug, Deserialize)]
pub(crate) struct RawGoldRecord {
    id: Option<String>,
    is_error_example: Option<bool>,
    error_sentence: Option<String>,
    correct_sentence: Option<String>,
    category: Option<String>,
    split: Option<String>,
    origin: Option<String>,
    rule_id: Option<String>,
    error_type: Option<String>,
    needs_review: Option<bool>,
}

impl RawGoldRecord {
    /// @ai:intent Apply defaults and reject records the scorer cannot use
    /// @ai:effects pure
    pub(crate) fn into_record(self, path: &Path, line: usize) -> Result<GoldRecord> {
        let id = self.id.ok_or_else(|| DatasetError::MissingField {
            path: path.to_path_buf(),
            line,
            field: "id",
        })?;

        if self.error_sentence.is_none() && self.correct_sentence.is_none() {
            return Err(DatasetError::MissingSentence {
                path: path.to_path_buf(),
                line,
                id,
            });
        }

        Ok(GoldRecord {
            id,
            is_error_example: self.is_error_example.unwrap_or(true),
            error_sentence: self.error_sentence.unwrap_or_default(),
            correct_sentence: self.correct_sentence.unwrap_or_default(),
            category: self
                .category
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
            split: self.split,
            origin: self.origin,
            rule_id: self.rule_id,
            error_type: self.error_type,
            needs_review: self.needs_review.unwrap_or(false),
        })
    }
}

/// @ai:intent A model's raw output for one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: String,
    #[serde(default)]
    pub model_output: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPrediction {
    id: Option<String>,
    model_output: Option<String>,
}

impl RawPrediction {
    pub(crate) fn into_prediction(self, path: &Path, line: usize) -> Result<Prediction> {
        let id = self.id.ok_or_else(|| DatasetError::MissingField {
            path: path.to_path_buf(),
            line,
            field: "id",
        })?;

        Ok(Prediction {
            id,
            model_output: self.model_output.unwrap_or_default(),
        })
    }
}

/// @ai:intent Record id to model output; the last prediction for an id wins
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionSet {
    outputs: HashMap<String, String>,
}

impl PredictionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Insert or replace the output for an id
    /// @ai:effects state:write
    pub fn insert(&mut self, id: impl Into<String>, output: impl Into<String>) {
        self.outputs.insert(id.into(), output.into());
    }

    /// @ai:intent Output for an id, empty when the model gave none
    /// @ai:effects pure
    pub fn get(&self, id: &str) -> &str {
        self.outputs.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, id: &str) -> bool {
        self.outputs.contains_key(id)
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl FromIterator<Prediction> for PredictionSet {
    fn from_iter<I: IntoIterator<Item = Prediction>>(iter: I) -> Self {
        let mut set = Self::new();

        for prediction in iter {
            set.insert(prediction.id, prediction.model_output);
        }

        set
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for PredictionSet {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(id, output)| Prediction {
                id: id.to_string(),
                model_output: output.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_and_target_for_error_example() {
        let record = GoldRecord::error_example("g1", "அப்படி செய்தான்.", "அப்படிச் செய்தான்.", "sandhi");
        assert_eq!(record.input_sentence(), "அப்படி செய்தான்.");
        assert_eq!(record.gold_target(), "அப்படிச் செய்தான்.");
    }

    #[test]
    fn test_input_and_target_for_correct_example() {
        let record = GoldRecord::correct_example("g2", "அது கனமானது.", "sandhi");
        assert!(!record.is_error_example);
        assert_eq!(record.input_sentence(), "அது கனமானது.");
        assert_eq!(record.gold_target(), "");
    }

    #[test]
    fn test_raw_record_defaults() {
        let raw: RawGoldRecord =
            serde_json::from_str(r#"{"id": "tn_0001", "error_sentence": "x"}"#).unwrap();
        let record = raw.into_record(Path::new("gold.jsonl"), 1).unwrap();

        assert!(record.is_error_example);
        assert_eq!(record.correct_sentence, "");
        assert_eq!(record.category, UNKNOWN_CATEGORY);
        assert!(!record.needs_review);
    }

    #[test]
    fn test_prediction_set_missing_id_is_empty() {
        let set: PredictionSet = [("a", "one")].into_iter().collect();
        assert_eq!(set.get("a"), "one");
        assert_eq!(set.get("b"), "");
        assert!(!set.contains("b"));
    }

    #[test]
    fn test_prediction_set_last_duplicate_wins() {
        let set: PredictionSet = [("a", "first"), ("b", "x"), ("a", "second")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("a"), "second");
    }
}
