//! @ai:module:intent Composition statistics for a gold dataset
//! @ai:module:layer domain
//! @ai:module:public_api DatasetSummary
//! @ai:module:stateless true

use crate::dataset::record::GoldRecord;
use serde::Serialize;
use std::collections::BTreeMap;

const UNSPLIT: &str = "(none)";

/// @ai:intent Counts describing what a dataset file contains
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub total: usize,
    pub error_examples: usize,
    pub correct_examples: usize,
    pub needs_review: usize,
    pub by_split: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
    pub by_origin: BTreeMap<String, usize>,
    pub by_error_type: BTreeMap<String, usize>,
}

impl DatasetSummary {
    /// @ai:intent Tally records by split, category, origin and error type
    /// @ai:effects pure
    pub fn from_records(records: &[GoldRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            if record.is_error_example {
                summary.error_examples += 1;
            } else {
                summary.correct_examples += 1;
            }

            if record.needs_review {
                summary.needs_review += 1;
            }

            let split = record.split.as_deref().unwrap_or(UNSPLIT);
            *summary.by_split.entry(split.to_string()).or_default() += 1;
            *summary.by_category.entry(record.category.clone()).or_default() += 1;

            let origin = record.origin.as_deref().unwrap_or("unknown");
            *summary.by_origin.entry(origin.to_string()).or_default() += 1;

            if let Some(error_type) = record.error_type.as_deref().filter(|t| !t.is_empty()) {
                *summary.by_error_type.entry(error_type.to_string()).or_default() += 1;
            }
        }

        summary
    }

    /// @ai:intent Share of the dataset a count represents, in percent
    /// @ai:effects pure
    pub fn percent_of_total(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }

    /// @ai:intent Entries of a breakdown, most frequent first, ties by name
    /// @ai:effects pure
    pub fn most_common(counts: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summary_counts() {
        let mut flagged = GoldRecord::error_example("a", "x", "y", "sandhi").with_split("test");
        flagged.origin = Some("tier2_book_rules".to_string());
        flagged.error_type = Some("missing_doubling".to_string());
        flagged.needs_review = true;

        let records = vec![
            flagged,
            GoldRecord::error_example("b", "x", "y", "sandhi").with_split("validation"),
            GoldRecord::correct_example("c", "y", "joining").with_split("test"),
        ];

        let summary = DatasetSummary::from_records(&records);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.error_examples, 2);
        assert_eq!(summary.correct_examples, 1);
        assert_eq!(summary.needs_review, 1);
        assert_eq!(summary.by_split.get("test"), Some(&2));
        assert_eq!(summary.by_category.get("sandhi"), Some(&2));
        assert_eq!(summary.by_origin.get("unknown"), Some(&2));
        assert_eq!(summary.by_error_type.len(), 1);
    }

    #[test]
    fn test_most_common_orders_by_count_then_name() {
        let counts: BTreeMap<String, usize> = [("b", 2), ("a", 2), ("c", 5)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        assert_eq!(
            DatasetSummary::most_common(&counts),
            vec![("c", 5), ("a", 2), ("b", 2)]
        );
    }

    #[test]
    fn test_summary_serializes_breakdowns_by_name() {
        let records = vec![
            GoldRecord::error_example("a", "x", "y", "சந்தி").with_split("test"),
            GoldRecord::correct_example("b", "y", "joining"),
        ];

        let json = serde_json::to_value(DatasetSummary::from_records(&records)).unwrap();

        assert_eq!(json["total"], 2);
        assert_eq!(json["by_category"]["சந்தி"], 1);
        assert_eq!(json["by_split"]["(none)"], 1);
        assert_eq!(json["by_split"]["test"], 1);
        assert_eq!(json["by_error_type"], serde_json::json!({}));
    }

    #[test]
    fn test_percent_of_empty_dataset() {
        let summary = DatasetSummary::from_records(&[]);
        assert_eq!(summary.percent_of_total(0), 0.0);
    }
}
