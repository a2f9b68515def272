//! Shared test utilities
//!
//! Common fixtures used across test modules. Only compiled in test builds.

use crate::report::metrics::{MetricRecord, MetricSet};

/// A results file with all three manuscript groups, BBBP carrying an extra
/// ROC-AUC record.
pub const SAMPLE_RESULTS: &str = r#"{
  "internal": [
    {"label": "PR-AUC", "value": 0.915, "delta": "+0.102"},
    {"label": "ROC-AUC", "value": 0.864}
  ],
  "bbbp": [
    {"label": "PR-AUC", "value": 0.950, "delta": "+0.155", "p_value": "< 0.001"},
    {"label": "ROC-AUC", "value": 0.921}
  ],
  "oos": [
    {"label": "PR-AUC", "value": 0.944, "delta": "+0.185", "p-value": "< 0.001"}
  ]
}"#;

/// Build a metric set from `(group, records)` pairs
#[must_use]
pub fn make_set(groups: Vec<(&str, Vec<MetricRecord>)>) -> MetricSet {
    let mut set = MetricSet::default();
    for (key, records) in groups {
        set.insert(key, records);
    }
    set
}
