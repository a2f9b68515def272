//! Metric records and groups
//!
//! A [`MetricSet`] is the whole input to a render: named groups of
//! [`MetricRecord`]s, each group in display order.

use serde::{Deserialize, Serialize};

/// A metric value: either a number or preformatted text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Numeric score, formatted with the page precision
    Number(f64),
    /// Text shown verbatim (e.g. "n/a (not evaluated)")
    Text(String),
}

impl MetricValue {
    /// Format the value for display
    #[must_use]
    pub fn display(&self, precision: usize) -> String {
        match self {
            Self::Number(n) => format!("{n:.precision$}"),
            Self::Text(t) => t.clone(),
        }
    }

    /// Numeric view of the value, if it is a number
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Direction of a delta-versus-baseline string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaDirection {
    /// Improvement over the baseline
    Up,
    /// Regression against the baseline
    Down,
    /// No sign given
    Flat,
}

impl DeltaDirection {
    /// Classify a delta string by its leading sign
    #[must_use]
    pub fn of(delta: &str) -> Self {
        match delta.trim_start().chars().next() {
            Some('+') => Self::Up,
            Some('-' | '−') => Self::Down,
            _ => Self::Flat,
        }
    }

    /// Arrow glyph used by text surfaces
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Flat => "■",
        }
    }
}

/// A single named metric with optional decorations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Metric name within its group (e.g. "PR-AUC")
    #[serde(default)]
    pub label: String,
    /// The value. Absent values are rendered as placeholders, never as zero.
    #[serde(default)]
    pub value: Option<MetricValue>,
    /// Delta versus the single-task baseline (e.g. "+0.102")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
    /// Significance annotation (e.g. "< 0.001")
    #[serde(
        default,
        alias = "p-value",
        alias = "pvalue",
        skip_serializing_if = "Option::is_none"
    )]
    pub p_value: Option<String>,
}

impl MetricRecord {
    /// Create a record with a value and no decorations
    #[must_use]
    pub fn new(label: &str, value: impl Into<MetricValue>) -> Self {
        Self {
            label: label.to_string(),
            value: Some(value.into()),
            delta: None,
            p_value: None,
        }
    }

    /// Attach a delta-versus-baseline string
    #[must_use]
    pub fn with_delta(mut self, delta: &str) -> Self {
        self.delta = Some(delta.to_string());
        self
    }

    /// Attach a p-value string
    #[must_use]
    pub fn with_p_value(mut self, p_value: &str) -> Self {
        self.p_value = Some(p_value.to_string());
        self
    }
}

/// An ordered group of records shown in one panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricGroup {
    /// Group key (matches a panel key)
    pub key: String,
    /// Records in display order
    pub records: Vec<MetricRecord>,
}

/// A group present in a results file whose records could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedGroup {
    /// Group key as written in the file
    pub key: String,
    /// Decoder message
    pub reason: String,
}

/// All metric groups available to a render
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    /// Groups in the order they were read
    pub groups: Vec<MetricGroup>,
    /// Groups that were present but unreadable, in file order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedGroup>,
}

impl MetricSet {
    /// Add a group, replacing any earlier group with the same key
    pub fn insert(&mut self, key: &str, records: Vec<MetricRecord>) {
        self.rejected.retain(|r| r.key != key);
        if let Some(existing) = self.groups.iter_mut().find(|g| g.key == key) {
            existing.records = records;
        } else {
            self.groups.push(MetricGroup {
                key: key.to_string(),
                records,
            });
        }
    }

    /// Mark a group as unreadable, dropping any records held for it
    pub fn reject(&mut self, key: &str, reason: impl Into<String>) {
        self.groups.retain(|g| g.key != key);
        let reason = reason.into();
        if let Some(existing) = self.rejected.iter_mut().find(|r| r.key == key) {
            existing.reason = reason;
        } else {
            self.rejected.push(RejectedGroup {
                key: key.to_string(),
                reason,
            });
        }
    }

    /// Find a group by key
    #[must_use]
    pub fn group(&self, key: &str) -> Option<&MetricGroup> {
        self.groups.iter().find(|g| g.key == key)
    }

    /// Find a rejected group by key
    #[must_use]
    pub fn rejected_group(&self, key: &str) -> Option<&RejectedGroup> {
        self.rejected.iter().find(|r| r.key == key)
    }

    /// The Tab 4 values reported in the manuscript
    #[must_use]
    pub fn manuscript() -> Self {
        let mut set = Self::default();
        set.insert(
            "internal",
            vec![
                MetricRecord::new("PR-AUC", 0.915).with_delta("+0.102"),
                MetricRecord::new("ROC-AUC", 0.864),
            ],
        );
        set.insert(
            "bbbp",
            vec![MetricRecord::new("PR-AUC", 0.950)
                .with_delta("+0.155")
                .with_p_value("< 0.001")],
        );
        set.insert(
            "oos",
            vec![MetricRecord::new("PR-AUC", 0.944)
                .with_delta("+0.185")
                .with_p_value("< 0.001")],
        );
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display_uses_precision() {
        assert_eq!(MetricValue::Number(0.95).display(3), "0.950");
        assert_eq!(MetricValue::Number(0.864).display(2), "0.86");
    }

    #[test]
    fn test_text_display_is_verbatim() {
        assert_eq!(MetricValue::from("n/a").display(3), "n/a");
    }

    #[test]
    fn test_delta_direction() {
        assert_eq!(DeltaDirection::of("+0.102"), DeltaDirection::Up);
        assert_eq!(DeltaDirection::of("-0.010"), DeltaDirection::Down);
        assert_eq!(DeltaDirection::of("−0.010"), DeltaDirection::Down);
        assert_eq!(DeltaDirection::of(" +0.1"), DeltaDirection::Up);
        assert_eq!(DeltaDirection::of("0.000"), DeltaDirection::Flat);
        assert_eq!(DeltaDirection::of(""), DeltaDirection::Flat);
    }

    #[test]
    fn test_manuscript_values() {
        let set = MetricSet::manuscript();
        let keys: Vec<&str> = set.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["internal", "bbbp", "oos"]);

        let internal = set.group("internal").unwrap();
        assert_eq!(internal.records.len(), 2);
        assert_eq!(internal.records[0].label, "PR-AUC");
        assert_eq!(internal.records[0].delta.as_deref(), Some("+0.102"));
        assert!(internal.records[1].delta.is_none());

        let oos = set.group("oos").unwrap();
        assert_eq!(oos.records[0].value, Some(MetricValue::Number(0.944)));
        assert_eq!(oos.records[0].p_value.as_deref(), Some("< 0.001"));
    }

    #[test]
    fn test_insert_replaces_existing_group() {
        let mut set = MetricSet::manuscript();
        set.insert("bbbp", vec![]);
        assert_eq!(set.groups.len(), 3);
        assert!(set.group("bbbp").unwrap().records.is_empty());
        // position is preserved
        assert_eq!(set.groups[1].key, "bbbp");
    }

    #[test]
    fn test_reject_and_insert_are_exclusive() {
        let mut set = MetricSet::manuscript();
        set.reject("bbbp", "invalid type");
        assert!(set.group("bbbp").is_none());
        assert_eq!(set.rejected_group("bbbp").unwrap().reason, "invalid type");

        set.reject("bbbp", "missing field `label`");
        assert_eq!(set.rejected.len(), 1);
        assert_eq!(set.rejected[0].reason, "missing field `label`");

        set.insert("bbbp", vec![MetricRecord::new("PR-AUC", 0.95)]);
        assert!(set.rejected.is_empty());
        assert_eq!(set.group("bbbp").unwrap().records.len(), 1);
    }

    #[test]
    fn test_record_deserializes_p_value_alias() {
        let record: MetricRecord = serde_json::from_str(
            r#"{"label": "PR-AUC", "value": 0.95, "delta": "+0.155", "p-value": "< 0.001"}"#,
        )
        .unwrap();
        assert_eq!(record.p_value.as_deref(), Some("< 0.001"));
        assert_eq!(record.value, Some(MetricValue::Number(0.95)));
    }

    #[test]
    fn test_record_without_value_deserializes_as_none() {
        let record: MetricRecord = serde_json::from_str(r#"{"label": "ECE"}"#).unwrap();
        assert!(record.value.is_none());
    }

    #[test]
    fn test_record_with_text_value() {
        let record: MetricRecord =
            serde_json::from_str(r#"{"label": "Brier", "value": "pending"}"#).unwrap();
        assert_eq!(record.value, Some(MetricValue::Text("pending".to_string())));
    }
}
