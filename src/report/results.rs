//! Results file loading
//!
//! Reads a precomputed results JSON file of the form
//! `{"<group>": [{"label", "value", "delta", "p_value"}, ...], ...}` and
//! resolves what a render should display when the file is missing or broken.

use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::StudioConfig;
use crate::error::{Result, StudioError};
use crate::report::metrics::{MetricRecord, MetricSet};

/// Results files larger than this are rejected without being parsed
pub const MAX_RESULTS_BYTES: u64 = 4 * 1024 * 1024;

/// Top-level groups in file order, each still undecoded
struct RawGroups(Vec<(String, serde_json::Value)>);

impl<'de> Deserialize<'de> for RawGroups {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = RawGroups;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping group names to metric arrays")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<RawGroups, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, serde_json::Value>()? {
                    groups.push(entry);
                }
                Ok(RawGroups(groups))
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

/// Parse results JSON content.
///
/// The top level must be an object. Each group is decoded on its own, so an
/// unreadable group is recorded as rejected and the others are kept.
pub fn parse(path: &Path, content: &str) -> Result<MetricSet> {
    let RawGroups(groups) =
        serde_json::from_str(content).map_err(|e| StudioError::MalformedResultsFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut set = MetricSet::default();
    for (key, value) in groups {
        match serde_json::from_value::<Vec<MetricRecord>>(value) {
            Ok(records) => set.insert(&key, records),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    group = %key,
                    error = %e,
                    "unreadable results group"
                );
                set.reject(&key, e.to_string());
            }
        }
    }
    Ok(set)
}

/// Read and parse a results file.
///
/// The file is opened read-only and closed before this returns.
pub fn load(path: &Path) -> Result<MetricSet> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => StudioError::ResultsNotFound {
            path: path.to_path_buf(),
        },
        _ => StudioError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut bytes = Vec::new();
    file.take(MAX_RESULTS_BYTES + 1)
        .read_to_end(&mut bytes)
        .map_err(|source| StudioError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    if bytes.len() as u64 > MAX_RESULTS_BYTES {
        return Err(StudioError::MalformedResultsFile {
            path: path.to_path_buf(),
            reason: format!("file exceeds {MAX_RESULTS_BYTES} bytes"),
        });
    }

    let content = String::from_utf8(bytes).map_err(|_| StudioError::MalformedResultsFile {
        path: path.to_path_buf(),
        reason: "file is not valid UTF-8".to_string(),
    })?;

    let set = parse(path, &content)?;
    debug!(
        path = %path.display(),
        groups = set.groups.len(),
        rejected = set.rejected.len(),
        "loaded results file"
    );
    Ok(set)
}

/// Where the metrics of a render came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum MetricSource {
    /// Built-in manuscript values
    Manuscript,
    /// A results file
    File(PathBuf),
}

impl MetricSource {
    /// Human-readable description
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Manuscript => "manuscript values".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Everything the renderer needs besides the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInput {
    /// Metrics to show, or None when the source could not be used
    pub metrics: Option<MetricSet>,
    /// Where the metrics came from
    pub source: MetricSource,
    /// Warning banner text shown above the metric panels
    pub notice: Option<String>,
}

impl ReportInput {
    /// Input backed by the manuscript values
    #[must_use]
    pub fn manuscript() -> Self {
        Self::from_set(MetricSource::Manuscript, MetricSet::manuscript())
    }

    /// Input backed by an already-loaded metric set
    #[must_use]
    pub const fn from_set(source: MetricSource, metrics: MetricSet) -> Self {
        Self {
            metrics: Some(metrics),
            source,
            notice: None,
        }
    }

    /// Turn the outcome of [`load`] into render input.
    ///
    /// A failed load never substitutes values: every panel is marked
    /// unavailable and the reason goes into the banner. Rejected groups are
    /// named in the banner; the readable groups still render.
    #[must_use]
    pub fn from_load(path: &Path, loaded: Result<MetricSet>) -> Self {
        let source = MetricSource::File(path.to_path_buf());
        match loaded {
            Ok(metrics) if metrics.rejected.is_empty() => Self::from_set(source, metrics),
            Ok(metrics) => {
                let groups: Vec<String> = metrics
                    .rejected
                    .iter()
                    .map(|r| format!("`{}` ({})", r.key, r.reason))
                    .collect();
                let notice = format!(
                    "Results file `{}` has unreadable groups: {}. Those metrics are shown as unavailable.",
                    path.display(),
                    groups.join(", ")
                );
                Self {
                    metrics: Some(metrics),
                    source,
                    notice: Some(notice),
                }
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "results file unusable, rendering placeholders"
                );
                Self {
                    metrics: None,
                    source,
                    notice: Some(format!(
                        "Results file `{}` could not be used ({}). Metric tiles are shown as unavailable.",
                        path.display(),
                        err.reason()
                    )),
                }
            }
        }
    }

    /// Resolve the input for a configuration: the configured results file
    /// when there is one, the manuscript values otherwise.
    #[must_use]
    pub fn resolve(config: &StudioConfig) -> Self {
        match &config.results.path {
            Some(path) => Self::from_load(path, load(path)),
            None => Self::manuscript(),
        }
    }
}
