//! Error taxonomy for loading and rendering reports

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading metrics or building a report document
#[derive(Debug, Error)]
pub enum StudioError {
    /// A metric that should be displayed has no value (or no label).
    ///
    /// The renderer turns this into a visible placeholder tile.
    #[error("missing metric in panel '{panel}': {detail}")]
    MissingMetric {
        /// Panel key the metric belongs to
        panel: String,
        /// What exactly is missing
        detail: String,
    },

    /// The configured results file does not exist
    #[error("results file not found: {}", path.display())]
    ResultsNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The results file exists but could not be read
    #[error("failed to read results file {}: {source}", path.display())]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The results file is not valid results JSON
    #[error("malformed results file {}: {reason}", path.display())]
    MalformedResultsFile {
        /// Path that was parsed
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Document construction failed
    #[error("render failure: {0}")]
    RenderFailure(String),
}

/// Result alias for report operations
pub type Result<T> = std::result::Result<T, StudioError>;

impl StudioError {
    /// Short reason suitable for a banner or placeholder caption
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::ResultsNotFound { .. } => "file not found".to_string(),
            Self::Io { source, .. } => source.to_string(),
            Self::MalformedResultsFile { reason, .. } => reason.clone(),
            Self::MissingMetric { detail, .. } => detail.clone(),
            Self::RenderFailure(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_metric_display() {
        let err = StudioError::MissingMetric {
            panel: "bbbp".to_string(),
            detail: "no metrics recorded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "missing metric in panel 'bbbp': no metrics recorded"
        );
        assert_eq!(err.reason(), "no metrics recorded");
    }

    #[test]
    fn test_not_found_reason() {
        let err = StudioError::ResultsNotFound {
            path: PathBuf::from("results/metrics.json"),
        };
        assert!(err.to_string().contains("results/metrics.json"));
        assert_eq!(err.reason(), "file not found");
    }
}
