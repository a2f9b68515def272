//! BBB Studio - report renderer for BBB permeability model metrics
//!
//! Renders the precomputed evaluation metrics of the sparse-label
//! multi-task BBB classifier, together with the manuscript's narrative,
//! as a terminal, Markdown, HTML or JSON report.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod config;
pub mod doctor;
pub mod error;
pub mod log;
pub mod report;
pub mod server;
pub mod surface;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use config::{PanelConfig, StudioConfig};
pub use doctor::{diagnose, diagnose_file, DiagnosticReport};
pub use error::StudioError;
pub use log::{RenderEntry, RenderHistory};
pub use report::{render, Document, MetricRecord, MetricSet, MetricValue, ReportInput};
pub use surface::Surface;
