//! Report model and rendering
//!
//! Metrics and the results file go in, a [`document::Document`] comes out.

pub mod content;
pub mod document;
pub mod markup;
pub mod metrics;
pub mod renderer;
pub mod results;

pub use document::{Block, Document, MetricTile, Placeholder};
pub use metrics::{MetricRecord, MetricSet, MetricValue, RejectedGroup};
pub use renderer::{render, Renderer};
pub use results::{MetricSource, ReportInput};
