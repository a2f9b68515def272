//! CLI output formatting
//!
//! Provides human-readable terminal display for reports and results checks.

pub mod display;

pub use display::render_diagnostic_report;
pub use display::render_document;
