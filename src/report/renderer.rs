//! Report renderer
//!
//! Builds the [`Document`] for a configuration and a [`ReportInput`] in a
//! single top-to-bottom pass. Rendering is pure: the same input always
//! yields the same document.

use tracing::{debug, warn};

use crate::config::{PanelConfig, StudioConfig};
use crate::error::{Result, StudioError};
use crate::report::content;
use crate::report::document::{Block, Column, Document, MetricTile, PageMeta, Placeholder, Tone};
use crate::report::metrics::{DeltaDirection, MetricRecord, MetricSet};
use crate::report::results::ReportInput;

/// Renders report documents for one configuration
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    config: &'a StudioConfig,
}

impl<'a> Renderer<'a> {
    /// Create a renderer for the given configuration
    #[must_use]
    pub const fn new(config: &'a StudioConfig) -> Self {
        Self { config }
    }

    /// Render the full report.
    ///
    /// Missing metrics become placeholders; only a configuration that cannot
    /// produce the metric section at all is an error.
    pub fn render(&self, input: &ReportInput) -> Result<Document> {
        if self.config.panels.is_empty() {
            return Err(StudioError::RenderFailure(
                "no metric panels configured".to_string(),
            ));
        }

        let page = &self.config.page;
        let mut body = content::introduction();

        body.push(Block::Divider);
        body.push(Block::heading(2, content::PERFORMANCE_HEADING));
        if let Some(notice) = &input.notice {
            body.push(Block::callout(Tone::Warning, notice));
        }
        body.push(Block::Columns {
            columns: self
                .config
                .panels
                .iter()
                .map(|panel| self.metric_column(panel, input.metrics.as_ref()))
                .collect(),
        });
        body.push(content::calibration_note());

        body.push(Block::Divider);
        body.push(Block::heading(2, content::PROTOCOL_HEADING));
        body.push(Block::Columns {
            columns: vec![
                Column {
                    key: "blueprint".to_string(),
                    blocks: content::evaluation_blueprint(),
                },
                Column {
                    key: "assets".to_string(),
                    blocks: content::assets_in_progress(),
                },
            ],
        });
        body.push(content::ligand_notice());

        body.push(Block::Divider);
        body.extend(content::roadmap());

        let document = Document {
            page: PageMeta::from(page),
            title: page.title.clone(),
            caption: page.caption.clone(),
            sidebar: content::sidebar(),
            body,
        };
        debug!(
            source = %input.source.describe(),
            tiles = document.tiles().len(),
            placeholders = document.placeholders().len(),
            "rendered report"
        );
        Ok(document)
    }

    fn metric_column(&self, panel: &PanelConfig, metrics: Option<&MetricSet>) -> Column {
        let blocks = match metrics {
            Some(set) => self.panel_blocks(panel, set),
            None => vec![Block::Placeholder(Placeholder {
                label: format!("{} metrics", panel.label),
                reason: content::UNAVAILABLE.to_string(),
            })],
        };
        Column {
            key: panel.key.clone(),
            blocks,
        }
    }

    fn panel_blocks(&self, panel: &PanelConfig, set: &MetricSet) -> Vec<Block> {
        if let Some(rejected) = set.rejected_group(&panel.key) {
            let err = StudioError::MissingMetric {
                panel: panel.key.clone(),
                detail: format!("group could not be read: {}", rejected.reason),
            };
            warn!(error = %err, "rendering placeholder");
            return vec![Block::Placeholder(Placeholder {
                label: format!("{} metrics", panel.label),
                reason: content::UNAVAILABLE.to_string(),
            })];
        }

        let records = match set.group(&panel.key) {
            Some(group) if !group.records.is_empty() => &group.records,
            _ => {
                let err = StudioError::MissingMetric {
                    panel: panel.key.clone(),
                    detail: "no metrics recorded".to_string(),
                };
                warn!(error = %err, "rendering placeholder");
                return vec![Block::Placeholder(Placeholder {
                    label: format!("{} metrics", panel.label),
                    reason: err.reason(),
                })];
            }
        };

        let mut blocks = Vec::with_capacity(records.len() * 2);
        for record in records {
            match self.tile(panel, record) {
                Ok(tile) => {
                    blocks.push(Block::Metric(tile));
                    if let Some(p_value) = &record.p_value {
                        blocks.push(Block::caption(&format!(
                            "{} {p_value}",
                            content::P_VALUE_CAPTION
                        )));
                    }
                }
                Err(err) => {
                    warn!(error = %err, "rendering placeholder");
                    blocks.push(Block::Placeholder(Placeholder {
                        label: tile_label(panel, record),
                        reason: err.reason(),
                    }));
                }
            }
        }
        blocks
    }

    fn tile(&self, panel: &PanelConfig, record: &MetricRecord) -> Result<MetricTile> {
        if record.label.trim().is_empty() {
            return Err(StudioError::MissingMetric {
                panel: panel.key.clone(),
                detail: "metric has no label".to_string(),
            });
        }
        let value = record
            .value
            .as_ref()
            .ok_or_else(|| StudioError::MissingMetric {
                panel: panel.key.clone(),
                detail: format!("no value for {}", record.label),
            })?;

        Ok(MetricTile {
            label: tile_label(panel, record),
            value: value.display(self.config.page.precision),
            delta: record.delta.clone(),
            direction: record.delta.as_deref().map(DeltaDirection::of),
        })
    }
}

fn tile_label(panel: &PanelConfig, record: &MetricRecord) -> String {
    let label = record.label.trim();
    if label.is_empty() {
        format!("{} metric", panel.label)
    } else {
        format!("{} {label}", panel.label)
    }
}

/// Render a report with a one-off [`Renderer`]
pub fn render(config: &StudioConfig, input: &ReportInput) -> Result<Document> {
    Renderer::new(config).render(input)
}
