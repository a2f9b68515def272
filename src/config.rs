//! Studio configuration parser
//!
//! Parses `studio.toml` into page metadata, the results source and the
//! ordered list of metric panels. Every section is optional; an absent file
//! yields the manuscript page.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Page width hint passed through to hosts that care about it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Use the full viewport width
    #[default]
    Wide,
    /// Fixed-width centered column
    Centered,
}

/// An entry in the page's help menu
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    /// Menu label (e.g. "Report a bug")
    pub label: String,
    /// URL or plain text shown for the entry
    pub target: String,
}

/// Page-level metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageConfig {
    /// Page title, also the document's top heading
    #[serde(default = "default_title")]
    pub title: String,
    /// Page icon (an emoji)
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Layout hint
    #[serde(default)]
    pub layout: Layout,
    /// Caption displayed under the title
    #[serde(default = "default_caption")]
    pub caption: String,
    /// Decimal places used for numeric metric values (default: 3)
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Help menu entries
    #[serde(default = "default_menu")]
    pub menu: Vec<MenuItem>,
}

fn default_title() -> String {
    "Blood–Brain Barrier (BBB) Permeability Studio".to_string()
}

fn default_icon() -> String {
    "🧠".to_string()
}

fn default_caption() -> String {
    "Prototype interface for the sparse-label multi-task ensemble described in the BBB manuscript."
        .to_string()
}

const fn default_precision() -> usize {
    3
}

const MAX_PRECISION: usize = 6;

fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem {
            label: "Report a bug".to_string(),
            target: "https://github.com/your-org/bbb-gui/issues".to_string(),
        },
        MenuItem {
            label: "About".to_string(),
            target: "Sparse-label multi-task learning workflow for BBB permeability modelling."
                .to_string(),
        },
    ]
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            icon: default_icon(),
            layout: Layout::default(),
            caption: default_caption(),
            precision: default_precision(),
            menu: default_menu(),
        }
    }
}

/// Where precomputed metrics come from
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultsConfig {
    /// Results JSON file. None means the built-in manuscript values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// A metric column on the page, bound to one metric group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PanelConfig {
    /// Group key in the results file (e.g. "bbbp")
    pub key: String,
    /// Prefix for tile labels (e.g. "BBBP" gives "BBBP PR-AUC")
    pub label: String,
}

impl PanelConfig {
    fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

fn default_panels() -> Vec<PanelConfig> {
    vec![
        PanelConfig::new("internal", "Internal"),
        PanelConfig::new("bbbp", "BBBP"),
        PanelConfig::new("oos", "OOS"),
    ]
}

/// Top-level configuration parsed from studio.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudioConfig {
    /// Page metadata
    #[serde(default)]
    pub page: PageConfig,
    /// Results source
    #[serde(default)]
    pub results: ResultsConfig,
    /// Metric panels, in display order
    #[serde(rename = "panel", default = "default_panels")]
    pub panels: Vec<PanelConfig>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            results: ResultsConfig::default(),
            panels: default_panels(),
        }
    }
}

impl StudioConfig {
    /// Parse a studio.toml file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse studio.toml content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse studio.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file when one is given, otherwise the built-in page
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_path)
    }

    /// Find a panel by key
    #[must_use]
    pub fn get_panel(&self, key: &str) -> Option<&PanelConfig> {
        self.panels.iter().find(|p| p.key == key)
    }

    /// Override the results file (command-line flag wins over the file)
    #[must_use]
    pub fn with_results_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.results.path = path;
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if self.panels.is_empty() {
            bail!("At least one [[panel]] is required");
        }

        let mut seen = HashSet::new();
        for panel in &self.panels {
            if panel.key.trim().is_empty() {
                bail!("Panel key cannot be empty");
            }
            if panel.label.trim().is_empty() {
                bail!("Panel '{}' has an empty label", panel.key);
            }
            if !seen.insert(&panel.key) {
                bail!("Duplicate panel key: '{}'", panel.key);
            }
        }

        if self.page.title.trim().is_empty() {
            bail!("Page title cannot be empty");
        }

        if self.page.precision > MAX_PRECISION {
            bail!(
                "Invalid precision {}: must be at most {MAX_PRECISION}",
                self.page.precision
            );
        }

        Ok(())
    }
}
