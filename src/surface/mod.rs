//! Display surfaces
//!
//! Each surface turns a [`Document`] into text for one kind of host.

pub mod html;
pub mod markdown;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StudioError};
use crate::report::document::Document;

pub use html::render_html;
pub use markdown::render_markdown;

/// Output format for a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Coloured terminal text
    Terminal,
    /// Markdown
    Markdown,
    /// Self-contained HTML page
    Html,
    /// The document tree as JSON
    Json,
}

impl Surface {
    /// Render a document for this surface
    pub fn render(self, doc: &Document) -> Result<String> {
        match self {
            Self::Terminal => Ok(crate::cli::render_document(doc)),
            Self::Markdown => Ok(render_markdown(doc)),
            Self::Html => Ok(render_html(doc)),
            Self::Json => serde_json::to_string_pretty(doc)
                .map_err(|e| StudioError::RenderFailure(format!("JSON serialization: {e}"))),
        }
    }

    /// Lowercase name, as accepted on the command line
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}
