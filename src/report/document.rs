//! Report document tree
//!
//! The renderer's only output. Display surfaces walk this tree; it carries
//! no host-specific formatting.

use serde::Serialize;

use crate::config::{Layout, MenuItem, PageConfig};
use crate::report::markup::{parse_inline, Span};
use crate::report::metrics::DeltaDirection;

/// Page metadata copied from the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// Browser/window title
    pub title: String,
    /// Page icon
    pub icon: String,
    /// Layout hint
    pub layout: Layout,
    /// Help menu entries
    pub menu: Vec<MenuItem>,
}

impl From<&PageConfig> for PageMeta {
    fn from(page: &PageConfig) -> Self {
        Self {
            title: page.title.clone(),
            icon: page.icon.clone(),
            layout: page.layout,
            menu: page.menu.clone(),
        }
    }
}

/// Callout colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Neutral information
    Info,
    /// Positive status
    Success,
    /// Degraded content (e.g. results unavailable)
    Warning,
}

/// A displayed metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricTile {
    /// Full tile label (e.g. "BBBP PR-AUC")
    pub label: String,
    /// Formatted value
    pub value: String,
    /// Delta versus baseline, as given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
    /// Direction of the delta, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<DeltaDirection>,
}

/// A visible stand-in for a metric that cannot be shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    /// What would have been shown (e.g. "BBBP metrics")
    pub label: String,
    /// Why it is not shown
    pub reason: String,
}

/// One column of a multi-column row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column key (panel key for metric columns)
    pub key: String,
    /// Blocks in the column, top to bottom
    pub blocks: Vec<Block>,
}

/// A node of the document body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Section heading, level 2 or 3
    Heading {
        /// Heading level
        level: u8,
        /// Heading text
        text: String,
    },
    /// Paragraph of inline spans
    Paragraph {
        /// Paragraph content
        spans: Vec<Span>,
    },
    /// Small print under a tile or title
    Caption {
        /// Caption text
        text: String,
    },
    /// Bulleted or numbered list
    List {
        /// Numbered when true
        ordered: bool,
        /// One span list per item
        items: Vec<Vec<Span>>,
    },
    /// Highlighted message box
    Callout {
        /// Colouring
        tone: Tone,
        /// Message
        text: String,
    },
    /// Horizontal rule
    Divider,
    /// Metric tile
    Metric(MetricTile),
    /// Placeholder for a missing metric or panel
    Placeholder(Placeholder),
    /// Side-by-side columns
    Columns {
        /// Columns, left to right
        columns: Vec<Column>,
    },
}

impl Block {
    /// Heading block
    #[must_use]
    pub fn heading(level: u8, text: &str) -> Self {
        Self::Heading {
            level,
            text: text.to_string(),
        }
    }

    /// Paragraph from marked-up text
    #[must_use]
    pub fn paragraph(text: &str) -> Self {
        Self::Paragraph {
            spans: parse_inline(text),
        }
    }

    /// Caption block
    #[must_use]
    pub fn caption(text: &str) -> Self {
        Self::Caption {
            text: text.to_string(),
        }
    }

    /// Bulleted list from marked-up items
    #[must_use]
    pub fn bullets(items: &[&str]) -> Self {
        Self::List {
            ordered: false,
            items: items.iter().map(|item| parse_inline(item)).collect(),
        }
    }

    /// Numbered list from marked-up items
    #[must_use]
    pub fn numbered(items: &[&str]) -> Self {
        Self::List {
            ordered: true,
            items: items.iter().map(|item| parse_inline(item)).collect(),
        }
    }

    /// Callout block
    #[must_use]
    pub fn callout(tone: Tone, text: &str) -> Self {
        Self::Callout {
            tone,
            text: text.to_string(),
        }
    }
}

/// Sidebar summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    /// Sidebar header
    pub header: String,
    /// Sidebar content
    pub blocks: Vec<Block>,
}

/// A rendered report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Page metadata
    pub page: PageMeta,
    /// Top heading
    pub title: String,
    /// Caption under the title
    pub caption: String,
    /// Sidebar summary
    pub sidebar: Sidebar,
    /// Main content, top to bottom
    pub body: Vec<Block>,
}

impl Document {
    /// All metric tiles in document order
    #[must_use]
    pub fn tiles(&self) -> Vec<&MetricTile> {
        let mut tiles = Vec::new();
        walk(&self.body, &mut |block| {
            if let Block::Metric(tile) = block {
                tiles.push(tile);
            }
        });
        tiles
    }

    /// All placeholders in document order
    #[must_use]
    pub fn placeholders(&self) -> Vec<&Placeholder> {
        let mut found = Vec::new();
        walk(&self.body, &mut |block| {
            if let Block::Placeholder(placeholder) = block {
                found.push(placeholder);
            }
        });
        found
    }

    /// Texts of all headings in document order
    #[must_use]
    pub fn headings(&self) -> Vec<&str> {
        let mut found = Vec::new();
        walk(&self.body, &mut |block| {
            if let Block::Heading { text, .. } = block {
                found.push(text.as_str());
            }
        });
        found
    }

    /// Blocks of the column with the given key, searching every row
    #[must_use]
    pub fn column(&self, key: &str) -> Option<&Column> {
        self.body.iter().find_map(|block| match block {
            Block::Columns { columns } => columns.iter().find(|c| c.key == key),
            _ => None,
        })
    }
}

/// Visit blocks depth-first, descending into columns
fn walk<'a>(blocks: &'a [Block], visit: &mut impl FnMut(&'a Block)) {
    for block in blocks {
        visit(block);
        if let Block::Columns { columns } = block {
            for column in columns {
                walk(&column.blocks, &mut *visit);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(label: &str) -> Block {
        Block::Metric(MetricTile {
            label: label.to_string(),
            value: "0.500".to_string(),
            delta: None,
            direction: None,
        })
    }

    fn sample_document() -> Document {
        Document {
            page: PageMeta::from(&PageConfig::default()),
            title: "T".to_string(),
            caption: "C".to_string(),
            sidebar: Sidebar {
                header: "S".to_string(),
                blocks: vec![],
            },
            body: vec![
                Block::heading(2, "First"),
                tile("top"),
                Block::Columns {
                    columns: vec![
                        Column {
                            key: "a".to_string(),
                            blocks: vec![tile("a1"), tile("a2")],
                        },
                        Column {
                            key: "b".to_string(),
                            blocks: vec![
                                Block::heading(3, "Nested"),
                                Block::Placeholder(Placeholder {
                                    label: "b metrics".to_string(),
                                    reason: "unavailable".to_string(),
                                }),
                            ],
                        },
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_tiles_walk_into_columns_in_order() {
        let doc = sample_document();
        let labels: Vec<&str> = doc.tiles().iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["top", "a1", "a2"]);
    }

    #[test]
    fn test_placeholders_and_headings() {
        let doc = sample_document();
        assert_eq!(doc.placeholders().len(), 1);
        assert_eq!(doc.headings(), vec!["First", "Nested"]);
    }

    #[test]
    fn test_column_lookup() {
        let doc = sample_document();
        assert_eq!(doc.column("a").unwrap().blocks.len(), 2);
        assert!(doc.column("zzz").is_none());
    }

    #[test]
    fn test_block_serializes_with_kind_tag() {
        let json = serde_json::to_value(Block::heading(2, "Roadmap")).unwrap();
        assert_eq!(json["kind"], "heading");
        assert_eq!(json["level"], 2);
        let divider = serde_json::to_value(Block::Divider).unwrap();
        assert_eq!(divider["kind"], "divider");
    }

    #[test]
    fn test_bullets_parse_markup() {
        let Block::List { ordered, items } = Block::bullets(&["**a** b", "c"]) else {
            panic!("expected list");
        };
        assert!(!ordered);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0][0], Span::Strong("a".to_string()));
    }
}
