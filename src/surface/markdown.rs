//! Markdown surface

use std::fmt::Write as _;

use crate::report::document::{Block, Document, Sidebar, Tone};
use crate::report::markup::Span;

/// Render a report document as Markdown
#[must_use]
pub fn render_markdown(doc: &Document) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {} {}\n", doc.page.icon, doc.title);
    let _ = writeln!(out, "_{}_\n", doc.caption);
    render_sidebar(&mut out, &doc.sidebar);
    render_blocks(&mut out, &doc.body);

    if !doc.page.menu.is_empty() {
        let _ = writeln!(out, "---\n");
        for item in &doc.page.menu {
            if item.target.starts_with("http://") || item.target.starts_with("https://") {
                let _ = writeln!(out, "- [{}]({})", item.label, item.target);
            } else {
                let _ = writeln!(out, "- **{}:** {}", item.label, item.target);
            }
        }
    }

    out
}

fn render_sidebar(out: &mut String, sidebar: &Sidebar) {
    let mut inner = String::new();
    render_blocks(&mut inner, &sidebar.blocks);

    let _ = writeln!(out, "> **{}**\n>", sidebar.header);
    for line in inner.trim_end().lines() {
        if line.is_empty() {
            let _ = writeln!(out, ">");
        } else {
            let _ = writeln!(out, "> {line}");
        }
    }
    let _ = writeln!(out);
}

fn render_blocks(out: &mut String, blocks: &[Block]) {
    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                let hashes = "#".repeat(usize::from(*level));
                let _ = writeln!(out, "{hashes} {text}\n");
            }
            Block::Paragraph { spans } => {
                let _ = writeln!(out, "{}\n", inline(spans));
            }
            Block::Caption { text } => {
                let _ = writeln!(out, "_{text}_\n");
            }
            Block::List { ordered, items } => {
                for (i, item) in items.iter().enumerate() {
                    if *ordered {
                        let _ = writeln!(out, "{}. {}", i + 1, inline(item));
                    } else {
                        let _ = writeln!(out, "- {}", inline(item));
                    }
                }
                let _ = writeln!(out);
            }
            Block::Callout { tone, text } => {
                let label = match tone {
                    Tone::Info => "ℹ️ **Note:**",
                    Tone::Success => "✅",
                    Tone::Warning => "⚠️ **Warning:**",
                };
                let _ = writeln!(out, "> {label} {text}\n");
            }
            Block::Divider => {
                let _ = writeln!(out, "---\n");
            }
            Block::Metric(tile) => {
                let _ = write!(out, "**{}:** {}", tile.label, tile.value);
                if let (Some(delta), Some(direction)) = (&tile.delta, tile.direction) {
                    let _ = write!(out, " ({} {delta})", direction.arrow());
                }
                let _ = writeln!(out, "\n");
            }
            Block::Placeholder(placeholder) => {
                let _ = writeln!(
                    out,
                    "**{}:** _{}_\n",
                    placeholder.label, placeholder.reason
                );
            }
            Block::Columns { columns } => {
                for column in columns {
                    render_blocks(out, &column.blocks);
                }
            }
        }
    }
}

fn inline(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(t) => t.clone(),
            Span::Strong(t) => format!("**{t}**"),
            Span::Code(t) => format!("`{t}`"),
        })
        .collect()
}
