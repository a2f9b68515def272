//! HTML surface
//!
//! Produces a self-contained page with inline CSS. All document text is
//! escaped before it is embedded.

use std::fmt::Write as _;

use crate::config::Layout;
use crate::report::document::{Block, Document, MetricTile, Placeholder, Sidebar, Tone};
use crate::report::markup::Span;
use crate::report::metrics::DeltaDirection;

/// Render a report document as a complete HTML page
#[must_use]
pub fn render_html(doc: &Document) -> String {
    let layout = match doc.page.layout {
        Layout::Wide => "wide",
        Layout::Centered => "centered",
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body class="layout-{layout}">
<div class="app">
{sidebar}
<main class="content">
    <h1>{icon} {title}</h1>
    <p class="caption">{caption}</p>
{body}
</main>
</div>
{footer}
</body>
</html>
"#,
        title = escape(&doc.page.title),
        css = inline_css(),
        layout = layout,
        sidebar = render_sidebar(&doc.sidebar),
        icon = escape(&doc.page.icon),
        caption = escape(&doc.caption),
        body = render_blocks(&doc.body),
        footer = render_footer(doc),
    )
}

fn render_sidebar(sidebar: &Sidebar) -> String {
    format!(
        "<aside class=\"sidebar\">\n<h2>{}</h2>\n{}</aside>",
        escape(&sidebar.header),
        render_blocks(&sidebar.blocks)
    )
}

fn render_footer(doc: &Document) -> String {
    if doc.page.menu.is_empty() {
        return String::new();
    }
    let mut out = String::from("<footer class=\"menu\">\n");
    for item in &doc.page.menu {
        if item.target.starts_with("http://") || item.target.starts_with("https://") {
            let _ = writeln!(
                out,
                "    <a href=\"{}\">{}</a>",
                escape(&item.target),
                escape(&item.label)
            );
        } else {
            let _ = writeln!(
                out,
                "    <span><strong>{}:</strong> {}</span>",
                escape(&item.label),
                escape(&item.target)
            );
        }
    }
    out.push_str("</footer>");
    out
}

fn render_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                let _ = writeln!(out, "<h{level}>{}</h{level}>", escape(text));
            }
            Block::Paragraph { spans } => {
                let _ = writeln!(out, "<p>{}</p>", inline(spans));
            }
            Block::Caption { text } => {
                let _ = writeln!(out, "<p class=\"caption\">{}</p>", escape(text));
            }
            Block::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                let _ = writeln!(out, "<{tag}>");
                for item in items {
                    let _ = writeln!(out, "    <li>{}</li>", inline(item));
                }
                let _ = writeln!(out, "</{tag}>");
            }
            Block::Callout { tone, text } => {
                let class = match tone {
                    Tone::Info => "info",
                    Tone::Success => "success",
                    Tone::Warning => "warning",
                };
                let _ = writeln!(
                    out,
                    "<div class=\"callout {class}\" role=\"note\">{}</div>",
                    escape(text)
                );
            }
            Block::Divider => out.push_str("<hr>\n"),
            Block::Metric(tile) => out.push_str(&render_tile(tile)),
            Block::Placeholder(placeholder) => out.push_str(&render_placeholder(placeholder)),
            Block::Columns { columns } => {
                let _ = writeln!(
                    out,
                    "<div class=\"columns\" style=\"grid-template-columns: repeat({}, 1fr)\">",
                    columns.len()
                );
                for column in columns {
                    let _ = writeln!(
                        out,
                        "<section class=\"column\" data-key=\"{}\">",
                        escape(&column.key)
                    );
                    out.push_str(&render_blocks(&column.blocks));
                    out.push_str("</section>\n");
                }
                out.push_str("</div>\n");
            }
        }
    }
    out
}

fn render_tile(tile: &MetricTile) -> String {
    let delta = match (&tile.delta, tile.direction) {
        (Some(delta), Some(direction)) => {
            let class = match direction {
                DeltaDirection::Up => "up",
                DeltaDirection::Down => "down",
                DeltaDirection::Flat => "flat",
            };
            format!(
                "\n    <div class=\"metric-delta {class}\">{} {}</div>",
                direction.arrow(),
                escape(delta)
            )
        }
        _ => String::new(),
    };
    format!(
        "<div class=\"metric\">\n    <div class=\"metric-label\">{}</div>\n    <div class=\"metric-value\">{}</div>{delta}\n</div>\n",
        escape(&tile.label),
        escape(&tile.value),
    )
}

fn render_placeholder(placeholder: &Placeholder) -> String {
    format!(
        "<div class=\"metric placeholder\">\n    <div class=\"metric-label\">{}</div>\n    <div class=\"metric-value\">{}</div>\n</div>\n",
        escape(&placeholder.label),
        escape(&placeholder.reason),
    )
}

fn inline(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(t) => escape(t),
            Span::Strong(t) => format!("<strong>{}</strong>", escape(t)),
            Span::Code(t) => format!("<code>{}</code>", escape(t)),
        })
        .collect()
}

/// Escape text for use in HTML element content and attribute values
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const fn inline_css() -> &'static str {
    r"
body { margin: 0; font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; color: #262730; background: #fff; }
.app { display: flex; min-height: 100vh; }
.sidebar { width: 300px; flex-shrink: 0; padding: 1.5rem; background: #f0f2f6; }
.content { flex: 1; padding: 2rem 3rem; }
.layout-centered .content { max-width: 760px; margin: 0 auto; }
h1 { margin-bottom: 0.25rem; }
.caption { color: #6b6f7b; font-size: 0.85rem; }
hr { border: none; border-top: 1px solid #e6e9ef; margin: 2rem 0; }
code { background: #f0f2f6; padding: 0.1rem 0.3rem; border-radius: 4px; }
.columns { display: grid; gap: 1.5rem; }
.metric { margin-bottom: 0.75rem; }
.metric-label { font-size: 0.9rem; color: #31333f; }
.metric-value { font-size: 2.25rem; }
.metric-delta { display: inline-block; padding: 0.1rem 0.5rem; border-radius: 1rem; font-size: 0.9rem; }
.metric-delta.up { color: #09ab3b; background: #e6f6ea; }
.metric-delta.down { color: #ff2b2b; background: #ffeaea; }
.metric-delta.flat { color: #6b6f7b; background: #f0f2f6; }
.placeholder .metric-value { font-size: 1.25rem; color: #926c05; font-style: italic; }
.callout { padding: 1rem; border-radius: 0.5rem; margin: 1rem 0; }
.callout.info { background: #e8f1fb; color: #0b4f8a; }
.callout.success { background: #e6f6ea; color: #176a35; }
.callout.warning { background: #fff8e1; color: #926c05; }
.menu { padding: 1rem 3rem; border-top: 1px solid #e6e9ef; font-size: 0.85rem; display: flex; gap: 2rem; }
"
}
