//! Terminal display for reports and results checks
//!
//! Renders a [`Document`] as coloured terminal text. The returned string is
//! printed to stdout by the caller so it can be piped or redirected.

use std::fmt::Write as _;

use colored::Colorize;

use crate::doctor::{DiagnosticReport, Severity};
use crate::report::document::{Block, Document, MetricTile, Placeholder, Sidebar, Tone};
use crate::report::markup::Span;
use crate::report::metrics::DeltaDirection;

const RULE_WIDTH: usize = 60;
const LABEL_WIDTH: usize = 20;

/// Render a report document for the terminal
#[must_use]
pub fn render_document(doc: &Document) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "\n{} {}",
        "===".bold().cyan(),
        format!("{} {}", doc.page.icon, doc.title).bold().cyan()
    );
    let _ = writeln!(out, "{}", doc.caption.dimmed());
    let _ = writeln!(out, "{}", rule());

    render_sidebar(&mut out, &doc.sidebar);
    render_blocks(&mut out, &doc.body, "");

    out
}

fn rule() -> String {
    "─".repeat(RULE_WIDTH).dimmed().to_string()
}

fn render_sidebar(out: &mut String, sidebar: &Sidebar) {
    let mut inner = String::new();
    render_blocks(&mut inner, &sidebar.blocks, "");

    let bar = "┃".cyan();
    let _ = writeln!(out, "{bar} {}", sidebar.header.bold());
    for line in inner.lines() {
        let _ = writeln!(out, "{bar} {line}");
    }
    let _ = writeln!(out, "{}", rule());
}

fn render_blocks(out: &mut String, blocks: &[Block], indent: &str) {
    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                let styled = if *level <= 2 {
                    text.bold().cyan().to_string()
                } else {
                    text.bold().to_string()
                };
                let _ = writeln!(out, "\n{indent}{styled}");
            }
            Block::Paragraph { spans } => {
                let _ = writeln!(out, "{indent}{}", styled_spans(spans));
            }
            Block::Caption { text } => {
                let _ = writeln!(out, "{indent}    {}", text.dimmed());
            }
            Block::List { ordered, items } => {
                for (i, item) in items.iter().enumerate() {
                    let marker = if *ordered {
                        format!("{}.", i + 1)
                    } else {
                        "•".to_string()
                    };
                    let _ = writeln!(out, "{indent}  {marker} {}", styled_spans(item));
                }
            }
            Block::Callout { tone, text } => {
                let _ = writeln!(out, "{indent}{}", styled_callout(*tone, text));
            }
            Block::Divider => {
                let _ = writeln!(out, "\n{}", rule());
            }
            Block::Metric(tile) => {
                let _ = writeln!(out, "{indent}{}", styled_tile(tile));
            }
            Block::Placeholder(placeholder) => {
                let _ = writeln!(out, "{indent}{}", styled_placeholder(placeholder));
            }
            Block::Columns { columns } => {
                for column in columns {
                    let _ = writeln!(out);
                    render_blocks(out, &column.blocks, indent);
                }
            }
        }
    }
}

fn styled_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(t) => t.clone(),
            Span::Strong(t) => t.bold().to_string(),
            Span::Code(t) => t.cyan().to_string(),
        })
        .collect()
}

fn styled_callout(tone: Tone, text: &str) -> String {
    match tone {
        Tone::Info => format!("{} {text}", "ℹ".blue().bold()),
        Tone::Success => format!("{} {}", "✔".green().bold(), text.green()),
        Tone::Warning => format!("{} {}", "⚠".yellow().bold(), text.yellow()),
    }
}

fn styled_tile(tile: &MetricTile) -> String {
    let label = format!("{:<LABEL_WIDTH$}", tile.label);
    let mut line = format!("  {} {}", label.dimmed(), tile.value.bold());
    if let Some(delta) = &tile.delta {
        let direction = tile.direction.unwrap_or(DeltaDirection::Flat);
        let text = format!("{} {delta}", direction.arrow());
        let styled = match direction {
            DeltaDirection::Up => text.green(),
            DeltaDirection::Down => text.red(),
            DeltaDirection::Flat => text.normal(),
        };
        let _ = write!(line, "  {styled}");
    }
    line
}

fn styled_placeholder(placeholder: &Placeholder) -> String {
    let label = format!("{:<LABEL_WIDTH$}", placeholder.label);
    format!(
        "  {} {}",
        label.dimmed(),
        format!("— {}", placeholder.reason).yellow()
    )
}

/// Render a results check report for the terminal
#[must_use]
pub fn render_diagnostic_report(subject: &str, report: &DiagnosticReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "\n{} {}",
        "===".bold().cyan(),
        format!("Results check: {subject}").bold().cyan()
    );
    let _ = writeln!(out, "{}", rule());

    if report.is_clean() {
        let _ = writeln!(out, "  {} No problems found", "✓".green().bold());
        return out;
    }

    for finding in &report.findings {
        let marker = match finding.severity {
            Severity::Error => "✗".red().bold(),
            Severity::Warning => "⚠".yellow().bold(),
            Severity::Info => "ℹ".blue().bold(),
        };
        let _ = writeln!(out, "  {marker} {} {}", finding.code.dimmed(), finding.message);
        if let Some(suggestion) = &finding.suggestion {
            let _ = writeln!(out, "      {} {}", "→".dimmed(), suggestion.dimmed());
        }
    }

    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(
        out,
        "  {} {} error(s), {} warning(s), {} info",
        "Summary:".dimmed(),
        report.error_count(),
        report.warning_count(),
        report.info_count()
    );
    out
}
