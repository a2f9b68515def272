//! Inline markup for narrative text.
//!
//! Supports `**strong**` and `` `code` `` spans. Unclosed or empty markers
//! are kept as literal text.

use serde::{Deserialize, Serialize};

/// A run of inline text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", content = "text", rename_all = "snake_case")]
pub enum Span {
    /// Plain text
    Text(String),
    /// Emphasised text
    Strong(String),
    /// Inline code (file names, identifiers)
    Code(String),
}

impl Span {
    /// The text of the span without styling
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(t) | Self::Strong(t) | Self::Code(t) => t,
        }
    }
}

/// Split a line of narrative text into styled spans.
#[must_use]
pub fn parse_inline(source: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = source;

    while let Some(c) = rest.chars().next() {
        let marker = if rest.starts_with("**") {
            Some("**")
        } else if c == '`' {
            Some("`")
        } else {
            None
        };

        if let Some(marker) = marker {
            let after = &rest[marker.len()..];
            if let Some(close) = after.find(marker) {
                let inner = &after[..close];
                if !inner.is_empty() {
                    if !plain.is_empty() {
                        spans.push(Span::Text(std::mem::take(&mut plain)));
                    }
                    let inner = inner.to_string();
                    spans.push(if marker == "`" {
                        Span::Code(inner)
                    } else {
                        Span::Strong(inner)
                    });
                    rest = &after[close + marker.len()..];
                    continue;
                }
            }
            // Unmatched or empty marker: emit it literally
            plain.push_str(marker);
            rest = after;
            continue;
        }

        plain.push(c);
        rest = &rest[c.len_utf8()..];
    }

    if !plain.is_empty() {
        spans.push(Span::Text(plain));
    }
    spans
}

/// Concatenate spans back into unstyled text
#[must_use]
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(Span::text).collect()
}
