//! Render history
//!
//! Append-only JSON Lines log of renders made from the command line,
//! stored as `renders.jsonl` in the history directory.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use crate::report::document::Document;
use crate::report::results::ReportInput;
use crate::surface::Surface;

/// One rendered report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderEntry {
    /// When the render finished
    pub timestamp: DateTime<Utc>,
    /// Output surface
    pub surface: Surface,
    /// Where the metrics came from
    pub source: String,
    /// Number of metric tiles shown
    pub tiles: usize,
    /// Number of placeholders shown
    pub placeholders: usize,
    /// Banner text, if the results input was degraded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl RenderEntry {
    /// Summarize a finished render
    #[must_use]
    pub fn new(surface: Surface, input: &ReportInput, doc: &Document) -> Self {
        Self {
            timestamp: Utc::now(),
            surface,
            source: input.source.describe(),
            tiles: doc.tiles().len(),
            placeholders: doc.placeholders().len(),
            notice: input.notice.clone(),
        }
    }
}

/// JSONL writer and reader for the render history
pub struct RenderHistory {
    log_path: PathBuf,
}

impl RenderHistory {
    /// Open the history in `dir`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create history directory: {}", dir.display()))?;

        Ok(Self {
            log_path: dir.join("renders.jsonl"),
        })
    }

    /// Append an entry
    pub fn append(&self, entry: &RenderEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open history file: {}", self.log_path.display()))?;

        let json = serde_json::to_string(entry).context("Failed to serialize render entry")?;
        writeln!(file, "{json}").context("Failed to write to history file")?;

        Ok(())
    }

    /// Read all entries, oldest first
    pub fn read_all(&self) -> Result<Vec<RenderEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.log_path)
            .with_context(|| format!("Failed to read history file: {}", self.log_path.display()))?;

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_num, line)| {
                serde_json::from_str::<RenderEntry>(line)
                    .with_context(|| format!("Failed to parse line {} as JSON", line_num + 1))
            })
            .collect()
    }

    /// Path to the history file
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StudioConfig;
    use tempfile::TempDir;

    fn entry(surface: Surface, tiles: usize) -> RenderEntry {
        RenderEntry {
            timestamp: Utc::now(),
            surface,
            source: "manuscript values".to_string(),
            tiles,
            placeholders: 0,
            notice: None,
        }
    }

    #[test]
    fn test_new_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join(".bbb-studio");

        let history = RenderHistory::new(&dir).unwrap();

        assert!(dir.exists());
        assert_eq!(history.log_path(), dir.join("renders.jsonl"));
    }

    #[test]
    fn test_read_all_without_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let history = RenderHistory::new(temp_dir.path()).unwrap();
        assert!(history.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_then_read_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let history = RenderHistory::new(temp_dir.path()).unwrap();

        history.append(&entry(Surface::Terminal, 4)).unwrap();
        history.append(&entry(Surface::Html, 3)).unwrap();

        let content = fs::read_to_string(history.log_path()).unwrap();
        assert_eq!(content.lines().count(), 2);

        let entries = history.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].surface, Surface::Terminal);
        assert_eq!(entries[0].tiles, 4);
        assert_eq!(entries[1].surface, Surface::Html);
    }

    #[test]
    fn test_read_all_skips_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        let history = RenderHistory::new(temp_dir.path()).unwrap();
        history.append(&entry(Surface::Json, 1)).unwrap();

        let mut file = OpenOptions::new()
            .append(true)
            .open(history.log_path())
            .unwrap();
        writeln!(file, "\n   ").unwrap();

        assert_eq!(history.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_read_all_reports_bad_line() {
        let temp_dir = TempDir::new().unwrap();
        let history = RenderHistory::new(temp_dir.path()).unwrap();
        history.append(&entry(Surface::Json, 1)).unwrap();
        fs::write(
            history.log_path(),
            format!("{}\nnot json\n", fs::read_to_string(history.log_path()).unwrap().trim()),
        )
        .unwrap();

        let err = history.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_entry_from_render() {
        let config = StudioConfig::default();
        let input = ReportInput::manuscript();
        let doc = crate::report::render(&config, &input).unwrap();

        let entry = RenderEntry::new(Surface::Markdown, &input, &doc);
        assert_eq!(entry.source, "manuscript values");
        assert_eq!(entry.tiles, 4);
        assert_eq!(entry.placeholders, 0);
        assert!(entry.notice.is_none());
    }
}
