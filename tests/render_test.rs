#![allow(missing_docs)]

use std::path::Path;

use tempfile::TempDir;

use bbb_studio::report::document::Block;
use bbb_studio::report::{render, MetricRecord, MetricSet, MetricSource, ReportInput};
use bbb_studio::{StudioConfig, Surface};

const RESULTS: &str = r#"{
  "internal": [
    {"label": "PR-AUC", "value": 0.915, "delta": "+0.102"},
    {"label": "ROC-AUC", "value": 0.864},
    {"label": "Brier", "value": 0.118, "delta": "-0.012"},
    {"label": "ECE", "value": 0.041, "delta": "-0.019"}
  ],
  "bbbp": [
    {"label": "PR-AUC", "value": 0.950, "delta": "+0.155", "p_value": "< 0.001"}
  ],
  "oos": [
    {"label": "PR-AUC", "value": 0.944, "delta": "+0.185", "p-value": "< 0.001"}
  ]
}"#;

fn write_results(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("metrics_clean_fixed.json");
    std::fs::write(&path, content).unwrap();
    path
}

fn config_with_results(path: &Path) -> StudioConfig {
    StudioConfig::default().with_results_path(Some(path.to_path_buf()))
}

/// The manuscript figures appear on the page exactly as reported.
#[test]
fn test_manuscript_figures() {
    let config = StudioConfig::default();
    let doc = render(&config, &ReportInput::manuscript()).unwrap();

    let find = |label: &str| {
        doc.tiles()
            .into_iter()
            .find(|t| t.label == label)
            .unwrap_or_else(|| panic!("no tile labelled {label}"))
            .clone()
    };

    let internal = find("Internal PR-AUC");
    assert_eq!(internal.value, "0.915");
    assert_eq!(internal.delta.as_deref(), Some("+0.102"));

    let bbbp = find("BBBP PR-AUC");
    assert_eq!(bbbp.value, "0.950");
    assert_eq!(bbbp.delta.as_deref(), Some("+0.155"));

    let oos = find("OOS PR-AUC");
    assert_eq!(oos.value, "0.944");
    assert_eq!(oos.delta.as_deref(), Some("+0.185"));

    for key in ["bbbp", "oos"] {
        let column = doc.column(key).unwrap();
        assert!(column.blocks.iter().any(|b| matches!(
            b,
            Block::Caption { text } if text.ends_with("p-value < 0.001")
        )));
    }
}

/// Every record of every group becomes exactly one tile, in file order.
#[test]
fn test_one_tile_per_record_in_insertion_order() {
    let dir = TempDir::new().unwrap();
    let path = write_results(&dir, RESULTS);
    let config = config_with_results(&path);

    let input = ReportInput::resolve(&config);
    let doc = render(&config, &input).unwrap();

    let labels: Vec<&str> = doc.tiles().iter().map(|t| t.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Internal PR-AUC",
            "Internal ROC-AUC",
            "Internal Brier",
            "Internal ECE",
            "BBBP PR-AUC",
            "OOS PR-AUC",
        ]
    );
    assert!(doc.placeholders().is_empty());
}

/// Rendering the same input twice yields byte-identical output.
#[test]
fn test_render_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = write_results(&dir, RESULTS);
    let config = config_with_results(&path);

    let first = render(&config, &ReportInput::resolve(&config)).unwrap();
    let second = render(&config, &ReportInput::resolve(&config)).unwrap();
    assert_eq!(first, second);

    for surface in [Surface::Json, Surface::Markdown, Surface::Html] {
        assert_eq!(
            surface.render(&first).unwrap(),
            surface.render(&second).unwrap(),
            "{} output differs between renders",
            surface.name()
        );
    }
}

/// An empty group shows a placeholder instead of an empty column.
#[test]
fn test_empty_group_shows_placeholder() {
    let mut set = MetricSet::manuscript();
    set.insert("bbbp", vec![]);
    let input = ReportInput::from_set(MetricSource::Manuscript, set);

    let doc = render(&StudioConfig::default(), &input).unwrap();
    let column = doc.column("bbbp").unwrap();
    assert_eq!(column.blocks.len(), 1);
    let Block::Placeholder(placeholder) = &column.blocks[0] else {
        panic!("expected a placeholder, got {:?}", column.blocks[0]);
    };
    assert_eq!(placeholder.label, "BBBP metrics");
    assert_eq!(doc.tiles().len(), 3);
}

/// A missing results file still renders every narrative section.
#[test]
fn test_missing_results_file_keeps_narrative() {
    let dir = TempDir::new().unwrap();
    let config = config_with_results(&dir.path().join("absent.json"));

    let input = ReportInput::resolve(&config);
    let doc = render(&config, &input).unwrap();
    let manuscript = render(&StudioConfig::default(), &ReportInput::manuscript()).unwrap();

    assert!(doc.tiles().is_empty());
    assert_eq!(doc.placeholders().len(), 3);
    assert!(doc
        .placeholders()
        .iter()
        .all(|p| p.reason == "unavailable"));
    assert_eq!(doc.headings(), manuscript.headings());
    assert_eq!(doc.sidebar, manuscript.sidebar);

    let md = Surface::Markdown.render(&doc).unwrap();
    assert!(md.contains("absent.json"));
    assert!(md.contains("### Roadmap"));
}

/// A malformed file degrades to placeholders and a banner, never zeros.
#[test]
fn test_malformed_results_file() {
    let dir = TempDir::new().unwrap();
    let path = write_results(&dir, "{\"internal\": [ {\"label\": ");
    let config = config_with_results(&path);

    let input = ReportInput::resolve(&config);
    assert!(input.metrics.is_none());
    let doc = render(&config, &input).unwrap();

    assert!(doc.tiles().is_empty());
    let banner = doc
        .body
        .iter()
        .find_map(|b| match b {
            Block::Callout { text, .. } if text.contains("could not be used") => Some(text),
            _ => None,
        })
        .expect("warning banner");
    assert!(banner.contains("metrics_clean_fixed.json"));

    let json = Surface::Json.render(&doc).unwrap();
    assert!(!json.contains("0.000"));
}

/// The results file is only ever read.
#[test]
fn test_results_file_is_not_modified() {
    let dir = TempDir::new().unwrap();
    let path = write_results(&dir, RESULTS);
    let before = std::fs::metadata(&path).unwrap().modified().unwrap();

    let config = config_with_results(&path);
    render(&config, &ReportInput::resolve(&config)).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), RESULTS);
    assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), before);
}

/// Panels come from studio.toml, in the order they are declared.
#[test]
fn test_panels_from_config_file() {
    let dir = TempDir::new().unwrap();
    let results = write_results(&dir, RESULTS);
    let config_path = dir.path().join("studio.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[results]
path = "{}"

[[panel]]
key = "oos"
label = "Out-of-source"

[[panel]]
key = "internal"
label = "Internal"
"#,
            results.display()
        ),
    )
    .unwrap();

    let config = StudioConfig::from_path(&config_path).unwrap();
    let doc = render(&config, &ReportInput::resolve(&config)).unwrap();
    let labels: Vec<&str> = doc.tiles().iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels[0], "Out-of-source PR-AUC");
    assert_eq!(labels[1], "Internal PR-AUC");
    assert_eq!(labels.len(), 5);
}

/// A record without a value is a visible placeholder next to its siblings.
#[test]
fn test_record_without_value() {
    let mut record = MetricRecord::new("ECE", 0.0);
    record.value = None;
    let mut set = MetricSet::manuscript();
    set.insert(
        "internal",
        vec![MetricRecord::new("PR-AUC", 0.915).with_delta("+0.102"), record],
    );

    let doc = render(
        &StudioConfig::default(),
        &ReportInput::from_set(MetricSource::Manuscript, set),
    )
    .unwrap();
    let placeholders = doc.placeholders();
    assert_eq!(placeholders.len(), 1);
    assert_eq!(placeholders[0].label, "Internal ECE");
    assert_eq!(doc.tiles().len(), 3);
}

/// One unreadable group only blanks its own panel; the others keep their tiles.
#[test]
fn test_unreadable_group_only_affects_its_panel() {
    let dir = TempDir::new().unwrap();
    let path = write_results(
        &dir,
        r#"{
  "internal": [{"label": "PR-AUC", "value": 0.915, "delta": "+0.102"}],
  "bbbp": [{"label": "PR-AUC", "value": 0.95, "delta": 0.155}],
  "oos": [{"label": "PR-AUC", "value": 0.944, "delta": "+0.185"}]
}"#,
    );
    let config = config_with_results(&path);

    let input = ReportInput::resolve(&config);
    let doc = render(&config, &input).unwrap();

    let labels: Vec<&str> = doc.tiles().iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["Internal PR-AUC", "OOS PR-AUC"]);

    let placeholders = doc.placeholders();
    assert_eq!(placeholders.len(), 1);
    assert_eq!(placeholders[0].label, "BBBP metrics");
    assert_eq!(placeholders[0].reason, "unavailable");

    let notice = input.notice.as_deref().expect("warning banner");
    assert!(notice.contains("`bbbp`"));
    assert!(notice.contains("0.155"));
    assert!(doc.body.iter().any(|b| matches!(
        b,
        Block::Callout { text, .. } if text == notice
    )));
}
