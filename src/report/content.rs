//! Static narrative content of the report page

use crate::report::document::{Block, Sidebar, Tone};

/// Caption prefix for a tile's significance annotation
pub const P_VALUE_CAPTION: &str = "One-sided ΔPR-AUC p-value";

/// Heading of the metric section
pub const PERFORMANCE_HEADING: &str = "Performance at a glance (Tab 4 metrics)";

/// Reason shown on panels when the results input cannot be used
pub const UNAVAILABLE: &str = "unavailable";

/// Sidebar summary
#[must_use]
pub fn sidebar() -> Sidebar {
    Sidebar {
        header: "Project Snapshot".to_string(),
        blocks: vec![
            Block::bullets(&[
                "**Model focus:** Calibrated BBB permeability classification",
                "**Architecture:** Masked multi-task ensemble blended with a single-task baseline",
                "**External validation:** BBBP and out-of-source (OOS) panels",
                "**Status:** Home & documentation pages in place; ligand submission tab coming soon",
            ]),
            Block::callout(
                Tone::Success,
                "Next milestone: interactive ligand screening tab (in development).",
            ),
        ],
    }
}

/// "Why this app exists" and the Tab 4 model highlights
#[must_use]
pub fn introduction() -> Vec<Block> {
    vec![
        Block::heading(2, "Why this app exists"),
        Block::paragraph(
            "Drug discovery teams struggle to predict whether small molecules cross the \
             blood–brain barrier. The manuscript’s fourth tab introduces a sparse-label \
             multi-task (MT) learning workflow that blends auxiliary ADME tasks (PAMPA, PPB, \
             efflux) with a calibrated single-task (ST) baseline. The blended predictor improves \
             both external generalization and probability calibration, addressing two recurring \
             issues in BBB screening campaigns.",
        ),
        Block::heading(3, "Model highlights from Tab 4"),
        Block::bullets(&[
            "**Sparse-label MT training:** Each auxiliary task contributes signal only where \
             assays exist, avoiding label deletion or imputation bias.",
            "**Stacked calibration:** MT logits are linearly blended with the ST baseline before \
             post-hoc calibration selected on the development fold.",
            "**Reproducibility guardrails:** All tables/figures originate from \
             `results/metrics_clean_fixed.json`, with scripted pipelines and stratified \
             bootstraps (B = 2000).",
        ]),
    ]
}

/// Paragraph following the metric panels
#[must_use]
pub fn calibration_note() -> Block {
    Block::paragraph(
        "Calibration improves alongside discrimination: the blended model reports lower Brier \
         score and expected calibration error (ECE) than the single-task baseline, with \
         reliability diagrams approaching the identity line across internal and external \
         datasets.",
    )
}

/// Heading of the Tab 5 section
pub const PROTOCOL_HEADING: &str = "From Tab 5: evaluation protocol & upcoming assets";

/// Left column of the Tab 5 comparison
#[must_use]
pub fn evaluation_blueprint() -> Vec<Block> {
    vec![
        Block::heading(3, "Evaluation blueprint"),
        Block::bullets(&[
            "**Primary metric:** Precision–recall AUC (PR-AUC); ROC-AUC reported as a secondary view.",
            "**Uncertainty:** Stratified bootstrap (B = 2000, seed = 42) yields 95% confidence \
             intervals and ΔPR-AUC hypothesis tests.",
            "**Calibration checks:** Brier score, ECE, and reliability diagrams with equal-mass \
             binning; Platt vs isotonic selected on the development fold.",
            "**Applicability domain:** Coverage vs precision curves using ensemble variance or \
             representation distance thresholds.",
        ]),
    ]
}

/// Right column of the Tab 5 comparison
#[must_use]
pub fn assets_in_progress() -> Vec<Block> {
    vec![
        Block::heading(3, "Assets in progress"),
        Block::bullets(&[
            "External & internal ROC/PR curves with confidence bands",
            "Calibration dashboards (reliability diagrams, ΔECE summaries)",
            "Confusion matrices at 0.5 and Youden thresholds",
            "Feature attribution (SHAP) views for top ADME descriptors",
            "Applicability domain plots showing precision vs coverage trade-offs",
        ]),
    ]
}

/// Notice under the Tab 5 comparison
#[must_use]
pub fn ligand_notice() -> Block {
    Block::callout(
        Tone::Info,
        "The ligand submission workspace will surface alongside these assets. For now, use the \
         Documentation page for setup instructions and repository structure.",
    )
}

/// Roadmap section
#[must_use]
pub fn roadmap() -> Vec<Block> {
    vec![
        Block::heading(3, "Roadmap"),
        Block::numbered(&[
            "**Current** – Communication spine: home and documentation pages summarizing the \
             Tab 4–5 manuscript content.",
            "**Next** – Ligand intake tab with structure upload, descriptor generation, and \
             model scoring.",
            "**Later** – Calibration overlay for user-submitted batches and automated report \
             exports (PDF/CSV).",
        ]),
    ]
}
