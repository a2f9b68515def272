//! Results check: diagnostics for results files
//!
//! Inspects a results file against `studio.toml` and reports what would
//! show up as placeholders or questionable tiles on the page. Findings are
//! grouped into errors (the page degrades), warnings (the page renders but
//! the numbers look wrong) and info (suggestions).

use std::collections::HashSet;
use std::path::Path;

use crate::config::StudioConfig;
use crate::error::Result;
use crate::report::metrics::MetricSet;
use crate::report::results;

/// How badly a results problem affects the rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    /// A panel or tile renders as a placeholder
    Error,
    /// Tiles render, but the values look implausible
    Warning,
    /// The page is complete; the file could say more
    Info,
}

/// One problem found in a results file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Effect on the page
    pub severity: Severity,
    /// Check code, `R001` through `R008`
    pub code: String,
    /// What is wrong, naming the group and record
    pub message: String,
    /// How to fix the file or `studio.toml`
    pub suggestion: Option<String>,
}

/// Outcome of `bbb-studio check` for one results file
#[derive(Debug, Clone)]
pub struct DiagnosticReport {
    /// Findings, errors first
    pub findings: Vec<Finding>,
}

impl DiagnosticReport {
    /// True when the file would render without placeholders or remarks
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Problems that put placeholders on the page
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(&Severity::Error)
    }

    /// Implausible values
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(&Severity::Warning)
    }

    /// Remarks
    #[must_use]
    pub fn info_count(&self) -> usize {
        self.count(&Severity::Info)
    }

    fn count(&self, severity: &Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| &f.severity == severity)
            .count()
    }
}

/// Load a results file and check it.
#[must_use]
pub fn diagnose_file(config: &StudioConfig, path: &Path) -> DiagnosticReport {
    diagnose(config, &results::load(path))
}

/// Run all checks against the outcome of loading a results file.
#[must_use]
pub fn diagnose(config: &StudioConfig, loaded: &Result<MetricSet>) -> DiagnosticReport {
    let mut findings = Vec::new();

    match loaded {
        Err(err) => findings.push(Finding {
            severity: Severity::Error,
            code: "R001".to_string(),
            message: err.to_string(),
            suggestion: Some(
                "Every metric panel will show \"unavailable\" until the file is fixed.".to_string(),
            ),
        }),
        Ok(set) => {
            check_rejected_groups(set, &mut findings);
            check_panels(config, set, &mut findings);
            check_records(config, set, &mut findings);
            check_unused_groups(config, set, &mut findings);
        }
    }

    // Sort: errors first, then warnings, then info
    findings.sort_by_key(|f| match f.severity {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    });

    DiagnosticReport { findings }
}

/// R001: groups present in the file whose records could not be decoded
fn check_rejected_groups(set: &MetricSet, findings: &mut Vec<Finding>) {
    for rejected in &set.rejected {
        findings.push(Finding {
            severity: Severity::Error,
            code: "R001".to_string(),
            message: format!("Group '{}' could not be read: {}", rejected.key, rejected.reason),
            suggestion: Some(
                "Records need a string label, a number or string value, and string delta and p_value"
                    .to_string(),
            ),
        });
    }
}

/// R002: every configured panel needs a non-empty group
fn check_panels(config: &StudioConfig, set: &MetricSet, findings: &mut Vec<Finding>) {
    for panel in &config.panels {
        if set.rejected_group(&panel.key).is_some() {
            continue;
        }
        let problem = match set.group(&panel.key) {
            None => "is missing from the results file",
            Some(group) if group.records.is_empty() => "has no records",
            Some(_) => continue,
        };
        findings.push(Finding {
            severity: Severity::Error,
            code: "R002".to_string(),
            message: format!("Group '{}' ({} panel) {problem}", panel.key, panel.label),
            suggestion: Some(format!(
                "Add a non-empty \"{}\" array, or remove the panel from studio.toml",
                panel.key
            )),
        });
    }
}

/// R003–R007: per-record checks for groups shown on the page
fn check_records(config: &StudioConfig, set: &MetricSet, findings: &mut Vec<Finding>) {
    for panel in &config.panels {
        let Some(group) = set.group(&panel.key) else {
            continue;
        };

        let mut seen = HashSet::new();
        for (index, record) in group.records.iter().enumerate() {
            let label = record.label.trim();
            let position = index + 1;

            if label.is_empty() {
                findings.push(Finding {
                    severity: Severity::Error,
                    code: "R004".to_string(),
                    message: format!("Record #{position} in '{}' has no label", group.key),
                    suggestion: None,
                });
            } else if !seen.insert(label) {
                findings.push(Finding {
                    severity: Severity::Warning,
                    code: "R006".to_string(),
                    message: format!("Label '{label}' appears more than once in '{}'", group.key),
                    suggestion: Some("Each tile in a panel should have a distinct label".to_string()),
                });
            }

            match &record.value {
                None => findings.push(Finding {
                    severity: Severity::Error,
                    code: "R003".to_string(),
                    message: format!(
                        "Record #{position} ('{label}') in '{}' has no value",
                        group.key
                    ),
                    suggestion: Some("The tile will render as a placeholder".to_string()),
                }),
                Some(value) => {
                    if let Some(n) = value.as_number() {
                        if label.to_ascii_uppercase().ends_with("AUC") && !(0.0..=1.0).contains(&n)
                        {
                            findings.push(Finding {
                                severity: Severity::Warning,
                                code: "R005".to_string(),
                                message: format!(
                                    "'{label}' in '{}' is {n}, outside [0, 1]",
                                    group.key
                                ),
                                suggestion: Some(
                                    "AUC values are fractions; check for percentages".to_string(),
                                ),
                            });
                        }
                    }
                }
            }

            if record.p_value.is_some() && record.delta.is_none() {
                findings.push(Finding {
                    severity: Severity::Info,
                    code: "R007".to_string(),
                    message: format!(
                        "'{label}' in '{}' has a p-value but no delta",
                        group.key
                    ),
                    suggestion: Some(
                        "The p-value refers to ΔPR-AUC; add the delta it tests".to_string(),
                    ),
                });
            }
        }
    }
}

/// R008: groups in the file that no panel displays
fn check_unused_groups(config: &StudioConfig, set: &MetricSet, findings: &mut Vec<Finding>) {
    for group in &set.groups {
        if config.get_panel(&group.key).is_none() {
            findings.push(Finding {
                severity: Severity::Info,
                code: "R008".to_string(),
                message: format!("Group '{}' is not shown by any panel", group.key),
                suggestion: Some(format!(
                    "Add a [[panel]] with key = \"{}\" to studio.toml to display it",
                    group.key
                )),
            });
        }
    }
}
