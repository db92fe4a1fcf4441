use serde::{Deserialize, Serialize};

use crate::hygiene::catalog::CheckId;

/// One hygiene predicate evaluated against a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_id: CheckId,
    pub ok: bool,
    pub details: String,
}

/// Result of `check_repo_hygiene` / `check_git_hygiene`.
///
/// `ok` is the conjunction of every check; `fail_closed` is its negation
/// and is also forced on when the check list had to be cut short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HygieneReport {
    pub tool: String,
    pub repo_path: String,
    pub ok: bool,
    pub checks: Vec<CheckResult>,
    pub fail_closed: bool,
}

impl HygieneReport {
    pub fn check(&self, id: CheckId) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.check_id == id)
    }
}

/// Where a version string was read from in single-source mode.
///
/// Both fields are always serialized; `null` means nothing was detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DetectedVersion {
    pub version: Option<String>,
    pub source: Option<String>,
}

/// Result of `check_version_alignment` (single authoritative source).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionAlignmentReport {
    pub tool: String,
    pub repo_path: String,
    pub ok: bool,
    pub expected_tag: Option<String>,
    pub detected: DetectedVersion,
    pub details: String,
    pub fail_closed: bool,
}

/// One reading in multi-source mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSource {
    pub source: String,
    pub version: Option<String>,
    pub aligned: bool,
    pub error: Option<String>,
}

/// Result of `collect_version_sources` (every available source).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEvidenceReport {
    pub tool: String,
    pub repo_path: String,
    pub expected_tag: Option<String>,
    pub sources: Vec<VersionSource>,
    pub all_aligned: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistCategory {
    Hygiene,
    Versioning,
    Documentation,
    Quality,
    Release,
}

impl std::fmt::Display for ChecklistCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChecklistCategory::Hygiene => "hygiene",
            ChecklistCategory::Versioning => "versioning",
            ChecklistCategory::Documentation => "documentation",
            ChecklistCategory::Quality => "quality",
            ChecklistCategory::Release => "release",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub item: String,
    pub category: ChecklistCategory,
    pub required: bool,
}

/// Local signals sampled while generating a checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistInputs {
    pub detected_version: Option<String>,
    pub has_ci_workflows: bool,
    pub has_bug_template: bool,
}

/// Result of `generate_release_checklist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistReport {
    pub tool: String,
    pub repo_path: String,
    pub target_tag: String,
    pub items: Vec<ChecklistItem>,
    pub total: usize,
    pub required_count: usize,
    pub checklist_markdown: String,
    pub inputs_used: ChecklistInputs,
    pub fail_closed: bool,
}
