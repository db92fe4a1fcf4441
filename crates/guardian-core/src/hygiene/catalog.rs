//! Check identifiers and the files each one looks for.
//!
//! Adding a presence check means adding a `CheckId` variant and a row to a
//! table below; evaluation is driven entirely by these tables. Candidate
//! order matters: the first match is reported.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::util::paths::{EntryKind, Presence, probe};
use crate::util::verdict::Verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    // static policy
    HasPackageDefinition,
    HasLicense,
    HasReadme,
    HasBugReportTemplate,
    HasCiWorkflows,
    HasV1Contract,
    HasDeterminismNotes,
    // git-aware policy
    IsGitRepo,
    CleanWorkingTree,
    NoUntrackedFiles,
    HasChangelog,
}

impl CheckId {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckId::HasPackageDefinition => "has_package_definition",
            CheckId::HasLicense => "has_license",
            CheckId::HasReadme => "has_readme",
            CheckId::HasBugReportTemplate => "has_bug_report_template",
            CheckId::HasCiWorkflows => "has_ci_workflows",
            CheckId::HasV1Contract => "has_v1_contract",
            CheckId::HasDeterminismNotes => "has_determinism_notes",
            CheckId::IsGitRepo => "is_git_repo",
            CheckId::CleanWorkingTree => "clean_working_tree",
            CheckId::NoUntrackedFiles => "no_untracked_files",
            CheckId::HasChangelog => "has_changelog",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const PACKAGE_MANIFESTS: &[&str] = &[
    "pyproject.toml",
    "setup.py",
    "setup.cfg",
    "package.json",
    "Cargo.toml",
];

pub const LICENSE_FILES: &[&str] = &["LICENSE", "LICENSE.txt", "LICENSE.md", "LICENSE.rst", "COPYING"];

pub const README_FILES: &[&str] = &["README.md", "README.rst", "README.txt", "README"];

pub const CHANGELOG_FILES: &[&str] = &[
    "CHANGELOG.md",
    "CHANGELOG.rst",
    "CHANGELOG.txt",
    "CHANGELOG",
    "HISTORY.md",
];

pub const BUG_REPORT_TEMPLATES: &[&str] = &[
    ".github/ISSUE_TEMPLATE/bug_report.md",
    ".github/ISSUE_TEMPLATE/bug_report.yml",
    ".github/ISSUE_TEMPLATE/bug_report.yaml",
];

pub const CI_WORKFLOWS_DIR: &str = ".github/workflows";
pub const V1_CONTRACT_DOC: &str = "docs/V1_CONTRACT.md";
pub const DETERMINISM_DOC: &str = "docs/DETERMINISM.md";
pub const GIT_MARKER: &str = ".git";

/// How a check decides presence.
#[derive(Debug, Clone, Copy)]
pub enum Probe {
    /// First existing regular file among the candidates.
    AnyFile(&'static [&'static str]),
    /// A directory at a fixed sub-path.
    Dir(&'static str),
    /// A regular file at a fixed sub-path.
    File(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct PresenceCheck {
    pub id: CheckId,
    pub label: &'static str,
    pub probe: Probe,
}

/// The static policy, in contract order.
pub const STATIC_CHECKS: &[PresenceCheck] = &[
    PresenceCheck {
        id: CheckId::HasPackageDefinition,
        label: "package definition",
        probe: Probe::AnyFile(PACKAGE_MANIFESTS),
    },
    PresenceCheck {
        id: CheckId::HasLicense,
        label: "LICENSE file",
        probe: Probe::AnyFile(LICENSE_FILES),
    },
    PresenceCheck {
        id: CheckId::HasReadme,
        label: "README file",
        probe: Probe::AnyFile(README_FILES),
    },
    PresenceCheck {
        id: CheckId::HasBugReportTemplate,
        label: "bug report template",
        probe: Probe::AnyFile(BUG_REPORT_TEMPLATES),
    },
    PresenceCheck {
        id: CheckId::HasCiWorkflows,
        label: "CI workflows directory",
        probe: Probe::Dir(CI_WORKFLOWS_DIR),
    },
    PresenceCheck {
        id: CheckId::HasV1Contract,
        label: "V1 contract document",
        probe: Probe::File(V1_CONTRACT_DOC),
    },
    PresenceCheck {
        id: CheckId::HasDeterminismNotes,
        label: "determinism notes",
        probe: Probe::File(DETERMINISM_DOC),
    },
];

/// Presence checks that follow the status checks in the git-aware policy.
pub const GIT_AWARE_PRESENCE_CHECKS: &[PresenceCheck] = &[
    PresenceCheck {
        id: CheckId::HasReadme,
        label: "README file",
        probe: Probe::AnyFile(README_FILES),
    },
    PresenceCheck {
        id: CheckId::HasLicense,
        label: "LICENSE file",
        probe: Probe::AnyFile(LICENSE_FILES),
    },
    PresenceCheck {
        id: CheckId::HasChangelog,
        label: "CHANGELOG file",
        probe: Probe::AnyFile(CHANGELOG_FILES),
    },
];

/// Outcome of one presence probe before it is turned into a report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub verdict: Verdict,
    pub details: String,
}

impl PresenceCheck {
    pub fn evaluate(&self, root: &Path) -> ProbeOutcome {
        match self.probe {
            Probe::AnyFile(candidates) => evaluate_candidates(root, self.label, candidates),
            Probe::Dir(sub) => evaluate_single(root, self.label, sub, EntryKind::Dir),
            Probe::File(sub) => evaluate_single(root, self.label, sub, EntryKind::File),
        }
    }
}

fn evaluate_candidates(root: &Path, label: &str, candidates: &[&str]) -> ProbeOutcome {
    let mut unreadable = Vec::new();
    for candidate in candidates {
        match probe(&root.join(candidate), EntryKind::File) {
            Presence::Present => {
                return ProbeOutcome {
                    verdict: Verdict::Pass,
                    details: format!("Found {candidate}"),
                };
            }
            Presence::Absent => {}
            Presence::Unknown(err) => unreadable.push(err),
        }
    }

    if unreadable.is_empty() {
        ProbeOutcome {
            verdict: Verdict::Fail,
            details: format!("No {label} found (checked: {})", candidates.join(", ")),
        }
    } else {
        ProbeOutcome {
            verdict: Verdict::Indeterminate,
            details: format!("Could not determine {label}: {}", unreadable.join("; ")),
        }
    }
}

fn evaluate_single(root: &Path, label: &str, sub: &str, kind: EntryKind) -> ProbeOutcome {
    let presence = probe(&root.join(sub), kind);
    let details = match &presence {
        Presence::Present => format!("Found {sub}"),
        Presence::Absent => format!("No {label} found (checked: {sub})"),
        Presence::Unknown(err) => format!("Could not determine {label}: {err}"),
    };
    ProbeOutcome {
        verdict: presence.verdict(),
        details,
    }
}

pub fn has_ci_workflows(root: &Path) -> bool {
    probe(&root.join(CI_WORKFLOWS_DIR), EntryKind::Dir) == Presence::Present
}

pub fn has_bug_template(root: &Path) -> bool {
    BUG_REPORT_TEMPLATES
        .iter()
        .any(|c| probe(&root.join(c), EntryKind::File) == Presence::Present)
}
