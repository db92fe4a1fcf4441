//! Single authoritative source alignment.
//!
//! Only `pyproject.toml` is consulted. The outcome distinguishes two kinds
//! of failure: nothing could be detected (`fail_closed`), and a version was
//! detected but differs from the expected tag (an ordinary mismatch).

use std::path::Path;

use crate::report::model::{DetectedVersion, VersionAlignmentReport};
use crate::util::paths::{EntryKind, Presence, probe, resolve_repo_path};
use crate::version::manifest::ManifestKind;
use crate::version::{expected_or_none, normalize_expected, satisfies};

pub const TOOL: &str = "check_version_alignment";

pub const AUTHORITATIVE_SOURCE: ManifestKind = ManifestKind::Pyproject;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    Detected { version: String },
    Undetected { reason: String },
}

impl Detection {
    pub fn version(&self) -> Option<&str> {
        match self {
            Detection::Detected { version } => Some(version.as_str()),
            Detection::Undetected { .. } => None,
        }
    }
}

/// Read the authoritative manifest under an already-resolved root.
pub fn detect_version(root: &Path) -> Detection {
    let file = AUTHORITATIVE_SOURCE.file_name();

    if probe(root, EntryKind::Any) == Presence::Absent {
        return Detection::Undetected {
            reason: "repo_path does not exist".to_string(),
        };
    }

    match probe(&root.join(file), EntryKind::File) {
        Presence::Present => {}
        Presence::Absent => {
            return Detection::Undetected {
                reason: format!("{file} not found"),
            };
        }
        Presence::Unknown(err) => {
            return Detection::Undetected {
                reason: format!("{file} is not readable: {err}"),
            };
        }
    }

    match AUTHORITATIVE_SOURCE.read(root) {
        Ok(Some(version)) => Detection::Detected { version },
        Ok(None) => Detection::Undetected {
            reason: format!("{file} declares no version in [project] or [tool.poetry]"),
        },
        Err(err) => Detection::Undetected {
            reason: err.to_string(),
        },
    }
}

pub fn check_version_alignment(repo_path: &str, expected_tag: Option<&str>) -> VersionAlignmentReport {
    let root = resolve_repo_path(repo_path);
    let expected = expected_or_none(expected_tag);
    let detection = detect_version(&root);
    let file = AUTHORITATIVE_SOURCE.file_name();

    let (ok, details) = match (&detection, expected) {
        (Detection::Undetected { reason }, _) => {
            (false, format!("Version could not be detected: {reason}"))
        }
        (Detection::Detected { version }, None) => (
            true,
            format!("Detected version {version} in {file}; no expected tag given"),
        ),
        (Detection::Detected { version }, Some(tag)) => {
            if satisfies(version, Some(tag)) {
                (true, format!("{file} version {version} matches expected tag {tag}"))
            } else {
                (
                    false,
                    format!(
                        "{file} version {version} does not match expected tag {tag} (compared as {})",
                        normalize_expected(tag)
                    ),
                )
            }
        }
    };

    let fail_closed = detection.version().is_none();
    tracing::info!(
        tool = TOOL,
        repo_path = %root.display(),
        expected = ?expected,
        detected = ?detection.version(),
        ok,
        fail_closed,
        "version alignment evaluated"
    );

    VersionAlignmentReport {
        tool: TOOL.to_string(),
        repo_path: root.display().to_string(),
        ok,
        expected_tag: expected.map(str::to_string),
        detected: DetectedVersion {
            source: detection.version().map(|_| file.to_string()),
            version: detection.version().map(str::to_string),
        },
        details,
        fail_closed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo_with_pyproject(body: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pyproject.toml"), body).unwrap();
        dir
    }

    fn path(dir: &TempDir) -> String {
        dir.path().display().to_string()
    }

    #[test]
    fn mismatch_is_not_fail_closed() {
        let dir = repo_with_pyproject("[project]\nversion = \"0.1.0\"\n");
        let report = check_version_alignment(&path(&dir), Some("v9.9.9"));
        assert!(!report.ok);
        assert!(!report.fail_closed);
        assert!(report.details.contains("compared as 9.9.9"));
    }

    #[test]
    fn unparseable_manifest_is_fail_closed_with_parse_error() {
        let dir = repo_with_pyproject("[project\n");
        let report = check_version_alignment(&path(&dir), Some("v0.1.0"));
        assert!(report.fail_closed);
        assert_eq!(report.detected, DetectedVersion::default());
        assert!(report.details.contains("failed to parse pyproject.toml"));
    }

    #[test]
    fn missing_path_is_reported_in_details() {
        let report = check_version_alignment("/nonexistent/release-guardian", None);
        assert!(!report.ok);
        assert!(report.fail_closed);
        assert!(report.details.contains("repo_path does not exist"));
    }

    #[test]
    fn detected_version_is_echoed_verbatim() {
        let dir = repo_with_pyproject("[project]\nversion = \"v0.1.0\"\n");
        let report = check_version_alignment(&path(&dir), Some("v0.1.0"));
        assert_eq!(report.detected.version.as_deref(), Some("v0.1.0"));
        assert!(!report.ok);
    }

    #[test]
    fn blank_expected_tag_behaves_as_omitted() {
        let dir = repo_with_pyproject("[project]\nversion = \"0.1.0\"\n");
        let report = check_version_alignment(&path(&dir), Some(""));
        assert!(report.ok);
        assert_eq!(report.expected_tag, None);
    }
}
