//! Multi-source alignment: every readable source must agree.

use std::path::Path;

use crate::git::{GitRunner, latest_tag, list_tags};
use crate::hygiene::catalog::GIT_MARKER;
use crate::report::model::{VersionEvidenceReport, VersionSource};
use crate::util::paths::{EntryKind, Presence, probe, resolve_repo_path};
use crate::util::verdict::Verdict;
use crate::version::manifest::ManifestKind;
use crate::version::{expected_or_none, normalize_expected, satisfies};

pub const TOOL: &str = "collect_version_sources";
pub const GIT_TAG_SOURCE: &str = "git_tag";

pub fn collect_version_sources(
    git: &dyn GitRunner,
    repo_path: &str,
    expected_tag: Option<&str>,
) -> VersionEvidenceReport {
    let root = resolve_repo_path(repo_path);
    let expected = expected_or_none(expected_tag);

    if probe(&root, EntryKind::Any) == Presence::Absent {
        tracing::info!(tool = TOOL, repo_path = %root.display(), "repo_path does not exist");
        return VersionEvidenceReport {
            tool: TOOL.to_string(),
            repo_path: root.display().to_string(),
            expected_tag: expected.map(str::to_string),
            sources: Vec::new(),
            all_aligned: false,
            error: Some("repo_path does not exist".to_string()),
        };
    }

    let mut sources: Vec<VersionSource> = ManifestKind::ALL
        .iter()
        .filter_map(|kind| manifest_source(&root, *kind, expected))
        .collect();

    if probe(&root.join(GIT_MARKER), EntryKind::Any) == Presence::Present {
        sources.push(git_tag_source(git, &root, expected));
    }

    let all_aligned = Verdict::all(sources.iter().map(|s| Verdict::from_bool(s.aligned))).passed();
    tracing::info!(
        tool = TOOL,
        repo_path = %root.display(),
        sources = sources.len(),
        all_aligned,
        "version sources collected"
    );

    VersionEvidenceReport {
        tool: TOOL.to_string(),
        repo_path: root.display().to_string(),
        expected_tag: expected.map(str::to_string),
        sources,
        all_aligned,
        error: None,
    }
}

/// `None` when the manifest is simply not there; such files are not
/// evidence either way.
fn manifest_source(root: &Path, kind: ManifestKind, expected: Option<&str>) -> Option<VersionSource> {
    let file = kind.file_name();
    let source = match probe(&root.join(file), EntryKind::File) {
        Presence::Absent => return None,
        Presence::Unknown(err) => VersionSource {
            source: file.to_string(),
            version: None,
            aligned: false,
            error: Some(err),
        },
        Presence::Present => match kind.read(root) {
            Ok(version) => VersionSource {
                source: file.to_string(),
                aligned: version.as_deref().is_some_and(|v| satisfies(v, expected)),
                version,
                error: None,
            },
            Err(err) => VersionSource {
                source: file.to_string(),
                version: None,
                aligned: false,
                error: Some(err.to_string()),
            },
        },
    };
    tracing::debug!(source = %source.source, version = ?source.version, aligned = source.aligned, "version source read");
    Some(source)
}

/// With an expected tag, look it up with and without the `v` prefix so
/// `v1.2.3` and `1.2.3` find the same tag. Without one, report the latest
/// reachable tag.
fn git_tag_source(git: &dyn GitRunner, root: &Path, expected: Option<&str>) -> VersionSource {
    let lookup = match expected {
        Some(tag) => {
            let wanted = normalize_expected(tag);
            let prefixed = format!("v{wanted}");
            list_tags(git, root, &[wanted, prefixed.as_str()])
                .map(|tags| tags.into_iter().find(|t| normalize_expected(t) == wanted))
        }
        None => latest_tag(git, root),
    };

    match lookup {
        Ok(tag) => VersionSource {
            source: GIT_TAG_SOURCE.to_string(),
            aligned: tag.is_some(),
            version: tag,
            error: None,
        },
        Err(err) => {
            tracing::warn!(repo_path = %root.display(), error = %err, "git tag lookup failed");
            VersionSource {
                source: GIT_TAG_SOURCE.to_string(),
                version: None,
                aligned: false,
                error: Some(err.to_string()),
            }
        }
    }
}
