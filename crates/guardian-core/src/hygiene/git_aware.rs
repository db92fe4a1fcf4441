//! Hygiene policy for git working trees.
//!
//! A directory that is not a working tree is reported with the single
//! `is_git_repo` row and nothing else.

use crate::git::{GitRunner, worktree_status};
use crate::hygiene::catalog::{CheckId, GIT_AWARE_PRESENCE_CHECKS, GIT_MARKER};
use crate::hygiene::{assemble, presence_row, row};
use crate::report::model::HygieneReport;
use crate::util::paths::{EntryKind, Presence, probe, resolve_repo_path};
use crate::util::verdict::Verdict;

pub const TOOL: &str = "check_git_hygiene";

pub fn check_git_hygiene(git: &dyn GitRunner, repo_path: &str) -> HygieneReport {
    let root = resolve_repo_path(repo_path);
    let marker = root.join(GIT_MARKER);

    let presence = match probe(&root, EntryKind::Dir) {
        Presence::Present => probe(&marker, EntryKind::Any),
        other => other,
    };
    let details = match &presence {
        Presence::Present => format!("{} exists", marker.display()),
        Presence::Absent => "No .git directory found".to_string(),
        Presence::Unknown(err) => format!("Could not determine git state: {err}"),
    };

    let mut evaluated = vec![row(CheckId::IsGitRepo, presence.verdict(), details)];
    if presence != Presence::Present {
        return assemble(TOOL, &root, evaluated, false);
    }

    match worktree_status(git, &root) {
        Ok(status) => {
            let clean = status.modified.is_empty();
            evaluated.push(row(
                CheckId::CleanWorkingTree,
                Verdict::from_bool(clean),
                if clean {
                    "Working tree is clean".to_string()
                } else {
                    format!("{} modified/staged file(s)", status.modified.len())
                },
            ));

            let none_untracked = status.untracked.is_empty();
            evaluated.push(row(
                CheckId::NoUntrackedFiles,
                Verdict::from_bool(none_untracked),
                if none_untracked {
                    "No untracked files".to_string()
                } else {
                    format!("{} untracked file(s)", status.untracked.len())
                },
            ));
        }
        Err(err) => {
            tracing::warn!(repo_path = %root.display(), error = %err, "git status failed");
            let details = format!("git status failed: {err}");
            evaluated.push(row(CheckId::CleanWorkingTree, Verdict::Indeterminate, details.clone()));
            evaluated.push(row(CheckId::NoUntrackedFiles, Verdict::Indeterminate, details));
        }
    }

    evaluated.extend(
        GIT_AWARE_PRESENCE_CHECKS
            .iter()
            .map(|check| presence_row(check, &root)),
    );
    assemble(TOOL, &root, evaluated, true)
}
