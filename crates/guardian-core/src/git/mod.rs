//! Git as an injected capability.
//!
//! Inspection code never spawns processes directly; it asks a
//! [`GitRunner`] to run a command and gets either stdout or a typed
//! [`GitError`]. Tests substitute scripted runners.

mod system;

use std::path::Path;

pub use system::SystemGit;

use crate::error::GitError;

pub trait GitRunner: Send + Sync {
    /// Run `git <args>` inside `cwd` and return its stdout.
    ///
    /// Non-zero exit, spawn failure and timeout are all errors.
    fn run(&self, args: &[&str], cwd: &Path) -> Result<String, GitError>;
}

/// Working tree status split by porcelain prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorktreeStatus {
    /// Staged or modified tracked paths.
    pub modified: Vec<String>,
    /// Lines starting with `??`.
    pub untracked: Vec<String>,
}

pub const UNTRACKED_PREFIX: &str = "??";

impl WorktreeStatus {
    pub fn from_porcelain(output: &str) -> Self {
        let mut status = WorktreeStatus::default();
        for line in output.lines().filter(|l| !l.is_empty()) {
            if line.starts_with(UNTRACKED_PREFIX) {
                status.untracked.push(line.to_string());
            } else {
                status.modified.push(line.to_string());
            }
        }
        status
    }
}

pub fn worktree_status(git: &dyn GitRunner, repo: &Path) -> Result<WorktreeStatus, GitError> {
    git.run(&["status", "--porcelain"], repo)
        .map(|out| WorktreeStatus::from_porcelain(&out))
}

/// Tags matching any of `patterns`, in git's listing order.
///
/// Patterns follow `--` so a value shaped like an option stays a pattern.
pub fn list_tags(git: &dyn GitRunner, repo: &Path, patterns: &[&str]) -> Result<Vec<String>, GitError> {
    let mut args = vec!["tag", "--list", "--"];
    args.extend_from_slice(patterns);
    let out = git.run(&args, repo)?;
    Ok(out
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Most recent tag reachable from HEAD.
pub fn latest_tag(git: &dyn GitRunner, repo: &Path) -> Result<Option<String>, GitError> {
    let out = git.run(&["describe", "--tags", "--abbrev=0"], repo)?;
    let tag = out.trim();
    Ok((!tag.is_empty()).then(|| tag.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct Fixed(&'static str);

    #[derive(Default)]
    struct Recording(Mutex<Vec<Vec<String>>>);

    impl GitRunner for Recording {
        fn run(&self, args: &[&str], _cwd: &Path) -> Result<String, GitError> {
            self.0
                .lock()
                .unwrap()
                .push(args.iter().map(|a| a.to_string()).collect());
            Ok(String::new())
        }
    }

    impl GitRunner for Fixed {
        fn run(&self, _args: &[&str], _cwd: &Path) -> Result<String, GitError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_porcelain_lines_are_partitioned_by_prefix() {
        let status = WorktreeStatus::from_porcelain(" M README.md\nA  src/lib.rs\n?? dirty.txt\n\n");
        assert_eq!(status.modified, vec![" M README.md", "A  src/lib.rs"]);
        assert_eq!(status.untracked, vec!["?? dirty.txt"]);
    }

    #[test]
    fn test_empty_porcelain_is_clean() {
        assert_eq!(WorktreeStatus::from_porcelain(""), WorktreeStatus::default());
    }

    #[test]
    fn test_list_tags_skips_blank_lines() {
        let tags = list_tags(&Fixed("v0.1.0\n\n0.1.0\n"), Path::new("."), &["0.1.0"]).unwrap();
        assert_eq!(tags, vec!["v0.1.0", "0.1.0"]);
    }

    #[test]
    fn test_list_tags_keeps_option_shaped_patterns_after_separator() {
        let git = Recording::default();
        list_tags(&git, Path::new("."), &["--contains=HEAD", "v--contains=HEAD"]).unwrap();
        let calls = git.0.into_inner().unwrap();
        assert_eq!(
            calls,
            vec![vec!["tag", "--list", "--", "--contains=HEAD", "v--contains=HEAD"]]
        );
    }

    #[test]
    fn test_latest_tag_of_empty_output_is_none() {
        assert_eq!(latest_tag(&Fixed("\n"), Path::new(".")).unwrap(), None);
        assert_eq!(
            latest_tag(&Fixed("v2.0.0\n"), Path::new(".")).unwrap(),
            Some("v2.0.0".to_string())
        );
    }
}
