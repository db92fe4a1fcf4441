//! Path resolution and existence probes.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::util::verdict::Verdict;

/// Resolve a caller-supplied repository path to an absolute path.
///
/// Existing paths are canonicalized (symlinks resolved). Paths that do not
/// exist are made absolute against the working directory and normalized
/// lexically. This never fails: an unresolvable path is returned as close
/// to the input as possible and later probes simply fail on it.
pub fn resolve_repo_path(raw: &str) -> PathBuf {
    let path = if raw.is_empty() { Path::new(".") } else { Path::new(raw) };

    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }

    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    normalize_lexically(&absolute)
}

/// Drop `.` components and fold `..` into its parent without touching the
/// filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Outcome of checking a single path on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    Present,
    Absent,
    /// The filesystem refused to answer (permissions, I/O error).
    Unknown(String),
}

impl Presence {
    pub fn verdict(&self) -> Verdict {
        match self {
            Presence::Present => Verdict::Pass,
            Presence::Absent => Verdict::Fail,
            Presence::Unknown(_) => Verdict::Indeterminate,
        }
    }
}

/// What kind of entry a probe expects to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// File, directory or anything else (e.g. a `.git` worktree file).
    Any,
}

pub fn probe(path: &Path, kind: EntryKind) -> Presence {
    match std::fs::metadata(path) {
        Ok(meta) => {
            let matches = match kind {
                EntryKind::File => meta.is_file(),
                EntryKind::Dir => meta.is_dir(),
                EntryKind::Any => true,
            };
            if matches { Presence::Present } else { Presence::Absent }
        }
        Err(err) if err.kind() == ErrorKind::NotFound || err.kind() == ErrorKind::NotADirectory => {
            Presence::Absent
        }
        Err(err) => Presence::Unknown(format!("{}: {err}", path.display())),
    }
}
