use crate::hygiene::catalog::STATIC_CHECKS;
use crate::hygiene::{assemble, presence_row};
use crate::report::model::HygieneReport;
use crate::util::paths::resolve_repo_path;

pub const TOOL: &str = "check_repo_hygiene";

/// Run every static presence check against `repo_path`.
///
/// Version control state is irrelevant here; a plain directory is
/// evaluated the same way as a working tree.
pub fn check_repo_hygiene(repo_path: &str) -> HygieneReport {
    let root = resolve_repo_path(repo_path);
    let evaluated = STATIC_CHECKS
        .iter()
        .map(|check| presence_row(check, &root))
        .collect();
    assemble(TOOL, &root, evaluated, true)
}
