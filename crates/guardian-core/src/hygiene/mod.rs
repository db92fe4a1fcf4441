//! Repository hygiene checks.
//!
//! Two policies share one report shape:
//! - [`static_checks`]: seven presence checks, no git required. This is the
//!   canonical `check_repo_hygiene` contract.
//! - [`git_aware`]: requires a git working tree and inspects its status.

pub mod catalog;
pub mod git_aware;
pub mod static_checks;

use std::path::Path;

use crate::hygiene::catalog::{CheckId, PresenceCheck};
use crate::report::model::{CheckResult, HygieneReport};
use crate::util::verdict::Verdict;

type Evaluated = (CheckResult, Verdict);

fn row(check_id: CheckId, verdict: Verdict, details: String) -> Evaluated {
    tracing::debug!(%check_id, ?verdict, %details, "hygiene check evaluated");
    (
        CheckResult {
            check_id,
            ok: verdict.passed(),
            details,
        },
        verdict,
    )
}

fn presence_row(check: &PresenceCheck, root: &Path) -> Evaluated {
    let outcome = check.evaluate(root);
    row(check.id, outcome.verdict, outcome.details)
}

/// Fold evaluated checks into a report. A list that was cut short is never
/// a pass, whatever the rows that did run say.
fn assemble(tool: &str, root: &Path, evaluated: Vec<Evaluated>, complete: bool) -> HygieneReport {
    let overall = Verdict::all(evaluated.iter().map(|(_, v)| *v));
    let ok = complete && overall.passed();

    tracing::info!(
        tool,
        repo_path = %root.display(),
        checks = evaluated.len(),
        ok,
        "hygiene evaluated"
    );

    HygieneReport {
        tool: tool.to_string(),
        repo_path: root.display().to_string(),
        ok,
        checks: evaluated.into_iter().map(|(c, _)| c).collect(),
        fail_closed: !ok,
    }
}
