use crate::report::model::{
    ChecklistInputs, ChecklistItem, ChecklistReport, HygieneReport, VersionAlignmentReport,
    VersionEvidenceReport,
};
use crate::{CONTRACT_VERSION, TOOL_NAME};

fn header(out: &mut String, tool: &str, repo_path: &str) {
    out.push_str(&format!("{TOOL_NAME} (contract v{CONTRACT_VERSION}) {tool}\n"));
    out.push_str(&format!("Repository: {repo_path}\n"));
}

fn mark(ok: bool) -> &'static str {
    if ok { "PASS" } else { "FAIL" }
}

fn present(flag: bool) -> &'static str {
    if flag { "present" } else { "missing" }
}

pub fn render_hygiene_text(report: &HygieneReport) -> String {
    let mut out = String::new();
    header(&mut out, &report.tool, &report.repo_path);
    for c in &report.checks {
        out.push_str(&format!("  [{}] {} - {}\n", mark(c.ok), c.check_id, c.details));
    }
    out.push_str(&format!(
        "Overall: {}{}\n",
        mark(report.ok),
        if report.fail_closed { " (fail-closed)" } else { "" }
    ));
    out
}

pub fn render_alignment_text(report: &VersionAlignmentReport) -> String {
    let mut out = String::new();
    header(&mut out, &report.tool, &report.repo_path);
    out.push_str(&format!(
        "Expected: {}\n",
        report.expected_tag.as_deref().unwrap_or("(none)")
    ));
    out.push_str(&format!(
        "Detected: {}\n",
        match (&report.detected.version, &report.detected.source) {
            (Some(v), Some(s)) => format!("{v} ({s})"),
            _ => "(none)".to_string(),
        }
    ));
    out.push_str(&format!("{}\n", report.details));
    out.push_str(&format!(
        "Overall: {}{}\n",
        mark(report.ok),
        if report.fail_closed { " (fail-closed)" } else { "" }
    ));
    out
}

pub fn render_evidence_text(report: &VersionEvidenceReport) -> String {
    let mut out = String::new();
    header(&mut out, &report.tool, &report.repo_path);
    out.push_str(&format!(
        "Expected: {}\n",
        report.expected_tag.as_deref().unwrap_or("(none)")
    ));
    if let Some(err) = &report.error {
        out.push_str(&format!("Error: {err}\n"));
    }
    if report.sources.is_empty() {
        out.push_str("No version sources found\n");
    }
    for s in &report.sources {
        out.push_str(&format!(
            "  [{}] {} = {}",
            mark(s.aligned),
            s.source,
            s.version.as_deref().unwrap_or("(none)")
        ));
        if let Some(err) = &s.error {
            out.push_str(&format!(" ({err})"));
        }
        out.push('\n');
    }
    out.push_str(&format!("Overall: {}\n", mark(report.all_aligned)));
    out
}

pub fn render_checklist_text(report: &ChecklistReport) -> String {
    let mut out = String::new();
    header(&mut out, &report.tool, &report.repo_path);
    out.push_str(&report.checklist_markdown);
    out
}

/// Markdown body of a checklist. Local signals only add annotations under
/// "Inputs considered"; the item list is the same for every repository.
pub fn render_checklist_markdown(
    target_tag: &str,
    items: &[ChecklistItem],
    inputs: &ChecklistInputs,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Release checklist for {target_tag}\n\n"));

    for item in items {
        out.push_str(&format!(
            "- [ ] {} _({}, {})_\n",
            item.item,
            if item.required { "required" } else { "optional" },
            item.category
        ));
    }

    out.push_str("\n## Inputs considered\n\n");
    match &inputs.detected_version {
        Some(v) => out.push_str(&format!("- Detected version: `{v}`\n")),
        None => out.push_str(
            "- Detected version: none (version alignment cannot be confirmed; fail-closed)\n",
        ),
    }
    out.push_str(&format!("- CI workflows: {}\n", present(inputs.has_ci_workflows)));
    out.push_str(&format!(
        "- Bug report template: {}\n",
        present(inputs.has_bug_template)
    ));
    out
}
