use std::path::Path;

use crate::checklist::catalog::{STEPS, TARGET_PLACEHOLDER};
use crate::hygiene::catalog::{has_bug_template, has_ci_workflows};
use crate::report::model::{ChecklistInputs, ChecklistItem, ChecklistReport};
use crate::report::render::render_checklist_markdown;
use crate::util::paths::resolve_repo_path;
use crate::version::align::detect_version;

pub const TOOL: &str = "generate_release_checklist";

pub fn checklist_items(target_tag: &str) -> Vec<ChecklistItem> {
    STEPS
        .iter()
        .map(|step| ChecklistItem {
            item: step.text.replace(TARGET_PLACEHOLDER, target_tag),
            category: step.category,
            required: step.required,
        })
        .collect()
}

/// Sample the cheap local signals the checklist is annotated with. Every
/// probe tolerates a missing path.
pub fn sample_inputs(root: &Path) -> ChecklistInputs {
    ChecklistInputs {
        detected_version: detect_version(root).version().map(str::to_string),
        has_ci_workflows: has_ci_workflows(root),
        has_bug_template: has_bug_template(root),
    }
}

/// Build the release checklist for `target_tag`.
///
/// Items depend only on `target_tag`; local signals feed `inputs_used` and
/// the markdown annotations. `fail_closed` is set when no version could be
/// detected on disk.
pub fn generate_release_checklist(repo_path: &str, target_tag: &str) -> ChecklistReport {
    let root = resolve_repo_path(repo_path);
    let items = checklist_items(target_tag);
    let inputs_used = sample_inputs(&root);
    let checklist_markdown = render_checklist_markdown(target_tag, &items, &inputs_used);
    let required_count = items.iter().filter(|i| i.required).count();
    let fail_closed = inputs_used.detected_version.is_none();

    tracing::info!(
        tool = TOOL,
        repo_path = %root.display(),
        target_tag,
        fail_closed,
        "release checklist generated"
    );

    ChecklistReport {
        tool: TOOL.to_string(),
        repo_path: root.display().to_string(),
        target_tag: target_tag.to_string(),
        total: items.len(),
        required_count,
        items,
        checklist_markdown,
        inputs_used,
        fail_closed,
    }
}
