use crate::report::model::ChecklistCategory;

/// Replaced with the caller's target tag.
pub const TARGET_PLACEHOLDER: &str = "{target_tag}";

#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub text: &'static str,
    pub category: ChecklistCategory,
    pub required: bool,
}

/// Index of the step the target tag is substituted into. Other steps are
/// fixed text, so a target that is an ordinary word may still occur in them.
pub const TAG_STEP: usize = 4;

/// Release steps in output order. Only [`TAG_STEP`] carries the target tag.
pub const STEPS: &[Step] = &[
    Step {
        text: "Repository working tree is clean (no uncommitted or untracked changes)",
        category: ChecklistCategory::Hygiene,
        required: true,
    },
    Step {
        text: "Version alignment confirmed across manifests and tags (check_version_alignment)",
        category: ChecklistCategory::Versioning,
        required: true,
    },
    Step {
        text: "All tests pass locally",
        category: ChecklistCategory::Quality,
        required: true,
    },
    Step {
        text: "Release notes / CHANGELOG updated with entries for this release",
        category: ChecklistCategory::Documentation,
        required: true,
    },
    Step {
        text: "Create the release tag with `git tag {target_tag}` and push it to the remote",
        category: ChecklistCategory::Versioning,
        required: true,
    },
    Step {
        text: "LICENSE file present in repository root",
        category: ChecklistCategory::Hygiene,
        required: true,
    },
    Step {
        text: "No debug or temporary code committed",
        category: ChecklistCategory::Hygiene,
        required: true,
    },
    Step {
        text: "README reflects current feature set and usage",
        category: ChecklistCategory::Documentation,
        required: false,
    },
    Step {
        text: "Adoption hooks present: bug report issue template and CI workflows",
        category: ChecklistCategory::Release,
        required: false,
    },
    Step {
        text: "Dependencies pinned or bounded appropriately in lock file",
        category: ChecklistCategory::Quality,
        required: false,
    },
    Step {
        text: "Release artifacts built, tested, and verified",
        category: ChecklistCategory::Release,
        required: false,
    },
];
