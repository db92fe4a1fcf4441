use std::path::{Path, PathBuf};

use guardian_core::Inspector;
use guardian_core::hygiene::catalog::CheckId;
use guardian_core::report::model::{CheckResult, HygieneReport};
use guardian_core::tools;
use serde_json::json;
use tempfile::TempDir;

const V1_CHECK_IDS: [&str; 7] = [
    "has_package_definition",
    "has_license",
    "has_readme",
    "has_bug_report_template",
    "has_ci_workflows",
    "has_v1_contract",
    "has_determinism_notes",
];

const PYPROJECT: &str = r#"[project]
name = "demo"
version = "0.1.0"
"#;

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(path, body).expect("write fixture file");
}

/// pyproject, README and LICENSE; nothing else.
fn minimal_repo() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "pyproject.toml", PYPROJECT);
    write(dir.path(), "README.md", "# demo\n");
    write(dir.path(), "LICENSE", "MIT\n");
    dir
}

/// Every artifact the static policy looks for.
fn full_hygiene_repo() -> TempDir {
    let dir = minimal_repo();
    write(dir.path(), ".github/ISSUE_TEMPLATE/bug_report.md", "---\nname: Bug\n---\n");
    write(dir.path(), ".github/workflows/ci.yml", "on: push\n");
    write(dir.path(), "docs/V1_CONTRACT.md", "# V1\n");
    write(dir.path(), "docs/DETERMINISM.md", "# Determinism\n");
    dir
}

fn path_of(dir: &TempDir) -> String {
    dir.path().display().to_string()
}

fn canonical(dir: &TempDir) -> PathBuf {
    std::fs::canonicalize(dir.path()).expect("canonicalize temp dir")
}

fn find(report: &HygieneReport, id: CheckId) -> &CheckResult {
    report
        .check(id)
        .unwrap_or_else(|| panic!("check {id} missing from report"))
}

// ---------------------------------------------------------------------------
// check_repo_hygiene
// ---------------------------------------------------------------------------

#[test]
fn hygiene_top_level_keys_are_fixed() {
    let repo = full_hygiene_repo();
    let value = serde_json::to_value(Inspector::default().check_repo_hygiene(&path_of(&repo))).unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["checks", "fail_closed", "ok", "repo_path", "tool"]);

    for check in value["checks"].as_array().unwrap() {
        let mut keys: Vec<&str> = check.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["check_id", "details", "ok"]);
    }
}

#[test]
fn hygiene_reports_resolved_absolute_path() {
    let repo = full_hygiene_repo();
    let report = Inspector::default().check_repo_hygiene(&path_of(&repo));
    assert_eq!(report.tool, "check_repo_hygiene");
    assert!(Path::new(&report.repo_path).is_absolute());
    assert_eq!(PathBuf::from(&report.repo_path), canonical(&repo));
}

#[test]
fn hygiene_check_ids_follow_contract_order() {
    let repo = minimal_repo();
    let report = Inspector::default().check_repo_hygiene(&path_of(&repo));
    let ids: Vec<&str> = report.checks.iter().map(|c| c.check_id.as_str()).collect();
    assert_eq!(ids, V1_CHECK_IDS);
}

#[test]
fn fully_equipped_repo_passes() {
    let repo = full_hygiene_repo();
    let report = Inspector::default().check_repo_hygiene(&path_of(&repo));
    assert!(report.ok, "unexpected failures: {:?}", report.checks);
    assert!(!report.fail_closed);
    assert_eq!(find(&report, CheckId::HasReadme).details, "Found README.md");
}

#[test]
fn readme_and_license_only_fails_exactly_the_other_checks() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "README.md", "# demo\n");
    write(dir.path(), "LICENSE", "MIT\n");

    let report = Inspector::default().check_repo_hygiene(&path_of(&dir));
    let failing: Vec<&str> = report
        .checks
        .iter()
        .filter(|c| !c.ok)
        .map(|c| c.check_id.as_str())
        .collect();

    assert_eq!(
        failing,
        vec![
            "has_package_definition",
            "has_bug_report_template",
            "has_ci_workflows",
            "has_v1_contract",
            "has_determinism_notes",
        ]
    );
    assert!(!report.ok);
    assert!(report.fail_closed);
}

#[test]
fn missing_readme_fails_readme_check() {
    let repo = full_hygiene_repo();
    std::fs::remove_file(repo.path().join("README.md")).unwrap();
    let report = Inspector::default().check_repo_hygiene(&path_of(&repo));
    let check = find(&report, CheckId::HasReadme);
    assert!(!check.ok);
    assert!(check.details.contains("README.md, README.rst, README.txt, README"));
    assert!(!report.ok);
}

#[test]
fn missing_license_fails_license_check() {
    let repo = full_hygiene_repo();
    std::fs::remove_file(repo.path().join("LICENSE")).unwrap();
    let report = Inspector::default().check_repo_hygiene(&path_of(&repo));
    assert!(!find(&report, CheckId::HasLicense).ok);
    assert!(!report.ok);
}

#[test]
fn cargo_manifest_counts_as_package_definition() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Cargo.toml", "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n");
    let report = Inspector::default().check_repo_hygiene(&path_of(&dir));
    let check = find(&report, CheckId::HasPackageDefinition);
    assert!(check.ok);
    assert_eq!(check.details, "Found Cargo.toml");
}

#[test]
fn fail_closed_is_negation_of_ok() {
    for repo in [full_hygiene_repo(), minimal_repo()] {
        let report = Inspector::default().check_repo_hygiene(&path_of(&repo));
        assert_eq!(report.fail_closed, !report.ok);
    }
}

#[test]
fn hygiene_is_deterministic() {
    let repo = minimal_repo();
    let inspector = Inspector::default();
    let a = serde_json::to_string(&inspector.check_repo_hygiene(&path_of(&repo))).unwrap();
    let b = serde_json::to_string(&inspector.check_repo_hygiene(&path_of(&repo))).unwrap();
    assert_eq!(a, b);
}

#[test]
fn hygiene_report_round_trips_through_json() {
    let repo = minimal_repo();
    let report = Inspector::default().check_repo_hygiene(&path_of(&repo));
    let encoded = serde_json::to_string(&report).unwrap();
    let decoded: HygieneReport = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, report);
}

// ---------------------------------------------------------------------------
// check_version_alignment
// ---------------------------------------------------------------------------

#[test]
fn alignment_top_level_keys_are_fixed() {
    let repo = minimal_repo();
    let value = tools::call(
        &Inspector::default(),
        "check_version_alignment",
        Some(&json!({"repo_path": path_of(&repo), "expected_tag": "v0.1.0"})),
    )
    .unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["details", "detected", "expected_tag", "fail_closed", "ok", "repo_path", "tool"]
    );
    let mut detected: Vec<&str> = value["detected"].as_object().unwrap().keys().map(String::as_str).collect();
    detected.sort();
    assert_eq!(detected, vec!["source", "version"]);
}

#[test]
fn matching_tag_is_ok() {
    let repo = minimal_repo();
    let report = Inspector::default().check_version_alignment(&path_of(&repo), Some("v0.1.0"));
    assert!(report.ok);
    assert!(!report.fail_closed);
    assert_eq!(report.detected.version.as_deref(), Some("0.1.0"));
    assert_eq!(report.detected.source.as_deref(), Some("pyproject.toml"));
    assert_eq!(report.expected_tag.as_deref(), Some("v0.1.0"));
    assert!(!report.details.is_empty());
}

#[test]
fn leading_v_does_not_change_the_outcome() {
    let repo = minimal_repo();
    let inspector = Inspector::default();
    let with_v = inspector.check_version_alignment(&path_of(&repo), Some("v0.1.0"));
    let without_v = inspector.check_version_alignment(&path_of(&repo), Some("0.1.0"));
    assert_eq!(
        (with_v.ok, with_v.fail_closed),
        (without_v.ok, without_v.fail_closed)
    );
    assert!(with_v.ok);
}

#[test]
fn mismatched_tag_is_a_plain_failure() {
    let repo = minimal_repo();
    let report = Inspector::default().check_version_alignment(&path_of(&repo), Some("v9.9.9"));
    assert!(!report.ok);
    assert!(!report.fail_closed);
}

#[test]
fn manifest_without_version_is_fail_closed() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "pyproject.toml", "[project]\nname = \"demo\"\n");
    let report = Inspector::default().check_version_alignment(&path_of(&dir), Some("v0.1.0"));
    assert!(!report.ok);
    assert!(report.fail_closed);
    assert_eq!(report.detected.version, None);
    assert_eq!(report.detected.source, None);
}

#[test]
fn missing_manifest_is_fail_closed_for_any_expectation() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "README.md", "# demo\n");
    let inspector = Inspector::default();
    for expected in [Some("v0.1.0"), Some("9.9.9"), None] {
        let report = inspector.check_version_alignment(&path_of(&dir), expected);
        assert!(!report.ok);
        assert!(report.fail_closed);
        assert_eq!(report.detected.version, None);
    }
}

#[test]
fn omitted_expectation_passes_when_version_present() {
    let repo = minimal_repo();
    let report = Inspector::default().check_version_alignment(&path_of(&repo), None);
    assert!(report.ok);
    assert!(!report.fail_closed);
    assert_eq!(report.expected_tag, None);
}

#[test]
fn alignment_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let inspector = Inspector::default();
    let a = serde_json::to_string(&inspector.check_version_alignment(&path_of(&dir), Some("v0.1.0"))).unwrap();
    let b = serde_json::to_string(&inspector.check_version_alignment(&path_of(&dir), Some("v0.1.0"))).unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// generate_release_checklist
// ---------------------------------------------------------------------------

#[test]
fn checklist_top_level_keys_are_fixed() {
    let repo = minimal_repo();
    let value = tools::call(
        &Inspector::default(),
        "generate_release_checklist",
        Some(&json!({"repo_path": path_of(&repo), "version": "v0.1.0"})),
    )
    .unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "checklist_markdown",
            "fail_closed",
            "inputs_used",
            "items",
            "repo_path",
            "required_count",
            "target_tag",
            "tool",
            "total",
        ]
    );
    let mut inputs: Vec<&str> = value["inputs_used"].as_object().unwrap().keys().map(String::as_str).collect();
    inputs.sort();
    assert_eq!(inputs, vec!["detected_version", "has_bug_template", "has_ci_workflows"]);
}

#[test]
fn checklist_covers_the_release_steps() {
    let repo = minimal_repo();
    let report = Inspector::default().generate_release_checklist(&path_of(&repo), "v0.2.0");
    let md = report.checklist_markdown.to_lowercase();

    assert!(report.checklist_markdown.contains("v0.2.0"));
    assert!(md.contains("version alignment"));
    assert!(md.contains("tests pass"));
    assert!(report.checklist_markdown.contains("git tag v0.2.0"));
    assert!(md.contains("release notes") || md.contains("changelog"));
    assert!(md.contains("adoption") && md.contains("bug report"));
    assert!(report.items.iter().any(|i| i.item.contains("v0.2.0")));
}

#[test]
fn checklist_signals_reflect_local_files() {
    let full = full_hygiene_repo();
    let minimal = minimal_repo();
    let inspector = Inspector::default();

    let rich = inspector.generate_release_checklist(&path_of(&full), "v0.1.0");
    assert!(rich.inputs_used.has_ci_workflows);
    assert!(rich.inputs_used.has_bug_template);
    assert_eq!(rich.inputs_used.detected_version.as_deref(), Some("0.1.0"));
    assert!(!rich.fail_closed);

    let bare = inspector.generate_release_checklist(&path_of(&minimal), "v0.1.0");
    assert!(!bare.inputs_used.has_ci_workflows);
    assert!(!bare.inputs_used.has_bug_template);

    assert_eq!(rich.items, bare.items);
    assert_eq!(rich.total, bare.total);
}

#[test]
fn checklist_is_fail_closed_without_detected_version() {
    let dir = TempDir::new().unwrap();
    let report = Inspector::default().generate_release_checklist(&path_of(&dir), "v0.1.0");
    assert!(report.fail_closed);
    assert_eq!(report.inputs_used.detected_version, None);
    assert_eq!(report.total, 11);
    assert_eq!(report.required_count, 7);
}

#[test]
fn checklist_is_deterministic() {
    let repo = minimal_repo();
    let inspector = Inspector::default();
    let a = serde_json::to_string(&inspector.generate_release_checklist(&path_of(&repo), "v0.1.0")).unwrap();
    let b = serde_json::to_string(&inspector.generate_release_checklist(&path_of(&repo), "v0.1.0")).unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// registry
// ---------------------------------------------------------------------------

#[test]
fn tool_output_round_trips_through_json_text() {
    let repo = full_hygiene_repo();
    let inspector = Inspector::default();
    for (name, args) in [
        ("check_repo_hygiene", json!({"repo_path": path_of(&repo)})),
        ("check_version_alignment", json!({"repo_path": path_of(&repo), "expected_tag": "v0.1.0"})),
        ("generate_release_checklist", json!({"repo_path": path_of(&repo), "version": "v0.1.0"})),
    ] {
        let value = tools::call(&inspector, name, Some(&args)).unwrap();
        let reparsed: serde_json::Value = serde_json::from_str(&value.to_string()).unwrap();
        assert_eq!(reparsed, value, "{name}");
        assert_eq!(value["tool"], name);
    }
}
