use std::sync::Arc;

use crate::checklist::generate::generate_release_checklist;
use crate::config::GuardianConfig;
use crate::git::{GitRunner, SystemGit};
use crate::hygiene::git_aware::check_git_hygiene;
use crate::hygiene::static_checks::check_repo_hygiene;
use crate::report::model::{
    ChecklistReport, HygieneReport, VersionAlignmentReport, VersionEvidenceReport,
};
use crate::version::align::check_version_alignment;
use crate::version::evidence::collect_version_sources;

/// Entry point for every inspection.
///
/// Carries only the git capability, which is immutable and shared, so an
/// `Inspector` can be cloned freely and used from several threads at once.
#[derive(Clone)]
pub struct Inspector {
    git: Arc<dyn GitRunner>,
}

impl std::fmt::Debug for Inspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inspector").finish_non_exhaustive()
    }
}

impl Inspector {
    pub fn new(git: Arc<dyn GitRunner>) -> Self {
        Self { git }
    }

    pub fn from_config(config: &GuardianConfig) -> Self {
        Self::new(Arc::new(SystemGit::from_config(config)))
    }

    pub fn check_repo_hygiene(&self, repo_path: &str) -> HygieneReport {
        check_repo_hygiene(repo_path)
    }

    pub fn check_git_hygiene(&self, repo_path: &str) -> HygieneReport {
        check_git_hygiene(self.git.as_ref(), repo_path)
    }

    pub fn check_version_alignment(
        &self,
        repo_path: &str,
        expected_tag: Option<&str>,
    ) -> VersionAlignmentReport {
        check_version_alignment(repo_path, expected_tag)
    }

    pub fn collect_version_sources(
        &self,
        repo_path: &str,
        expected_tag: Option<&str>,
    ) -> VersionEvidenceReport {
        collect_version_sources(self.git.as_ref(), repo_path, expected_tag)
    }

    pub fn generate_release_checklist(&self, repo_path: &str, target_tag: &str) -> ChecklistReport {
        generate_release_checklist(repo_path, target_tag)
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::from_config(&GuardianConfig::default())
    }
}
