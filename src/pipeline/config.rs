//! Run configuration

use std::path::PathBuf;

/// Default stats file location
pub const DEFAULT_STATS_PATH: &str = "dist/stats.json";
/// Default artifact directory
pub const DEFAULT_ARTIFACT_DIR: &str = ".";
/// Default artifact file name
pub const DEFAULT_ARTIFACT_NAME: &str = "component-size-report.txt";
/// Default name of the CI job producing the artifact
pub const DEFAULT_JOB_NAME: &str = "component-size-report";
/// Default baseline branch
pub const DEFAULT_BRANCH: &str = "master";
/// Default author name of tracked comments
pub const DEFAULT_COMMENT_AUTHOR: &str = "SA GitLab Management System";

/// Immutable settings for one report run
///
/// Built once at startup from flags, environment and config file, then
/// passed by reference to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Bundle analyzer output
    pub stats_path: PathBuf,
    /// Directory the artifact is written to
    pub artifact_dir: PathBuf,
    /// Artifact file name
    pub artifact_name: String,
    /// Artifact path inside the baseline job
    pub baseline_artifact_path: String,
    /// Name of the CI job producing the artifact
    pub job_name: String,
    /// Branch being built
    pub current_branch: String,
    /// Branch providing the baseline
    pub default_branch: String,
    /// Author name of tracked comments
    pub comment_author: String,
    /// Skip writing the artifact and all remote mutations
    pub dry_run: bool,
    /// Stop once the artifact is written
    pub artifact_only: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            stats_path: PathBuf::from(DEFAULT_STATS_PATH),
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
            artifact_name: DEFAULT_ARTIFACT_NAME.to_string(),
            baseline_artifact_path: DEFAULT_ARTIFACT_NAME.to_string(),
            job_name: DEFAULT_JOB_NAME.to_string(),
            current_branch: String::new(),
            default_branch: DEFAULT_BRANCH.to_string(),
            comment_author: DEFAULT_COMMENT_AUTHOR.to_string(),
            dry_run: false,
            artifact_only: false,
        }
    }
}

impl ReportConfig {
    /// Full path of the artifact written by this run
    pub fn artifact_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.artifact_name)
    }

    /// Whether this run builds the baseline branch itself
    pub fn is_base_branch(&self) -> bool {
        self.current_branch == self.default_branch
    }
}
