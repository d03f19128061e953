//! Report command implementation
//!
//! Handles `component-size-report report`, the full CI pipeline run.

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::{Path, PathBuf};

use crate::ci::{GitLabClient, GitLabSettings};
use crate::config::{ConfigFile, ConfigLoader};
use crate::error::ReportError;
use crate::fmt;
use crate::pipeline::config::{
    DEFAULT_ARTIFACT_DIR, DEFAULT_ARTIFACT_NAME, DEFAULT_BRANCH, DEFAULT_COMMENT_AUTHOR,
    DEFAULT_JOB_NAME, DEFAULT_STATS_PATH,
};
use crate::pipeline::{Orchestrator, ReportConfig, RunOutcome};

/// Options of the `report` subcommand
///
/// Every option can also come from the environment, which is how CI jobs
/// configure the run. Unset options fall back to `.component-size-report.toml`
/// and then to built-in defaults.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportArgs {
    /// Bundle analyzer stats file [default: dist/stats.json]
    #[arg(long, env = "STATS_PATH", value_name = "FILE")]
    pub stats_path: Option<String>,

    /// Directory the artifact is written to [default: ./]
    #[arg(long, env = "ARTIFACT_DIR", value_name = "DIR")]
    pub artifact_dir: Option<String>,

    /// Artifact file name [default: component-size-report.txt]
    #[arg(long, env = "ARTIFACT_NAME", value_name = "NAME")]
    pub artifact_name: Option<String>,

    /// Artifact path inside the baseline job [default: artifact name]
    #[arg(long, env = "BASELINE_ARTIFACT_PATH", value_name = "PATH")]
    pub baseline_artifact_path: Option<String>,

    /// CI job producing the artifact [default: component-size-report]
    #[arg(long, env = "JOB_NAME")]
    pub job_name: Option<String>,

    /// Branch being built
    #[arg(long, env = "CI_COMMIT_REF_NAME")]
    pub current_branch: Option<String>,

    /// Branch providing the baseline [default: master]
    #[arg(long, env = "CI_DEFAULT_BRANCH")]
    pub default_branch: Option<String>,

    /// Author name of the comments this tool manages
    #[arg(long, env = "COMMENT_AUTHOR")]
    pub comment_author: Option<String>,

    /// GitLab API root, e.g. https://gitlab.example.com/api/v4
    #[arg(long, env = "CI_API_V4_URL", value_name = "URL")]
    pub gitlab_url: Option<String>,

    /// GitLab project id or path
    #[arg(long, env = "CI_PROJECT_ID")]
    pub project_id: Option<String>,

    /// GitLab access token
    #[arg(long, env = "GITLAB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Print the artifact and comment instead of writing or posting them
    #[arg(
        short,
        long,
        env = "DRY_RUN",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub dry_run: bool,

    /// Stop after writing the artifact
    #[arg(long)]
    pub artifact_only: bool,
}

impl ReportArgs {
    /// Merge flags and environment over the config file and defaults
    pub fn resolve(&self, file: &ConfigFile) -> Result<ReportConfig, ReportError> {
        let artifact = file.artifact();

        let artifact_name = pick(&self.artifact_name, &artifact.name, DEFAULT_ARTIFACT_NAME);
        let baseline_artifact_path = self
            .baseline_artifact_path
            .clone()
            .or(artifact.baseline_path)
            .unwrap_or_else(|| artifact_name.clone());

        let current_branch = match &self.current_branch {
            Some(branch) => branch.clone(),
            None if self.artifact_only => String::new(),
            None => {
                return Err(ReportError::MissingCiSetting {
                    setting: "current-branch",
                    env: "CI_COMMIT_REF_NAME",
                })
            }
        };

        Ok(ReportConfig {
            stats_path: PathBuf::from(pick(&self.stats_path, &file.stats_path, DEFAULT_STATS_PATH)),
            artifact_dir: PathBuf::from(pick(&self.artifact_dir, &artifact.dir, DEFAULT_ARTIFACT_DIR)),
            artifact_name,
            baseline_artifact_path,
            job_name: pick(&self.job_name, &file.job_name, DEFAULT_JOB_NAME),
            current_branch,
            default_branch: pick(&self.default_branch, &file.default_branch, DEFAULT_BRANCH),
            comment_author: pick(
                &self.comment_author,
                &file.comment_author,
                DEFAULT_COMMENT_AUTHOR,
            ),
            dry_run: self.dry_run,
            artifact_only: self.artifact_only,
        })
    }

    /// GitLab connection settings
    ///
    /// Dry runs never send requests, so missing values are tolerated there.
    pub fn gitlab_settings(
        &self,
        file: &ConfigFile,
        config: &ReportConfig,
    ) -> Result<GitLabSettings, ReportError> {
        let gitlab = file.gitlab();
        let dry_run = self.dry_run;

        let require = |value: Option<String>, setting: &'static str, env: &'static str| {
            match value.filter(|v| !v.is_empty()) {
                Some(v) => Ok(v),
                None if dry_run => Ok(String::new()),
                None => Err(ReportError::MissingCiSetting { setting, env }),
            }
        };

        Ok(GitLabSettings {
            api_url: require(
                self.gitlab_url.clone().or(gitlab.url),
                "gitlab-url",
                "CI_API_V4_URL",
            )?,
            project_id: require(
                self.project_id.clone().or(gitlab.project_id),
                "project-id",
                "CI_PROJECT_ID",
            )?,
            token: require(self.token.clone(), "token", "GITLAB_TOKEN")?,
            baseline_ref: config.default_branch.clone(),
        })
    }
}

fn pick(flag: &Option<String>, file: &Option<String>, default: &str) -> String {
    flag.clone()
        .or_else(|| file.clone())
        .unwrap_or_else(|| default.to_string())
}

/// Run the full report pipeline
///
/// # Examples
///
/// ```no_run
/// use component_size_report::cmd::report::{cmd_report, ReportArgs};
///
/// let args = ReportArgs {
///     current_branch: Some("feature/banner".to_string()),
///     dry_run: true,
///     ..ReportArgs::default()
/// };
/// cmd_report(&args)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The config file or stats file is missing or invalid
/// - The artifact cannot be written
/// - GitLab settings are missing outside a dry run
/// - The merge request cannot be found or the comment cannot be posted
pub fn cmd_report(args: &ReportArgs) -> Result<()> {
    let file = ConfigLoader::load(Path::new("."))?;
    let config = args.resolve(&file)?;
    log::debug!("Resolved configuration: {:?}", config);

    let outcome = Orchestrator::new(&config).run(|| {
        let settings = args.gitlab_settings(&file, &config)?;
        Ok(GitLabClient::new(settings, config.dry_run)?)
    })?;

    print_outcome(outcome, config.dry_run);
    Ok(())
}

fn print_outcome(outcome: RunOutcome, dry_run: bool) {
    let message = match outcome {
        RunOutcome::Posted if dry_run => "Dry run complete, nothing was posted",
        RunOutcome::NoComponents => "Nothing to report",
        RunOutcome::ArtifactOnly => "Artifact written, skipping merge request comment",
        RunOutcome::OnBaseBranch => "Baseline artifact written",
        RunOutcome::CommentUnchanged => "Merge request comment is up to date",
        RunOutcome::Posted => "Merge request comment updated",
    };
    println!("\n{} {}", fmt::CHECKMARK, style(message).green().bold());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ArtifactSettings, GitLabFileSettings};

    fn feature_args() -> ReportArgs {
        ReportArgs {
            current_branch: Some("feature/banner".to_string()),
            ..ReportArgs::default()
        }
    }

    #[test]
    fn test_resolve_uses_defaults() {
        let config = feature_args().resolve(&ConfigFile::default()).unwrap();

        assert_eq!(config.stats_path, PathBuf::from("dist/stats.json"));
        assert_eq!(config.artifact_name, "component-size-report.txt");
        assert_eq!(config.baseline_artifact_path, "component-size-report.txt");
        assert_eq!(config.default_branch, "master");
        assert_eq!(config.comment_author, "SA GitLab Management System");
        assert!(!config.dry_run);
    }

    #[test]
    fn test_flags_override_config_file() {
        let file = ConfigFile {
            job_name: Some("from-file".to_string()),
            default_branch: Some("main".to_string()),
            artifact: Some(ArtifactSettings {
                dir: Some("reports".to_string()),
                name: Some("file.txt".to_string()),
                baseline_path: None,
            }),
            ..ConfigFile::default()
        };
        let args = ReportArgs {
            job_name: Some("from-flag".to_string()),
            ..feature_args()
        };

        let config = args.resolve(&file).unwrap();

        assert_eq!(config.job_name, "from-flag");
        assert_eq!(config.default_branch, "main");
        assert_eq!(config.artifact_path(), PathBuf::from("reports").join("file.txt"));
        assert_eq!(config.baseline_artifact_path, "file.txt");
    }

    #[test]
    fn test_missing_branch_is_error_unless_artifact_only() {
        let err = ReportArgs::default()
            .resolve(&ConfigFile::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::MissingCiSetting {
                env: "CI_COMMIT_REF_NAME",
                ..
            }
        ));

        let args = ReportArgs {
            artifact_only: true,
            ..ReportArgs::default()
        };
        assert!(args.resolve(&ConfigFile::default()).is_ok());
    }

    #[test]
    fn test_gitlab_settings_require_token_outside_dry_run() {
        let args = ReportArgs {
            gitlab_url: Some("https://gitlab.example.com/api/v4".to_string()),
            project_id: Some("42".to_string()),
            ..feature_args()
        };
        let config = args.resolve(&ConfigFile::default()).unwrap();

        let err = args
            .gitlab_settings(&ConfigFile::default(), &config)
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::MissingCiSetting { setting: "token", .. }
        ));
    }

    #[test]
    fn test_gitlab_settings_tolerate_missing_values_in_dry_run() {
        let args = ReportArgs {
            dry_run: true,
            ..feature_args()
        };
        let config = args.resolve(&ConfigFile::default()).unwrap();

        let settings = args
            .gitlab_settings(&ConfigFile::default(), &config)
            .unwrap();
        assert!(settings.token.is_empty());
        assert_eq!(settings.baseline_ref, "master");
    }

    #[test]
    fn test_gitlab_settings_fall_back_to_config_file() {
        let file = ConfigFile {
            gitlab: Some(GitLabFileSettings {
                url: Some("https://gitlab.example.com/api/v4".to_string()),
                project_id: Some("design/components".to_string()),
            }),
            ..ConfigFile::default()
        };
        let args = ReportArgs {
            token: Some("secret".to_string()),
            ..feature_args()
        };
        let config = args.resolve(&file).unwrap();

        let settings = args.gitlab_settings(&file, &config).unwrap();
        assert_eq!(settings.project_id, "design/components");
        assert_eq!(settings.api_url, "https://gitlab.example.com/api/v4");
    }
}
