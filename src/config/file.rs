//! Configuration file data structures

use serde::{Deserialize, Serialize};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".component-size-report.toml";

/// Optional project-level defaults
///
/// Every field can be overridden by a CLI flag or its environment variable.
///
/// ```toml
/// stats-path = "dist/stats.json"
/// job-name = "component-size-report"
/// comment-author = "Design System Bot"
///
/// [artifact]
/// dir = "reports"
/// name = "component-size-report.txt"
/// baseline-path = "reports/component-size-report.txt"
///
/// [gitlab]
/// url = "https://gitlab.example.com/api/v4"
/// project-id = "design/components"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    /// Bundle analyzer output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_path: Option<String>,

    /// Name of the CI job that produces the artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,

    /// Branch providing the baseline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,

    /// Author name of tracked comments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_author: Option<String>,

    /// Artifact locations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<ArtifactSettings>,

    /// GitLab connection (the token is never read from this file)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitlab: Option<GitLabFileSettings>,
}

/// `[artifact]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ArtifactSettings {
    /// Output directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// Output file name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Artifact path inside the baseline job
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_path: Option<String>,
}

/// `[gitlab]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GitLabFileSettings {
    /// API root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Project id or path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl ConfigFile {
    /// `[artifact]` table or an empty one
    pub fn artifact(&self) -> ArtifactSettings {
        self.artifact.clone().unwrap_or_default()
    }

    /// `[gitlab]` table or an empty one
    pub fn gitlab(&self) -> GitLabFileSettings {
        self.gitlab.clone().unwrap_or_default()
    }
}
