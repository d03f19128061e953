//! Error types with contextual suggestions
//!
//! Fatal errors abort the run before any comment is touched and map to exit
//! code 1. Degraded conditions (baseline unavailable, malformed artifact
//! lines) never surface here; they are logged and worked around.
//!
//! # Examples
//!
//! ```
//! use component_size_report::error::ReportError;
//! use std::path::PathBuf;
//!
//! let error = ReportError::StatsNotFound {
//!     path: PathBuf::from("dist/stats.json"),
//! };
//!
//! assert!(error.to_string().contains("dist/stats.json"));
//! assert!(error.suggestion().unwrap().contains("build"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::ci::CiError;

/// Exit code for every fatal error
pub const EXIT_FAILURE: i32 = 1;

/// Fatal errors of a report run
#[derive(Error, Debug)]
pub enum ReportError {
    /// Stats file does not exist
    #[error("Stats file not found at {path}. Make sure the build has completed.")]
    StatsNotFound {
        /// Expected stats location
        path: PathBuf,
    },

    /// Stats file exists but could not be read
    #[error("Failed to read stats file {path}")]
    StatsRead {
        /// Stats location
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Stats file is not valid JSON, or its records have the wrong shape
    #[error("Failed to parse stats file {path}")]
    StatsParse {
        /// Stats location
        path: PathBuf,
        #[source]
        /// JSON error source
        source: serde_json::Error,
    },

    /// Stats file is valid JSON but not an array
    #[error("Stats file {path} should contain an array of entries, found {found}")]
    StatsNotArray {
        /// Stats location
        path: PathBuf,
        /// JSON type that was found instead
        found: &'static str,
    },

    /// Artifact could not be read
    #[error("Failed to read artifact {path}")]
    ArtifactRead {
        /// Artifact location
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Artifact could not be written
    #[error("Failed to write artifact {path}")]
    ArtifactWrite {
        /// Artifact location
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Config file is present but invalid
    #[error("Failed to parse config file {path}: {message}")]
    ConfigParse {
        /// Config file location
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A setting needed to talk to the CI system is missing
    #[error("Missing CI setting: {setting}")]
    MissingCiSetting {
        /// Setting name (CLI flag)
        setting: &'static str,
        /// Environment variable that provides it
        env: &'static str,
    },

    /// CI call on the comment path failed
    #[error("CI request failed")]
    Ci(#[from] CiError),
}

impl ReportError {
    /// Get actionable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::StatsNotFound { .. } => Some(
                "Run the library build with the bundle analyzer enabled before reporting"
                    .to_string(),
            ),
            Self::StatsRead { path, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                path.display()
            )),
            Self::StatsParse { .. } | Self::StatsNotArray { .. } => Some(
                "The stats file should be the JSON array emitted by the bundle analyzer; \
                 it may be truncated by a failed build"
                    .to_string(),
            ),
            Self::ArtifactWrite { path, .. } => Some(format!(
                "Check that the directory of {} is writable",
                path.display()
            )),
            Self::MissingCiSetting { setting, env } => Some(format!(
                "Pass --{} or set {} (or use --dry-run)",
                setting, env
            )),
            Self::Ci(CiError::CurlMissing) => {
                Some("Install curl in the CI image, it is used for API requests".to_string())
            }
            Self::Ci(CiError::NotFound(_)) => Some(
                "The merge request may be closed or not yet created for this branch".to_string(),
            ),
            _ => None,
        }
    }

    /// Get appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and a suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(suggestion) = error
            .downcast_ref::<ReportError>()
            .and_then(ReportError::suggestion)
        {
            output.push_str(&format!(
                "\n{} {}\n",
                style("help:").cyan().bold(),
                suggestion
            ));
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        error
            .downcast_ref::<ReportError>()
            .map(ReportError::exit_code)
            .unwrap_or(EXIT_FAILURE)
    }
}
