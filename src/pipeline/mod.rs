//! Report run orchestration
//!
//! Ties the size, report and CI modules together into one run:
//! 1. read the stats file and extract component sizes
//! 2. persist the encoded artifact for future baselines
//! 3. on feature branches, diff against the latest baseline artifact
//! 4. post the rendered comment unless the newest one is identical

pub mod config;
pub mod orchestrator;

pub use config::ReportConfig;
pub use orchestrator::Orchestrator;

/// How a successful run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Stats contained no component entries
    NoComponents,
    /// Artifact written, CI stage skipped on request
    ArtifactOnly,
    /// Artifact written on the baseline branch
    OnBaseBranch,
    /// Newest tracked comment already matches
    CommentUnchanged,
    /// New comment posted
    Posted,
}

impl RunOutcome {
    /// Whether a comment was posted
    pub fn posted(self) -> bool {
        self == Self::Posted
    }
}
