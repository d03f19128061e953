//! CI collaborator: baseline artifacts and merge request comments
//!
//! The pipeline only depends on [`CiClient`]. [`gitlab::GitLabClient`] is the
//! production implementation; tests substitute in-memory fakes.

pub mod gitlab;

pub use gitlab::{GitLabClient, GitLabSettings};

use thiserror::Error;

/// Errors from CI requests
#[derive(Error, Debug)]
pub enum CiError {
    /// curl is not available in PATH
    #[error("curl not found in PATH")]
    CurlMissing,

    /// Spawning the transport failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server rejected the request or was unreachable
    #[error("{method} {url} failed: {stderr}")]
    Request {
        /// HTTP method
        method: &'static str,
        /// Request URL
        url: String,
        /// Transport error output
        stderr: String,
    },

    /// Response body was not the expected JSON
    #[error("Unexpected response from {url}")]
    InvalidResponse {
        /// Request URL
        url: String,
        #[source]
        /// JSON error source
        source: serde_json::Error,
    },

    /// Response body was not UTF-8
    #[error("Response from {url} is not valid UTF-8")]
    InvalidUtf8 {
        /// Request URL
        url: String,
    },

    /// Lookup returned no matching item
    #[error("{0}")]
    NotFound(String),

    /// Network access is disabled in dry-run mode
    #[error("skipped in dry-run mode")]
    DryRun,
}

/// Operations the report pipeline needs from the CI system
///
/// Implementations provide a dry-run mode in which nothing is mutated
/// remotely; intended mutations are printed instead.
pub trait CiClient {
    /// Id of the latest successful pipeline on the baseline branch
    fn get_latest_baseline_pipeline(&self) -> Result<u64, CiError>;

    /// Id of the job named `job_name` within a pipeline
    fn get_job_from_pipeline(&self, pipeline_id: u64, job_name: &str) -> Result<u64, CiError>;

    /// Text content of an artifact file produced by a job
    fn get_artifact_from_job(&self, job_id: u64, path: &str) -> Result<String, CiError>;

    /// Id of the open merge request from `source_branch` into `target_branch`
    fn get_merge_request_id(&self, source_branch: &str, target_branch: &str)
        -> Result<u64, CiError>;

    /// Delete every comment by `author_name` whose body contains `marker`,
    /// returning how many were deleted
    fn delete_comments_by_author(
        &self,
        mr_id: u64,
        author_name: &str,
        marker: &str,
    ) -> Result<usize, CiError>;

    /// Body of the newest comment by `author_name`, or an empty string
    fn get_most_recent_comment_by_author(
        &self,
        mr_id: u64,
        author_name: &str,
    ) -> Result<String, CiError>;

    /// Post a new comment
    fn add_comment(&self, mr_id: u64, body: &str) -> Result<(), CiError>;
}

impl<C: CiClient + ?Sized> CiClient for &C {
    fn get_latest_baseline_pipeline(&self) -> Result<u64, CiError> {
        (**self).get_latest_baseline_pipeline()
    }

    fn get_job_from_pipeline(&self, pipeline_id: u64, job_name: &str) -> Result<u64, CiError> {
        (**self).get_job_from_pipeline(pipeline_id, job_name)
    }

    fn get_artifact_from_job(&self, job_id: u64, path: &str) -> Result<String, CiError> {
        (**self).get_artifact_from_job(job_id, path)
    }

    fn get_merge_request_id(
        &self,
        source_branch: &str,
        target_branch: &str,
    ) -> Result<u64, CiError> {
        (**self).get_merge_request_id(source_branch, target_branch)
    }

    fn delete_comments_by_author(
        &self,
        mr_id: u64,
        author_name: &str,
        marker: &str,
    ) -> Result<usize, CiError> {
        (**self).delete_comments_by_author(mr_id, author_name, marker)
    }

    fn get_most_recent_comment_by_author(
        &self,
        mr_id: u64,
        author_name: &str,
    ) -> Result<String, CiError> {
        (**self).get_most_recent_comment_by_author(mr_id, author_name)
    }

    fn add_comment(&self, mr_id: u64, body: &str) -> Result<(), CiError> {
        (**self).add_comment(mr_id, body)
    }
}
