//! GitLab REST v4 implementation of [`CiClient`]
//!
//! Requests are issued through `curl`, which every CI image already ships,
//! behind the [`CommandExecutor`] seam so tests can script responses. The
//! access token is handed to curl in a private header file, never on the
//! command line.

use super::{CiClient, CiError};
use crate::infra::{CommandExecutor, RealCommandExecutor};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Write;
use tempfile::NamedTempFile;

/// Page size for list endpoints (GitLab maximum)
const PER_PAGE: usize = 100;

/// Connection settings for a GitLab project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitLabSettings {
    /// API root, e.g. `https://gitlab.example.com/api/v4`
    pub api_url: String,
    /// Numeric project id or `group/project` path
    pub project_id: String,
    /// Access token sent as `PRIVATE-TOKEN`
    pub token: String,
    /// Branch whose pipelines provide the baseline
    pub baseline_ref: String,
}

#[derive(Debug, Deserialize)]
struct Pipeline {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct Job {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct MergeRequest {
    iid: u64,
}

#[derive(Debug, Deserialize)]
struct Note {
    id: u64,
    body: String,
    author: NoteAuthor,
    #[serde(default)]
    system: bool,
}

#[derive(Debug, Deserialize)]
struct NoteAuthor {
    name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// GitLab client with dependency injection for testability
///
/// In dry-run mode no process is spawned: baseline lookups fail with
/// [`CiError::DryRun`], the merge request id is a placeholder `0`, and
/// mutations are printed instead of sent.
pub struct GitLabClient<CE: CommandExecutor = RealCommandExecutor> {
    settings: GitLabSettings,
    dry_run: bool,
    cmd_executor: CE,
}

impl GitLabClient<RealCommandExecutor> {
    /// Create a client that sends real requests
    ///
    /// Fails early when curl is missing, unless running dry.
    pub fn new(settings: GitLabSettings, dry_run: bool) -> Result<Self, CiError> {
        if !dry_run && which::which("curl").is_err() {
            return Err(CiError::CurlMissing);
        }
        Ok(Self::with_executor(settings, dry_run, RealCommandExecutor))
    }
}

impl<CE: CommandExecutor> GitLabClient<CE> {
    /// Create a client with a custom command executor (for testing)
    pub fn with_executor(settings: GitLabSettings, dry_run: bool, cmd_executor: CE) -> Self {
        Self {
            settings,
            dry_run,
            cmd_executor,
        }
    }

    /// Whether mutations are suppressed
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn project_url(&self, path: &str) -> String {
        format!(
            "{}/projects/{}/{}",
            self.settings.api_url.trim_end_matches('/'),
            encode_component(&self.settings.project_id),
            path
        )
    }

    /// Header file with the access token, readable by the current user only
    fn token_header(&self) -> Result<NamedTempFile, CiError> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "PRIVATE-TOKEN: {}", self.settings.token)?;
        file.flush()?;
        Ok(file)
    }

    fn send(&self, method: Method, url: &str, params: &[(&str, &str)]) -> Result<String, CiError> {
        log::debug!("{} {}", method.as_str(), url);

        // Must outlive the curl process
        let header = self.token_header()?;

        let output = self
            .cmd_executor
            .execute(
                |cmd| {
                    cmd.args(["--silent", "--show-error", "--fail", "--location"])
                        .arg("--header")
                        .arg(format!("@{}", header.path().display()))
                        .arg("--request")
                        .arg(method.as_str());
                    if method == Method::Get && !params.is_empty() {
                        cmd.arg("--get");
                    }
                    for (key, value) in params {
                        cmd.arg("--data-urlencode").arg(format!("{}={}", key, value));
                    }
                    cmd.arg(url)
                },
                "curl",
            )
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => CiError::CurlMissing,
                _ => CiError::Io(e),
            })?;

        if !output.status.success() {
            return Err(CiError::Request {
                method: method.as_str(),
                url: url.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| CiError::InvalidUtf8 {
            url: url.to_string(),
        })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, CiError> {
        let body = self.send(Method::Get, url, params)?;
        serde_json::from_str(&body).map_err(|source| CiError::InvalidResponse {
            url: url.to_string(),
            source,
        })
    }

    /// All merge request notes, newest first, system notes excluded
    ///
    /// Pages are fetched until one comes back short.
    fn notes(&self, mr_id: u64) -> Result<Vec<Note>, CiError> {
        let url = self.project_url(&format!("merge_requests/{}/notes", mr_id));
        let per_page = PER_PAGE.to_string();
        let mut notes = Vec::new();
        let mut page = 1u32;

        loop {
            let page_param = page.to_string();
            let batch: Vec<Note> = self.get_json(
                &url,
                &[
                    ("sort", "desc"),
                    ("order_by", "created_at"),
                    ("per_page", per_page.as_str()),
                    ("page", page_param.as_str()),
                ],
            )?;
            let last_page = batch.len() < PER_PAGE;
            notes.extend(batch.into_iter().filter(|n| !n.system));
            if last_page {
                return Ok(notes);
            }
            page += 1;
        }
    }
}

impl<CE: CommandExecutor> CiClient for GitLabClient<CE> {
    fn get_latest_baseline_pipeline(&self) -> Result<u64, CiError> {
        if self.dry_run {
            return Err(CiError::DryRun);
        }
        let url = self.project_url("pipelines");
        let pipelines: Vec<Pipeline> = self.get_json(
            &url,
            &[
                ("ref", self.settings.baseline_ref.as_str()),
                ("status", "success"),
                ("source", "push"),
                ("order_by", "id"),
                ("sort", "desc"),
                ("per_page", "1"),
            ],
        )?;
        pipelines.first().map(|p| p.id).ok_or_else(|| {
            CiError::NotFound(format!(
                "No successful push pipeline on {}",
                self.settings.baseline_ref
            ))
        })
    }

    fn get_job_from_pipeline(&self, pipeline_id: u64, job_name: &str) -> Result<u64, CiError> {
        if self.dry_run {
            return Err(CiError::DryRun);
        }
        let url = self.project_url(&format!("pipelines/{}/jobs", pipeline_id));
        let jobs: Vec<Job> = self.get_json(&url, &[("per_page", "100")])?;
        jobs.iter()
            .find(|job| job.name == job_name)
            .map(|job| job.id)
            .ok_or_else(|| {
                CiError::NotFound(format!(
                    "Job '{}' not found in pipeline {}",
                    job_name, pipeline_id
                ))
            })
    }

    fn get_artifact_from_job(&self, job_id: u64, path: &str) -> Result<String, CiError> {
        if self.dry_run {
            return Err(CiError::DryRun);
        }
        let encoded_path = path
            .trim_start_matches('/')
            .split('/')
            .map(encode_component)
            .collect::<Vec<_>>()
            .join("/");
        let url = self.project_url(&format!("jobs/{}/artifacts/{}", job_id, encoded_path));
        self.send(Method::Get, &url, &[])
    }

    fn get_merge_request_id(
        &self,
        source_branch: &str,
        target_branch: &str,
    ) -> Result<u64, CiError> {
        if self.dry_run {
            println!(
                "[DRY RUN] Would look up the merge request {} -> {}",
                source_branch, target_branch
            );
            return Ok(0);
        }
        let url = self.project_url("merge_requests");
        let merge_requests: Vec<MergeRequest> = self.get_json(
            &url,
            &[
                ("state", "opened"),
                ("source_branch", source_branch),
                ("target_branch", target_branch),
            ],
        )?;
        merge_requests.first().map(|mr| mr.iid).ok_or_else(|| {
            CiError::NotFound(format!(
                "No open merge request from {} into {}",
                source_branch, target_branch
            ))
        })
    }

    fn delete_comments_by_author(
        &self,
        mr_id: u64,
        author_name: &str,
        marker: &str,
    ) -> Result<usize, CiError> {
        if self.dry_run {
            println!(
                "[DRY RUN] Would delete comments by '{}' containing {}",
                author_name, marker
            );
            return Ok(0);
        }

        let mut deleted = 0;
        for note in self.notes(mr_id)? {
            if note.author.name != author_name || !note.body.contains(marker) {
                continue;
            }
            let url = self.project_url(&format!("merge_requests/{}/notes/{}", mr_id, note.id));
            self.send(Method::Delete, &url, &[])?;
            log::debug!("Deleted note {} on merge request !{}", note.id, mr_id);
            deleted += 1;
        }
        Ok(deleted)
    }

    fn get_most_recent_comment_by_author(
        &self,
        mr_id: u64,
        author_name: &str,
    ) -> Result<String, CiError> {
        if self.dry_run {
            return Ok(String::new());
        }
        Ok(self
            .notes(mr_id)?
            .into_iter()
            .find(|note| note.author.name == author_name)
            .map(|note| note.body)
            .unwrap_or_default())
    }

    fn add_comment(&self, mr_id: u64, body: &str) -> Result<(), CiError> {
        if self.dry_run {
            println!("[DRY RUN] Would post the comment to merge request !{}", mr_id);
            return Ok(());
        }
        let url = self.project_url(&format!("merge_requests/{}/notes", mr_id));
        self.send(Method::Post, &url, &[("body", body)])?;
        Ok(())
    }
}

/// Percent-encode everything outside the unreserved URL characters
fn encode_component(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
