//! Report run sequencing
//!
//! Read stats -> extract -> persist artifact -> (stop on the base branch) ->
//! fetch baseline -> render -> skip if unchanged -> replace tracked comments.
//!
//! Stats problems abort the run. Baseline problems degrade to an empty
//! baseline. Deleting old comments and posting the new one is not atomic: a
//! crash in between leaves the merge request without a report until the next
//! run.

use super::config::ReportConfig;
use super::RunOutcome;
use crate::ci::{CiClient, CiError};
use crate::error::ReportError;
use crate::fmt;
use crate::infra::{FileSystem, RealFileSystem};
use crate::report::{render, REPORT_MARKER};
use crate::size::{artifact, extract, load_stats, ComponentReport};
use console::style;

/// Runs the report pipeline for one configuration
pub struct Orchestrator<'a, FS: FileSystem = RealFileSystem> {
    config: &'a ReportConfig,
    fs: FS,
}

impl<'a> Orchestrator<'a, RealFileSystem> {
    /// Create an orchestrator working on the real filesystem
    pub fn new(config: &'a ReportConfig) -> Self {
        Self::with_fs(config, RealFileSystem)
    }
}

impl<'a, FS: FileSystem> Orchestrator<'a, FS> {
    /// Create an orchestrator with a custom filesystem implementation
    pub fn with_fs(config: &'a ReportConfig, fs: FS) -> Self {
        Self { config, fs }
    }

    /// Run the whole pipeline
    ///
    /// `connect` is only called once the run needs the CI system, so base
    /// branch and artifact-only runs work without credentials.
    pub fn run<C, F>(&self, connect: F) -> Result<RunOutcome, ReportError>
    where
        C: CiClient,
        F: FnOnce() -> Result<C, ReportError>,
    {
        if self.config.dry_run {
            println!(
                "{} Running in dry-run mode - nothing will be written or posted\n",
                fmt::MICROSCOPE
            );
        }

        let report = self.build_report()?;
        if report.is_empty() {
            println!("{} No components found in stats file", fmt::WARNING);
            return Ok(RunOutcome::NoComponents);
        }

        self.persist(&report)?;

        if self.config.artifact_only {
            return Ok(RunOutcome::ArtifactOnly);
        }

        if self.config.is_base_branch() {
            println!(
                "Current branch is {}, skipping merge request comment.",
                style(&self.config.default_branch).cyan()
            );
            return Ok(RunOutcome::OnBaseBranch);
        }

        let ci = connect()?;
        let baseline = self.fetch_baseline(&ci);

        println!("{} Building comment...", fmt::MEMO);
        let comment = render(&report, &baseline);
        if self.config.dry_run {
            fmt::print_framed("Generated comment preview:", &comment);
        }

        self.publish(&ci, &comment)
    }

    /// Read the stats file and extract the component report
    pub fn build_report(&self) -> Result<ComponentReport, ReportError> {
        println!("{} Reading component size report...", fmt::CHART);
        let records = load_stats(&self.config.stats_path, &self.fs)?;
        let report = extract(&records);
        println!(
            "{} Report was read. Found {} components.",
            fmt::CHECKMARK,
            report.len()
        );
        Ok(report)
    }

    fn persist(&self, report: &ComponentReport) -> Result<(), ReportError> {
        println!("{} Building artifact...", fmt::PACKAGE);
        let encoded = artifact::encode(report);
        let path = self.config.artifact_path();

        if self.config.dry_run {
            println!("[DRY RUN] Would save artifact to {}:", path.display());
            println!("{}", encoded);
            return Ok(());
        }

        self.fs
            .create_dir_all(&self.config.artifact_dir)
            .and_then(|()| self.fs.write(&path, &encoded))
            .map_err(|source| ReportError::ArtifactWrite {
                path: path.clone(),
                source,
            })?;

        println!(
            "{} Artifact has been built: {}",
            fmt::CHECKMARK,
            path.display()
        );
        Ok(())
    }

    /// Baseline report from the latest baseline pipeline, or an empty report
    /// when any step of the lookup fails
    pub fn fetch_baseline<C: CiClient>(&self, ci: &C) -> ComponentReport {
        println!(
            "{} Reading artifact from {} branch...",
            fmt::CHART,
            self.config.default_branch
        );

        match self.download_baseline(ci) {
            Ok(text) => {
                let outcome = artifact::decode_with_diagnostics(&text);
                if !outcome.skipped.is_empty() {
                    log::warn!(
                        "Baseline artifact had {} unreadable line(s)",
                        outcome.skipped.len()
                    );
                }
                println!(
                    "{} Artifact from {} has been processed.",
                    fmt::CHECKMARK,
                    self.config.default_branch
                );
                outcome.report
            }
            Err(CiError::DryRun) => {
                println!("[DRY RUN] Skipping baseline download, comparing against nothing");
                ComponentReport::new()
            }
            Err(e) => {
                log::warn!(
                    "Could not fetch {} artifact: {}. Using empty comparison.",
                    self.config.default_branch,
                    e
                );
                println!(
                    "{} Can't read an artifact from {}. Using empty comparison.",
                    fmt::WARNING,
                    self.config.default_branch
                );
                ComponentReport::new()
            }
        }
    }

    fn download_baseline<C: CiClient>(&self, ci: &C) -> Result<String, CiError> {
        let pipeline_id = ci.get_latest_baseline_pipeline()?;
        log::debug!("Latest baseline pipeline: {}", pipeline_id);
        let job_id = ci.get_job_from_pipeline(pipeline_id, &self.config.job_name)?;
        log::debug!("Report job: {}", job_id);
        ci.get_artifact_from_job(job_id, &self.config.baseline_artifact_path)
    }

    /// Replace the tracked comment unless the newest one already says the same
    pub fn publish<C: CiClient>(&self, ci: &C, comment: &str) -> Result<RunOutcome, ReportError> {
        println!("{} Adding comment to merge request...", fmt::MEMO);
        let author = &self.config.comment_author;

        let mr_id =
            ci.get_merge_request_id(&self.config.current_branch, &self.config.default_branch)?;

        let previous = ci.get_most_recent_comment_by_author(mr_id, author)?;
        if comment.trim() == previous.trim() {
            println!(
                "{} Comment is the same as the previous one. Will not post.",
                fmt::CHECKMARK
            );
            return Ok(RunOutcome::CommentUnchanged);
        }

        let deleted = ci.delete_comments_by_author(mr_id, author, REPORT_MARKER)?;
        log::debug!("Deleted {} previous report comment(s)", deleted);

        ci.add_comment(mr_id, comment)?;
        println!("{} Component size report completed.", fmt::CHECKMARK);
        Ok(RunOutcome::Posted)
    }
}
