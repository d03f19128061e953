//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - The binary under test with a clean CI environment
//! - Stats file and artifact fixtures

pub mod fixtures;

use assert_cmd::Command;

/// Environment variables the `report` command reads
pub const REPORT_ENV_VARS: &[&str] = &[
    "STATS_PATH",
    "ARTIFACT_DIR",
    "ARTIFACT_NAME",
    "BASELINE_ARTIFACT_PATH",
    "JOB_NAME",
    "CI_COMMIT_REF_NAME",
    "CI_DEFAULT_BRANCH",
    "COMMENT_AUTHOR",
    "CI_API_V4_URL",
    "CI_PROJECT_ID",
    "GITLAB_TOKEN",
    "DRY_RUN",
];

/// The binary, isolated from any CI variables of the machine running tests
#[allow(dead_code)]
pub fn get_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_component-size-report"));
    for var in REPORT_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}
