//! Configuration for report runs
//!
//! This module provides:
//! - `.component-size-report.toml` project defaults
//! - Loading with a pluggable filesystem
//!
//! Flags and environment variables are layered on top in `cmd::report`.

pub mod file;
pub mod loader;

pub use file::{ArtifactSettings, ConfigFile, GitLabFileSettings, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
