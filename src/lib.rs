#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! component-size-report library
//!
//! Tracks the per-component size of a bundled component library and reports
//! changes against the default branch as a single, replaceable merge request
//! comment. The CLI is a thin shell around these modules; they can also be
//! driven programmatically.
//!
//! # Basic Example
//!
//! Extracting a report from bundle analyzer records:
//!
//! ```
//! use component_size_report::size::{extract, StatsRecord};
//!
//! let records = vec![
//!     StatsRecord::new("es/Banner/index.js", 1025),
//!     StatsRecord::new("es/banner/banner.css", 300),
//!     StatsRecord::new("es/Banner/Banner.chunk.js", 999),
//! ];
//!
//! let report = extract(&records);
//! let banner = report.get("Banner").unwrap();
//! assert_eq!((banner.js, banner.css, banner.total), (2, 1, 3));
//! assert_eq!(report.len(), 1);
//! ```
//!
//! # Advanced Example: Comparing Against a Baseline
//!
//! Artifacts from older pipelines may only carry a total per component; they
//! still decode, with the whole size attributed to JS:
//!
//! ```
//! use component_size_report::report::{render, REPORT_MARKER};
//! use component_size_report::size::artifact;
//!
//! let baseline = artifact::decode("Button 4\nBanner 2");
//! let current = artifact::decode("Button 4 4 0\nBanner 3 2 1");
//!
//! let comment = render(&current, &baseline);
//! assert!(comment.starts_with(REPORT_MARKER));
//! assert!(comment.contains("|Banner|3Kb 💔 +1Kb|"));
//! assert!(!comment.contains("|Button|"));
//! ```

/// Continuous integration collaborator (pipelines, artifacts, comments)
pub mod ci;
/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file support
pub mod config;
/// Error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem and command execution
pub mod infra;
/// Report pipeline orchestration
pub mod pipeline;
/// Diffing and markdown rendering of size reports
pub mod report;
/// Component size extraction and the artifact format
pub mod size;
