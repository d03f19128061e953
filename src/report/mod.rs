//! Report comparison and merge request comment rendering

pub mod comment;
pub mod diff;

pub use comment::{render, render_diff, DISCLAIMER, NO_DIFF_MESSAGE, REPORT_MARKER};
pub use diff::{ChangeKind, ComponentChange, RemovedComponent, ReportDiff, TotalDelta};
