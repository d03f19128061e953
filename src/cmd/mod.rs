//! Command handlers for the component-size-report CLI
//!
//! Each submodule handles one subcommand.

pub mod compare;
pub mod completions;
pub mod extract;
pub mod report;

pub use compare::cmd_compare;
pub use completions::cmd_completions;
pub use extract::cmd_extract;
pub use report::{cmd_report, ReportArgs};
