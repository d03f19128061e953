//! Shared formatting utilities for console output

use console::Emoji;

/// Chart emoji for reading/measuring steps
pub const CHART: Emoji = Emoji("📊", "~");

/// Package emoji for artifact operations
pub const PACKAGE: Emoji = Emoji("📦", "#");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Warning emoji for degraded results
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Microscope emoji for dry-run previews
pub const MICROSCOPE: Emoji = Emoji("🔍", ">>");

/// Memo emoji for comment operations
pub const MEMO: Emoji = Emoji("📝", ">");

/// Width of the frame around previews
pub const PREVIEW_RULE_WIDTH: usize = 50;

/// Format a kilobyte figure the way report comments do
///
/// # Examples
///
/// ```
/// use component_size_report::fmt::format_kb;
///
/// assert_eq!(format_kb(0), "0Kb");
/// assert_eq!(format_kb(12), "12Kb");
/// ```
pub fn format_kb(kb: u64) -> String {
    format!("{}Kb", kb)
}

/// Print a block of text between horizontal rules
pub fn print_framed(title: &str, body: &str) {
    let rule = "=".repeat(PREVIEW_RULE_WIDTH);
    println!("\n{} {}", MEMO, title);
    println!("{}", rule);
    println!("{}", body);
    println!("{}", rule);
}
