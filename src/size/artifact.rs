//! Line-oriented artifact format for persisted reports
//!
//! Each line is `<name> <total> <js> <css>`. Older pipelines wrote
//! `<name> <total>` only; such lines still decode, with the whole total
//! attributed to JS. Decoding never fails: lines that cannot be understood
//! are skipped and reported.

use super::{ComponentReport, SizeEntry};
use std::fmt;

/// Why a line was left out of a decoded report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than two whitespace-separated tokens
    Malformed,
    /// Total is not a non-negative finite number
    InvalidEntry,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed line"),
            Self::InvalidEntry => write!(f, "invalid entry"),
        }
    }
}

/// A line that was dropped while decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// Trimmed line content
    pub line: String,
    /// Why the line was dropped
    pub reason: SkipReason,
}

/// Decoded report together with the lines that were skipped
#[derive(Debug, Clone, Default)]
pub struct DecodeOutcome {
    /// Components that decoded successfully
    pub report: ComponentReport,
    /// Lines that were dropped, in input order
    pub skipped: Vec<SkippedLine>,
}

/// Serialize a report, one component per line in report order
///
/// No trailing newline is written.
///
/// ```
/// use component_size_report::size::{artifact, ComponentReport, SizeEntry};
///
/// let report: ComponentReport = [
///     ("Banner", SizeEntry::new(2, 1, 3)),
///     ("Button", SizeEntry::new(4, 0, 4)),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(artifact::encode(&report), "Banner 3 2 1\nButton 4 4 0");
/// ```
pub fn encode(report: &ComponentReport) -> String {
    report
        .iter()
        .map(|(name, size)| format!("{} {} {} {}", name, size.total, size.js, size.css))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Deserialize an artifact, logging a warning for every skipped line
pub fn decode(text: &str) -> ComponentReport {
    decode_with_diagnostics(text).report
}

/// Deserialize an artifact and return the skipped lines alongside the report
pub fn decode_with_diagnostics(text: &str) -> DecodeOutcome {
    let mut outcome = DecodeOutcome::default();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match decode_line(line) {
            Ok((name, size)) => {
                outcome.report.insert(name, size);
            }
            Err(reason) => {
                log::warn!("Skipping {} in artifact: \"{}\"", reason, line);
                outcome.skipped.push(SkippedLine {
                    line: line.to_string(),
                    reason,
                });
            }
        }
    }

    outcome
}

fn decode_line(line: &str) -> Result<(&str, SizeEntry), SkipReason> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [name, total, rest @ ..] = tokens.as_slice() else {
        return Err(SkipReason::Malformed);
    };

    let total = parse_kb(total).ok_or(SkipReason::InvalidEntry)?;

    if let [js, css, ..] = rest {
        if let (Some(js), Some(css)) = (parse_kb(js), parse_kb(css)) {
            return Ok((*name, SizeEntry::new(js, css, total)));
        }
    }

    Ok((*name, SizeEntry::legacy(total)))
}

/// Parse a non-negative finite number of kilobytes (`42`, `4.2e1`, `1.5`)
///
/// Fractions are rounded up, the same way byte counts become kilobytes.
fn parse_kb(token: &str) -> Option<u64> {
    if let Ok(value) = token.parse::<u64>() {
        return Some(value);
    }
    let value = token.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0 && value.ceil() <= u64::MAX as f64)
        .then(|| value.ceil() as u64)
}
