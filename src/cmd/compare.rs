//! Compare command implementation
//!
//! Handles `component-size-report compare`, which renders the comment for two
//! local artifacts. Useful for previewing a report outside CI.

use anyhow::Result;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::ReportError;
use crate::fmt;
use crate::infra::{FileSystem, RealFileSystem};
use crate::report::render;
use crate::size::{artifact, ComponentReport};

/// Render the report comment for a current and a baseline artifact
///
/// A missing baseline file is treated as an empty baseline, so every
/// component shows up as added.
///
/// # Examples
///
/// ```no_run
/// use component_size_report::cmd::compare::cmd_compare;
///
/// cmd_compare("component-size-report.txt", "baseline.txt")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if the current artifact cannot be read, or the baseline
/// exists but cannot be read.
pub fn cmd_compare(current: &str, baseline: &str) -> Result<()> {
    let comment = compare_with_fs(Path::new(current), Path::new(baseline), &RealFileSystem)?;
    println!("{}", comment);
    Ok(())
}

fn compare_with_fs<FS: FileSystem>(
    current: &Path,
    baseline: &Path,
    fs: &FS,
) -> Result<String, ReportError> {
    let current_text = fs
        .read_to_string(current)
        .map_err(|source| ReportError::ArtifactRead {
            path: current.to_path_buf(),
            source,
        })?;
    let current_report = artifact::decode(&current_text);

    let baseline_report = match fs.read_to_string(baseline) {
        Ok(text) => artifact::decode(&text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            eprintln!(
                "{} Baseline {} not found. Using empty comparison.",
                fmt::WARNING,
                baseline.display()
            );
            ComponentReport::new()
        }
        Err(source) => {
            return Err(ReportError::ArtifactRead {
                path: baseline.to_path_buf(),
                source,
            })
        }
    };

    Ok(render(&current_report, &baseline_report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{NO_DIFF_MESSAGE, REPORT_MARKER};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_compare_renders_changes() {
        let temp_dir = TempDir::new().unwrap();
        let current = temp_dir.path().join("current.txt");
        let baseline = temp_dir.path().join("baseline.txt");
        fs::write(&current, "Button 4 4 0\nBanner 3 2 1").unwrap();
        fs::write(&baseline, "Button 4\nBanner 2").unwrap();

        let comment = compare_with_fs(&current, &baseline, &RealFileSystem).unwrap();

        assert!(comment.starts_with(REPORT_MARKER));
        assert!(comment.contains("|Banner|3Kb 💔 +1Kb|"));
        assert!(!comment.contains("|Button|"));
    }

    #[test]
    fn test_compare_missing_baseline_marks_everything_added() {
        let temp_dir = TempDir::new().unwrap();
        let current = temp_dir.path().join("current.txt");
        fs::write(&current, "Button 4 4 0").unwrap();

        let comment =
            compare_with_fs(&current, &temp_dir.path().join("missing.txt"), &RealFileSystem)
                .unwrap();

        assert!(comment.contains("|🚨 Button|4Kb 🚨 Added|"));
    }

    #[test]
    fn test_compare_identical_artifacts() {
        let temp_dir = TempDir::new().unwrap();
        let current = temp_dir.path().join("current.txt");
        fs::write(&current, "Button 4 4 0").unwrap();

        let comment = compare_with_fs(&current, &current, &RealFileSystem).unwrap();
        assert!(comment.contains(NO_DIFF_MESSAGE));
    }

    #[test]
    fn test_compare_missing_current_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.txt");

        let err = compare_with_fs(&missing, &missing, &RealFileSystem).unwrap_err();
        assert!(matches!(err, ReportError::ArtifactRead { .. }));
    }
}
