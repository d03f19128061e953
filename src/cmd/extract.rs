//! Extract command implementation
//!
//! Handles `component-size-report extract`, which prints the sizes found in a
//! stats file without writing anything or talking to CI.

use anyhow::{Context, Result};
use std::path::Path;

use crate::infra::RealFileSystem;
use crate::size::{artifact, extract, load_stats};

/// Print component sizes extracted from a stats file
///
/// Prints the artifact text by default, or the report as a JSON object keyed
/// by component name.
///
/// # Examples
///
/// ```no_run
/// use component_size_report::cmd::extract::cmd_extract;
///
/// cmd_extract("dist/stats.json", false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_extract(stats_path: &str, json: bool) -> Result<()> {
    let records = load_stats(Path::new(stats_path), &RealFileSystem)?;
    let report = extract(&records);

    if report.is_empty() {
        log::warn!("No components found in {}", stats_path);
    }

    if json {
        let output =
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", output);
    } else {
        println!("{}", artifact::encode(&report));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extract_missing_stats_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stats.json");

        let err = cmd_extract(path.to_str().unwrap(), false).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_extract_valid_stats_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stats.json");
        fs::write(
            &path,
            r#"[{"filename": "es/Banner/index.js", "parsedSize": 2048}]"#,
        )
        .unwrap();

        assert!(cmd_extract(path.to_str().unwrap(), true).is_ok());
    }
}
