//! Test fixture creation utilities

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Stats with two components: Banner (2Kb JS, 1Kb CSS) and Button (2Kb JS)
#[allow(dead_code)]
pub const TWO_COMPONENT_STATS: &str = r#"[
  {"filename": "es/Banner/index.js", "parsedSize": 2048, "gzipSize": 700},
  {"filename": "es/banner/banner.css", "parsedSize": 100},
  {"filename": "es/Button/index.js", "parsedSize": 1025},
  {"filename": "es/Button/Button.chunk.js", "parsedSize": 4096},
  {"filename": "es/utils/helpers.js", "parsedSize": 300}
]"#;

/// Stats without any component entry point
#[allow(dead_code)]
pub const NO_COMPONENT_STATS: &str = r#"[
  {"filename": "assets/vendor.js", "parsedSize": 50000}
]"#;

/// Temp directory containing `stats.json`
#[allow(dead_code)]
pub fn create_stats_dir(stats: &str) -> anyhow::Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let stats_path = temp_dir.path().join("stats.json");
    fs::write(&stats_path, stats)?;
    Ok((temp_dir, stats_path))
}

/// Write an artifact file next to the other fixtures
#[allow(dead_code)]
pub fn write_artifact(dir: &TempDir, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}
