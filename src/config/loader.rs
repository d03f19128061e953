//! Configuration file loading

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::error::ReportError;
use crate::infra::{FileSystem, RealFileSystem};
use std::path::Path;

/// Handles loading configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `.component-size-report.toml` from the given directory
    ///
    /// A missing file yields the default (empty) configuration.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use component_size_report::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Job name: {:?}", config.job_name);
    /// # Ok::<(), component_size_report::error::ReportError>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile, ReportError> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(
        project_root: &Path,
        fs: &FS,
    ) -> Result<ConfigFile, ReportError> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        // Read file atomically - no TOCTOU race window
        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(ReportError::ConfigParse {
                    path: config_path,
                    message: e.to_string(),
                });
            }
        };

        toml_edit::de::from_str(&contents).map_err(|e| ReportError::ConfigParse {
            path: config_path,
            message: e.to_string(),
        })
    }
}
