//! Infrastructure traits for abstracting I/O operations.
//!
//! Filesystem access and external process execution go through these traits
//! so the pipeline can be exercised in tests without touching disk or network.

use std::io;
use std::path::Path;
use std::process::{Command, Output};

/// Trait for abstracting filesystem operations.
pub trait FileSystem {
    /// Create a directory and all missing parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write a slice of bytes to a file.
    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()>;
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Debug, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

impl<FS: FileSystem> FileSystem for &FS {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        (**self).write(path, contents)
    }
}

/// Trait for abstracting command execution.
///
/// Used for the HTTP transport, which shells out to `curl`.
pub trait CommandExecutor {
    /// Execute a command and return its output (stdout, stderr, status).
    fn output(&self, cmd: &mut Command) -> io::Result<Output>;

    /// Execute a command built with a closure and return its output.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use component_size_report::infra::{CommandExecutor, RealCommandExecutor};
    ///
    /// let executor = RealCommandExecutor;
    /// let output = executor.execute(|cmd| cmd.arg("--version"), "curl")?;
    /// # Ok::<(), std::io::Error>(())
    /// ```
    fn execute<F>(&self, builder: F, program: &str) -> io::Result<Output>
    where
        F: FnOnce(&mut Command) -> &mut Command,
    {
        let mut cmd = Command::new(program);
        builder(&mut cmd);
        self.output(&mut cmd)
    }
}

/// Real command executor that delegates to std::process::Command.
#[derive(Debug, Clone, Copy)]
pub struct RealCommandExecutor;

impl CommandExecutor for RealCommandExecutor {
    fn output(&self, cmd: &mut Command) -> io::Result<Output> {
        cmd.output()
    }
}

/// Create an ExitStatus with the given exit code for use in test mocks.
#[cfg(all(test, unix))]
pub fn mock_exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code << 8)
}

#[cfg(all(test, windows))]
pub fn mock_exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_real_filesystem_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("artifact.txt");

        let fs = RealFileSystem;
        fs.write(&file_path, b"Banner 3 2 1").unwrap();

        assert_eq!(fs.read_to_string(&file_path).unwrap(), "Banner 3 2 1");
    }

    #[test]
    fn test_real_filesystem_create_dir_all_nested() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("reports").join("size");

        RealFileSystem.create_dir_all(&nested).unwrap();
        assert!(nested.is_dir());

        // Idempotent
        RealFileSystem.create_dir_all(&nested).unwrap();
    }

    #[test]
    fn test_filesystem_by_reference_delegates() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("stats.json");
        let fs = &RealFileSystem;

        fs.write(&file_path, "[]").unwrap();
        assert_eq!(FileSystem::read_to_string(&fs, &file_path).unwrap(), "[]");
    }

    #[test]
    fn test_real_filesystem_read_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = RealFileSystem
            .read_to_string(&temp_dir.path().join("missing.json"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn test_mock_exit_status_roundtrips_code() {
        assert!(mock_exit_status(0).success());
        assert_eq!(mock_exit_status(22).code(), Some(22));
    }
}
