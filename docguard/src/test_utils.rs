//! Test utilities shared by unit and integration tests.

use std::fs;
use std::path::{Path, PathBuf};

/// RAII guard that changes the current working directory and restores it
/// on drop. Tests touching process CWD should hold one of these.
pub struct CwdGuard {
    original: PathBuf,
}

impl CwdGuard {
    /// Switches the process CWD to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory change fails.
    pub fn new(path: &Path) -> std::io::Result<Self> {
        let original = std::env::current_dir()?;
        std::env::set_current_dir(path)?;
        Ok(Self { original })
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Writes a file under `root`, creating parent directories as needed.
///
/// # Panics
///
/// Panics on I/O failure; only for use in tests.
#[allow(clippy::expect_used)]
pub fn write_file(root: &Path, rel_path: &str, content: &str) {
    let path = root.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    fs::write(path, content).expect("write test file");
}
