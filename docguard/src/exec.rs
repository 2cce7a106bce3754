//! Synchronous external command execution.
//!
//! Everything the tool asks of the outside world (git, the style checker)
//! goes through this module: a blocking call that returns captured output.

use crate::error::{DocguardError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured output of a finished external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit status of the process.
    pub status: std::process::ExitStatus,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl CommandOutput {
    /// Whether the process exited successfully.
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Runs a shell command, blocking until it exits.
///
/// # Errors
///
/// Returns an error if the process could not be spawned at all; a nonzero
/// exit is reported through [`CommandOutput::status`], not as an `Err`.
pub fn system(command: &str, cwd: Option<&Path>) -> std::io::Result<CommandOutput> {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    cmd.output().map(CommandOutput::from)
}

/// System git call; returns trimmed stdout.
///
/// # Errors
///
/// Returns [`DocguardError::Git`] if git exits nonzero or cannot be spawned.
pub fn git(cwd: Option<&Path>, args: &[&str]) -> Result<String> {
    let command = format!("git {}", args.join(" "));
    let output = system(&command, cwd).map_err(|e| DocguardError::Git(e.to_string()))?;
    if output.success() {
        Ok(output.stdout.trim().to_owned())
    } else {
        Err(DocguardError::Git(output.stderr.trim().to_owned()))
    }
}

/// Get the package top directory from git, or `None` outside a repository.
pub fn get_top_directory(cwd: Option<&Path>) -> Option<PathBuf> {
    git(cwd, &["rev-parse", "--show-toplevel"])
        .ok()
        .map(PathBuf::from)
}

/// Number of revisions reachable from HEAD, or `None` in a fresh repository.
pub fn revision_count(cwd: Option<&Path>) -> Option<u64> {
    git(cwd, &["rev-list", "--count", "HEAD"])
        .ok()
        .and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_captures_stdout() {
        let out = system("echo hello", None).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn system_reports_failure_status() {
        let out = system("false", None).unwrap();
        assert!(!out.success());
    }

    #[test]
    fn git_outside_repository_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = git(Some(dir.path()), &["rev-parse", "--show-toplevel"]);
        assert!(result.is_err());
        assert!(get_top_directory(Some(dir.path())).is_none());
    }
}
