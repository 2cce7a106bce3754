//! Git hook commands: `pre-commit` and `prepare-commit-msg`.

use crate::config::Config;
use crate::constants::STATS_FILENAME;
use crate::error::DocguardError;
use crate::exec;
use crate::output::{print_ok, Progress};
use crate::readme::update_readme;
use crate::stats::{analyse_package, PackageStatistics, TOOL_VERSION};
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Locates the package top directory from git.
fn top_directory() -> Result<PathBuf> {
    exec::get_top_directory(None).ok_or_else(|| {
        anyhow::Error::new(DocguardError::NotAPackage(
            "not inside a git repository".to_owned(),
        ))
    })
}

/// Git hook for pre-processing a commit.
///
/// Recomputes the statistics record and the README, staging both. Fails
/// without mutating any file when the statistics record is missing,
/// invalid, or requires a newer tool.
pub fn run_pre_commit<W: Write>(writer: &mut W) -> Result<i32> {
    let package_dir = top_directory()?;

    // Validity and staleness gate before anything is written.
    let existing = PackageStatistics::load(&package_dir)?;
    existing.check_provenance()?;

    let readme_path = package_dir.join("docs").join("README.md");
    let body = fs::read_to_string(&readme_path)
        .map_err(|_| DocguardError::NotAPackage("docs/README.md is missing".to_owned()))?;

    let config = Config::load_from_path(&package_dir);
    let progress = Progress::new(false);
    let stats = analyse_package(&package_dir, existing.package, &config, Some(&progress));
    progress.finish();
    let stats = stats?;

    stats.save(&package_dir)?;
    exec::git(Some(&package_dir), &["add", STATS_FILENAME])?;

    update_readme(&package_dir, &stats, &config.organization(), &body)
        .context("failed to write README.md")?;
    exec::git(Some(&package_dir), &["add", "README.md"])?;

    print_ok(
        writer,
        &format!(
            "statistics updated (doc score {}%)",
            stats.doc.as_ref().map_or(100, |d| d.score)
        ),
    )?;
    Ok(0)
}

/// Adds the framework banner to a git commit message.
///
/// The banner slots in before the first comment block; messages without
/// comments are returned unchanged.
#[must_use]
pub fn add_banner(message: &str, version: &str) -> String {
    let Some((head, tail)) = message.split_once('#') else {
        return message.to_owned();
    };

    format!(
        "{head}\
# =================================================================
#      This commit has been analysed by docguard {version}
# =================================================================
#{tail}"
    )
}

/// Git hook for preparing the commit message.
pub fn run_prepare_commit_msg(file: &Path) -> Result<i32> {
    let initial = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let message = add_banner(&initial, TOOL_VERSION);
    if message != initial {
        fs::write(file, message)?;
    }
    Ok(0)
}
