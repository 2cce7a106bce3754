//! The `update` command: refresh a managed package in place.

use crate::cli::UpdateArgs;
use crate::config::Config;
use crate::constants::{LEGACY_STATS_FILENAME, STATS_FILENAME};
use crate::error::DocguardError;
use crate::exec;
use crate::output::print_ok;
use crate::readme::parse_meta;
use crate::scaffold;
use crate::stats::{PackageMeta, PackageStatistics, Provenance, TOOL_VERSION};
use anyhow::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Migrates a legacy statistics file: re-reads the package identity from
/// the user-authored README and rewrites the record under the new name.
fn migrate_legacy(package_dir: &Path, config: &Config) -> Result<PackageMeta> {
    let body = fs::read_to_string(package_dir.join("docs").join("README.md"))
        .map_err(|_| DocguardError::NotAPackage("docs/README.md is missing".to_owned()))?;
    let meta = parse_meta(&body, &config.dist_prefix()).ok_or_else(|| {
        DocguardError::NotAPackage("could not parse package data from the README".to_owned())
    })?;

    let stats = PackageStatistics {
        package: meta.clone(),
        lines: crate::lines::LineCounts::default(),
        style: crate::style::StyleReport::default(),
        doc: None,
        provenance: Provenance {
            version: TOOL_VERSION.to_owned(),
            revision_count: exec::revision_count(Some(package_dir)).unwrap_or(0),
        },
    };
    stats.save(package_dir)?;

    let legacy = package_dir.join(LEGACY_STATS_FILENAME);
    if legacy.exists() {
        // Keep history: move the old record out of the way through git
        // when possible, else plainly.
        if exec::git(
            Some(package_dir),
            &["mv", "-f", LEGACY_STATS_FILENAME, STATS_FILENAME],
        )
        .is_err()
        {
            let _ = fs::remove_file(&legacy);
        }
        // git mv replaced the fresh record; write it back.
        stats.save(package_dir)?;
    }
    let _ = exec::git(Some(package_dir), &["add", STATS_FILENAME]);

    Ok(meta)
}

/// Executes the update command.
pub fn run_update<W: Write>(args: &UpdateArgs, writer: &mut W) -> Result<i32> {
    let package_dir: PathBuf = match &args.path {
        Some(path) => fs::canonicalize(path).unwrap_or_else(|_| path.clone()),
        None => exec::get_top_directory(None).ok_or_else(|| {
            anyhow::Error::new(DocguardError::NotAPackage(
                "not inside a git repository".to_owned(),
            ))
        })?,
    };

    let config = Config::load_from_path(&package_dir);

    // A managed package carries the statistics record; an old-style one
    // only the legacy file.
    let meta = match PackageStatistics::load(&package_dir) {
        Ok(stats) => stats.package,
        Err(_) if package_dir.join(LEGACY_STATS_FILENAME).exists() => {
            migrate_legacy(&package_dir, &config)?
        }
        Err(error) => return Err(error.into()),
    };

    // Refresh static files and the hooks.
    scaffold::write_gitignore(&package_dir)?;
    scaffold::write_coveragerc(&package_dir, &meta.name)?;
    scaffold::write_tests_init(&package_dir, &meta.name)?;

    let git_dir = package_dir.join(".git");
    scaffold::install_hook(&git_dir, "pre-commit")?;
    scaffold::install_hook(&git_dir, "prepare-commit-msg")?;

    if !args.quiet {
        print_ok(writer, &format!("updated package `{}'", meta.name))?;
    }
    Ok(0)
}
