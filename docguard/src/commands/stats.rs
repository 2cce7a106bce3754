//! The `stats` command: compute and display, without writing.

use crate::cli::StatsArgs;
use crate::config::Config;
use crate::error::DocguardError;
use crate::exec;
use crate::output::{print_stats_summary, Progress};
use crate::readme::parse_meta;
use crate::stats::{analyse_package, PackageStatistics};
use anyhow::Result;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Resolves the package directory: explicit path, else git toplevel.
fn package_dir(args: &StatsArgs) -> Result<PathBuf> {
    if let Some(path) = &args.path {
        return Ok(fs::canonicalize(path).unwrap_or_else(|_| path.clone()));
    }
    exec::get_top_directory(None).ok_or_else(|| {
        anyhow::Error::new(DocguardError::NotAPackage(
            "not inside a git repository".to_owned(),
        ))
    })
}

/// Executes the stats command.
pub fn run_stats<W: Write>(args: &StatsArgs, writer: &mut W) -> Result<i32> {
    let package_dir = package_dir(args)?;
    let config = Config::load_from_path(&package_dir);

    // Identity comes from the statistics record when the package is
    // managed, falling back to the user-authored README.
    let meta = match PackageStatistics::load(&package_dir) {
        Ok(existing) => existing.package,
        Err(_) => {
            let body = fs::read_to_string(package_dir.join("docs").join("README.md"))
                .map_err(|_| {
                    DocguardError::NotAPackage(
                        "no statistics record and no docs/README.md".to_owned(),
                    )
                })?;
            parse_meta(&body, &config.dist_prefix()).ok_or_else(|| {
                DocguardError::NotAPackage("docs/README.md carries no heading".to_owned())
            })?
        }
    };

    let progress = Progress::new(args.json);
    let stats = analyse_package(&package_dir, meta, &config, Some(&progress));
    progress.finish();
    let stats = stats?;

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&stats)?)?;
    } else {
        print_stats_summary(writer, &stats)?;
    }
    Ok(0)
}
