//! The persisted statistics record.
//!
//! One structured JSON file at the package root, read-modify-written once
//! per commit cycle and checked into version control. Badge rendering is a
//! pure function of its contents.

use crate::config::Config;
use crate::constants::STATS_FILENAME;
use crate::error::{DocguardError, Result};
use crate::exec;
use crate::lines::{count_lines, LineCounts};
use crate::model::PackageTree;
use crate::output::Progress;
use crate::resolver::resolve_package;
use crate::score::DocRegistry;
use crate::style::{check_style, StyleReport};
use crate::walker::walk_package;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Version of the running tool.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package identity fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMeta {
    /// The package (import) name.
    pub name: String,
    /// The VCS repository alias.
    #[serde(rename = "git-name")]
    pub git_name: String,
    /// The distribution (index) alias.
    #[serde(rename = "dist-name")]
    pub dist_name: String,
    /// One-line description.
    pub description: String,
}

/// Tool version and revision count a statistics file was generated with,
/// used to detect staleness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Version of the tool that wrote the file.
    pub version: String,
    /// Revision count of the package repository at write time.
    #[serde(default)]
    pub revision_count: u64,
}

/// Documentation analysis outcome: the resolved tree, the per-unit
/// statistics and the package-wide score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocReport {
    /// Completeness score in percent.
    pub score: usize,
    /// Total documentation tokens considered.
    pub tokens: usize,
    /// Total documentation errors found.
    pub errors: usize,
    /// The full per-module documentation tree.
    pub tree: PackageTree,
    /// Per-unit token/error statistics.
    pub stats: DocRegistry,
}

/// The persisted aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageStatistics {
    /// Package identity.
    pub package: PackageMeta,
    /// Line-count breakdown.
    #[serde(default)]
    pub lines: LineCounts,
    /// Style conformity report.
    #[serde(default, rename = "pep8")]
    pub style: StyleReport,
    /// Documentation report; absent until the first analysis ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocReport>,
    /// Framework provenance.
    pub provenance: Provenance,
}

/// Parses a `MAJOR.MINOR.MICRO` version string, leniently.
fn parse_version(version: &str) -> (u64, u64, u64) {
    let mut parts = version.split('.').map(|p| p.parse().unwrap_or(0));
    (
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
    )
}

impl PackageStatistics {
    /// Creates an initial record for a freshly scaffolded package.
    #[must_use]
    pub fn initial(package: PackageMeta, revision_count: u64) -> Self {
        Self {
            package,
            lines: LineCounts::default(),
            style: StyleReport::default(),
            doc: None,
            provenance: Provenance {
                version: TOOL_VERSION.to_owned(),
                revision_count,
            },
        }
    }

    /// Loads the statistics file from a package directory.
    ///
    /// # Errors
    ///
    /// `NotAPackage` when the file is absent, `BadStats` when it does not
    /// deserialize.
    pub fn load(package_dir: &Path) -> Result<Self> {
        let path = package_dir.join(STATS_FILENAME);
        if !path.exists() {
            return Err(DocguardError::NotAPackage(format!(
                "no {STATS_FILENAME} in {}",
                package_dir.display()
            )));
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| DocguardError::BadStats(e.to_string()))
    }

    /// Writes the statistics file into a package directory.
    pub fn save(&self, package_dir: &Path) -> Result<()> {
        let path = package_dir.join(STATS_FILENAME);
        let content =
            serde_json::to_string(self).map_err(|e| DocguardError::BadStats(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Verifies that the running tool is recent enough for this record.
    ///
    /// # Errors
    ///
    /// `StaleTool` when the file was written by a newer tool; the commit
    /// workflow must abort without mutating anything.
    pub fn check_provenance(&self) -> Result<()> {
        if parse_version(&self.provenance.version) > parse_version(TOOL_VERSION) {
            return Err(DocguardError::StaleTool {
                required: self.provenance.version.clone(),
                current: TOOL_VERSION.to_owned(),
            });
        }
        Ok(())
    }
}

/// Analyses the content of a package: line counts, style conformity, and
/// the documentation tree with its score.
///
/// Nothing is written; the caller owns persistence (no partial statistics
/// file can exist after a fatal parse error).
///
/// # Errors
///
/// Propagates fatal parse and I/O errors from the walk.
pub fn analyse_package(
    package_dir: &Path,
    meta: PackageMeta,
    config: &Config,
    progress: Option<&Progress>,
) -> Result<PackageStatistics> {
    let source_dir = package_dir.join(&meta.name);

    if let Some(progress) = progress {
        progress.set_message("counting lines".to_owned());
    }
    let lines = count_lines(&source_dir);

    if let Some(progress) = progress {
        progress.set_message("checking style".to_owned());
    }
    let style = check_style(&config.style_command(), &source_dir);

    let mut registry = DocRegistry::default();
    let mut tree = walk_package(package_dir, &meta.name, &mut registry, progress)?;
    resolve_package(&mut tree);

    let doc = DocReport {
        score: registry.score(),
        tokens: registry.total_tokens(),
        errors: registry.total_errors(),
        tree,
        stats: registry,
    };

    Ok(PackageStatistics {
        package: meta,
        lines,
        style,
        doc: Some(doc),
        provenance: Provenance {
            version: TOOL_VERSION.to_owned(),
            revision_count: exec::revision_count(Some(package_dir)).unwrap_or(0),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> PackageMeta {
        PackageMeta {
            name: "pkg".to_owned(),
            git_name: "pkg".to_owned(),
            dist_name: "dg-pkg".to_owned(),
            description: "A package".to_owned(),
        }
    }

    #[test]
    fn round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let stats = PackageStatistics::initial(meta(), 3);
        stats.save(dir.path()).unwrap();

        let loaded = PackageStatistics::load(dir.path()).unwrap();
        assert_eq!(loaded.package, meta());
        assert_eq!(loaded.provenance.revision_count, 3);
        assert_eq!(loaded.provenance.version, TOOL_VERSION);
        assert!(loaded.doc.is_none());
    }

    #[test]
    fn missing_file_is_not_a_package() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            PackageStatistics::load(dir.path()),
            Err(DocguardError::NotAPackage(_))
        ));
    }

    #[test]
    fn invalid_json_is_bad_stats() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STATS_FILENAME), "{not json").unwrap();
        assert!(matches!(
            PackageStatistics::load(dir.path()),
            Err(DocguardError::BadStats(_))
        ));
    }

    #[test]
    fn newer_provenance_is_stale() {
        let mut stats = PackageStatistics::initial(meta(), 0);
        stats.provenance.version = "99.0.0".to_owned();
        assert!(matches!(
            stats.check_provenance(),
            Err(DocguardError::StaleTool { .. })
        ));
    }

    #[test]
    fn same_or_older_provenance_is_fine() {
        let mut stats = PackageStatistics::initial(meta(), 0);
        assert!(stats.check_provenance().is_ok());
        stats.provenance.version = "0.0.1".to_owned();
        assert!(stats.check_provenance().is_ok());
    }

    #[test]
    fn version_comparison_is_numeric_not_lexical() {
        assert!(parse_version("0.10.0") > parse_version("0.9.9"));
    }
}
