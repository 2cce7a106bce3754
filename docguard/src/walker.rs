//! Package discovery.
//!
//! Recursively walks a package directory, invoking the module parser on
//! every source unit and building the [`PackageTree`] arena. Directory
//! entries are processed in sorted order so statistics are reproducible.

use crate::constants::{PACKAGE_MARKER, PRIVACY_PREFIX, VERSION_MODULE};
use crate::error::Result;
use crate::model::{PackageTree, SourceUnit};
use crate::output::Progress;
use crate::parse::parse_source_unit;
use crate::score::DocRegistry;
use crate::utils::join_dotted;
use std::fs;
use std::path::Path;

/// Discovers all source units under `package_dir/package_name` and parses
/// them into a [`PackageTree`].
///
/// A subdirectory is treated as a nested package iff it carries the package
/// marker file. The marker itself is the package-root unit; the reserved
/// version module and privacy-prefixed files are not leaf modules.
///
/// # Errors
///
/// Propagates I/O failures and fatal parse errors; a malformed source file
/// aborts the whole walk.
pub fn walk_package(
    package_dir: &Path,
    package_name: &str,
    registry: &mut DocRegistry,
    progress: Option<&Progress>,
) -> Result<PackageTree> {
    let mut tree = PackageTree::new(package_name);
    walk_dir(
        package_dir,
        Path::new(package_name),
        "",
        &mut tree,
        registry,
        progress,
    )?;
    Ok(tree)
}

/// Parses one file into the arena under `key`.
fn parse_into(
    package_dir: &Path,
    rel_path: &Path,
    key: &str,
    check_imports: bool,
    tree: &mut PackageTree,
    registry: &mut DocRegistry,
    progress: Option<&Progress>,
) -> Result<()> {
    let unit_path = rel_path.to_string_lossy().replace('\\', "/");
    if let Some(progress) = progress {
        progress.set_message(format!("parsing {unit_path}"));
    }
    let source = fs::read_to_string(package_dir.join(rel_path))?;
    let unit: SourceUnit = parse_source_unit(&source, &unit_path, check_imports, registry)?;
    tree.units.insert(key.to_owned(), unit);
    Ok(())
}

fn walk_dir(
    package_dir: &Path,
    rel_dir: &Path,
    key: &str,
    tree: &mut PackageTree,
    registry: &mut DocRegistry,
    progress: Option<&Progress>,
) -> Result<()> {
    // The package root itself; the only unit whose imports are recorded.
    parse_into(
        package_dir,
        &rel_dir.join(PACKAGE_MARKER),
        key,
        true,
        tree,
        registry,
        progress,
    )?;

    let mut entries: Vec<_> = fs::read_dir(package_dir.join(rel_dir))?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.file_name())
        .collect();
    entries.sort();

    for file_name in entries {
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let full = package_dir.join(rel_dir).join(name);

        if full.is_dir() {
            if full.join(PACKAGE_MARKER).exists() {
                walk_dir(
                    package_dir,
                    &rel_dir.join(name),
                    &join_dotted(key, name),
                    tree,
                    registry,
                    progress,
                )?;
            }
            continue;
        }

        if name == PACKAGE_MARKER
            || name == VERSION_MODULE
            || name.starts_with(PRIVACY_PREFIX)
            || !name.ends_with(".py")
        {
            continue;
        }

        let stem = name.trim_end_matches(".py");
        parse_into(
            package_dir,
            &rel_dir.join(name),
            &join_dotted(key, stem),
            false,
            tree,
            registry,
            progress,
        )?;
    }

    Ok(())
}
