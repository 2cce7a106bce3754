//! Relative-import resolution across the package tree.
//!
//! A single top-down pass over the arena: each package root's directives
//! are resolved against their target units, wildcards are expanded, and
//! matching symbol records are copied into the importing unit with the
//! target's path attached as origin.
//!
//! Known limitation, kept for compatibility with recorded statistics:
//! because the pass is single and top-down, a re-export of a re-export is
//! only guaranteed to resolve one hop deep. Missing targets and unknown
//! symbols are silently skipped; a package may legitimately import names
//! from outside the analyzed tree.

use crate::model::{PackageTree, SymbolRecord};
use compact_str::CompactString;

/// The three symbol categories, in lookup order. Categories are mutually
/// exclusive by construction, so the first match wins.
const CATEGORIES: [&str; 3] = ["classes", "definitions", "functions"];

/// Resolves all relative-import directives in `tree`, in place.
///
/// The pass is idempotent: previously copied records (those with an origin
/// set) are removed before resolving, so running it twice yields the same
/// tree.
pub fn resolve_package(tree: &mut PackageTree) {
    for unit in tree.units.values_mut() {
        unit.classes.retain(|_, record| record.origin.is_none());
        unit.definitions.retain(|_, record| record.origin.is_none());
        unit.functions.retain(|_, record| record.origin.is_none());
    }
    resolve_unit(tree, "");
}

fn resolve_unit(tree: &mut PackageTree, key: &str) {
    let directives = tree
        .units
        .get(key)
        .map(|unit| unit.imports.clone())
        .unwrap_or_default();

    let source_segments: Vec<&str> = if key.is_empty() {
        Vec::new()
    } else {
        key.split('.').collect()
    };

    for directive in directives {
        // Walk up `level - 1` segments from the source unit's own path.
        let up = usize::try_from(directive.level.saturating_sub(1)).unwrap_or(usize::MAX);
        if up > source_segments.len() {
            continue;
        }
        let mut target_segments: Vec<&str> =
            source_segments[..source_segments.len() - up].to_vec();
        if !directive.module.is_empty() {
            target_segments.extend(directive.module.split('.'));
        }
        let target_key = target_segments.join(".");

        // Missing target: nothing to resolve.
        let Some(target) = tree.units.get(&target_key) else {
            continue;
        };

        // Expand wildcard entries using the target's explicit re-export
        // list when present, else the union of its category names.
        let mut names: Vec<(CompactString, CompactString)> = Vec::new();
        for (name, alias) in &directive.names {
            if name == "*" {
                if let Some(exports) = &target.exports {
                    names.extend(exports.iter().map(|s| (s.clone(), s.clone())));
                } else {
                    names.extend(
                        target
                            .classes
                            .keys()
                            .chain(target.definitions.keys())
                            .chain(target.functions.keys())
                            .map(|s| (CompactString::from(s.as_str()), CompactString::from(s.as_str()))),
                    );
                }
            } else {
                names.push((name.clone(), alias.clone()));
            }
        }

        // Look up each name in the target, first category wins.
        let mut pending: Vec<(&'static str, CompactString, SymbolRecord)> = Vec::new();
        for (name, alias) in names {
            let found = CATEGORIES.iter().find_map(|category| {
                let table = match *category {
                    "classes" => &target.classes,
                    "definitions" => &target.definitions,
                    _ => &target.functions,
                };
                table.get(name.as_str()).map(|record| (*category, record))
            });
            let Some((category, record)) = found else {
                // Unknown symbols are treated as external.
                continue;
            };
            let mut copied = record.clone();
            copied.origin = Some(target.path.clone());
            pending.push((category, alias, copied));
        }

        let Some(source) = tree.units.get_mut(key) else {
            continue;
        };
        for (category, alias, record) in pending {
            let table = match category {
                "classes" => &mut source.classes,
                "definitions" => &mut source.definitions,
                _ => &mut source.functions,
            };
            // First resolution wins: an origin, once set, is never
            // overwritten by a later pass over the same alias.
            if table
                .get(alias.as_str())
                .is_some_and(|existing| existing.origin.is_some())
            {
                continue;
            }
            table.insert(alias.to_string(), record);
        }
    }

    for child in tree.children(key) {
        resolve_unit(tree, &child);
    }
}
