//! Per-line source classification.
//!
//! Classifies every line of a source file as blank, comment, docstring or
//! code. This is a best-effort heuristic, not a full parser: triple-quote
//! markers appearing inside ordinary string literals are still treated as
//! docstring delimiters.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// The two triple-quote styles that can open a docstring.
const MARKERS: [&str; 2] = ["\"\"\"", "'''"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Per-category line counts for a file or a whole package.
pub struct LineCounts {
    /// Number of blank lines.
    pub blank: usize,
    /// Number of comment lines.
    pub comment: usize,
    /// Number of docstring lines.
    pub docstring: usize,
    /// Number of code lines.
    pub code: usize,
}

impl LineCounts {
    /// Adds another set of counts into this one.
    pub fn merge(&mut self, other: &LineCounts) {
        self.blank += other.blank;
        self.comment += other.comment;
        self.docstring += other.docstring;
        self.code += other.code;
    }

    /// Total number of classified lines.
    #[must_use]
    pub fn total(&self) -> usize {
        self.blank + self.comment + self.docstring + self.code
    }
}

/// Finds the docstring marker occurring at the lowest index of `line`,
/// if any. When both styles appear, the first one encountered governs.
fn find_marker(line: &str) -> Option<(usize, &'static str)> {
    MARKERS
        .iter()
        .filter_map(|marker| line.find(marker).map(|index| (index, *marker)))
        .min_by_key(|(index, _)| *index)
}

/// Classifies each line of `source` exactly once and returns the counts.
///
/// A single "currently inside a docstring" flag carries which marker style
/// opened it; every line inside counts as docstring until the closing
/// marker is seen on a line.
#[must_use]
pub fn classify(source: &str) -> LineCounts {
    let mut counts = LineCounts::default();
    let mut open_marker: Option<&'static str> = None;

    for line in source.lines() {
        match open_marker {
            None => {
                if line.is_empty() {
                    counts.blank += 1;
                } else if line.starts_with('#') {
                    counts.comment += 1;
                } else if let Some((index, marker)) = find_marker(line) {
                    counts.docstring += 1;
                    // A closing marker on the same line makes this a
                    // one-line docstring.
                    if !line[index + marker.len()..].contains(marker) {
                        open_marker = Some(marker);
                    }
                } else {
                    counts.code += 1;
                }
            }
            Some(marker) => {
                counts.docstring += 1;
                if line.contains(marker) {
                    open_marker = None;
                }
            }
        }
    }

    counts
}

/// Counts lines over every Python file under `path`, recursively.
///
/// Uses gitignore-aware walking so generated trees (virtualenvs, build
/// output) do not pollute the statistics.
#[must_use]
pub fn count_lines(path: &Path) -> LineCounts {
    let mut counts = LineCounts::default();

    if path.is_file() {
        if let Ok(source) = std::fs::read_to_string(path) {
            counts.merge(&classify(&source));
        }
        return counts;
    }

    let walker = ignore::WalkBuilder::new(path)
        .hidden(false)
        .git_ignore(true)
        .build();
    for entry in walker.flatten() {
        let entry_path = entry.path();
        if entry_path.extension().is_some_and(|ext| ext == "py") {
            if let Ok(source) = std::fs::read_to_string(entry_path) {
                counts.merge(&classify(&source));
            }
        }
    }

    counts
}
