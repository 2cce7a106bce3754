//! External style checker integration.
//!
//! The style checker is a black box: invoked over a path, it returns a
//! violation count and a categorized list. When it is not installed the
//! statistics degrade gracefully to "unavailable" instead of failing.

use crate::exec::system;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default style checker executable.
pub const DEFAULT_STYLE_COMMAND: &str = "pycodestyle";

/// One violation category reported by the style checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleCategory {
    /// Number of occurrences.
    pub count: usize,
    /// The violation code (e.g. `E231`).
    pub code: String,
    /// The human-readable message.
    pub message: String,
}

/// Style conformity report for a package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleReport {
    /// Total violation count; `None` when the checker is unavailable.
    pub count: Option<usize>,
    /// Categorized violations; `None` when the checker is unavailable.
    pub categories: Option<Vec<StyleCategory>>,
}

impl StyleReport {
    /// Whether the style checker produced a result.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.count.is_some()
    }
}

/// Parses the `--statistics` output of the style checker: one category per
/// line as `count code message...`.
fn parse_statistics(output: &str) -> Vec<StyleCategory> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let count = parts.next()?.parse().ok()?;
            let code = parts.next()?.to_owned();
            let message = parts.collect::<Vec<_>>().join(" ");
            Some(StyleCategory {
                count,
                code,
                message,
            })
        })
        .collect()
}

/// Checks the style conformity of the sources under `path`.
///
/// Exit status 0 or 1 with parseable output are both valid checker results
/// (the checker exits 1 when violations exist); anything else, including a
/// missing executable, reports as unavailable.
#[must_use]
pub fn check_style(command: &str, path: &Path) -> StyleReport {
    let invocation = format!("{command} --statistics -qq {}", path.display());
    let Ok(output) = system(&invocation, None) else {
        return StyleReport::default();
    };

    let clean_exit = matches!(output.status.code(), Some(0 | 1));
    if !clean_exit {
        return StyleReport::default();
    }

    let categories = parse_statistics(&output.stdout);
    let count = categories.iter().map(|c| c.count).sum();
    StyleReport {
        count: Some(count),
        categories: Some(categories),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_statistics_lines() {
        let output = "4       E231 missing whitespace after ','\n1       W291 trailing whitespace\n";
        let categories = parse_statistics(output);
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].count, 4);
        assert_eq!(categories[0].code, "E231");
        assert_eq!(categories[1].message, "trailing whitespace");
    }

    #[test]
    fn missing_checker_reports_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let report = check_style("docguard-no-such-linter", dir.path());
        assert!(!report.is_available());
        assert!(report.categories.is_none());
    }

    #[test]
    fn empty_output_is_zero_violations() {
        assert!(parse_statistics("").is_empty());
    }
}
