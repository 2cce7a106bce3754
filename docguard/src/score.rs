//! Documentation completeness accounting.
//!
//! Parsing and resolution feed two counters per source unit: tokens (one
//! per documented unit: a symbol, an attribute, a parameter, or a
//! doc-error with no unit of its own) and errors. The package score is the
//! percentage of tokens without errors.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Diagnostics attached to one documented unit, tagged by qualified name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDiagnostics {
    /// Line number of the unit.
    pub line: usize,
    /// Distinct error messages. Identical text for one tag counts once;
    /// two different problems rendering the same text therefore merge.
    pub messages: BTreeSet<String>,
}

/// Per-unit token and error counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocStats {
    /// Total documentation obligations considered.
    pub tokens: usize,
    /// Total obligations that failed.
    pub errors: usize,
    /// Diagnostics per documented unit, keyed by qualified symbol tag.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub units: BTreeMap<String, UnitDiagnostics>,
}

/// Accumulates documentation statistics for every unit of a package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRegistry {
    /// Statistics keyed by unit file path.
    pub stats: BTreeMap<String, DocStats>,
}

impl DocRegistry {
    /// Increments the token counter for `unit_path`.
    pub fn add_token(&mut self, unit_path: &str) {
        self.stats.entry(unit_path.to_owned()).or_default().tokens += 1;
    }

    /// Registers an error for the unit tagged `tag` in `unit_path`.
    ///
    /// Registering a duplicate message for the same tag is a no-op with
    /// respect to the error count.
    pub fn add_error(&mut self, unit_path: &str, tag: &str, line: usize, message: String) {
        let stats = self.stats.entry(unit_path.to_owned()).or_default();
        let unit = stats.units.entry(tag.to_owned()).or_default();
        if unit.line == 0 {
            unit.line = line;
        }
        if unit.messages.insert(message) {
            stats.errors += 1;
        }
    }

    /// Total tokens across all units.
    #[must_use]
    pub fn total_tokens(&self) -> usize {
        self.stats.values().map(|s| s.tokens).sum()
    }

    /// Total errors across all units.
    #[must_use]
    pub fn total_errors(&self) -> usize {
        self.stats.values().map(|s| s.errors).sum()
    }

    /// Package-wide completeness score in percent.
    ///
    /// `100 * (tokens - errors) / tokens`, rounding toward zero, clamped to
    /// `[0, 100]`. A package with zero tokens scores 100 by convention.
    #[must_use]
    pub fn score(&self) -> usize {
        let tokens = self.total_tokens();
        if tokens == 0 {
            return 100;
        }
        let errors = self.total_errors().min(tokens);
        (tokens - errors) * 100 / tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_scores_one_hundred() {
        assert_eq!(DocRegistry::default().score(), 100);
    }

    #[test]
    fn score_rounds_toward_zero() {
        let mut registry = DocRegistry::default();
        registry.add_token("m.py");
        registry.add_token("m.py");
        registry.add_token("m.py");
        registry.add_error("m.py", "f", 1, "Missing description".to_owned());
        // 2/3 documented -> 66%
        assert_eq!(registry.score(), 66);
    }

    #[test]
    fn duplicate_messages_count_once() {
        let mut registry = DocRegistry::default();
        registry.add_token("m.py");
        registry.add_error("m.py", "f", 3, "Missing description".to_owned());
        registry.add_error("m.py", "f", 3, "Missing description".to_owned());
        assert_eq!(registry.total_errors(), 1);
    }

    #[test]
    fn identical_text_for_one_tag_merges_distinct_problems() {
        // Known boundary of text-keyed deduplication: two structurally
        // different problems that render the same message merge into one.
        let mut registry = DocRegistry::default();
        registry.add_token("m.py");
        registry.add_token("m.py");
        registry.add_error("m.py", "f", 3, "Undocumented parameter `x`".to_owned());
        registry.add_error("m.py", "f", 9, "Undocumented parameter `x`".to_owned());
        assert_eq!(registry.total_errors(), 1);
        // Distinct tags keep distinct counts.
        registry.add_error("m.py", "g", 12, "Undocumented parameter `x`".to_owned());
        assert_eq!(registry.total_errors(), 2);
    }

    #[test]
    fn errors_never_push_score_below_zero() {
        let mut registry = DocRegistry::default();
        registry.add_token("m.py");
        registry.add_error("m.py", "f", 1, "a".to_owned());
        registry.add_error("m.py", "f", 1, "b".to_owned());
        assert_eq!(registry.score(), 0);
    }

    #[test]
    fn first_line_wins_for_a_tag() {
        let mut registry = DocRegistry::default();
        registry.add_error("m.py", "f", 7, "a".to_owned());
        registry.add_error("m.py", "f", 11, "b".to_owned());
        assert_eq!(registry.stats["m.py"].units["f"].line, 7);
    }
}
