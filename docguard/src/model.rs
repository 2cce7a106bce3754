//! Documentation data model.
//!
//! One [`SourceUnit`] per analyzable file; units live in a flat
//! [`PackageTree`] arena keyed by dotted module path, so the resolver can
//! address nodes by path instead of chasing nested references.

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Documentation of one formal parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDoc {
    /// The declared type text, possibly empty.
    #[serde(rename = "type")]
    pub type_text: String,
    /// The one-line description.
    pub description: String,
}

/// One entry of a Returns or Yields section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnDoc {
    /// The declared type text.
    #[serde(rename = "type")]
    pub type_text: String,
    /// The one-line description.
    pub description: String,
    /// The value name; empty when the item carries only a type.
    pub name: String,
}

/// One entry of a Raises section. Recorded without validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaiseDoc {
    /// The exception name.
    pub exception: String,
    /// The one-line description.
    pub description: String,
}

/// Structured documentation of a callable symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionDoc {
    /// The stringified parameter signature, as written in the source.
    pub signature: String,
    /// Parameter table keyed by name, in declaration order. A `None`
    /// value signals an undocumented parameter. Every formal parameter,
    /// excluding a method's leading receiver, appears as a key.
    pub params: IndexMap<String, Option<ParamDoc>>,
    /// Returns/Yields entries, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<ReturnDoc>,
    /// Raises entries, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raises: Vec<RaiseDoc>,
}

/// A class, function or module-level assignment gathered from a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// The line number where this symbol is defined.
    pub line: usize,
    /// The cleaned docstring, or the plain description for functions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Structured doc record; present only for callable symbols.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub func: Option<FunctionDoc>,
    /// Nested attribute records; only populated for classes.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attrs: IndexMap<String, SymbolRecord>,
    /// Nested method records; only populated for classes.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub methods: IndexMap<String, SymbolRecord>,
    /// File path of the unit this record was re-exported from. Set only by
    /// import resolution; once set it is never overwritten.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

/// One unresolved relative-import directive of a package root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDirective {
    /// Relative nesting level (1 = current package, 2 = parent, ...).
    pub level: u32,
    /// Dotted source module name; empty for `from . import x`.
    pub module: String,
    /// `(original name, local alias)` pairs, in declaration order.
    /// A literal `*` is preserved until resolution.
    pub names: Vec<(CompactString, CompactString)>,
}

/// One parseable file of the package.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceUnit {
    /// File path relative to the package directory, slash-separated.
    pub path: String,
    /// The cleaned module-level docstring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Public classes, keyed by name in declaration order.
    pub classes: IndexMap<String, SymbolRecord>,
    /// Public module-level assignments, keyed by name.
    pub definitions: IndexMap<String, SymbolRecord>,
    /// Public functions, keyed by name.
    pub functions: IndexMap<String, SymbolRecord>,
    /// Explicit re-export list (`__all__`), captured verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exports: Option<Vec<CompactString>>,
    /// Unresolved relative imports; only package roots record these.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<ImportDirective>,
}

impl SourceUnit {
    /// Appends import names for `(level, module)`, merging with an earlier
    /// directive for the same target so declaration order is preserved.
    pub fn push_imports(
        &mut self,
        level: u32,
        module: &str,
        names: impl IntoIterator<Item = (CompactString, CompactString)>,
    ) {
        if let Some(directive) = self
            .imports
            .iter_mut()
            .find(|d| d.level == level && d.module == module)
        {
            directive.names.extend(names);
        } else {
            self.imports.push(ImportDirective {
                level,
                module: module.to_owned(),
                names: names.into_iter().collect(),
            });
        }
    }
}

/// The package arena: a flat mapping from dotted module path (relative to
/// the package root, `""` for the root itself) to [`SourceUnit`].
///
/// Parent/child relationships are path-prefix relationships; nothing holds
/// references into the map, so the resolver can mutate records in place
/// without aliasing hazards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageTree {
    /// The dotted name of the analyzed package.
    pub root: String,
    /// All units, keyed by dotted path relative to the root.
    pub units: BTreeMap<String, SourceUnit>,
}

impl PackageTree {
    /// Creates an empty tree for the given package name.
    #[must_use]
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_owned(),
            units: BTreeMap::new(),
        }
    }

    /// Direct children of `path`, in sorted order.
    #[must_use]
    pub fn children(&self, path: &str) -> Vec<String> {
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}.")
        };
        self.units
            .keys()
            .filter(|key| {
                !key.is_empty()
                    && key.starts_with(&prefix)
                    && !key[prefix.len()..].contains('.')
                    && key.as_str() != path
            })
            .cloned()
            .collect()
    }
}
