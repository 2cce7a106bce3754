//! Library-level end-to-end tests of the documentation engine.

// Test-specific lint suppressions
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use docguard::resolver::resolve_package;
use docguard::score::DocRegistry;
use docguard::test_utils::write_file;
use docguard::walker::walk_package;
use tempfile::tempdir;

#[test]
fn undocumented_function_scores_zero() {
    // A package with one module containing one undocumented function with
    // one parameter: one token for the description, one for the parameter,
    // both in error.
    let dir = tempdir().unwrap();
    write_file(dir.path(), "pkg/__init__.py", "");
    write_file(dir.path(), "pkg/mod.py", "def f(x):\n    return x\n");

    let mut registry = DocRegistry::default();
    let mut tree = walk_package(dir.path(), "pkg", &mut registry, None).unwrap();
    resolve_package(&mut tree);

    assert_eq!(registry.total_tokens(), 2);
    assert_eq!(registry.total_errors(), 2);
    assert_eq!(registry.score(), 0);

    let messages = &registry.stats["pkg/mod.py"].units["f"].messages;
    assert!(messages.contains("Missing description"));
    assert!(messages.contains("Undocumented parameter `x`"));
}

#[test]
fn reexport_attributes_errors_to_the_defining_unit() {
    // The root re-exports `foo` from `.bar`; `foo` is half documented, so
    // its errors must land on bar's path while the root sees the record
    // with bar's path as origin.
    let dir = tempdir().unwrap();
    write_file(dir.path(), "pkg/__init__.py", "from .bar import foo\n");
    write_file(
        dir.path(),
        "pkg/bar.py",
        "def foo(x, y):\n    \"\"\"Doc.\n\n    Parameters\n    ----------\n    x : int\n        The value\n    \"\"\"\n",
    );

    let mut registry = DocRegistry::default();
    let mut tree = walk_package(dir.path(), "pkg", &mut registry, None).unwrap();
    resolve_package(&mut tree);

    let root = &tree.units[""];
    let foo = root.functions.get("foo").expect("foo present in the root");
    assert_eq!(foo.origin.as_deref(), Some("pkg/bar.py"));

    // Errors keyed by bar's path, none by the root's.
    assert!(registry.stats.contains_key("pkg/bar.py"));
    assert!(!registry.stats.contains_key("pkg/__init__.py"));
    let messages = &registry.stats["pkg/bar.py"].units["foo"].messages;
    assert!(messages.contains("Undocumented parameter `y`"));
}

#[test]
fn fully_documented_package_scores_one_hundred() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "pkg/__init__.py", "\"\"\"Top.\"\"\"\n");
    write_file(
        dir.path(),
        "pkg/api.py",
        "\
\"\"\"API module.\"\"\"

LIMIT = 10
\"\"\"The default limit\"\"\"


class Client:
    \"\"\"A documented client.\"\"\"

    retries = 3
    \"\"\"Retry budget\"\"\"

    def fetch(self, url):
        \"\"\"Fetch a URL.

        Parameters
        ----------
        url : str
            The target
        \"\"\"


def ping():
    \"\"\"Ping the service.\"\"\"
",
    );

    let mut registry = DocRegistry::default();
    let mut tree = walk_package(dir.path(), "pkg", &mut registry, None).unwrap();
    resolve_package(&mut tree);

    // definition + class + attribute + method + method param + function
    assert_eq!(registry.total_tokens(), 6);
    assert_eq!(registry.total_errors(), 0);
    assert_eq!(registry.score(), 100);
}

#[test]
fn empty_package_scores_one_hundred() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "pkg/__init__.py", "");

    let mut registry = DocRegistry::default();
    let mut tree = walk_package(dir.path(), "pkg", &mut registry, None).unwrap();
    resolve_package(&mut tree);

    assert_eq!(registry.total_tokens(), 0);
    assert_eq!(registry.score(), 100);
}

#[test]
fn wildcard_through_export_list_is_stable_across_passes() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "pkg/__init__.py", "from .api import *\n");
    write_file(
        dir.path(),
        "pkg/api.py",
        "__all__ = [\"beta\", \"alpha\", \"Gamma\"]\n\n\
         class Gamma:\n    \"\"\"G.\"\"\"\n\n\
         def alpha():\n    \"\"\"A.\"\"\"\n\n\
         def beta():\n    \"\"\"B.\"\"\"\n",
    );

    let mut registry = DocRegistry::default();
    let mut tree = walk_package(dir.path(), "pkg", &mut registry, None).unwrap();

    resolve_package(&mut tree);
    let functions_first: Vec<String> = tree.units[""].functions.keys().cloned().collect();
    let classes_first: Vec<String> = tree.units[""].classes.keys().cloned().collect();

    resolve_package(&mut tree);
    let functions_second: Vec<String> = tree.units[""].functions.keys().cloned().collect();
    let classes_second: Vec<String> = tree.units[""].classes.keys().cloned().collect();

    assert_eq!(functions_first, functions_second);
    assert_eq!(classes_first, classes_second);
    // Export-list order governs within each category.
    assert_eq!(functions_first, ["beta".to_owned(), "alpha".to_owned()]);
    assert_eq!(classes_first, ["Gamma".to_owned()]);
}

#[test]
fn nested_reexport_resolves_one_hop() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "pkg/__init__.py", "from .sub import helper\n");
    write_file(dir.path(), "pkg/sub/__init__.py", "from .impl import helper\n");
    write_file(
        dir.path(),
        "pkg/sub/impl.py",
        "def helper():\n    \"\"\"Doc.\"\"\"\n",
    );

    let mut registry = DocRegistry::default();
    let mut tree = walk_package(dir.path(), "pkg", &mut registry, None).unwrap();
    resolve_package(&mut tree);

    // The nested package resolves its own import one hop deep.
    assert_eq!(
        tree.units["sub"].functions["helper"].origin.as_deref(),
        Some("pkg/sub/impl.py")
    );
    // The root resolves before `sub` in the top-down pass, so the
    // re-export of a re-export is not visible to it. Single-pass
    // limitation, kept on purpose.
    assert!(tree.units[""].functions.get("helper").is_none());
}
