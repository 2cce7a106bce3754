use regex::Regex;
use std::sync::OnceLock;

/// File name of the persisted statistics record, kept at the package root.
pub const STATS_FILENAME: &str = ".pkg-stats.json";

/// Legacy statistics file name, migrated by `docguard update`.
pub const LEGACY_STATS_FILENAME: &str = ".stats.json";

/// Tool configuration file name.
pub const CONFIG_FILENAME: &str = ".docguard.toml";

/// Python project configuration file name.
pub const PYPROJECT_FILENAME: &str = "pyproject.toml";

/// Marker file identifying a directory as a Python package root.
pub const PACKAGE_MARKER: &str = "__init__.py";

/// Reserved module name holding autogenerated version info; never analyzed.
pub const VERSION_MODULE: &str = "version.py";

/// Prefix marking a symbol or module as private; such names are skipped.
pub const PRIVACY_PREFIX: char = '_';

/// Name of the explicit re-export list inside a module.
pub const EXPORT_LIST: &str = "__all__";

/// Default description written into freshly scaffolded packages.
pub const DEFAULT_DESCRIPTION: &str = "Add a brief description";

/// Regex validating a package name (lowercase, underscores).
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn package_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("Invalid package name regex"))
}

/// Regex validating a git or distribution alias (lowercase, dashes).
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn alias_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("Invalid alias regex"))
}

/// Regex matching a docstring section item header of the form `name : type`.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn item_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\*{0,2}\w+)\s*:\s*(.*)$").expect("Invalid item header regex")
    })
}

/// Regex matching a dashed section underline.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn underline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"^\s*-+\s*$").expect("Invalid underline regex"))
}
