use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::{CONFIG_FILENAME, PYPROJECT_FILENAME};
use crate::style::DEFAULT_STYLE_COMMAND;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section for docguard.
    pub docguard: DocguardConfig,
    /// The path to the configuration file this was loaded from.
    /// `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for docguard.
pub struct DocguardConfig {
    /// GitHub organization badge links point at.
    pub organization: Option<String>,
    /// Prefix applied to distribution aliases of managed packages.
    pub dist_prefix: Option<String>,
    /// Style checker executable.
    pub style_command: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
struct PyProject {
    tool: ToolConfig,
}

#[derive(Debug, Deserialize, Clone)]
struct ToolConfig {
    docguard: DocguardConfig,
}

impl Config {
    /// Loads configuration from default locations (`.docguard.toml` or
    /// `pyproject.toml` in the current directory or above).
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            // 1. Try CONFIG_FILENAME
            let docguard_toml = current.join(CONFIG_FILENAME);
            if docguard_toml.exists() {
                if let Ok(content) = fs::read_to_string(&docguard_toml) {
                    if let Ok(mut config) = toml::from_str::<Config>(&content) {
                        config.config_file_path = Some(docguard_toml);
                        return config;
                    }
                }
            }

            // 2. Try PYPROJECT_FILENAME
            let pyproject_toml = current.join(PYPROJECT_FILENAME);
            if pyproject_toml.exists() {
                if let Ok(content) = fs::read_to_string(&pyproject_toml) {
                    if let Ok(pyproject) = toml::from_str::<PyProject>(&content) {
                        return Config {
                            docguard: pyproject.tool.docguard,
                            config_file_path: Some(pyproject_toml),
                        };
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }

    /// The GitHub organization badge links point at.
    #[must_use]
    pub fn organization(&self) -> String {
        self.docguard
            .organization
            .clone()
            .unwrap_or_else(|| "docguard-dev".to_owned())
    }

    /// The distribution alias prefix for managed packages.
    #[must_use]
    pub fn dist_prefix(&self) -> String {
        self.docguard
            .dist_prefix
            .clone()
            .unwrap_or_else(|| "dg-".to_owned())
    }

    /// The style checker executable to invoke.
    #[must_use]
    pub fn style_command(&self) -> String {
        self.docguard
            .style_command
            .clone()
            .unwrap_or_else(|| DEFAULT_STYLE_COMMAND.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_path_no_config() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_path(dir.path());
        assert!(config.docguard.organization.is_none());
        assert_eq!(config.dist_prefix(), "dg-");
        assert_eq!(config.style_command(), "pycodestyle");
    }

    #[test]
    fn test_load_from_path_docguard_toml() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join(".docguard.toml")).unwrap();
        writeln!(
            file,
            r#"[docguard]
organization = "acme"
dist_prefix = "acme-"
"#
        )
        .unwrap();

        let config = Config::load_from_path(dir.path());
        assert_eq!(config.organization(), "acme");
        assert_eq!(config.dist_prefix(), "acme-");
    }

    #[test]
    fn test_load_from_path_pyproject_toml() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join("pyproject.toml")).unwrap();
        writeln!(
            file,
            r#"[tool.docguard]
style_command = "flake8"
"#
        )
        .unwrap();

        let config = Config::load_from_path(dir.path());
        assert_eq!(config.style_command(), "flake8");
    }

    #[test]
    fn test_load_from_path_traverses_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("src").join("lib");
        std::fs::create_dir_all(&nested).unwrap();

        let mut file = std::fs::File::create(dir.path().join(".docguard.toml")).unwrap();
        writeln!(
            file,
            r#"[docguard]
organization = "nested-org"
"#
        )
        .unwrap();

        let config = Config::load_from_path(&nested);
        assert_eq!(config.organization(), "nested-org");
    }
}
