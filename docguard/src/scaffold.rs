//! File templates written by `init` and `update`.

use std::fs;
use std::io::Write;
use std::path::Path;

/// Default .gitignore for scaffolded packages.
const GITIGNORE: &str = "\
__pycache__/
*.py[cod]
*.egg-info/
build/
dist/
.coverage
version.py
";

/// Default README body, written to `docs/README.md`.
fn readme_body(
    title: &str,
    description: &str,
    git_name: &str,
    dist_name: &str,
    organization: &str,
) -> String {
    format!(
        "\
# {title}
_{description}_

## Description

<!-- Add here a description of the package -->


## Installation

The latest stable version of this package can be installed with pip, e.g. as:
```bash
pip3 install --user {dist_name}
```

Alternatively one can also install the latest development commit directly
from the repository, as:
```bash
pip3 install --user git+https://github.com/{organization}/{git_name}.git@master
```
"
    )
}

/// Default `__init__.py` for the package source.
fn init_py(description: &str) -> String {
    format!(
        "\
# -*- coding: utf-8 -*-
\"\"\"
{description}
\"\"\"

# This is generated in order to track the package version. DO NOT DELETE.
try:
    from .version import __version__, __git__
except ImportError:
    __version__ = None
    __git__ = {{}}

# Initialise the package below
"
    )
}

/// Default config file for `coverage`.
fn coveragerc(package_name: &str) -> String {
    format!(
        "\
[run]
branch = True
include = */{package_name}/*.py

[report]
exclude_lines =
    pragma: no cover
    raise NotImplementedError
    except ImportError:
    if __name__ == .__main__.:
ignore_errors = True
omit =
    tests/*
"
    )
}

/// Default `__init__.py` for the tests package.
fn tests_init(package_name: &str) -> String {
    format!(
        "\
# -*- coding: utf-8 -*-
\"\"\"
Unit tests for the {package_name} package
\"\"\"
"
    )
}

/// Writes `content` to `path` unless the file already exists.
fn write_if_absent(path: &Path, content: &str) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(true)
}

/// Writes the default `docs/README.md` unless present.
pub fn write_readme(
    package_dir: &Path,
    title: &str,
    description: &str,
    git_name: &str,
    dist_name: &str,
    organization: &str,
) -> std::io::Result<bool> {
    write_if_absent(
        &package_dir.join("docs").join("README.md"),
        &readme_body(title, description, git_name, dist_name, organization),
    )
}

/// Writes the default package `__init__.py` unless present.
pub fn write_init_py(
    package_dir: &Path,
    package_name: &str,
    description: &str,
) -> std::io::Result<bool> {
    write_if_absent(
        &package_dir.join(package_name).join("__init__.py"),
        &init_py(description),
    )
}

/// Writes the default coverage configuration unless present.
pub fn write_coveragerc(package_dir: &Path, package_name: &str) -> std::io::Result<bool> {
    write_if_absent(
        &package_dir.join(".coveragerc"),
        &coveragerc(package_name),
    )
}

/// Writes the default `.gitignore` unless present.
pub fn write_gitignore(package_dir: &Path) -> std::io::Result<bool> {
    write_if_absent(&package_dir.join(".gitignore"), GITIGNORE)
}

/// Writes the tests skeleton unless present.
pub fn write_tests_init(package_dir: &Path, package_name: &str) -> std::io::Result<bool> {
    write_if_absent(
        &package_dir.join("tests").join("__init__.py"),
        &tests_init(package_name),
    )
}

/// Installs a git hook shim invoking the installed binary.
///
/// The shim is always rewritten so hook behavior follows the installed
/// tool version.
pub fn install_hook(git_dir: &Path, hook_name: &str) -> std::io::Result<()> {
    let hooks_dir = git_dir.join("hooks");
    fs::create_dir_all(&hooks_dir)?;
    let path = hooks_dir.join(hook_name);

    let mut file = fs::File::create(&path)?;
    writeln!(file, "#!/bin/sh")?;
    writeln!(file, "exec docguard {hook_name} \"$@\"")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut permissions = fs::metadata(&path)?.permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(&path, permissions)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_are_written_once() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_gitignore(dir.path()).unwrap());
        assert!(!write_gitignore(dir.path()).unwrap());

        assert!(
            write_readme(dir.path(), "Demo Pkg", "A demo", "demo-pkg", "dg-demo-pkg", "acme")
                .unwrap()
        );
        let content =
            fs::read_to_string(dir.path().join("docs").join("README.md")).unwrap();
        assert!(content.starts_with("# Demo Pkg\n_A demo_"));
    }

    #[test]
    fn init_py_mentions_version_tracking() {
        let dir = tempfile::tempdir().unwrap();
        write_init_py(dir.path(), "demo", "A demo").unwrap();
        let content = fs::read_to_string(dir.path().join("demo").join("__init__.py")).unwrap();
        assert!(content.contains("from .version import __version__"));
        assert!(content.contains("A demo"));
    }

    #[test]
    fn hook_shim_is_executable() {
        let dir = tempfile::tempdir().unwrap();
        let git_dir = dir.path().join(".git");
        install_hook(&git_dir, "pre-commit").unwrap();

        let path = git_dir.join("hooks").join("pre-commit");
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("exec docguard pre-commit"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111);
        }
    }
}
