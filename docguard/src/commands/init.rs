//! The `init` command: scaffold a bare package.

use crate::cli::InitArgs;
use crate::config::Config;
use crate::constants::{package_name_re, DEFAULT_DESCRIPTION, STATS_FILENAME};
use crate::error::DocguardError;
use crate::exec;
use crate::output::print_ok;
use crate::readme::get_alts;
use crate::scaffold;
use crate::stats::{PackageMeta, PackageStatistics};
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Derives a default package name from the directory name.
fn default_name(package_dir: &Path) -> String {
    package_dir
        .file_name()
        .map(|n| n.to_string_lossy().replace('-', "_").to_lowercase())
        .unwrap_or_default()
}

/// Prompts on stdin, falling back to `fallback` on empty input.
fn prompt(message: &str, fallback: &str) -> String {
    print!("{message} [{fallback}]: ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return fallback.to_owned();
    }
    let trimmed = line.trim();
    if trimmed.is_empty() {
        fallback.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Executes the init command.
pub fn run_init<W: Write>(args: &InitArgs, writer: &mut W) -> Result<i32> {
    let package_dir = fs::canonicalize(&args.path).unwrap_or_else(|_| args.path.clone());
    if package_dir.join(STATS_FILENAME).exists() {
        anyhow::bail!("package already exists in {}", package_dir.display());
    }
    fs::create_dir_all(&package_dir).context("failed to create the package directory")?;

    let config = Config::load_from_path(&package_dir);

    // Package meta data: flags first, then prompts unless --default.
    let fallback = default_name(&package_dir);
    let package_name = match (&args.name, args.use_default || args.quiet) {
        (Some(name), _) => name.clone(),
        (None, true) => fallback,
        (None, false) => prompt("Please enter the package name", &fallback),
    };
    if !package_name_re().is_match(&package_name) {
        return Err(DocguardError::InvalidMeta {
            field: "package name".to_owned(),
            value: package_name,
        }
        .into());
    }

    let description = match (&args.description, args.use_default || args.quiet) {
        (Some(description), _) => description.clone(),
        (None, true) => DEFAULT_DESCRIPTION.to_owned(),
        (None, false) => prompt("Please enter a brief description", DEFAULT_DESCRIPTION),
    };

    let (git_name, dist_name) = get_alts(&package_name, &config.dist_prefix());
    let meta = PackageMeta {
        name: package_name.clone(),
        git_name: git_name.clone(),
        dist_name,
        description: description.clone(),
    };

    // Skeleton files; existing ones are left untouched.
    let title = {
        let spaced = package_name.replace(['_', '-'], " ");
        crate::utils::title_case(&spaced)
    };
    scaffold::write_readme(
        &package_dir,
        &title,
        &description,
        &git_name,
        &meta.dist_name,
        &config.organization(),
    )?;
    scaffold::write_gitignore(&package_dir)?;
    scaffold::write_coveragerc(&package_dir, &package_name)?;
    scaffold::write_init_py(&package_dir, &package_name, &description)?;
    scaffold::write_tests_init(&package_dir, &package_name)?;

    // Initialise git and install the hooks.
    let git_dir = package_dir.join(".git");
    let fresh_repository = !git_dir.exists();
    if fresh_repository {
        if let Err(error) = exec::git(Some(&package_dir), &["init", "-q", "."]) {
            if !args.quiet {
                writeln!(writer, "warning: {error}")?;
            }
        }
    }
    scaffold::install_hook(&git_dir, "pre-commit")?;
    scaffold::install_hook(&git_dir, "prepare-commit-msg")?;

    // Dump the initial stats.
    let stats = PackageStatistics::initial(meta, 0);
    stats.save(&package_dir)?;

    // Do the initial commit.
    if fresh_repository {
        let _ = exec::git(Some(&package_dir), &["add", "-A"]);
        let _ = exec::git(
            Some(&package_dir),
            &["commit", "-q", "-m", "'Initial commit'"],
        );
    }

    if !args.quiet {
        print_ok(
            writer,
            &format!("initialised package `{package_name}' in {}", package_dir.display()),
        )?;
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::InitArgs;

    fn quiet_args(path: &Path, name: &str) -> InitArgs {
        InitArgs {
            path: path.to_path_buf(),
            name: Some(name.to_owned()),
            description: Some("A demo".to_owned()),
            use_default: true,
            quiet: true,
        }
    }

    #[test]
    fn init_scaffolds_a_package() {
        let dir = tempfile::tempdir().unwrap();
        let mut buffer = Vec::new();
        let code = run_init(&quiet_args(dir.path(), "demo"), &mut buffer).unwrap();
        assert_eq!(code, 0);

        assert!(dir.path().join("docs/README.md").exists());
        assert!(dir.path().join("demo/__init__.py").exists());
        assert!(dir.path().join("tests/__init__.py").exists());
        assert!(dir.path().join(".coveragerc").exists());
        assert!(dir.path().join(STATS_FILENAME).exists());
        assert!(dir.path().join(".git/hooks/pre-commit").exists());
        assert!(dir.path().join(".git/hooks/prepare-commit-msg").exists());

        let stats = PackageStatistics::load(dir.path()).unwrap();
        assert_eq!(stats.package.name, "demo");
        assert_eq!(stats.package.dist_name, "dg-demo");
    }

    #[test]
    fn init_refuses_an_existing_package() {
        let dir = tempfile::tempdir().unwrap();
        let mut buffer = Vec::new();
        run_init(&quiet_args(dir.path(), "demo"), &mut buffer).unwrap();
        let result = run_init(&quiet_args(dir.path(), "demo"), &mut buffer);
        assert!(result.is_err());
    }

    #[test]
    fn init_rejects_invalid_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut buffer = Vec::new();
        let result = run_init(&quiet_args(dir.path(), "Not-Valid"), &mut buffer);
        assert!(result.is_err());
    }

    #[test]
    fn default_name_comes_from_the_directory() {
        assert_eq!(default_name(Path::new("/tmp/My-Package")), "my_package");
    }
}
