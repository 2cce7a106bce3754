//! The `config` command: read or modify package identity fields.

use crate::cli::ConfigArgs;
use crate::constants::{alias_re, package_name_re, STATS_FILENAME};
use crate::error::DocguardError;
use crate::exec;
use crate::stats::PackageStatistics;
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

/// Validates one identity field assignment.
fn check_meta(name: &str, value: &str) -> Result<()> {
    let valid = match name {
        "name" => package_name_re().is_match(value),
        "git-name" | "dist-name" => alias_re().is_match(value),
        "description" => true,
        _ => {
            return Err(DocguardError::InvalidMeta {
                field: "parameter".to_owned(),
                value: name.to_owned(),
            }
            .into())
        }
    };
    if valid {
        Ok(())
    } else {
        Err(DocguardError::InvalidMeta {
            field: name.to_owned(),
            value: value.to_owned(),
        }
        .into())
    }
}

/// Executes the config command.
pub fn run_config<W: Write>(args: &ConfigArgs, writer: &mut W) -> Result<i32> {
    let package_dir: PathBuf = exec::get_top_directory(None).ok_or_else(|| {
        anyhow::Error::new(DocguardError::NotAPackage(
            "not inside a git repository".to_owned(),
        ))
    })?;
    let mut stats = PackageStatistics::load(&package_dir)?;

    let Some(name) = &args.name else {
        // Print every parameter.
        if !args.quiet {
            writeln!(writer, "{}", serde_json::to_string_pretty(&stats.package)?)?;
        }
        return Ok(0);
    };

    let Some(value) = &args.value else {
        // Print the parameter value.
        let value = match name.as_str() {
            "name" => &stats.package.name,
            "git-name" => &stats.package.git_name,
            "dist-name" => &stats.package.dist_name,
            "description" => &stats.package.description,
            _ => {
                return Err(DocguardError::InvalidMeta {
                    field: "parameter".to_owned(),
                    value: name.clone(),
                }
                .into())
            }
        };
        if !args.quiet {
            writeln!(writer, "{value}")?;
        }
        return Ok(0);
    };

    // Update the parameter value.
    check_meta(name, value)?;
    let target = match name.as_str() {
        "name" => &mut stats.package.name,
        "git-name" => &mut stats.package.git_name,
        "dist-name" => &mut stats.package.dist_name,
        _ => &mut stats.package.description,
    };
    if target == value {
        return Ok(0);
    }
    target.clone_from(value);

    stats.save(&package_dir)?;
    let _ = exec::git(Some(&package_dir), &["add", STATS_FILENAME]);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_validation_rules() {
        assert!(check_meta("name", "valid_name").is_ok());
        assert!(check_meta("name", "Invalid Name").is_err());
        assert!(check_meta("git-name", "valid-name").is_ok());
        assert!(check_meta("dist-name", "under_score").is_err());
        assert!(check_meta("description", "Anything goes").is_ok());
        assert!(check_meta("unknown", "x").is_err());
    }
}
