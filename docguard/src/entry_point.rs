//! Shared entry point for all binaries.
//!
//! Both `docguard-bin` and the `docguard` CLI wrapper funnel through
//! [`run_with_args`], so behavior and exit codes stay consistent. Fatal
//! conditions surface as a single-line diagnostic and a nonzero exit.

use crate::cli::{Cli, Commands};
use crate::commands;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::io::Write;

/// Parses `args` (without the program name) and runs the selected command,
/// writing user output to stdout. Returns the process exit code.
///
/// # Errors
///
/// Only I/O failures on the output stream itself surface as `Err`; command
/// failures are converted into a diagnostic plus exit code 1.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    let mut stdout = std::io::stdout();
    run_with_args_to(args, &mut stdout)
}

/// Like [`run_with_args`], writing user output to the supplied writer.
/// Primarily used by tests.
pub fn run_with_args_to<W: Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let argv = std::iter::once("docguard".to_owned()).chain(args);
    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(error) => {
            // Help and version land here too; clap picks the exit code.
            write!(writer, "{error}")?;
            return Ok(error.exit_code());
        }
    };

    let outcome = match &cli.command {
        Commands::Init(args) => commands::run_init(args, writer),
        Commands::Update(args) => commands::run_update(args, writer),
        Commands::Config(args) => commands::run_config(args, writer),
        Commands::Stats(args) => commands::run_stats(args, writer),
        Commands::PreCommit => commands::run_pre_commit(writer),
        Commands::PrepareCommitMsg(args) => commands::run_prepare_commit_msg(&args.file),
    };

    match outcome {
        Ok(code) => Ok(code),
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            Ok(1)
        }
    }
}
