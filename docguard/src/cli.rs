use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.docguard.toml):
  Create this file (or a [tool.docguard] table in pyproject.toml) in your
  project root to set defaults.

  [docguard]
  organization = \"acme\"      # GitHub organization badge links point at
  dist_prefix = \"dg-\"        # Prefix applied to distribution aliases
  style_command = \"pycodestyle\"
";

/// Command line interface configuration using `clap`.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "docguard - package scaffolding and local CI gating commits on style and documentation",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    #[command(subcommand)]
    /// The subcommand to execute.
    pub command: Commands,
}

/// The subcommands of the tool.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialise a bare package: skeleton files, git hooks and the
    /// initial statistics record.
    Init(InitArgs),

    /// Update a package: refresh static files, reinstall hooks and
    /// migrate legacy statistics.
    Update(UpdateArgs),

    /// Manage the configurable package identity fields.
    Config(ConfigArgs),

    /// Compute and display the package statistics without writing them.
    Stats(StatsArgs),

    /// Git hook: recompute statistics, regenerate the README and stage
    /// both for the pending commit.
    PreCommit,

    /// Git hook: insert the framework banner into the commit message.
    PrepareCommitMsg(PrepareCommitMsgArgs),
}

/// Arguments for `init`.
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// The path to the package.
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// The package name; prompted for when omitted.
    #[arg(long)]
    pub name: Option<String>,

    /// A brief package description.
    #[arg(long)]
    pub description: Option<String>,

    /// Use default options instead of prompting.
    #[arg(short = 'd', long = "default")]
    pub use_default: bool,

    /// Suppress any output.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for `update`.
#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// The path to the package; defaults to the enclosing git toplevel.
    pub path: Option<PathBuf>,

    /// Suppress any output.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for `config`.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// The parameter name; all parameters are printed when omitted.
    pub name: Option<String>,

    /// The value to set; the current value is printed when omitted.
    pub value: Option<String>,

    /// Suppress any output.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for `stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {
    /// The path to the package; defaults to the enclosing git toplevel.
    pub path: Option<PathBuf>,

    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `prepare-commit-msg`.
#[derive(Args, Debug)]
pub struct PrepareCommitMsgArgs {
    /// The commit message file provided by git.
    pub file: PathBuf,
}
