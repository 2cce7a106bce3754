//! Commands module - CLI subcommand implementations.

mod config;
mod hook;
mod init;
mod stats;
mod update;

// Re-export all public items
pub use config::run_config;
pub use hook::{add_banner, run_pre_commit, run_prepare_commit_msg};
pub use init::run_init;
pub use stats::run_stats;
pub use update::run_update;
