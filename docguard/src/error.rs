//! Error taxonomy of the tool.
//!
//! Documentation deficiencies are NOT errors in this sense: they accumulate
//! in [`crate::score::DocRegistry`] and never abort an analysis. The variants
//! here are the fatal (or command-level) conditions.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for docguard operations.
#[derive(Debug, Error)]
pub enum DocguardError {
    /// A source file failed to parse. Fatal: the whole analysis aborts and
    /// no statistics are written.
    #[error("syntax error in {file}: {message}")]
    Parse {
        /// The file that failed to parse.
        file: PathBuf,
        /// The parser diagnostic.
        message: String,
    },

    /// The working directory does not belong to a managed package.
    #[error("not a docguard package ({0})")]
    NotAPackage(String),

    /// The statistics file was written by a newer tool than the one running.
    #[error("statistics were generated by docguard {required}, but {current} is installed; please update")]
    StaleTool {
        /// Version recorded in the statistics file.
        required: String,
        /// Version of the running tool.
        current: String,
    },

    /// A package identity field failed validation.
    #[error("invalid {field}: `{value}'")]
    InvalidMeta {
        /// Name of the offending field.
        field: String,
        /// The rejected value.
        value: String,
    },

    /// A git invocation failed.
    #[error("git: {0}")]
    Git(String),

    /// An underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed statistics or configuration data.
    #[error("invalid statistics file: {0}")]
    BadStats(String),
}

/// Convenience result type for docguard operations.
pub type Result<T> = std::result::Result<T, DocguardError>;

#[cfg(test)]
mod tests {
    use super::DocguardError;

    #[test]
    fn stale_tool_formats_versions() {
        let error = DocguardError::StaleTool {
            required: "1.2.0".to_owned(),
            current: "1.0.0".to_owned(),
        };
        let message = format!("{error}");
        assert!(message.contains("1.2.0"));
        assert!(message.contains("1.0.0"));
    }

    #[test]
    fn parse_error_names_file() {
        let error = DocguardError::Parse {
            file: "pkg/mod.py".into(),
            message: "unexpected indent".to_owned(),
        };
        assert!(format!("{error}").contains("pkg/mod.py"));
    }
}
