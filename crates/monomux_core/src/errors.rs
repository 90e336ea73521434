//! Error types for the core library.
//!
//! Per-file and per-group failures are recoverable: the offending item is
//! excluded and reported while the batch continues. Batch-level failures
//! (`NoUsableFiles`, registry lookup misses) are surfaced to the caller.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Core error covering registry lookups, probing, grouping, and
/// descriptor building.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Layout name is not in the fixed registry set.
    #[error("Unknown channel layout '{0}'")]
    UnknownLayout(String),

    /// No layout is inferable from this channel count.
    /// Inference is defined only for 1, 2, 6, 7 and 8 channels.
    #[error("No layout is defined for {0} channel(s)")]
    UnsupportedChannelCount(usize),

    /// Both probe strategies failed, or the file reported an impossible
    /// channel count. The file is quarantined, never retried.
    #[error("File '{path}' could not be analyzed: {message}")]
    CorruptOrUnsupported { path: PathBuf, message: String },

    /// A planning pass found nothing usable in the directory.
    #[error("No appropriate sound files found in '{0}'")]
    NoUsableFiles(PathBuf),

    /// A multi-mono group's member count maps to no supported layout.
    #[error("Group '{base}' has {count} member(s), which maps to no supported layout")]
    UnsupportedGroupSize { base: String, count: usize },

    /// Split/conform requires more than one channel.
    #[error("File '{0}' is not a multitrack")]
    NotMultitrack(PathBuf),

    /// Conform input is already in the target container.
    #[error("File '{path}' is already in target format '{target}'")]
    AlreadyTargetFormat { path: PathBuf, target: String },

    /// Two group members resolved to the same channel role while the
    /// duplicate policy is Reject.
    #[error("Group '{base}' maps both '{kept}' and '{duplicate}' to role '{role}'")]
    DuplicateRole {
        base: String,
        role: String,
        kept: String,
        duplicate: String,
    },

    /// An external tool failed.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// Failed to parse external tool output.
    #[error("Failed to parse {what}: {message}")]
    Parse { what: String, message: String },

    /// File I/O error with operation context.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl CoreError {
    /// Create a corrupt-or-unsupported error.
    pub fn corrupt(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::CorruptOrUnsupported {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a command failed error.
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(what: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            what: what.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error with context.
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create an already-in-target-format error.
    pub fn already_target(path: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self::AlreadyTargetFormat {
            path: path.into(),
            target: target.into(),
        }
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_context() {
        let err = CoreError::UnknownLayout("9.1".to_string());
        assert!(err.to_string().contains("9.1"));

        let err = CoreError::UnsupportedGroupSize {
            base: "track".to_string(),
            count: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("track"));
        assert!(msg.contains('5'));
    }

    #[test]
    fn command_failed_carries_exit_code() {
        let err = CoreError::command_failed("ffprobe", 1, "no such file");
        let msg = err.to_string();
        assert!(msg.contains("ffprobe"));
        assert!(msg.contains("exit code 1"));
    }
}
