//! Executor error types.

use thiserror::Error;

/// Errors raised while running an external tool.
#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("command failed: {cmd} (exit code: {code:?})\n{output}")]
    CommandFailedWithOutput {
        cmd: String,
        code: Option<i32>,
        output: String,
    },

    #[error("command failed: {cmd} (exit code: {code:?})")]
    CommandFailed { cmd: String, code: Option<i32> },

    #[error("failed to run {cmd}: {source}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
