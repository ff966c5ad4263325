//! Errors reported by `gh` invocations

use std::process::ExitStatus;
use thiserror::Error;

/// Failure of a single `gh` invocation
///
/// Every variant means "the query did not succeed"; callers that fall back
/// to another strategy do not need to tell them apart, but the message is
/// kept for the log.
#[derive(Debug, Error)]
pub enum GhError {
    /// The program could not be started at all (not installed, not on PATH)
    #[error("failed to execute `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited with a non-success status
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The program succeeded but printed JSON we could not decode
    #[error("unexpected JSON from `{command}`: {source}")]
    Json {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    /// The answer decoded but lacks a field the caller needs
    #[error("`{command}` did not return `{field}`")]
    Malformed { command: String, field: &'static str },
}

pub type Result<T> = std::result::Result<T, GhError>;
