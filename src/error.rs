//! Error types for Wheelhouse
//!
//! Failures split into two layers: `DomainError` is the closed set of
//! expected packaging failures that render user-facing diagnostics, and
//! `WheelhouseError` wraps it together with infrastructure faults (I/O,
//! subprocess, bad pinfile). All modules use `WheelhouseResult<T>` as
//! their return type.

use crate::diagnostics::NoCandidateReport;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Wheelhouse operations
pub type WheelhouseResult<T> = Result<T, WheelhouseError>;

/// Expected packaging failures with self-rendering diagnostics.
///
/// This set is closed: anything not listed here is an infrastructure
/// fault and must not be funneled into a domain variant. The command
/// boundary renders these and exits with status 1.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Dependency resolution of {requirement} failed:\n{reason}\n\n{}", .log_lines.join("\n"))]
    ResolutionFailed {
        requirement: String,
        reason: String,
        log_lines: Vec<String>,
    },

    #[error("{0}")]
    NoCandidateFound(NoCandidateReport),

    #[error("{message} (constraint was: {constraint})")]
    UnsupportedConstraint { message: String, constraint: String },

    #[error("Incompatible requirements found: {first} and {second}")]
    IncompatibleRequirements { first: String, second: String },

    #[error("{0}")]
    FileOutdated(String),

    #[error("Wheel for {name} {version} is missing")]
    WheelMissing { name: String, version: String },
}

impl DomainError {
    /// Shorthand for the missing-wheel failure raised in check mode
    pub fn wheel_missing(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::WheelMissing {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// All errors that can occur in Wheelhouse
#[derive(Error, Debug)]
pub enum WheelhouseError {
    /// Expected packaging failure, rendered at the command boundary
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Pinfile and configuration errors
    #[error("Invalid pinfile at {path}: {reason}")]
    PinfileInvalid { path: PathBuf, reason: String },

    #[error("Pinfile not found: {0}")]
    PinfileNotFound(PathBuf),

    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Build tool exited with status {code}: {command}")]
    BuildToolFailed { command: String, code: i32 },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WheelhouseError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Whether this is an expected packaging failure (exit status 1)
    /// rather than an infrastructure fault (exit status 2)
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}
