//! Error types for rigup operations.
//!
//! This module defines [`RigupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A step fails in exactly one way: an external call failed
//!   ([`RigupError::CommandFailed`]). There is no transient/permanent split.
//! - Configuration and plan problems are reported before anything runs.
//! - Use `anyhow::Error` (via `RigupError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rigup operations.
#[derive(Debug, Error)]
pub enum RigupError {
    /// Plan file not found at the given location.
    #[error("Plan not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a plan file.
    #[error("Failed to parse plan at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid plan structure, parameters or variable references.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// An external call returned a non-zero status or could not be started.
    ///
    /// `output` holds whatever the command printed before failing.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    /// The worker thread running a step panicked.
    #[error("Step '{step}' panicked while running")]
    WorkerPanicked { step: String },

    /// The report needed a fact that no step or query produced.
    #[error("Fact '{fact}' was never produced during the run")]
    MissingFact { fact: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RigupError {
    /// Output captured from the failing command, if any.
    pub fn command_output(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { output, .. } if !output.is_empty() => Some(output),
            _ => None,
        }
    }
}

/// Result type alias for rigup operations.
pub type Result<T> = std::result::Result<T, RigupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = RigupError::ConfigNotFound {
            path: PathBuf::from("/plans/lab.yml"),
        };
        assert!(err.to_string().contains("/plans/lab.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = RigupError::ConfigParseError {
            path: PathBuf::from("/plan.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/plan.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn config_validation_error_displays_message() {
        let err = RigupError::ConfigValidationError {
            message: "duplicate step name".into(),
        };
        assert!(err.to_string().contains("duplicate step name"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = RigupError::CommandFailed {
            command: "az group create".into(),
            code: Some(3),
            output: String::new(),
        };
        let msg = err.to_string();
        assert!(msg.contains("az group create"));
        assert!(msg.contains("3"));
    }

    #[test]
    fn command_output_returns_partial_output() {
        let err = RigupError::CommandFailed {
            command: "az vm create".into(),
            code: Some(1),
            output: "ERROR: quota exceeded".into(),
        };
        assert_eq!(err.command_output(), Some("ERROR: quota exceeded"));
    }

    #[test]
    fn command_output_is_none_when_empty() {
        let err = RigupError::CommandFailed {
            command: "false".into(),
            code: Some(1),
            output: String::new(),
        };
        assert_eq!(err.command_output(), None);

        let err = RigupError::MissingFact {
            fact: "gateway_ip".into(),
        };
        assert_eq!(err.command_output(), None);
    }

    #[test]
    fn worker_panicked_displays_step() {
        let err = RigupError::WorkerPanicked {
            step: "Create hub network".into(),
        };
        assert!(err.to_string().contains("Create hub network"));
    }

    #[test]
    fn missing_fact_displays_name() {
        let err = RigupError::MissingFact {
            fact: "appgw_public_ip".into(),
        };
        assert!(err.to_string().contains("appgw_public_ip"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: RigupError = io_err.into();
        assert!(matches!(err, RigupError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(RigupError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
