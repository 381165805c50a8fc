//! The external system seam.
//!
//! Everything the runner does to the outside world goes through
//! [`ExternalSystem::invoke`]: one command in, one result out, synchronously.

use crate::error::{RigupError, Result};

use super::command::{execute, CommandResult};

/// An imperative resource-management interface.
pub trait ExternalSystem: Send + Sync {
    /// Run one command and wait for it to finish.
    ///
    /// A non-zero exit is a successful invocation with a failed result.
    fn invoke(&self, command: &str) -> Result<CommandResult>;
}

/// Runs commands through the platform shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellSystem;

impl ShellSystem {
    /// Create a shell-backed system.
    pub fn new() -> Self {
        Self
    }
}

impl ExternalSystem for ShellSystem {
    fn invoke(&self, command: &str) -> Result<CommandResult> {
        execute(command)
    }
}

/// Invoke a command and fail unless it exits successfully.
///
/// Returns the trimmed stdout. On failure the error carries whatever the
/// command printed.
pub fn run_checked(system: &dyn ExternalSystem, command: &str) -> Result<String> {
    tracing::debug!("Invoking: {}", command);
    let result = system.invoke(command)?;

    if result.success {
        tracing::debug!("Finished in {:?}: {}", result.duration, command);
        Ok(result.stdout.trim().to_string())
    } else {
        tracing::warn!(
            "Command exited with {:?}: {}",
            result.exit_code,
            command
        );
        Err(RigupError::CommandFailed {
            command: command.to_string(),
            code: result.exit_code,
            output: result.combined_output(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_system_runs_commands() {
        let system = ShellSystem::new();
        let result = system.invoke("echo provisioned").unwrap();
        assert!(result.success);
        assert!(result.stdout.contains("provisioned"));
    }

    #[test]
    fn run_checked_returns_trimmed_stdout() {
        let system = ShellSystem::new();
        let out = run_checked(&system, "echo 10.0.1.4").unwrap();
        assert_eq!(out, "10.0.1.4");
    }

    #[test]
    fn run_checked_fails_with_partial_output() {
        let system = ShellSystem::new();
        let err = run_checked(&system, "echo partial && exit 4").unwrap_err();
        match err {
            RigupError::CommandFailed {
                command,
                code,
                output,
            } => {
                assert_eq!(command, "echo partial && exit 4");
                assert_eq!(code, Some(4));
                assert!(output.contains("partial"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
