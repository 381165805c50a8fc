//! In-memory stand-in for an external system.
//!
//! `ScriptedSystem` answers commands from a script instead of running them.
//! It records every invocation so tests can assert on what was attempted and
//! in which order.
//!
//! # Example
//!
//! ```
//! use rigup::shell::{run_checked, ScriptedSystem};
//!
//! let system = ScriptedSystem::new()
//!     .respond("az network public-ip show", "20.1.2.3")
//!     .fail_on("az vm create", 1, "ERROR: quota exceeded");
//!
//! assert_eq!(run_checked(&system, "az network public-ip show -n pip").unwrap(), "20.1.2.3");
//! assert!(run_checked(&system, "az vm create -n vm1").is_err());
//! assert_eq!(system.invocations().len(), 2);
//! ```

use std::sync::Mutex;
use std::time::Duration;

use crate::error::Result;

use super::command::CommandResult;
use super::system::ExternalSystem;

#[derive(Debug, Clone)]
struct Failure {
    pattern: String,
    code: i32,
    output: String,
}

/// Scripted external system for tests and demos.
///
/// Commands matching a failure pattern (substring) fail; otherwise the first
/// response whose prefix matches supplies stdout; anything else succeeds
/// with empty output.
#[derive(Debug, Default)]
pub struct ScriptedSystem {
    responses: Vec<(String, String)>,
    failures: Vec<Failure>,
    delay: Duration,
    log: Mutex<Vec<String>>,
}

impl ScriptedSystem {
    /// Create a system where every command succeeds silently.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands starting with `prefix` with `stdout`.
    pub fn respond(mut self, prefix: &str, stdout: &str) -> Self {
        self.responses
            .push((prefix.to_string(), stdout.to_string()));
        self
    }

    /// Fail commands containing `pattern` with the given exit code and output.
    pub fn fail_on(mut self, pattern: &str, code: i32, output: &str) -> Self {
        self.failures.push(Failure {
            pattern: pattern.to_string(),
            code,
            output: output.to_string(),
        });
        self
    }

    /// Make every invocation take at least `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Commands invoked so far, in order.
    pub fn invocations(&self) -> Vec<String> {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Whether any invoked command contained `needle`.
    pub fn was_invoked(&self, needle: &str) -> bool {
        self.invocations().iter().any(|c| c.contains(needle))
    }
}

impl ExternalSystem for ScriptedSystem {
    fn invoke(&self, command: &str) -> Result<CommandResult> {
        self.log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(command.to_string());

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        if let Some(failure) = self.failures.iter().find(|f| command.contains(&f.pattern)) {
            return Ok(CommandResult::failure(
                Some(failure.code),
                String::new(),
                failure.output.clone(),
                self.delay,
            ));
        }

        let stdout = self
            .responses
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map(|(_, out)| out.clone())
            .unwrap_or_default();

        Ok(CommandResult::success(stdout, String::new(), self.delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscripted_commands_succeed_silently() {
        let system = ScriptedSystem::new();
        let result = system.invoke("az group create").unwrap();
        assert!(result.success);
        assert!(result.stdout.is_empty());
    }

    #[test]
    fn first_matching_response_wins() {
        let system = ScriptedSystem::new()
            .respond("az network", "first")
            .respond("az network public-ip", "second");
        let result = system.invoke("az network public-ip show").unwrap();
        assert_eq!(result.stdout, "first");
    }

    #[test]
    fn failures_take_precedence_over_responses() {
        let system = ScriptedSystem::new()
            .respond("az vm", "ok")
            .fail_on("vm create", 2, "denied");
        let result = system.invoke("az vm create -n a").unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(2));
        assert_eq!(result.stderr, "denied");
    }

    #[test]
    fn invocations_are_recorded_in_order() {
        let system = ScriptedSystem::new();
        system.invoke("one").unwrap();
        system.invoke("two").unwrap();
        assert_eq!(system.invocations(), vec!["one", "two"]);
        assert!(system.was_invoked("tw"));
        assert!(!system.was_invoked("three"));
    }

    #[test]
    fn delay_is_applied() {
        let system = ScriptedSystem::new().with_delay(Duration::from_millis(20));
        let start = std::time::Instant::now();
        system.invoke("slow").unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
