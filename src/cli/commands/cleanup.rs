//! Cleanup command implementation.
//!
//! The `rigup cleanup` command runs the plan's teardown commands as a single
//! timed step. A run never cleans up after itself; this is the only way
//! resources are removed.

use std::sync::Arc;

use crate::cli::args::RunArgs;
use crate::config::load_plan;
use crate::error::{RigupError, Result};
use crate::runner::StepRunner;
use crate::shell::ExternalSystem;
use crate::steps::cleanup_step;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The cleanup command implementation.
pub struct CleanupCommand {
    args: RunArgs,
    system: Arc<dyn ExternalSystem>,
    runner: StepRunner,
}

impl CleanupCommand {
    /// Create a new cleanup command.
    pub fn new(args: RunArgs, system: Arc<dyn ExternalSystem>, runner: StepRunner) -> Self {
        Self {
            args,
            system,
            runner,
        }
    }
}

impl Command for CleanupCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let params = match self.args.parameters() {
            Ok(p) => p,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
        };

        let plan = match load_plan(self.args.plan.as_deref()) {
            Ok(p) => p,
            Err(e @ RigupError::ConfigNotFound { .. })
            | Err(e @ RigupError::ConfigParseError { .. })
            | Err(e @ RigupError::ConfigValidationError { .. }) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        if plan.cleanup.is_empty() {
            ui.warning("Plan has no cleanup commands");
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("Cleaning up {}", params.resource_group));
        let step = cleanup_step(&plan.cleanup, Arc::new(params), Arc::clone(&self.system));
        let (label, action) = step.into_parts();
        let result = self.runner.run(&label, move || action(Default::default()), ui);

        match result.outcome {
            Ok(_) => Ok(CommandResult::success()),
            Err(e) => {
                ui.error(&format!("Step '{}' failed", label));
                match &e {
                    RigupError::CommandFailed {
                        command, output, ..
                    } => ui.show_error_block(command, output),
                    other => ui.error(&other.to_string()),
                }
                Ok(CommandResult::failure(1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ScriptedSystem;
    use crate::ui::MockUI;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn runner() -> StepRunner {
        StepRunner::with_interval(Duration::from_millis(10))
    }

    #[test]
    fn deletes_the_resource_group() {
        let system = Arc::new(ScriptedSystem::new());
        let args = RunArgs {
            resource_group: "rg-old".to_string(),
            ..Default::default()
        };
        let mut ui = MockUI::new();

        let result = CleanupCommand::new(args, system.clone(), runner())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(system.was_invoked("az group delete --name rg-old"));
        assert!(ui.has_completion("Delete rg-old"));
    }

    #[test]
    fn failed_delete_exits_nonzero() {
        let system = Arc::new(ScriptedSystem::new().fail_on("az group delete", 3, "not found"));
        let mut ui = MockUI::new();

        let result = CleanupCommand::new(RunArgs::default(), system, runner())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.error_blocks()[0].1, "not found");
    }

    #[test]
    fn plan_without_cleanup_does_nothing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plan.yml");
        fs::write(&path, "steps:\n  - name: Say hi\n    commands: [\"echo hi\"]\n").unwrap();
        let system = Arc::new(ScriptedSystem::new());
        let args = RunArgs {
            plan: Some(path),
            ..Default::default()
        };
        let mut ui = MockUI::new();

        let result = CleanupCommand::new(args, system.clone(), runner())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_warning("no cleanup commands"));
        assert!(system.invocations().is_empty());
    }
}
