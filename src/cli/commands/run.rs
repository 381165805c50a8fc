//! Run command implementation.
//!
//! The `rigup run` command provisions every step of the plan in order and,
//! when all of them succeed, gathers facts and prints the report.

use std::sync::Arc;

use crate::cli::args::RunArgs;
use crate::config::load_plan;
use crate::error::{RigupError, Result};
use crate::runner::{Sequencer, StepRunner};
use crate::shell::ExternalSystem;
use crate::steps::build_sequence;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Shown after a failed run. Nothing is rolled back.
pub const CLEANUP_HINT: &str =
    "Resources created before the failure were left in place. Run `rigup cleanup` before retrying.";

/// The run command implementation.
pub struct RunCommand {
    args: RunArgs,
    system: Arc<dyn ExternalSystem>,
    runner: StepRunner,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(args: RunArgs, system: Arc<dyn ExternalSystem>, runner: StepRunner) -> Self {
        Self {
            args,
            system,
            runner,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

impl Command for RunCommand {
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

        ui.show_header(plan.title());
        if ui.output_mode().shows_details() {
            for (name, value) in params.pairs() {
                ui.message(&format!("  {} = {}", name, value));
            }
            ui.message("");
        }

        let sequence = build_sequence(&plan, Arc::new(params), Arc::clone(&self.system));
        match Sequencer::new(self.runner).run_all(sequence, ui) {
            Ok(report) => {
                let issues = report.discrepancies.len();
                if issues == 0 {
                    ui.success("Provisioning complete");
                } else {
                    ui.success(&format!(
                        "Provisioning complete with {} known {}",
                        issues,
                        if issues == 1 { "issue" } else { "issues" }
                    ));
                }
                Ok(CommandResult::success())
            }
            Err(failure) => {
                tracing::debug!("Run aborted: {}", failure);
                ui.warning(CLEANUP_HINT);
                Ok(CommandResult::failure(1))
            }
        }
    }
}
