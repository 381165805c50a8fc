//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::sync::Arc;

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::error::Result;
use crate::runner::StepRunner;
use crate::shell::ExternalSystem;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
///
/// Holds the external system every command talks to and the runner that
/// times steps, so both can be swapped out in tests.
pub struct CommandDispatcher {
    system: Arc<dyn ExternalSystem>,
    runner: StepRunner,
}

impl CommandDispatcher {
    /// Create a dispatcher using the given external system.
    pub fn new(system: Arc<dyn ExternalSystem>) -> Self {
        Self {
            system,
            runner: StepRunner::new(),
        }
    }

    /// Use a custom step runner.
    pub fn with_runner(mut self, runner: StepRunner) -> Self {
        self.runner = runner;
        self
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Run(args)) => self.run(args.clone(), ui),
            Some(Commands::Steps(args)) => {
                let cmd = super::steps::StepsCommand::new(args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Cleanup(args)) => {
                let cmd = super::cleanup::CleanupCommand::new(
                    args.clone(),
                    Arc::clone(&self.system),
                    self.runner,
                );
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => self.run(RunArgs::default(), ui),
        }
    }

    fn run(&self, args: RunArgs, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let cmd = super::run::RunCommand::new(args, Arc::clone(&self.system), self.runner);
        cmd.execute(ui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ScriptedSystem;
    use crate::ui::MockUI;
    use clap::Parser;
    use std::time::Duration;

    fn dispatcher(system: Arc<ScriptedSystem>) -> CommandDispatcher {
        CommandDispatcher::new(system)
            .with_runner(StepRunner::with_interval(Duration::from_millis(10)))
    }

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn no_subcommand_runs_the_builtin_plan() {
        let system = Arc::new(ScriptedSystem::new());
        let cli = Cli::try_parse_from(["rigup"]).unwrap();
        let mut ui = MockUI::new();

        let result = dispatcher(system.clone()).dispatch(&cli, &mut ui).unwrap();

        assert!(result.success);
        assert!(system.was_invoked("az group create"));
        assert_eq!(ui.reports().len(), 1);
    }

    #[test]
    fn steps_subcommand_runs_nothing() {
        let system = Arc::new(ScriptedSystem::new());
        let cli = Cli::try_parse_from(["rigup", "steps"]).unwrap();
        let mut ui = MockUI::new();

        let result = dispatcher(system.clone()).dispatch(&cli, &mut ui).unwrap();

        assert!(result.success);
        assert!(system.invocations().is_empty());
    }
}
