//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{
    RunParameters, DEFAULT_ENVIRONMENT_TAG, DEFAULT_LOCATION, DEFAULT_RESOURCE_GROUP,
};
use crate::error::Result;

/// Rigup - staged, timed, fail-fast lab provisioning.
#[derive(Debug, Parser)]
#[command(name = "rigup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Provision every step, then report (default if no command specified)
    Run(RunArgs),

    /// List the steps, facts and checks of a plan without running anything
    Steps(RunArgs),

    /// Delete everything the plan created
    Cleanup(RunArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Run parameters and plan selection, shared by run, steps and cleanup.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Resource group that holds everything the run creates
    #[arg(
        short = 'g',
        long,
        env = "RIGUP_RESOURCE_GROUP",
        default_value = DEFAULT_RESOURCE_GROUP
    )]
    pub resource_group: String,

    /// Region to create resources in
    #[arg(short, long, env = "RIGUP_LOCATION", default_value = DEFAULT_LOCATION)]
    pub location: String,

    /// Value of the environment tag applied to resources
    #[arg(
        short = 't',
        long,
        env = "RIGUP_ENVIRONMENT_TAG",
        default_value = DEFAULT_ENVIRONMENT_TAG
    )]
    pub environment_tag: String,

    /// Plan file to run instead of the built-in hub-spoke lab
    #[arg(long, value_name = "FILE")]
    pub plan: Option<PathBuf>,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            resource_group: DEFAULT_RESOURCE_GROUP.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            environment_tag: DEFAULT_ENVIRONMENT_TAG.to_string(),
            plan: None,
        }
    }
}

impl RunArgs {
    /// Validated run parameters.
    pub fn parameters(&self) -> Result<RunParameters> {
        RunParameters::new(&self.resource_group, &self.location, &self.environment_tag)
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["rigup"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn run_uses_defaults() {
        let cli = Cli::try_parse_from(["rigup", "run"]).unwrap();
        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.resource_group, "rg-hubspoke-lab");
                assert_eq!(args.location, "eastus");
                assert_eq!(args.environment_tag, "training");
                assert!(args.plan.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn run_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "rigup", "run", "-g", "rg-x", "--location", "westeurope", "-t", "dev",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Run(args)) => {
                let params = args.parameters().unwrap();
                assert_eq!(params.resource_group, "rg-x");
                assert_eq!(params.location, "westeurope");
                assert_eq!(params.environment_tag, "dev");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["rigup", "steps", "--verbose", "--no-color"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert!(matches!(cli.command, Some(Commands::Steps(_))));
    }

    #[test]
    fn default_args_match_parsed_defaults() {
        let args = RunArgs::default();
        let params = args.parameters().unwrap();
        assert_eq!(params, RunParameters::default());
    }

    #[test]
    fn completions_requires_shell() {
        assert!(Cli::try_parse_from(["rigup", "completions"]).is_err());
        assert!(Cli::try_parse_from(["rigup", "completions", "bash"]).is_ok());
    }
}
