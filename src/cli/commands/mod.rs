//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations and owns the external system they
//! share.

pub mod cleanup;
pub mod completions;
pub mod dispatcher;
pub mod run;
pub mod steps;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
