//! Rigup - staged, timed, fail-fast provisioning.
//!
//! Rigup runs an ordered list of provisioning steps against an external
//! system. Each step runs on a worker thread while the terminal shows how
//! long it has been running. The first failing step stops the run. When
//! every step succeeds, rigup gathers facts and prints a report of the
//! known discrepancies with the commands that fix them.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Run parameters, plan loading, validation and interpolation
//! - [`error`] - Error types and result aliases
//! - [`report`] - The end-of-run report and check evaluation
//! - [`runner`] - Step runner, sequencer and the facts arena
//! - [`shell`] - The external system seam and shell command execution
//! - [`steps`] - Binding plan entries to runnable steps
//! - [`ui`] - Spinners, elapsed readouts and terminal output
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use rigup::config::RunParameters;
//! use rigup::runner::{Sequence, Sequencer, Step, StepRunner};
//! use rigup::ui::MockUI;
//!
//! let sequence = Sequence::new("Demo", Arc::new(RunParameters::default()))
//!     .step(Step::new("Create group", || Ok(())))
//!     .step(Step::new("Create network", || Ok(())));
//!
//! let mut ui = MockUI::new();
//! let sequencer = Sequencer::new(StepRunner::with_interval(Duration::from_millis(10)));
//! let report = sequencer.run_all(sequence, &mut ui).unwrap();
//!
//! assert_eq!(report.steps.len(), 2);
//! assert_eq!(ui.completion_count(), 2);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod shell;
pub mod steps;
pub mod ui;

pub use error::{Result, RigupError};
