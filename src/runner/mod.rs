//! Step execution.
//!
//! - [`StepRunner`] times one action on a worker thread
//! - [`Sequencer`] runs a [`Sequence`] of steps, fail-fast, then gathers facts
//! - [`Facts`] carries values captured by one step to the next

pub mod facts;
pub mod sequencer;
pub mod step;
pub mod step_runner;

pub use facts::{Captures, Facts};
pub use sequencer::{Sequence, SequenceFailure, Sequencer, GATHERED_SUMMARY, GATHER_LABEL};
pub use step::{FactQuery, Step, StepResult};
pub use step_runner::{StepRunner, DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL};
