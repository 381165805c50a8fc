//! Fail-fast sequencing of steps.
//!
//! Steps run strictly in order, each through the [`StepRunner`]. The first
//! failure aborts the run: later steps are never started, nothing already
//! created is rolled back, and the operator is told which step failed.
//! When every step succeeds, the gather phase runs as one more timed action
//! and its facts feed the [`Report`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::RunParameters;
use crate::error::{RigupError, Result};
use crate::report::{Check, Report, ReportBuilder};
use crate::ui::{format_duration, UserInterface};

use super::facts::{Captures, Facts};
use super::step::{FactQuery, Step};
use super::step_runner::StepRunner;

/// Label of the timed gather phase.
pub const GATHER_LABEL: &str = "Gathering facts";

/// Finish line of a successful gather phase. It is not a step, so it does
/// not say "completed in".
pub const GATHERED_SUMMARY: &str = "Facts gathered";

/// Everything one run needs.
#[derive(Debug)]
pub struct Sequence {
    /// Run title.
    pub title: String,
    /// Parameters shared by every step.
    pub parameters: Arc<RunParameters>,
    /// Steps in execution order.
    pub steps: Vec<Step>,
    /// Read-only queries for the gather phase, in display order.
    pub queries: Vec<FactQuery>,
    /// Checks evaluated against the gathered facts.
    pub checks: Vec<Check>,
}

impl Sequence {
    /// An empty sequence with the given title and parameters.
    pub fn new(title: &str, parameters: Arc<RunParameters>) -> Self {
        Self {
            title: title.to_string(),
            parameters,
            steps: Vec::new(),
            queries: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Append a step.
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Append a gather query.
    pub fn query(mut self, query: FactQuery) -> Self {
        self.queries.push(query);
        self
    }

    /// Append a check.
    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }
}

/// The step that stopped a run.
#[derive(Debug, Error)]
#[error("Step '{step}' failed: {source}")]
pub struct SequenceFailure {
    /// Label of the failing step.
    pub step: String,
    /// 1-based position among attempted steps. The gather phase counts as
    /// one past the last step.
    pub position: usize,
    /// Number of steps in the sequence.
    pub total: usize,
    /// Time spent in the failing step.
    pub elapsed: Duration,
    /// Underlying error.
    #[source]
    pub source: RigupError,
}

/// Runs a [`Sequence`] to completion or first failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequencer {
    runner: StepRunner,
}

impl Sequencer {
    /// Create a sequencer that times steps with `runner`.
    pub fn new(runner: StepRunner) -> Self {
        Self { runner }
    }

    /// Run every step, then gather facts and build the report.
    ///
    /// The report is shown through `ui` before it is returned.
    pub fn run_all(
        &self,
        sequence: Sequence,
        ui: &mut dyn UserInterface,
    ) -> std::result::Result<Report, SequenceFailure> {
        let Sequence {
            title,
            parameters,
            steps,
            queries,
            checks,
        } = sequence;

        let total = steps.len();
        let run_start = Instant::now();
        let mut facts = Facts::new();
        let mut builder = ReportBuilder::new(&title, RunParameters::clone(&parameters));

        tracing::info!("Running {} steps for {}", total, parameters.resource_group);

        for (index, step) in steps.into_iter().enumerate() {
            let position = index + 1;
            ui.show_progress(position, total);

            let (name, action) = step.into_parts();
            let snapshot = facts.clone();
            let result = self.runner.run(&name, move || action(snapshot), ui);

            match result.outcome {
                Ok(captures) => {
                    show_captures(ui, &captures);
                    facts.absorb(captures);
                    builder = builder.step(&name, result.elapsed);
                }
                Err(source) => {
                    return Err(fail(ui, name, position, total, result.elapsed, source));
                }
            }
        }

        if !queries.is_empty() {
            for query in &queries {
                builder = builder.fact(query.key(), query.label());
            }

            let snapshot = facts.clone();
            let result = self.runner.run_with_summary(
                GATHER_LABEL,
                GATHERED_SUMMARY,
                move || gather(queries, snapshot),
                ui,
            );

            match result.outcome {
                Ok(gathered) => {
                    show_captures(ui, &gathered);
                    facts.absorb(gathered);
                }
                Err(source) => {
                    return Err(fail(
                        ui,
                        GATHER_LABEL.to_string(),
                        total + 1,
                        total,
                        result.elapsed,
                        source,
                    ));
                }
            }
        }

        let total_elapsed = run_start.elapsed();
        let report = builder
            .checks(checks)
            .build(&facts, total_elapsed)
            .map_err(|source| {
                fail(
                    ui,
                    "Building report".to_string(),
                    total + 1,
                    total,
                    Duration::ZERO,
                    source,
                )
            })?;

        tracing::info!(
            "Run finished in {:?} with {} discrepancies",
            total_elapsed,
            report.discrepancies.len()
        );
        ui.show_report(&report);
        Ok(report)
    }
}

/// Each query sees the facts gathered before it.
fn gather(queries: Vec<FactQuery>, mut facts: Facts) -> Result<Captures> {
    let mut gathered = Captures::with_capacity(queries.len());
    for query in queries {
        let (key, value) = query.run(&facts)?;
        facts.insert(key.clone(), value.clone());
        gathered.push((key, value));
    }
    Ok(gathered)
}

fn show_captures(ui: &mut dyn UserInterface, captures: &Captures) {
    if ui.output_mode().shows_details() {
        for (name, value) in captures {
            ui.message(&format!("    {} = {}", name, value));
        }
    }
}

fn fail(
    ui: &mut dyn UserInterface,
    step: String,
    position: usize,
    total: usize,
    elapsed: Duration,
    source: RigupError,
) -> SequenceFailure {
    tracing::error!("Run stopped at '{}': {}", step, source);
    ui.error(&format!(
        "Step '{}' failed after {}",
        step,
        format_duration(elapsed)
    ));

    match &source {
        RigupError::CommandFailed {
            command, output, ..
        } => ui.show_error_block(command, output),
        other => ui.error(&other.to_string()),
    }

    SequenceFailure {
        step,
        position,
        total,
        elapsed,
        source,
    }
}
