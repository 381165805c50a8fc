//! Plan entries turned into runnable actions.
//!
//! Commands are resolved on the worker thread, right before they run, so a
//! step can reference any fact an earlier step captured.

use std::sync::Arc;

use crate::config::interpolation::{resolve_string, InterpolationContext};
use crate::config::{FactConfig, RunParameters, StepConfig};
use crate::error::Result;
use crate::runner::{Captures, FactQuery, Facts, Step};
use crate::shell::{run_checked, ExternalSystem};

fn context(params: &RunParameters, facts: &Facts) -> InterpolationContext {
    InterpolationContext::new()
        .with_params(params.as_variables())
        .with_facts(facts.as_variables())
}

/// Build a step running every command of `config`, then its captures.
pub fn command_step(
    config: &StepConfig,
    params: Arc<RunParameters>,
    system: Arc<dyn ExternalSystem>,
) -> Step {
    let config = config.clone();
    Step::with_facts(&config.name.clone(), move |facts| {
        run_step(&config, &params, system.as_ref(), facts)
    })
}

fn run_step(
    config: &StepConfig,
    params: &RunParameters,
    system: &dyn ExternalSystem,
    mut facts: Facts,
) -> Result<Captures> {
    for template in &config.commands {
        let command = resolve_string(template, &context(params, &facts))?;
        run_checked(system, &command)?;
    }

    let mut captures = Captures::new();
    for capture in &config.captures {
        let command = resolve_string(&capture.command, &context(params, &facts))?;
        let value = run_checked(system, &command)?;
        tracing::debug!("Captured {} = {}", capture.name, value);
        // Later captures in the same step may use this one.
        facts.insert(capture.name.clone(), value.clone());
        captures.push((capture.name.clone(), value));
    }

    Ok(captures)
}

/// Build a gather-phase query for one fact.
pub fn fact_query(
    config: &FactConfig,
    params: Arc<RunParameters>,
    system: Arc<dyn ExternalSystem>,
) -> FactQuery {
    let template = config.command.clone();
    FactQuery::new(&config.key, &config.label, move |facts| {
        let command = resolve_string(&template, &context(&params, facts))?;
        run_checked(system.as_ref(), &command)
    })
}

/// Build the teardown step from the plan's cleanup commands.
pub fn cleanup_step(
    commands: &[String],
    params: Arc<RunParameters>,
    system: Arc<dyn ExternalSystem>,
) -> Step {
    let config = StepConfig {
        name: format!("Delete {}", params.resource_group),
        commands: commands.to_vec(),
        captures: Vec::new(),
    };
    command_step(&config, params, system)
}
