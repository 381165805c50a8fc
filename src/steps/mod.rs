//! Assembly of runnable sequences from a plan.
//!
//! A [`PlanConfig`] is pure data. This module binds it to run parameters and
//! an [`ExternalSystem`], producing the [`Sequence`] the sequencer executes.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rigup::config::{builtin_plan, RunParameters};
//! use rigup::shell::ScriptedSystem;
//! use rigup::steps::build_sequence;
//!
//! let plan = builtin_plan().unwrap();
//! let sequence = build_sequence(
//!     &plan,
//!     Arc::new(RunParameters::default()),
//!     Arc::new(ScriptedSystem::new()),
//! );
//! assert_eq!(sequence.steps.len(), plan.steps.len());
//! ```

pub mod command_step;

pub use command_step::{cleanup_step, command_step, fact_query};

use std::sync::Arc;

use crate::config::{PlanConfig, RunParameters};
use crate::report::Check;
use crate::runner::Sequence;
use crate::shell::ExternalSystem;

/// Bind every step, fact and check of `plan` to a run.
pub fn build_sequence(
    plan: &PlanConfig,
    params: Arc<RunParameters>,
    system: Arc<dyn ExternalSystem>,
) -> Sequence {
    let mut sequence = Sequence::new(plan.title(), Arc::clone(&params));

    for step in &plan.steps {
        sequence = sequence.step(command_step(step, Arc::clone(&params), Arc::clone(&system)));
    }
    for fact in &plan.facts {
        sequence = sequence.query(fact_query(fact, Arc::clone(&params), Arc::clone(&system)));
    }
    for check in &plan.checks {
        sequence = sequence.check(Check::from(check));
    }

    sequence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::builtin_plan;
    use crate::shell::ScriptedSystem;

    #[test]
    fn sequence_mirrors_the_plan() {
        let plan = builtin_plan().unwrap();
        let sequence = build_sequence(
            &plan,
            Arc::new(RunParameters::default()),
            Arc::new(ScriptedSystem::new()),
        );

        assert_eq!(sequence.title, plan.title());
        let names: Vec<&str> = sequence.steps.iter().map(|s| s.name()).collect();
        let expected: Vec<&str> = plan.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, expected);
        assert_eq!(sequence.queries.len(), plan.facts.len());
        assert_eq!(sequence.checks.len(), plan.checks.len());
    }
}
