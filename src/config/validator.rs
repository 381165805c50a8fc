//! Plan validation.
//!
//! Runs before any external call is made. Besides structural checks it
//! enforces that every `${variable}` is defined at the point it is used, so
//! a run can never reach the report phase and discover a value nobody
//! produced.

use std::collections::HashSet;

use crate::config::interpolation::extract_variables;
use crate::config::params::PARAMETER_NAMES;
use crate::config::schema::PlanConfig;
use crate::error::{RigupError, Result};

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Where the problem is (e.g. `steps[2].commands[0]`).
    pub location: String,
    /// What is wrong.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Collect every problem in a plan.
pub fn validate_plan(plan: &PlanConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut known: HashSet<String> = PARAMETER_NAMES.iter().map(|s| s.to_string()).collect();
    let mut step_names = HashSet::new();

    if plan.steps.is_empty() {
        errors.push(error("steps", "plan has no steps"));
    }

    for (i, step) in plan.steps.iter().enumerate() {
        let at = format!("steps[{}]", i);

        if step.name.trim().is_empty() {
            errors.push(error(&at, "step name must not be empty"));
        } else if !step_names.insert(step.name.as_str()) {
            errors.push(error(&at, &format!("duplicate step name '{}'", step.name)));
        }

        if step.commands.is_empty() && step.captures.is_empty() {
            errors.push(error(&at, "step has no commands or captures"));
        }

        for (j, command) in step.commands.iter().enumerate() {
            check_variables(&format!("{}.commands[{}]", at, j), command, &known, &mut errors);
        }

        for (j, capture) in step.captures.iter().enumerate() {
            let cat = format!("{}.captures[{}]", at, j);
            check_variables(&cat, &capture.command, &known, &mut errors);
            define(&cat, &capture.name, &mut known, &mut errors);
        }
    }

    let mut gathered = HashSet::new();
    for (i, fact) in plan.facts.iter().enumerate() {
        let at = format!("facts[{}]", i);
        if fact.label.trim().is_empty() {
            errors.push(error(&at, "fact label must not be empty"));
        }
        check_variables(&at, &fact.command, &known, &mut errors);
        define(&at, &fact.key, &mut known, &mut errors);
        gathered.insert(fact.key.as_str());
    }

    for (i, check) in plan.checks.iter().enumerate() {
        let at = format!("checks[{}]", i);
        if !gathered.contains(check.fact.as_str()) {
            errors.push(error(
                &at,
                &format!("'{}' is not a gathered fact", check.fact),
            ));
        }
        check_variables(&format!("{}.expected", at), &check.expected, &known, &mut errors);
        for (j, command) in check.remediation.iter().enumerate() {
            check_variables(
                &format!("{}.remediation[{}]", at, j),
                command,
                &known,
                &mut errors,
            );
        }
    }

    // Cleanup runs on its own, with nothing but the parameters.
    let params: HashSet<String> = PARAMETER_NAMES.iter().map(|s| s.to_string()).collect();
    for (i, command) in plan.cleanup.iter().enumerate() {
        check_variables(&format!("cleanup[{}]", i), command, &params, &mut errors);
    }

    errors
}

/// Validate a plan, folding all problems into one error.
pub fn validate(plan: &PlanConfig) -> Result<()> {
    let errors = validate_plan(plan);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    Err(RigupError::ConfigValidationError { message })
}

fn error(location: &str, message: &str) -> ValidationError {
    ValidationError {
        location: location.to_string(),
        message: message.to_string(),
    }
}

fn define(
    location: &str,
    name: &str,
    known: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    if name.trim().is_empty() {
        errors.push(error(location, "fact name must not be empty"));
    } else if PARAMETER_NAMES.contains(&name) {
        errors.push(error(
            location,
            &format!("'{}' shadows a run parameter", name),
        ));
    } else if !known.insert(name.to_string()) {
        errors.push(error(location, &format!("fact '{}' defined twice", name)));
    }
}

fn check_variables(
    location: &str,
    text: &str,
    known: &HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    let mut missing: Vec<String> = extract_variables(text)
        .into_iter()
        .filter(|v| !known.contains(v))
        .collect();
    missing.sort();

    for name in missing {
        errors.push(error(
            location,
            &format!("'${{{}}}' is not defined at this point", name),
        ));
    }
}
