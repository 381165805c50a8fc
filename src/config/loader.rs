//! Plan loading.
//!
//! A plan comes either from a file given on the command line or from the
//! built-in lab plan embedded at compile time.

use std::fs;
use std::path::Path;

use crate::config::schema::PlanConfig;
use crate::config::validator::validate;
use crate::error::{RigupError, Result};

/// Source text of the built-in hub-and-spoke lab plan.
pub const BUILTIN_PLAN: &str = include_str!("../../plans/hub-spoke-lab.yml");

/// Parse plan YAML without validating it.
pub fn parse_plan(content: &str, origin: &Path) -> Result<PlanConfig> {
    serde_yaml::from_str(content).map_err(|e| RigupError::ConfigParseError {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and validate a plan file.
pub fn load_plan_file(path: &Path) -> Result<PlanConfig> {
    if !path.exists() {
        return Err(RigupError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let plan = parse_plan(&content, path)?;
    validate(&plan)?;
    tracing::debug!(
        "Loaded plan from {} ({} steps)",
        path.display(),
        plan.steps.len()
    );
    Ok(plan)
}

/// Load and validate the built-in plan.
pub fn builtin_plan() -> Result<PlanConfig> {
    let plan = parse_plan(BUILTIN_PLAN, Path::new("<builtin>"))?;
    validate(&plan)?;
    Ok(plan)
}

/// Load the plan at `path`, or the built-in plan when none is given.
pub fn load_plan(path: Option<&Path>) -> Result<PlanConfig> {
    match path {
        Some(p) => load_plan_file(p),
        None => builtin_plan(),
    }
}
