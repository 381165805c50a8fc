//! Configuration: run parameters and plan files.
//!
//! - Run parameters in [`params`]
//! - Plan schema definitions in [`schema`]
//! - Plan loading in [`loader`]
//! - Validation in [`validator`]
//! - Variable interpolation in [`interpolation`]
//!
//! # Example
//!
//! ```
//! use rigup::config::{builtin_plan, RunParameters};
//!
//! let params = RunParameters::default();
//! assert_eq!(params.location, "eastus");
//!
//! let plan = builtin_plan().unwrap();
//! assert!(!plan.steps.is_empty());
//! ```

pub mod interpolation;
pub mod loader;
pub mod params;
pub mod schema;
pub mod validator;

pub use interpolation::{
    extract_variables, parse_interpolation, resolve_string, resolve_string_lenient,
    InterpolationContext, Segment,
};
pub use loader::{builtin_plan, load_plan, load_plan_file, parse_plan, BUILTIN_PLAN};
pub use params::{
    RunParameters, DEFAULT_ENVIRONMENT_TAG, DEFAULT_LOCATION, DEFAULT_RESOURCE_GROUP,
    PARAMETER_NAMES,
};
pub use schema::{CaptureConfig, CheckConfig, FactConfig, PlanConfig, StepConfig};
pub use validator::{validate, validate_plan, ValidationError};
