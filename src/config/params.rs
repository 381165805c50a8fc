//! Run parameters shared by every step of a run.

use std::collections::HashMap;

use crate::error::{RigupError, Result};

/// Default resource group name.
pub const DEFAULT_RESOURCE_GROUP: &str = "rg-hubspoke-lab";

/// Default location/region.
pub const DEFAULT_LOCATION: &str = "eastus";

/// Default environment tag.
pub const DEFAULT_ENVIRONMENT_TAG: &str = "training";

/// Variable names the parameters are exposed under in plan files.
pub const PARAMETER_NAMES: [&str; 3] = ["resource_group", "location", "environment_tag"];

/// Immutable configuration captured once at the start of a run.
///
/// Steps receive it behind an `Arc` and only ever read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    /// Resource group every resource is created in.
    pub resource_group: String,
    /// Region name.
    pub location: String,
    /// Value of the `environment` tag applied to resources.
    pub environment_tag: String,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            resource_group: DEFAULT_RESOURCE_GROUP.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            environment_tag: DEFAULT_ENVIRONMENT_TAG.to_string(),
        }
    }
}

impl RunParameters {
    /// Build parameters, checking only that each value is present.
    pub fn new(resource_group: &str, location: &str, environment_tag: &str) -> Result<Self> {
        let params = Self {
            resource_group: resource_group.trim().to_string(),
            location: location.trim().to_string(),
            environment_tag: environment_tag.trim().to_string(),
        };
        params.validate()?;
        Ok(params)
    }

    /// Reject empty values.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.pairs() {
            if value.is_empty() {
                return Err(RigupError::ConfigValidationError {
                    message: format!("Parameter '{}' must not be empty", name),
                });
            }
        }
        Ok(())
    }

    /// Parameters as `(variable name, value)` pairs, in a fixed order.
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (PARAMETER_NAMES[0], self.resource_group.as_str()),
            (PARAMETER_NAMES[1], self.location.as_str()),
            (PARAMETER_NAMES[2], self.environment_tag.as_str()),
        ]
    }

    /// Parameters as interpolation variables.
    pub fn as_variables(&self) -> HashMap<String, String> {
        self.pairs()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}
