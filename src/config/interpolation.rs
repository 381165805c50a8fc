//! Variable interpolation for plan commands.
//!
//! Plan commands, expected values and remediation text use `${variable}`
//! syntax. Variables come from the run parameters and from facts captured
//! earlier in the run.
//!
//! # Syntax
//!
//! - `${variable_name}` - replaced with variable value
//! - `$${escaped}` - produces literal `${escaped}` in output
//! - any other `$` (`$HOME`, `$$`, `$1`) is passed through untouched
//!
//! # Example
//!
//! ```yaml
//! command: "az group create --name ${resource_group} --location ${location}"
//! ```

use crate::error::{RigupError, Result};
use std::collections::{HashMap, HashSet};

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// Parse a string containing ${var} interpolations.
///
/// An unterminated `${` swallows the rest of the string as the variable name,
/// which then fails to resolve.
pub fn parse_interpolation(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                if chars.peek() == Some(&'{') {
                    // $${...} -> literal ${...}
                    chars.next();
                    current_literal.push_str("${");
                    for c in chars.by_ref() {
                        current_literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                } else {
                    current_literal.push_str("$$");
                }
            }
            Some('{') => {
                chars.next();

                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                segments.push(Segment::Variable(var_name.trim().to_string()));
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    segments
}

/// Extract all variable names from an interpolated string.
pub fn extract_variables(input: &str) -> HashSet<String> {
    parse_interpolation(input)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Variable(name) => Some(name),
            _ => None,
        })
        .collect()
}

/// Context for variable resolution.
///
/// Parameters win over facts; plan validation rejects fact keys that shadow
/// a parameter name, so in practice the two never overlap.
#[derive(Debug, Default, Clone)]
pub struct InterpolationContext {
    /// Run parameters (resource_group, location, environment_tag).
    pub params: HashMap<String, String>,

    /// Facts captured or gathered during the run.
    pub facts: HashMap<String, String>,
}

impl InterpolationContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parameter variables.
    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Set the fact variables.
    pub fn with_facts(mut self, facts: HashMap<String, String>) -> Self {
        self.facts = facts;
        self
    }

    /// Resolve a variable name to its value.
    pub fn resolve(&self, name: &str) -> Option<String> {
        self.params
            .get(name)
            .or_else(|| self.facts.get(name))
            .cloned()
    }
}

/// Resolve all variables in an interpolated string.
///
/// # Errors
///
/// Returns `ConfigValidationError` if any variable is not found in the context.
pub fn resolve_string(input: &str, context: &InterpolationContext) -> Result<String> {
    let mut result = String::new();

    for segment in parse_interpolation(input) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(name) => {
                let value =
                    context
                        .resolve(&name)
                        .ok_or_else(|| RigupError::ConfigValidationError {
                            message: format!("Unresolved variable: ${{{}}}", name),
                        })?;
                result.push_str(&value);
            }
        }
    }

    Ok(result)
}

/// Resolve what the context knows, leaving other references as `${name}`.
///
/// Used for display before a run, when captured facts do not exist yet.
pub fn resolve_string_lenient(input: &str, context: &InterpolationContext) -> String {
    parse_interpolation(input)
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) => text,
            Segment::Variable(name) => context
                .resolve(&name)
                .unwrap_or_else(|| format!("${{{}}}", name)),
        })
        .collect()
}
