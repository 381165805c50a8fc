//! End-of-run report.
//!
//! A [`Report`] is only ever built after every step succeeded and the
//! gather phase produced its facts. Checks are evaluated here: a check whose
//! gathered value differs from its expected value becomes a
//! [`Discrepancy`] with the remediation commands resolved against the run.

use std::time::Duration;

use crate::config::interpolation::{extract_variables, resolve_string, InterpolationContext};
use crate::config::{CheckConfig, RunParameters};
use crate::error::{RigupError, Result};
use crate::runner::Facts;

/// How long one step took.
#[derive(Debug, Clone, PartialEq)]
pub struct StepTiming {
    /// Step label.
    pub label: String,
    /// Wall-clock duration.
    pub elapsed: Duration,
}

/// A gathered fact as it appears in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFact {
    /// Fact key.
    pub key: String,
    /// Display label, e.g. "Application Gateway Public IP".
    pub label: String,
    /// Value read from the external system.
    pub value: String,
}

/// A known problem whose expected value was not met.
#[derive(Debug, Clone, PartialEq)]
pub struct Discrepancy {
    /// Short title.
    pub title: String,
    /// Explanation.
    pub description: Option<String>,
    /// Label of the fact that was checked.
    pub fact_label: String,
    /// Resolved expected value.
    pub expected: String,
    /// Value found.
    pub actual: String,
    /// Resolved commands that fix it.
    pub remediation: Vec<String>,
}

/// A check still in template form.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    /// Short title.
    pub title: String,
    /// Explanation.
    pub description: Option<String>,
    /// Key of the fact holding the actual value.
    pub fact: String,
    /// Expected value template.
    pub expected: String,
    /// Remediation command templates.
    pub remediation: Vec<String>,
}

impl From<&CheckConfig> for Check {
    fn from(config: &CheckConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            fact: config.fact.clone(),
            expected: config.expected.clone(),
            remediation: config.remediation.clone(),
        }
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Run title.
    pub title: String,
    /// Parameters the run used.
    pub parameters: RunParameters,
    /// Step timings in execution order.
    pub steps: Vec<StepTiming>,
    /// Gathered facts in query order.
    pub facts: Vec<ReportFact>,
    /// Detected discrepancies in check order.
    pub discrepancies: Vec<Discrepancy>,
    /// Time from the first step to the end of the gather phase.
    pub total_elapsed: Duration,
}

impl Report {
    /// Value of a gathered fact by key.
    pub fn fact(&self, key: &str) -> Option<&str> {
        self.facts
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }

    /// Whether any check failed.
    pub fn has_discrepancies(&self) -> bool {
        !self.discrepancies.is_empty()
    }
}

/// Assembles a [`Report`] from the facts of a finished run.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    title: String,
    parameters: RunParameters,
    steps: Vec<StepTiming>,
    fact_labels: Vec<(String, String)>,
    checks: Vec<Check>,
}

impl ReportBuilder {
    /// Start a report.
    pub fn new(title: &str, parameters: RunParameters) -> Self {
        Self {
            title: title.to_string(),
            parameters,
            steps: Vec::new(),
            fact_labels: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Record a finished step.
    pub fn step(mut self, label: &str, elapsed: Duration) -> Self {
        self.steps.push(StepTiming {
            label: label.to_string(),
            elapsed,
        });
        self
    }

    /// Declare a fact to show, in display order.
    pub fn fact(mut self, key: &str, label: &str) -> Self {
        self.fact_labels.push((key.to_string(), label.to_string()));
        self
    }

    /// Add checks to evaluate.
    pub fn checks(mut self, checks: impl IntoIterator<Item = Check>) -> Self {
        self.checks.extend(checks);
        self
    }

    /// Build the report.
    ///
    /// # Errors
    ///
    /// `MissingFact` if a declared fact, a checked fact, or a variable used
    /// in an expected value or remediation command was never produced.
    pub fn build(self, facts: &Facts, total_elapsed: Duration) -> Result<Report> {
        let ctx = InterpolationContext::new()
            .with_params(self.parameters.as_variables())
            .with_facts(facts.as_variables());

        let report_facts = self
            .fact_labels
            .iter()
            .map(|(key, label)| {
                Ok(ReportFact {
                    key: key.clone(),
                    label: label.clone(),
                    value: require(facts, key)?.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut discrepancies = Vec::new();
        for check in &self.checks {
            let actual = require(facts, &check.fact)?;
            let expected = resolve_required(&check.expected, &ctx)?;

            if values_match(actual, &expected) {
                tracing::debug!("Check passed: {}", check.title);
                continue;
            }

            let remediation = check
                .remediation
                .iter()
                .map(|cmd| resolve_required(cmd, &ctx))
                .collect::<Result<Vec<_>>>()?;

            let fact_label = self
                .fact_labels
                .iter()
                .find(|(key, _)| key == &check.fact)
                .map(|(_, label)| label.clone())
                .unwrap_or_else(|| check.fact.clone());

            discrepancies.push(Discrepancy {
                title: check.title.clone(),
                description: check.description.clone(),
                fact_label,
                expected,
                actual: actual.to_string(),
                remediation,
            });
        }

        Ok(Report {
            title: self.title,
            parameters: self.parameters,
            steps: self.steps,
            facts: report_facts,
            discrepancies,
            total_elapsed,
        })
    }
}

fn require<'a>(facts: &'a Facts, key: &str) -> Result<&'a str> {
    facts.get(key).ok_or_else(|| RigupError::MissingFact {
        fact: key.to_string(),
    })
}

fn resolve_required(template: &str, ctx: &InterpolationContext) -> Result<String> {
    let mut names: Vec<String> = extract_variables(template).into_iter().collect();
    names.sort();
    if let Some(missing) = names.into_iter().find(|n| ctx.resolve(n).is_none()) {
        return Err(RigupError::MissingFact { fact: missing });
    }
    resolve_string(template, ctx)
}

/// CLIs print booleans as `true` or `True`; compare trimmed and ignoring ASCII case.
fn values_match(actual: &str, expected: &str) -> bool {
    actual.trim().eq_ignore_ascii_case(expected.trim())
}
