//! Units of work handed to the sequencer.

use std::fmt;
use std::time::Duration;

use crate::error::Result;

use super::facts::{Captures, Facts};

type StepAction = Box<dyn FnOnce(Facts) -> Result<Captures> + Send + 'static>;
type QueryAction = Box<dyn FnOnce(&Facts) -> Result<String> + Send + 'static>;

/// A named provisioning step.
///
/// The action runs on a worker thread. It receives a snapshot of the facts
/// captured by earlier steps and returns the facts it captured itself.
pub struct Step {
    name: String,
    action: StepAction,
}

impl Step {
    /// A step that neither reads nor captures facts.
    pub fn new<F>(name: &str, action: F) -> Self
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        Self::with_facts(name, move |_| action().map(|()| Captures::new()))
    }

    /// A step that reads earlier facts and may capture new ones.
    pub fn with_facts<F>(name: &str, action: F) -> Self
    where
        F: FnOnce(Facts) -> Result<Captures> + Send + 'static,
    {
        Self {
            name: name.to_string(),
            action: Box::new(action),
        }
    }

    /// Step label shown to the operator.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_parts(self) -> (String, StepAction) {
        (self.name, self.action)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish()
    }
}

/// A read-only query run during the gather phase.
pub struct FactQuery {
    key: String,
    label: String,
    action: QueryAction,
}

impl FactQuery {
    /// Create a query storing its answer under `key`.
    pub fn new<F>(key: &str, label: &str, action: F) -> Self
    where
        F: FnOnce(&Facts) -> Result<String> + Send + 'static,
    {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            action: Box::new(action),
        }
    }

    /// Fact key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn run(self, facts: &Facts) -> Result<(String, String)> {
        let value = (self.action)(facts)?;
        Ok((self.key, value))
    }
}

impl fmt::Debug for FactQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactQuery")
            .field("key", &self.key)
            .field("label", &self.label)
            .finish()
    }
}

/// Outcome of one timed action.
#[derive(Debug)]
pub struct StepResult<T> {
    /// Label the action ran under.
    pub label: String,
    /// Wall-clock time from start to join.
    pub elapsed: Duration,
    /// How many times the elapsed readout was refreshed.
    pub progress_updates: usize,
    /// What the action returned.
    pub outcome: Result<T>,
}

impl<T> StepResult<T> {
    /// Whether the action succeeded.
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}
