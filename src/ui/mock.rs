//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. Spinners it hands out write into a log
//! shared with the UI, so readout updates and completion lines stay
//! observable after the spinner itself is dropped.
//!
//! # Example
//!
//! ```
//! use rigup::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//!
//! ui.message("Starting run");
//! ui.success("Done!");
//!
//! assert!(ui.messages().contains(&"Starting run".to_string()));
//! assert!(ui.successes().contains(&"Done!".to_string()));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::report::Report;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
}

#[derive(Debug, Default)]
struct SpinnerLog {
    updates: Vec<String>,
    finishes: Vec<(SpinnerStatus, String)>,
}

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    progress: Vec<(usize, usize)>,
    spinners: Vec<String>,
    error_blocks: Vec<(String, String)>,
    reports: Vec<Report>,
    spinner_log: Rc<RefCell<SpinnerLog>>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured progress updates.
    pub fn progress(&self) -> &[(usize, usize)] {
        &self.progress
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get all captured error blocks as (command, output).
    pub fn error_blocks(&self) -> &[(String, String)] {
        &self.error_blocks
    }

    /// Get all reports shown.
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Every in-place readout update across all spinners, in order.
    pub fn spinner_updates(&self) -> Vec<String> {
        self.spinner_log.borrow().updates.clone()
    }

    /// Every spinner finish line with its status, in order.
    pub fn spinner_finishes(&self) -> Vec<(SpinnerStatus, String)> {
        self.spinner_log.borrow().finishes.clone()
    }

    /// Number of successful "completed in" lines.
    pub fn completion_count(&self) -> usize {
        self.spinner_log
            .borrow()
            .finishes
            .iter()
            .filter(|(status, msg)| {
                *status == SpinnerStatus::Success && msg.contains("completed in")
            })
            .count()
    }

    /// Check if a step with this label reported completion.
    pub fn has_completion(&self, label: &str) -> bool {
        self.spinner_log.borrow().finishes.iter().any(|(status, msg)| {
            *status == SpinnerStatus::Success && msg.starts_with(label)
        })
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Clear all captured interactions.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.successes.clear();
        self.warnings.clear();
        self.errors.clear();
        self.headers.clear();
        self.progress.clear();
        self.spinners.clear();
        self.error_blocks.clear();
        self.reports.clear();
        *self.spinner_log.borrow_mut() = SpinnerLog::default();
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            log: Some(Rc::clone(&self.spinner_log)),
            ..Default::default()
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        self.progress.push((current, total));
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        self.error_blocks
            .push((command.to_string(), output.to_string()));
    }

    fn show_report(&mut self, report: &Report) {
        self.reports.push(report.clone());
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Mock spinner that captures updates and its finish message.
#[derive(Debug, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    finish_message: Option<String>,
    status: Option<SpinnerStatus>,
    log: Option<Rc<RefCell<SpinnerLog>>>,
}

impl MockSpinner {
    /// Create a new standalone mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all messages set during spinning.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get the final finish message.
    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    /// Get the final status.
    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }

    fn finish(&mut self, status: SpinnerStatus, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.status = Some(status);
        if let Some(log) = &self.log {
            log.borrow_mut().finishes.push((status, msg.to_string()));
        }
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
        if let Some(log) = &self.log {
            log.borrow_mut().updates.push(msg.to_string());
        }
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Success, msg);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Error, msg);
    }
}
