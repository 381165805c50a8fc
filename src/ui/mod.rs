//! User interface components.
//!
//! The step runner and sequencer never print directly; they talk to a
//! [`UserInterface`] handed to them. This module provides:
//! - [`TerminalUI`] for interactive terminals (in-place spinner readouts)
//! - [`NonInteractiveUI`] for pipes and CI logs
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use rigup::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! let mut spinner = ui.start_spinner("Create resource group");
//! spinner.set_message("Create resource group · 00:01 elapsed");
//! spinner.finish_success("Create resource group completed in 1.2s");
//!
//! assert_eq!(ui.spinner_updates().len(), 1);
//! assert!(ui.has_completion("Create resource group"));
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod report_view;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, SpinnerStatus};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::{elapsed_readout, format_clock, format_duration};
pub use report_view::format_report;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, RigupTheme};

use crate::report::Report;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Start a live readout for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show progress (e.g., "Step 3 of 7").
    fn show_progress(&mut self, current: usize, total: usize);

    /// Show a failed command together with its output.
    fn show_error_block(&mut self, command: &str, output: &str);

    /// Show the end-of-run report.
    fn show_report(&mut self, report: &Report);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a live readout.
pub trait SpinnerHandle {
    /// Replace the readout text in place.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}
