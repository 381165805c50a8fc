//! Non-interactive UI for pipes, CI logs and redirected output.
//!
//! Nothing can be overwritten in place here, so the elapsed readout is not
//! printed on every tick. Each step prints one start line and one
//! completion line.

use crate::report::Report;

use super::{format_report, OutputMode, RigupTheme, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: RigupTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: RigupTheme::plain(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_progress() {
            println!("  {}...", message);
        }
        Box::new(LineSpinner {
            theme: self.theme.clone(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            println!("\n{}\n", self.theme.format_header(title));
        }
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        if self.mode.shows_progress() {
            println!("[{}/{}]", current, total);
        }
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        eprintln!("    Command: {}", command);
        for line in output.lines() {
            eprintln!("    | {}", line);
        }
    }

    fn show_report(&mut self, report: &Report) {
        println!();
        for line in format_report(report, &self.theme) {
            println!("{}", line);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Prints only the final line of an operation.
struct LineSpinner {
    theme: RigupTheme,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }
}
