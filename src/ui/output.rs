//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Also show parameters and captured facts as they appear.
    Verbose,
    /// Show headers, step counters, spinners and the report.
    #[default]
    Normal,
    /// Show spinners, errors and the report only.
    Quiet,
}

impl OutputMode {
    /// Pick a mode from the `--verbose`/`--quiet` flags. Quiet wins.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows run details (parameters, captured facts).
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows headers, step counters and plain messages.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}
