//! Duration and elapsed-time formatting.

use std::time::Duration;

/// Format a duration for display.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = d.as_secs() / 60;
        let rem = d.as_secs() % 60;
        format!("{}m {}s", mins, rem)
    }
}

/// Format a duration as a running clock, `mm:ss` (or `h:mm:ss` past an hour).
pub fn format_clock(d: Duration) -> String {
    let total = d.as_secs();
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// The in-place readout shown while a step runs.
pub fn elapsed_readout(label: &str, elapsed: Duration) -> String {
    format!("{} · {} elapsed", label, format_clock(elapsed))
}
