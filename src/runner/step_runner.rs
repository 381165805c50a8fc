//! Timed execution of a single action.
//!
//! The action runs on its own worker thread. The calling thread owns the
//! display: it refreshes the elapsed readout once per interval until the
//! worker signals that it is done, then joins it and prints exactly one
//! finish line, "completed in" or "failed after" by default. The worker
//! never touches the UI.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, Thread};
use std::time::{Duration, Instant};

use crate::error::{RigupError, Result};
use crate::ui::{elapsed_readout, format_duration, UserInterface};

use super::step::StepResult;

/// Default spacing between readout refreshes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Shortest accepted spacing between readout refreshes.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Raised when the worker finishes, including by panic.
struct DoneSignal {
    done: Arc<AtomicBool>,
    waiter: Thread,
}

impl Drop for DoneSignal {
    fn drop(&mut self) {
        self.done.store(true, Ordering::Release);
        self.waiter.unpark();
    }
}

/// Runs actions on a worker thread while showing elapsed time.
#[derive(Debug, Clone, Copy)]
pub struct StepRunner {
    interval: Duration,
}

impl Default for StepRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl StepRunner {
    /// Runner refreshing once per second.
    pub fn new() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Runner refreshing at a custom interval, no shorter than
    /// [`MIN_POLL_INTERVAL`].
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_POLL_INTERVAL),
        }
    }

    /// Refresh interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run `action` under `label` and wait for it.
    ///
    /// The readout is refreshed at start and then once per interval while
    /// the action is running, so an action lasting `D` intervals produces
    /// between `floor(D)` and `ceil(D) + 1` refreshes. Errors and panics
    /// from the action come back in [`StepResult::outcome`].
    pub fn run<T, F>(&self, label: &str, action: F, ui: &mut dyn UserInterface) -> StepResult<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.run_with_summary(label, &format!("{} completed", label), action, ui)
    }

    /// Like [`run`](Self::run), but a success ends with `"{summary} in {dur}"`
    /// instead of the step's "completed in" line.
    ///
    /// Used for phases that are timed like a step without being one.
    pub fn run_with_summary<T, F>(
        &self,
        label: &str,
        summary: &str,
        action: F,
        ui: &mut dyn UserInterface,
    ) -> StepResult<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        tracing::debug!("Starting step: {}", label);
        let start = Instant::now();
        let mut spinner = ui.start_spinner(label);

        let done = Arc::new(AtomicBool::new(false));
        let signal = DoneSignal {
            done: Arc::clone(&done),
            waiter: thread::current(),
        };

        let spawned = thread::Builder::new()
            .name(format!("step-{}", label.replace(' ', "-").to_lowercase()))
            .spawn(move || {
                let _signal = signal;
                action()
            });

        let handle = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                let elapsed = start.elapsed();
                spinner.finish_error(&format!(
                    "{} failed after {}",
                    label,
                    format_duration(elapsed)
                ));
                return StepResult {
                    label: label.to_string(),
                    elapsed,
                    progress_updates: 0,
                    outcome: Err(RigupError::Io(e)),
                };
            }
        };

        let mut progress_updates = 0;
        let mut next_tick = start;
        while !done.load(Ordering::Acquire) && !handle.is_finished() {
            let now = Instant::now();
            if now >= next_tick {
                spinner.set_message(&elapsed_readout(label, now.duration_since(start)));
                progress_updates += 1;
                next_tick += self.interval;
            }
            thread::park_timeout(next_tick.saturating_duration_since(Instant::now()));
        }

        let outcome = match handle.join() {
            Ok(outcome) => outcome,
            Err(_) => Err(RigupError::WorkerPanicked {
                step: label.to_string(),
            }),
        };
        let elapsed = start.elapsed();

        match &outcome {
            Ok(_) => {
                tracing::debug!("{} in {:?}", summary, elapsed);
                spinner.finish_success(&format!("{} in {}", summary, format_duration(elapsed)));
            }
            Err(e) => {
                tracing::warn!("{} failed after {:?}: {}", label, elapsed, e);
                spinner.finish_error(&format!(
                    "{} failed after {}",
                    label,
                    format_duration(elapsed)
                ));
            }
        }

        StepResult {
            label: label.to_string(),
            elapsed,
            progress_updates,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockUI, SpinnerStatus};

    fn fast() -> StepRunner {
        StepRunner::with_interval(Duration::from_millis(50))
    }

    #[test]
    fn default_interval_is_one_second() {
        assert_eq!(StepRunner::new().interval(), Duration::from_secs(1));
        assert_eq!(StepRunner::default().interval(), DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn success_prints_one_completion_line() {
        let mut ui = MockUI::new();
        let result = fast().run("Create resource group", || Ok(42), &mut ui);

        assert_eq!(result.outcome.unwrap(), 42);
        assert_eq!(result.label, "Create resource group");
        assert_eq!(ui.spinners(), &["Create resource group"]);
        assert_eq!(ui.completion_count(), 1);
        assert!(ui.spinner_finishes()[0]
            .1
            .starts_with("Create resource group completed in"));
    }

    #[test]
    fn failure_is_returned_not_completed() {
        let mut ui = MockUI::new();
        let result: StepResult<()> = fast().run(
            "Create VMs",
            || {
                Err(RigupError::CommandFailed {
                    command: "az vm create".to_string(),
                    code: Some(1),
                    output: "quota exceeded".to_string(),
                })
            },
            &mut ui,
        );

        assert!(matches!(
            result.outcome,
            Err(RigupError::CommandFailed { .. })
        ));
        assert_eq!(ui.completion_count(), 0);
        let finishes = ui.spinner_finishes();
        assert_eq!(finishes.len(), 1);
        assert_eq!(finishes[0].0, SpinnerStatus::Error);
        assert!(finishes[0].1.starts_with("Create VMs failed after"));
    }

    #[test]
    fn panic_becomes_worker_error() {
        let mut ui = MockUI::new();
        let result: StepResult<()> = fast().run("Deploy firewall", || panic!("boom"), &mut ui);

        match result.outcome {
            Err(RigupError::WorkerPanicked { step }) => assert_eq!(step, "Deploy firewall"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(ui.completion_count(), 0);
    }

    #[test]
    fn readout_refreshes_once_per_interval() {
        let mut ui = MockUI::new();
        // 4.5 intervals of work.
        let result = fast().run(
            "Peer networks",
            || {
                thread::sleep(Duration::from_millis(225));
                Ok(())
            },
            &mut ui,
        );

        assert!(result.is_success());
        assert!(
            (4..=6).contains(&result.progress_updates),
            "got {} updates",
            result.progress_updates
        );
        assert_eq!(ui.spinner_updates().len(), result.progress_updates);
        assert!(ui
            .spinner_updates()
            .iter()
            .all(|u| u.starts_with("Peer networks · ") && u.ends_with(" elapsed")));
    }

    #[test]
    fn instant_action_refreshes_at_most_once() {
        let mut ui = MockUI::new();
        let result = StepRunner::with_interval(Duration::from_secs(5)).run(
            "Noop",
            || Ok(()),
            &mut ui,
        );

        assert!(result.progress_updates <= 1);
        assert!(result.elapsed < Duration::from_secs(5));
    }

    #[test]
    fn summary_replaces_completion_line() {
        let mut ui = MockUI::new();
        let result =
            fast().run_with_summary("Gathering facts", "Facts gathered", || Ok(()), &mut ui);

        assert!(result.is_success());
        assert_eq!(ui.completion_count(), 0);
        assert!(ui.spinner_finishes()[0].1.starts_with("Facts gathered in"));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let runner = StepRunner::with_interval(Duration::ZERO);
        assert_eq!(runner.interval(), MIN_POLL_INTERVAL);

        let mut ui = MockUI::new();
        let result = runner.run(
            "Short wait",
            || {
                thread::sleep(Duration::from_millis(20));
                Ok(())
            },
            &mut ui,
        );

        assert!(result.is_success());
        let ceiling = result.elapsed.as_millis() as usize + 2;
        assert!(
            result.progress_updates <= ceiling,
            "got {} updates in {:?}",
            result.progress_updates,
            result.elapsed
        );
    }

    #[test]
    fn elapsed_covers_the_action() {
        let mut ui = MockUI::new();
        let result = fast().run(
            "Wait",
            || {
                thread::sleep(Duration::from_millis(60));
                Ok(())
            },
            &mut ui,
        );

        assert!(result.elapsed >= Duration::from_millis(60));
    }
}
