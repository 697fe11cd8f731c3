use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use ljmd::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::warn;

/// Wall-clock time accumulated over every start/stop pair the engine signals.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TimingSummary {
    pub evaluations: u64,
    pub total: Duration,
}

impl TimingSummary {
    pub fn mean(&self) -> Option<Duration> {
        (self.evaluations > 0).then(|| self.total / self.evaluations as u32)
    }
}

#[derive(Debug, Default)]
struct TimingState {
    started: Option<Instant>,
    summary: TimingSummary,
}

#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
    timing: Arc<Mutex<TimingState>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::new(0).with_style(Self::bar_style());
        pb.set_draw_target(target);
        pb.set_message("Evaluating");

        Self {
            pb: Arc::new(Mutex::new(pb)),
            timing: Arc::new(Mutex::new(TimingState::default())),
        }
    }

    pub fn timing(&self) -> TimingSummary {
        match self.timing.lock() {
            Ok(state) => state.summary,
            Err(poisoned) => poisoned.into_inner().summary,
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();
        let timing_clone = self.timing.clone();

        Box::new(move |progress: Progress| match progress {
            Progress::PhaseStart { .. } => {
                if let Ok(mut timing) = timing_clone.lock() {
                    timing.started = Some(Instant::now());
                }
            }
            Progress::PhaseFinish => {
                if let Ok(mut timing) = timing_clone.lock() {
                    if let Some(started) = timing.started.take() {
                        timing.summary.evaluations += 1;
                        timing.summary.total += started.elapsed();
                    }
                }
            }
            other => {
                let Ok(pb_guard) = pb_clone.lock() else {
                    warn!("Progress bar mutex was poisoned. Cannot update progress.");
                    return;
                };
                match other {
                    Progress::TaskStart { total_steps } => {
                        pb_guard.reset();
                        pb_guard.set_length(total_steps);
                        pb_guard.set_position(0);
                    }
                    Progress::TaskIncrement => pb_guard.inc(1),
                    Progress::TaskFinish => pb_guard.finish_and_clear(),
                    Progress::Message(msg) => pb_guard.println(format!("  {}", msg)),
                    Progress::PhaseStart { .. } | Progress::PhaseFinish => {}
                }
            }
        })
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.pb.lock().unwrap().position()
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<12} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden_handler() -> CliProgressHandler {
        CliProgressHandler::with_draw_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn timing_accumulates_one_entry_per_start_stop_pair() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        for _ in 0..3 {
            callback(Progress::PhaseStart {
                name: "energy_force",
            });
            callback(Progress::PhaseFinish);
        }

        let timing = handler.timing();
        assert_eq!(timing.evaluations, 3);
        assert!(timing.mean().is_some());
    }

    #[test]
    fn finish_without_start_is_ignored() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::PhaseFinish);

        assert_eq!(handler.timing(), TimingSummary::default());
        assert_eq!(handler.timing().mean(), None);
    }

    #[test]
    fn task_events_drive_the_progress_bar() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::TaskStart { total_steps: 4 });
        callback(Progress::TaskIncrement);
        callback(Progress::TaskIncrement);

        assert_eq!(handler.position(), 2);
    }
}
