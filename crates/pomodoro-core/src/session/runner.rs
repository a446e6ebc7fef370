//! Drives a [`SessionEngine`] in real time.
//!
//! For every step the runner sleeps, advances the engine, records finished
//! work intervals, and notifies the user. Persistence failures are logged and
//! otherwise ignored; a failed notification is reported through an event and
//! the session keeps going. Only a cancelled dialog stops the run early.

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::engine::{Phase, SessionEngine, Transition};
use super::{SessionPlan, WORK_INTERVALS};
use crate::events::Event;
use crate::notify::{Notifier, NotifyError};
use crate::rewards::RewardTracker;
use crate::storage::{PresetFile, UsageTracker};

/// Blocks for the length of a step.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed(SessionReport),
    /// The user cancelled a notification dialog.
    Cancelled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub transitions: Vec<Transition>,
    pub completed_artworks: Vec<&'static str>,
    pub notification_failures: usize,
}

impl SessionReport {
    pub fn work_intervals(&self) -> usize {
        self.transitions
            .iter()
            .filter(|t| matches!(t.from, Phase::Working { .. }))
            .count()
    }

    pub fn short_breaks(&self) -> usize {
        self.transitions
            .iter()
            .filter(|t| matches!(t.to, Phase::Break { .. }))
            .count()
    }

    pub fn long_breaks(&self) -> usize {
        self.transitions
            .iter()
            .filter(|t| t.to == Phase::LongBreak)
            .count()
    }
}

pub struct SessionRunner<'a> {
    notifier: &'a dyn Notifier,
    usage: &'a UsageTracker,
    rewards: &'a RewardTracker,
    presets: Option<&'a PresetFile>,
    lines_per_pomodoro: usize,
}

impl<'a> SessionRunner<'a> {
    pub fn new(
        notifier: &'a dyn Notifier,
        usage: &'a UsageTracker,
        rewards: &'a RewardTracker,
    ) -> Self {
        Self {
            notifier,
            usage,
            rewards,
            presets: None,
            lines_per_pomodoro: 1,
        }
    }

    /// Record each started plan as the last used preset.
    pub fn with_presets(mut self, presets: &'a PresetFile) -> Self {
        self.presets = Some(presets);
        self
    }

    pub fn with_lines_per_pomodoro(mut self, lines: u32) -> Self {
        self.lines_per_pomodoro = lines as usize;
        self
    }

    /// Run one full session, reporting progress to `observer`.
    pub fn run<F>(&self, plan: &SessionPlan, sleeper: &dyn Sleeper, mut observer: F) -> SessionOutcome
    where
        F: FnMut(&Event),
    {
        if let Some(presets) = self.presets {
            let (work, short_break, long_break) = plan.minutes();
            if let Err(e) = presets.record_last_used(work, short_break, long_break) {
                debug!(error = %e, "could not record last used preset");
            }
        }

        let mut engine = SessionEngine::new(plan);
        info!(
            notifier = self.notifier.name(),
            work_secs = plan.work.as_secs(),
            total_secs = engine.schedule().total_duration().as_secs(),
            "session started"
        );
        observer(&Event::SessionStarted {
            work_secs: plan.work.as_secs(),
            short_break_secs: plan.short_break.as_secs(),
            long_break_secs: plan.long_break.as_secs(),
            at: Utc::now(),
        });

        let mut report = SessionReport::default();
        engine.start();

        while let Some(step) = engine.current_step() {
            let duration = step.duration;
            observer(&Event::PhaseStarted {
                phase: engine.phase(),
                label: step.label.clone(),
                duration_secs: step.duration_secs(),
                at: Utc::now(),
            });

            sleeper.sleep(duration);

            let Some(transition) = engine.finish_step() else {
                break;
            };
            report.transitions.push(transition);
            if matches!(transition.from, Phase::Working { .. }) {
                self.record_work(plan.work, &mut report, &mut observer);
            }
            observer(&Event::PhaseCompleted {
                transition,
                at: Utc::now(),
            });

            let Some(message) = notification_message(transition, plan) else {
                continue;
            };
            match self.notifier.notify(&message) {
                Ok(()) => {}
                Err(NotifyError::Cancelled) => {
                    info!("session cancelled from notification");
                    return SessionOutcome::Cancelled;
                }
                Err(e) => {
                    warn!(notifier = self.notifier.name(), error = %e, "failed to send notification");
                    report.notification_failures += 1;
                    observer(&Event::NotificationFailed {
                        message,
                        error: e.to_string(),
                        at: Utc::now(),
                    });
                }
            }
        }

        observer(&Event::SessionCompleted {
            work_intervals: WORK_INTERVALS,
            at: Utc::now(),
        });
        SessionOutcome::Completed(report)
    }

    fn record_work<F>(&self, work: Duration, report: &mut SessionReport, observer: &mut F)
    where
        F: FnMut(&Event),
    {
        if let Err(e) = self.usage.add_session(work, 1) {
            debug!(error = %e, "could not record usage");
        }
        match self.rewards.unlock(self.lines_per_pomodoro) {
            Ok(Some(artwork)) => {
                report.completed_artworks.push(artwork.name);
                observer(&Event::ArtworkCompleted {
                    name: artwork.name.to_string(),
                    at: Utc::now(),
                });
            }
            Ok(None) => {}
            Err(e) => debug!(error = %e, "could not record artwork progress"),
        }
    }
}

fn notification_message(transition: Transition, plan: &SessionPlan) -> Option<String> {
    match transition.to {
        Phase::Break { .. } => Some(format!(
            "Take a break! You worked for {:.0} minutes.\nA {:.0} minute break starts now.",
            as_minutes(plan.work),
            as_minutes(plan.short_break)
        )),
        Phase::Working { .. } => Some("Break over! Time to get back to work.".to_string()),
        Phase::LongBreak => Some(format!(
            "Great job! Time for a longer {:.0} minute break.",
            as_minutes(plan.long_break)
        )),
        Phase::Done => Some(
            "You have completed your pomodoro session. Press ok to restart, or cancel to exit."
                .to_string(),
        ),
        Phase::Idle => None,
    }
}

fn as_minutes(duration: Duration) -> f64 {
    duration.as_secs_f64() / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    use crate::rewards::Artwork;
    use crate::storage::DataDir;

    #[derive(Default)]
    struct RecordingSleeper {
        slept: RefCell<Vec<Duration>>,
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.slept.borrow_mut().push(duration);
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: RefCell<Vec<String>>,
        cancel_on: Option<usize>,
        fail: bool,
    }

    impl Notifier for RecordingNotifier {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn notify(&self, message: &str) -> Result<(), NotifyError> {
            let mut messages = self.messages.borrow_mut();
            messages.push(message.to_string());
            if self.cancel_on == Some(messages.len()) {
                return Err(NotifyError::Cancelled);
            }
            if self.fail {
                return Err(NotifyError::Spawn {
                    program: "recording",
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
                });
            }
            Ok(())
        }
    }

    const TINY: &[Artwork] = &[Artwork {
        name: "Tiny",
        filename: "tiny.txt",
        total_lines: 4,
    }];

    fn plan() -> SessionPlan {
        SessionPlan::from_minutes(25, 5, 20)
    }

    #[test]
    fn default_plan_runs_three_short_breaks_and_one_long_break() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = DataDir::at(temp_dir.path());
        let (usage, rewards) = (data_dir.usage(), data_dir.rewards());
        let notifier = RecordingNotifier::default();
        let sleeper = RecordingSleeper::default();

        let outcome = SessionRunner::new(&notifier, &usage, &rewards).run(&plan(), &sleeper, |_| {});

        let SessionOutcome::Completed(report) = outcome else {
            panic!("session should complete");
        };
        assert_eq!(report.work_intervals(), 4);
        assert_eq!(report.short_breaks(), 3);
        assert_eq!(report.long_breaks(), 1);
        assert_eq!(report.transitions.last().unwrap().to, Phase::Done);

        let minutes: Vec<u64> = sleeper.slept.borrow().iter().map(|d| d.as_secs() / 60).collect();
        assert_eq!(minutes, [25, 5, 25, 5, 25, 5, 25, 20]);

        let messages = notifier.messages.borrow();
        assert_eq!(messages.len(), 8);
        assert!(messages[0].starts_with("Take a break! You worked for 25 minutes."));
        assert_eq!(messages[1], "Break over! Time to get back to work.");
        assert_eq!(messages[6], "Great job! Time for a longer 20 minute break.");
        assert!(messages[7].starts_with("You have completed your pomodoro session."));
    }

    #[test]
    fn each_work_interval_is_recorded() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = DataDir::at(temp_dir.path());
        let (usage, rewards) = (data_dir.usage(), data_dir.rewards().with_catalog(TINY));
        let notifier = RecordingNotifier::default();

        let outcome = SessionRunner::new(&notifier, &usage, &rewards)
            .with_lines_per_pomodoro(1)
            .run(&plan(), &RecordingSleeper::default(), |_| {});

        let stats = usage.load();
        assert_eq!(stats.total_pomodoros, 4);
        assert!((stats.total_hours - 100.0 / 60.0).abs() < 1e-9);

        // Three revealable lines: the third pomodoro finishes the artwork.
        let SessionOutcome::Completed(report) = outcome else {
            panic!("session should complete");
        };
        assert_eq!(report.completed_artworks, ["Tiny"]);
        assert!(rewards.load().is_complete(TINY));
    }

    #[test]
    fn records_plan_as_last_used_preset() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = DataDir::at(temp_dir.path());
        let (usage, rewards, presets) = (data_dir.usage(), data_dir.rewards(), data_dir.presets());
        let notifier = RecordingNotifier::default();

        SessionRunner::new(&notifier, &usage, &rewards)
            .with_presets(&presets)
            .run(&SessionPlan::from_minutes(40, 8, 30), &RecordingSleeper::default(), |_| {});

        let last = presets.load().last_used_preset.unwrap();
        assert_eq!(
            (last.work_minutes, last.break_minutes, last.longer_break_minutes),
            (40, 8, 30)
        );
    }

    #[test]
    fn cancelled_dialog_stops_the_session() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = DataDir::at(temp_dir.path());
        let (usage, rewards) = (data_dir.usage(), data_dir.rewards());
        let notifier = RecordingNotifier {
            cancel_on: Some(2),
            ..Default::default()
        };
        let sleeper = RecordingSleeper::default();

        let outcome = SessionRunner::new(&notifier, &usage, &rewards).run(&plan(), &sleeper, |_| {});

        assert_eq!(outcome, SessionOutcome::Cancelled);
        assert_eq!(sleeper.slept.borrow().len(), 2);
        assert_eq!(usage.load().total_pomodoros, 1);
    }

    #[test]
    fn failed_notifications_do_not_stop_the_session() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = DataDir::at(temp_dir.path());
        let (usage, rewards) = (data_dir.usage(), data_dir.rewards());
        let notifier = RecordingNotifier {
            fail: true,
            ..Default::default()
        };
        let mut failures = 0;

        let outcome = SessionRunner::new(&notifier, &usage, &rewards).run(&plan(), &RecordingSleeper::default(), |event| {
            if matches!(event, Event::NotificationFailed { .. }) {
                failures += 1;
            }
        });

        let SessionOutcome::Completed(report) = outcome else {
            panic!("session should complete");
        };
        assert_eq!(report.notification_failures, 8);
        assert_eq!(failures, 8);
    }

    #[test]
    fn unwritable_storage_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the data directory should be.
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let data_dir = DataDir::at(blocker.join("data"));
        let (usage, rewards) = (data_dir.usage(), data_dir.rewards());
        let notifier = RecordingNotifier::default();

        let outcome = SessionRunner::new(&notifier, &usage, &rewards).run(&plan(), &RecordingSleeper::default(), |_| {});

        assert!(matches!(outcome, SessionOutcome::Completed(_)));
        assert_eq!(usage.load().total_pomodoros, 0);
    }

    #[test]
    fn events_follow_the_phases() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = DataDir::at(temp_dir.path());
        let (usage, rewards) = (data_dir.usage(), data_dir.rewards());
        let notifier = RecordingNotifier::default();
        let mut started = Vec::new();

        SessionRunner::new(&notifier, &usage, &rewards).run(&plan(), &RecordingSleeper::default(), |event| {
            if let Event::PhaseStarted { phase, .. } = event {
                started.push(*phase);
            }
        });

        assert_eq!(started.len(), 8);
        assert_eq!(started[0], Phase::Working { interval: 1 });
        assert_eq!(started[1], Phase::Break { after_interval: 1 });
        assert_eq!(started[6], Phase::Working { interval: 4 });
        assert_eq!(started[7], Phase::LongBreak);
    }
}
