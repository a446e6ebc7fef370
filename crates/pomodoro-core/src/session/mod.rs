//! The work/break/long-break session loop.
//!
//! A session is four work intervals with a short break after each one except
//! the last, followed by a single long break:
//!
//! ```text
//! Working(1) -> Break(1) -> Working(2) -> Break(2) -> Working(3) -> Break(3)
//!     -> Working(4) -> LongBreak -> Done
//! ```

mod engine;
mod runner;
mod schedule;

pub use engine::{Phase, SessionEngine, Transition};
pub use runner::{SessionOutcome, SessionReport, SessionRunner, Sleeper, ThreadSleeper};
pub use schedule::{Schedule, Step, StepType};

use std::time::Duration;

use crate::storage::PresetStore;

/// Work intervals per session.
pub const WORK_INTERVALS: u32 = 4;

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 20;

/// Durations of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPlan {
    pub work: Duration,
    pub short_break: Duration,
    pub long_break: Duration,
}

impl SessionPlan {
    pub fn new(work: Duration, short_break: Duration, long_break: Duration) -> Self {
        Self {
            work,
            short_break,
            long_break,
        }
    }

    pub fn from_minutes(work: u32, short_break: u32, long_break: u32) -> Self {
        Self::new(minutes(work), minutes(short_break), minutes(long_break))
    }

    /// Whole minutes of (work, short break, long break), as stored in presets.
    pub fn minutes(&self) -> (u32, u32, u32) {
        (
            whole_minutes(self.work),
            whole_minutes(self.short_break),
            whole_minutes(self.long_break),
        )
    }

    /// A plan needs non-zero work and break durations to be worth starting.
    pub fn is_runnable(&self) -> bool {
        !self.work.is_zero() && !self.short_break.is_zero()
    }
}

impl Default for SessionPlan {
    fn default() -> Self {
        Self::from_minutes(
            DEFAULT_WORK_MINUTES,
            DEFAULT_BREAK_MINUTES,
            DEFAULT_LONG_BREAK_MINUTES,
        )
    }
}

/// State carried between menu actions in one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    last_used: SessionPlan,
}

impl SessionContext {
    pub fn new(last_used: SessionPlan) -> Self {
        Self { last_used }
    }

    /// Start from the persisted last used preset, or `fallback` without one.
    pub fn from_store(store: &PresetStore, fallback: SessionPlan) -> Self {
        let last_used = store
            .last_used_preset
            .as_ref()
            .map(|p| p.plan())
            .unwrap_or(fallback);
        Self::new(last_used)
    }

    pub fn last_used(&self) -> SessionPlan {
        self.last_used
    }

    pub fn remember(&mut self, plan: SessionPlan) {
        self.last_used = plan;
    }
}

fn minutes(n: u32) -> Duration {
    Duration::from_secs(u64::from(n) * 60)
}

fn whole_minutes(d: Duration) -> u32 {
    u32::try_from(d.as_secs() / 60).unwrap_or(u32::MAX)
}
