//! Session state machine.
//!
//! The engine only tracks where in the schedule a session is. It does not
//! sleep or talk to the outside world; [`super::SessionRunner`] waits out each
//! step and calls [`SessionEngine::finish_step`] when the time is up.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Working -> (Break -> Working)* -> LongBreak -> Done
//! ```

use serde::{Deserialize, Serialize};

use super::schedule::{Schedule, Step, StepType};
use super::SessionPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    /// 1-based work interval.
    Working { interval: u32 },
    /// Short break following work interval `after_interval`.
    Break { after_interval: u32 },
    LongBreak,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
}

#[derive(Debug, Clone)]
pub struct SessionEngine {
    schedule: Schedule,
    step_index: usize,
    phase: Phase,
}

impl SessionEngine {
    /// Create an engine for `plan`, in the `Idle` phase.
    pub fn new(plan: &SessionPlan) -> Self {
        Self {
            schedule: Schedule::from_plan(plan),
            step_index: 0,
            phase: Phase::Idle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// The step being waited out, if the session is underway.
    pub fn current_step(&self) -> Option<&Step> {
        match self.phase {
            Phase::Idle | Phase::Done => None,
            _ => self.schedule.get(self.step_index),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Enter the first work interval. Returns `None` if already started.
    pub fn start(&mut self) -> Option<Phase> {
        if self.phase != Phase::Idle {
            return None;
        }
        self.phase = phase_at(&self.schedule, 0);
        Some(self.phase)
    }

    /// The current step's time has elapsed; move to the next one.
    pub fn finish_step(&mut self) -> Option<Transition> {
        if matches!(self.phase, Phase::Idle | Phase::Done) {
            return None;
        }
        let from = self.phase;
        self.step_index += 1;
        self.phase = phase_at(&self.schedule, self.step_index);
        Some(Transition {
            from,
            to: self.phase,
        })
    }
}

fn phase_at(schedule: &Schedule, index: usize) -> Phase {
    let Some(step) = schedule.get(index) else {
        return Phase::Done;
    };
    let interval = schedule.steps()[..=index]
        .iter()
        .filter(|s| s.step_type == StepType::Focus)
        .count() as u32;
    match step.step_type {
        StepType::Focus => Phase::Working { interval },
        StepType::Break => Phase::Break {
            after_interval: interval,
        },
        StepType::LongBreak => Phase::LongBreak,
    }
}
