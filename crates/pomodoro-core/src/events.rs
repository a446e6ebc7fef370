use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{Phase, Transition};

/// Every step of a running session produces an Event.
/// The CLI turns them into progress lines on the terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        work_secs: u64,
        short_break_secs: u64,
        long_break_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseStarted {
        phase: Phase,
        label: String,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseCompleted {
        transition: Transition,
        at: DateTime<Utc>,
    },
    /// The last line of an artwork was unlocked.
    ArtworkCompleted {
        name: String,
        at: DateTime<Utc>,
    },
    /// A notification could not be delivered; the session carries on.
    NotificationFailed {
        message: String,
        error: String,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        work_intervals: u32,
        at: DateTime<Utc>,
    },
}
