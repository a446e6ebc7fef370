//! # Pomodoro Core Library
//!
//! Business logic for the `pomodoro` terminal timer. The CLI binary is a thin
//! interactive layer over this crate.
//!
//! ## Architecture
//!
//! - **Session**: a schedule of four work intervals separated by breaks, a
//!   state machine that walks it, and a runner that waits out each step
//! - **Storage**: JSON documents for presets and usage under the data
//!   directory, plus TOML configuration
//! - **Rewards**: ASCII artworks revealed a few lines per completed pomodoro
//! - **Notify**: platform notification backends
//!
//! ## Key Components
//!
//! - [`SessionRunner`]: runs a session end to end
//! - [`DataDir`]: locates every persisted file
//! - [`Config`]: application configuration
//! - [`Notifier`]: trait for notification backends

pub mod error;
pub mod events;
pub mod notify;
pub mod rewards;
pub mod session;
pub mod storage;

pub use error::{CoreError, Result, ValidationError};
pub use events::Event;
pub use notify::{Notifier, NotifyError};
pub use rewards::{
    ArtProvider, Artwork, ArtworkProgress, ArtworkStatus, LayeredArt, RewardTracker, ARTWORKS,
};
pub use session::{
    Phase, SessionContext, SessionEngine, SessionOutcome, SessionPlan, SessionReport,
    SessionRunner, Sleeper, ThreadSleeper, Transition,
};
pub use storage::{Config, DataDir, Preset, PresetFile, PresetStore, UsageStats, UsageTracker};
