//! Interval-boundary notifications.
//!
//! A [`Notifier`] shows a message through whatever the host offers: a modal
//! dialog on macOS, `notify-send` on Linux, or the terminal bell elsewhere.
//! The backend is picked once at startup by [`detect`].

mod backend;

pub use backend::{
    ConsoleNotifier, DialogNotifier, NotifySendNotifier, SilentNotifier, DIALOG_TITLE,
};

use std::process::ExitStatus;

use thiserror::Error;

/// Error type for notification delivery
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The user dismissed the dialog with Cancel
    #[error("notification cancelled by user")]
    Cancelled,

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Exited {
        program: &'static str,
        status: ExitStatus,
    },
}

pub trait Notifier {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    fn notify(&self, message: &str) -> Result<(), NotifyError>;
}

/// Pick the best backend for the current platform.
pub fn detect() -> Box<dyn Notifier> {
    #[cfg(target_os = "macos")]
    {
        if command_exists("osascript") {
            return Box::new(DialogNotifier);
        }
    }

    #[cfg(target_os = "linux")]
    {
        if command_exists("notify-send") {
            return Box::new(NotifySendNotifier);
        }
    }

    Box::new(ConsoleNotifier)
}

/// [`detect`], unless notifications are switched off.
pub fn from_config(enabled: bool) -> Box<dyn Notifier> {
    if enabled {
        detect()
    } else {
        Box::new(SilentNotifier)
    }
}

/// Check if a program is on `PATH`.
pub fn command_exists(program: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_notifications_are_silent() {
        let notifier = from_config(false);
        assert_eq!(notifier.name(), "silent");
        assert!(notifier.notify("hello").is_ok());
    }

    #[test]
    fn unknown_program_does_not_exist() {
        assert!(!command_exists("definitely-not-a-real-program-7f3a"));
    }
}
