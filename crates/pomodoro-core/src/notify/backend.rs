//! Notification backends for different platforms

use std::io::Write;
use std::process::Command;

use tracing::debug;

use super::{NotifyError, Notifier};

/// Title of the macOS dialog.
pub const DIALOG_TITLE: &str = "P O M O D O R O";

const NOTIFY_SEND_SUMMARY: &str = "Pomodoro";

/// Modal `osascript` dialog. Pressing Cancel makes osascript exit with 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn name(&self) -> &'static str {
        "osascript"
    }

    fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let script = format!(
            r#"display dialog "{}" with title "{}""#,
            escape_applescript(message),
            DIALOG_TITLE
        );
        let status = Command::new("osascript")
            .args(["-e", &script])
            .status()
            .map_err(|source| NotifyError::Spawn {
                program: "osascript",
                source,
            })?;

        match status.code() {
            Some(0) => Ok(()),
            Some(1) => Err(NotifyError::Cancelled),
            _ => Err(NotifyError::Exited {
                program: "osascript",
                status,
            }),
        }
    }
}

/// Desktop notification through `notify-send`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotifySendNotifier;

impl Notifier for NotifySendNotifier {
    fn name(&self) -> &'static str {
        "notify-send"
    }

    fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let status = Command::new("notify-send")
            .args([NOTIFY_SEND_SUMMARY, message])
            .status()
            .map_err(|source| NotifyError::Spawn {
                program: "notify-send",
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(NotifyError::Exited {
                program: "notify-send",
                status,
            })
        }
    }
}

/// Rings the terminal bell and prints the message.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn name(&self) -> &'static str {
        "console"
    }

    fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "\x07\n>> {message}\n")
            .and_then(|()| stdout.flush())
            .map_err(|source| NotifyError::Spawn {
                program: "stdout",
                source,
            })
    }
}

/// Drops every message. Used when notifications are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn name(&self) -> &'static str {
        "silent"
    }

    fn notify(&self, message: &str) -> Result<(), NotifyError> {
        debug!(text = message, "notification suppressed");
        Ok(())
    }
}

fn escape_applescript(message: &str) -> String {
    message.replace('\\', "\\\\").replace('"', "\\\"")
}
