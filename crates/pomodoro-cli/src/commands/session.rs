use std::io::{self, BufRead, Write};

use pomodoro_core::{Event, Phase, SessionOutcome, SessionPlan, SessionRunner};
use tracing::info;

use super::{gallery, App, CliResult, Console, Flow};

/// Run a full session with `plan`, printing progress as it goes.
///
/// Returns [`Flow::Exit`] when the user cancels a notification dialog.
pub fn start<R: BufRead, W: Write>(
    app: &mut App,
    console: &mut Console<R, W>,
    plan: SessionPlan,
) -> CliResult<Flow> {
    app.context.remember(plan);
    let app = &*app;

    let runner = SessionRunner::new(app.notifier.as_ref(), &app.usage, &app.rewards)
        .with_presets(&app.presets)
        .with_lines_per_pomodoro(app.config.rewards.lines_per_pomodoro);

    let mut write_error = None;
    let outcome = runner.run(&plan, app.sleeper.as_ref(), |event| {
        if write_error.is_some() {
            return;
        }
        if let Err(e) = print_event(app, console, event) {
            write_error = Some(e);
        }
    });
    if let Some(e) = write_error {
        return Err(e.into());
    }

    match outcome {
        SessionOutcome::Completed(report) => {
            info!(
                work_intervals = report.work_intervals(),
                short_breaks = report.short_breaks(),
                long_breaks = report.long_breaks(),
                notification_failures = report.notification_failures,
                "session finished"
            );
            Ok(Flow::Continue)
        }
        SessionOutcome::Cancelled => {
            writeln!(console, "\nPomodoro cancelled.")?;
            Ok(Flow::Exit)
        }
    }
}

fn print_event<R, W: Write>(app: &App, console: &mut Console<R, W>, event: &Event) -> io::Result<()> {
    match event {
        Event::PhaseStarted {
            phase,
            duration_secs,
            ..
        } => {
            let minutes = *duration_secs as f64 / 60.0;
            match phase {
                Phase::Working { interval } => writeln!(console, "Work session {interval} started..."),
                Phase::Break { .. } => writeln!(console, "Break time ({minutes:.0} minutes)..."),
                Phase::LongBreak => writeln!(console, "Long break ({minutes:.0} minutes)..."),
                Phase::Idle | Phase::Done => Ok(()),
            }
        }
        Event::PhaseCompleted { transition, .. } if transition.to == Phase::LongBreak => {
            print_artwork_progress(app, console)
        }
        Event::ArtworkCompleted { name, .. } => {
            writeln!(console, "\n   Congratulations! You've completed {name}!")
        }
        Event::NotificationFailed { error, .. } => {
            writeln!(console, "Failed to send notification: {error}")
        }
        Event::SessionCompleted { work_intervals, .. } => {
            writeln!(console, "\nSession complete: {work_intervals} pomodoros done.")
        }
        _ => Ok(()),
    }
}

fn print_artwork_progress<R, W: Write>(app: &App, console: &mut Console<R, W>) -> io::Result<()> {
    let Some((artwork, unlocked)) = app.rewards.current() else {
        return writeln!(console, "\nCongratulations! You've completed all artworks!");
    };

    writeln!(console, "\nArtwork Progress:")?;
    writeln!(
        console,
        "   {}: {}/{} lines unlocked",
        artwork.name,
        unlocked,
        artwork.art_lines()
    )?;
    if unlocked > 0 {
        writeln!(console, "\n   Preview:")?;
        gallery::write_partial(app.art.as_ref(), console, &artwork, unlocked)?;
    }
    Ok(())
}
