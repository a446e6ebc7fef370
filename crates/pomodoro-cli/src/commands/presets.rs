//! Preset selection, custom timers and preset deletion.

use std::io::{BufRead, Write};

use pomodoro_core::{Preset, SessionPlan};
use tracing::warn;

use super::{session, App, CliResult, Console, Flow};

/// Menu option 2: pick a saved preset or create a custom timer.
pub fn select<R: BufRead, W: Write>(app: &mut App, console: &mut Console<R, W>) -> CliResult<Flow> {
    let store = app.presets.load();
    if store.is_empty() {
        return create_custom(app, console);
    }

    writeln!(console, "\nSaved presets:")?;
    write_list(console, &store.presets)?;
    writeln!(console, "{} - Create new custom timer", store.len() + 1)?;
    writeln!(console, "0 - Return to main menu")?;
    console.prompt()?;

    let Some(answer) = console.read_line()? else {
        return Ok(Flow::Exit);
    };
    match answer.parse::<usize>() {
        Ok(0) => Ok(Flow::Continue),
        Ok(n) if n <= store.len() => {
            let plan = store.presets[n - 1].plan();
            session::start(app, console, plan)
        }
        Ok(n) if n == store.len() + 1 => create_custom(app, console),
        _ => {
            writeln!(console, "Invalid selection.")?;
            Ok(Flow::Continue)
        }
    }
}

/// Prompt for the three durations, optionally save them, then start.
pub fn create_custom<R: BufRead, W: Write>(
    app: &mut App,
    console: &mut Console<R, W>,
) -> CliResult<Flow> {
    let defaults = app.config.schedule.clone();
    let questions = [
        ("How long are your working intervals (in minutes)", defaults.focus_duration),
        ("How long is your break for (in minutes)", defaults.short_break),
        ("How long is your longer break for (in minutes)", defaults.long_break),
    ];

    let mut minutes = [0u32; 3];
    for (slot, (question, default)) in minutes.iter_mut().zip(questions) {
        let Some(answer) = console.ask(&format!("{question} [{default}]: "))? else {
            return Ok(Flow::Exit);
        };
        match parse_minutes(&answer, default) {
            Some(value) => *slot = value,
            None => {
                writeln!(console, "Please enter a valid positive number for duration.")?;
                return Ok(Flow::Continue);
            }
        }
    }
    let [work, short_break, long_break] = minutes;

    let Some(save) = console.ask("Save as preset? (y/n) [n]: ")? else {
        return Ok(Flow::Exit);
    };
    if matches!(save.to_lowercase().as_str(), "y" | "yes") {
        let Some(name) = console.ask("Preset name: ")? else {
            return Ok(Flow::Exit);
        };
        if !name.is_empty() {
            match app.presets.upsert(&name, work, short_break, long_break) {
                Ok(()) => writeln!(console, "Preset '{name}' saved!")?,
                Err(e) => {
                    warn!(error = %e, "failed to save preset");
                    writeln!(console, "Could not save preset: {e}")?;
                }
            }
        }
    }

    session::start(app, console, SessionPlan::from_minutes(work, short_break, long_break))
}

/// Menu option 3. Keeps offering deletions until the user returns or no
/// presets are left.
pub fn delete<R: BufRead, W: Write>(app: &App, console: &mut Console<R, W>) -> CliResult<Flow> {
    loop {
        let store = app.presets.load();
        if store.is_empty() {
            writeln!(console, "\nNo presets to delete.")?;
            return Ok(Flow::Continue);
        }

        writeln!(console, "\nDelete a preset:")?;
        write_list(console, &store.presets)?;
        writeln!(console, "0 - Return to main menu")?;
        console.prompt()?;

        let Some(answer) = console.read_line()? else {
            return Ok(Flow::Exit);
        };
        let choice = answer.parse::<usize>().ok().filter(|n| *n <= store.len());
        match choice {
            None => writeln!(
                console,
                "\nInvalid input. Enter a number between 1 and {} to delete a preset, or 0 to return to main menu.",
                store.len()
            )?,
            Some(0) => return Ok(Flow::Continue),
            // The menu is 1-based, storage is 0-based.
            Some(n) => match app.presets.delete(n - 1) {
                Ok(removed) => writeln!(console, "Preset '{}' deleted successfully.", removed.name)?,
                Err(e) => {
                    warn!(error = %e, "failed to delete preset");
                    writeln!(console, "Error: Could not save changes.")?;
                }
            },
        }
    }
}

fn write_list(out: &mut impl Write, presets: &[Preset]) -> std::io::Result<()> {
    for (i, preset) in presets.iter().enumerate() {
        writeln!(
            out,
            "{} - {} ({} min work, {} min break)",
            i + 1,
            preset.name,
            preset.work_minutes,
            preset.break_minutes
        )?;
    }
    Ok(())
}

/// Empty input picks `default`; anything but a positive integer is rejected.
fn parse_minutes(input: &str, default: u32) -> Option<u32> {
    if input.is_empty() {
        return Some(default);
    }
    input.parse::<u32>().ok().filter(|m| *m > 0)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_minutes_rules() {
        assert_eq!(parse_minutes("", 25), Some(25));
        assert_eq!(parse_minutes("40", 25), Some(40));
        assert_eq!(parse_minutes("0", 25), None);
        assert_eq!(parse_minutes("-5", 25), None);
        assert_eq!(parse_minutes("ten", 25), None);
    }

    #[test]
    fn custom_timer_with_defaults_and_saved_preset() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);
        let mut console = console("\n10\n\ny\nFocus\n");

        let flow = create_custom(&mut app, &mut console).unwrap();
        assert_eq!(flow, Flow::Continue);

        let store = app.presets.load();
        assert_eq!(store.presets, [Preset::new("Focus", 25, 10, 20)]);
        assert_eq!(app.context.last_used().minutes(), (25, 10, 20));

        let out = output(console);
        assert!(out.contains("How long are your working intervals (in minutes) [25]: "));
        assert!(out.contains("Preset 'Focus' saved!"));
        assert!(out.contains("Work session 4 started..."));
    }

    #[test]
    fn invalid_duration_returns_to_menu() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);
        let mut console = console("abc\n");

        assert_eq!(create_custom(&mut app, &mut console).unwrap(), Flow::Continue);

        let out = output(console);
        assert!(out.contains("Please enter a valid positive number for duration."));
        assert!(!out.contains("Work session"));
        assert_eq!(app.usage.total_pomodoros(), 0);
    }

    #[test]
    fn select_runs_saved_preset() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);
        app.presets.upsert("Short", 15, 3, 10).unwrap();
        app.presets.upsert("Long", 50, 10, 30).unwrap();
        let mut console = console("2\n");

        select(&mut app, &mut console).unwrap();

        let out = output(console);
        assert!(out.contains("1 - Short (15 min work, 3 min break)"));
        assert!(out.contains("3 - Create new custom timer"));
        assert!(out.contains("Break time (10 minutes)..."));
        assert_eq!(app.context.last_used().minutes(), (50, 10, 30));
    }

    #[test]
    fn select_rejects_out_of_range() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);
        app.presets.upsert("Only", 15, 3, 10).unwrap();
        let mut console = console("7\n");

        assert_eq!(select(&mut app, &mut console).unwrap(), Flow::Continue);
        assert!(output(console).contains("Invalid selection."));
    }

    #[test]
    fn delete_middle_preset_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir);
        for (name, work) in [("A", 10), ("B", 20), ("C", 30)] {
            app.presets.upsert(name, work, 5, 15).unwrap();
        }
        let mut console = console("5\n2\n0\n");

        assert_eq!(delete(&app, &mut console).unwrap(), Flow::Continue);

        let names: Vec<String> = app.presets.load().presets.into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["A", "C"]);
        let out = output(console);
        assert!(out.contains("Invalid input. Enter a number between 1 and 3"));
        assert!(out.contains("Preset 'B' deleted successfully."));
    }

    #[test]
    fn delete_until_empty() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir);
        app.presets.upsert("Solo", 25, 5, 20).unwrap();
        let mut console = console("1\n");

        assert_eq!(delete(&app, &mut console).unwrap(), Flow::Continue);
        assert!(output(console).contains("No presets to delete."));
    }
}
