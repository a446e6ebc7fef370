//! The main menu loop.

use std::io::{BufRead, Write};

use tracing::debug;

use super::{gallery, presets, session, App, CliResult, Console, Flow};

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DefaultTimer,
    Presets,
    DeletePresets,
    Gallery,
    LastUsed,
    Help,
    Quit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::DefaultTimer),
            "2" => Some(Self::Presets),
            "3" => Some(Self::DeletePresets),
            "a" => Some(Self::Gallery),
            "" => Some(Self::LastUsed),
            "h" => Some(Self::Help),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Run the interactive timer on the terminal.
pub fn run() -> CliResult {
    let mut app = App::open(&mut std::io::stderr())?;
    let mut console = Console::stdio();
    run_with(&mut app, &mut console)
}

/// Menu loop over any console. Returns when the user quits, input ends, or a
/// notification dialog is cancelled.
pub fn run_with<R: BufRead, W: Write>(app: &mut App, console: &mut Console<R, W>) -> CliResult {
    print_menu(app, console)?;
    loop {
        console.prompt()?;
        let Some(line) = console.read_line()? else {
            debug!("end of input");
            return Ok(());
        };

        let Some(choice) = MenuChoice::parse(&line) else {
            writeln!(console, "\nNot sure what that is. Try 'h' for help.")?;
            continue;
        };

        let flow = match choice {
            MenuChoice::Quit => return Ok(()),
            MenuChoice::Help => {
                print_help(console)?;
                continue;
            }
            MenuChoice::Gallery => {
                if gallery::show(app, console)? == Flow::Exit {
                    return Ok(());
                }
                print_menu(app, console)?;
                continue;
            }
            MenuChoice::LastUsed => {
                let plan = app.context.last_used();
                if !plan.is_runnable() {
                    writeln!(console, "\nPlease select a custom timer first.")?;
                    continue;
                }
                let (work, short_break, long_break) = plan.minutes();
                writeln!(
                    console,
                    "\nUsing last selected preset, {work} min work, {short_break} min break, {long_break} min longer break"
                )?;
                session::start(app, console, plan)?
            }
            MenuChoice::DefaultTimer => {
                let plan = app.config.default_plan();
                session::start(app, console, plan)?
            }
            MenuChoice::Presets => presets::select(app, console)?,
            MenuChoice::DeletePresets => presets::delete(app, console)?,
        };

        match flow {
            Flow::Exit => return Ok(()),
            Flow::Continue => print_menu(app, console)?,
        }
    }
}

fn print_menu(app: &App, out: &mut impl Write) -> std::io::Result<()> {
    let schedule = &app.config.schedule;
    writeln!(out, "\n================================================")?;
    writeln!(out, "{RED}P O M O D O R O{RESET}")?;
    writeln!(out, "================================================")?;
    writeln!(
        out,
        "1 - Use default values ({} min work, {} min break)",
        schedule.focus_duration, schedule.short_break
    )?;
    writeln!(out, "2 - Select custom values")?;
    writeln!(out, "3 - Delete presets\n")?;
    writeln!(out, "a - Artwork Gallery")?;
    writeln!(out, "⏎ - Use last selected preset")?;
    writeln!(out, "q - Quit the program")
}

fn print_help(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "\nCommands:")?;
    writeln!(out, "1 ─ Default timer")?;
    writeln!(out, "2 ─ Presets & custom timers")?;
    writeln!(out, "3 ─ Delete presets")?;
    writeln!(out, "a ─ Artwork Gallery")?;
    writeln!(out, "⏎ (Enter) ─ Last custom timer")?;
    writeln!(out, "\nh ─ Help")?;
    writeln!(out, "q ─ Quit")
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use pomodoro_core::SessionPlan;
    use tempfile::TempDir;

    #[test]
    fn parse_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::DefaultTimer));
        assert_eq!(MenuChoice::parse(" a "), Some(MenuChoice::Gallery));
        assert_eq!(MenuChoice::parse(""), Some(MenuChoice::LastUsed));
        assert_eq!(MenuChoice::parse("q"), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("x"), None);
        assert_eq!(MenuChoice::parse("Q"), None);
    }

    #[test]
    fn quit_and_end_of_input() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);

        let mut quit = console("q\n1\n");
        run_with(&mut app, &mut quit).unwrap();
        assert!(!output(quit).contains("Work session"));

        let mut empty = console("");
        run_with(&mut app, &mut empty).unwrap();
        assert!(output(empty).contains("P O M O D O R O"));
    }

    #[test]
    fn unknown_input_and_help() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);
        let mut console = console("zzz\nh\nq\n");

        run_with(&mut app, &mut console).unwrap();

        let out = output(console);
        assert!(out.contains("Not sure what that is. Try 'h' for help."));
        assert!(out.contains("Commands:"));
    }

    #[test]
    fn default_timer_runs_a_session_then_returns_to_menu() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);
        let mut console = console("1\nq\n");

        run_with(&mut app, &mut console).unwrap();

        let out = output(console);
        assert!(out.contains("Work session 4 started..."));
        assert_eq!(out.matches("P O M O D O R O").count(), 2);
        assert_eq!(app.usage.total_pomodoros(), 4);
    }

    #[test]
    fn enter_reuses_last_plan() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);
        app.context.remember(SessionPlan::from_minutes(40, 8, 30));
        let mut console = console("\nq\n");

        run_with(&mut app, &mut console).unwrap();

        let out = output(console);
        assert!(out.contains(
            "Using last selected preset, 40 min work, 8 min break, 30 min longer break"
        ));
        assert!(out.contains("Break time (8 minutes)..."));
    }

    #[test]
    fn enter_without_usable_plan_asks_for_custom_timer() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);
        app.context.remember(SessionPlan::from_minutes(0, 0, 0));
        let mut console = console("\nq\n");

        run_with(&mut app, &mut console).unwrap();
        assert!(output(console).contains("Please select a custom timer first."));
    }

    #[test]
    fn delete_with_no_presets() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir);
        let mut console = console("3\nq\n");

        run_with(&mut app, &mut console).unwrap();
        assert!(output(console).contains("No presets to delete."));
    }
}
