//! The artwork gallery: usage totals plus every artwork's reveal status.

use std::io::{self, BufRead, Write};

use pomodoro_core::rewards::{art_lines, Dimensions};
use pomodoro_core::{ArtProvider, Artwork, ArtworkStatus};
use tracing::warn;

use super::{stats, App, CliResult, Console, Flow};

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

pub fn show<R: BufRead, W: Write>(app: &App, console: &mut Console<R, W>) -> CliResult<Flow> {
    let catalog = app.rewards.catalog();
    loop {
        let progress = app.rewards.load();

        writeln!(console, "\n================================================")?;
        writeln!(console, "{RED}A R T W O R K   G A L L E R Y{RESET}")?;
        writeln!(console, "================================================")?;
        stats::write_totals(console, &app.usage.load())?;
        writeln!(console)?;
        for (i, artwork) in catalog.iter().enumerate() {
            let status = status_label(progress.status(catalog, i));
            writeln!(console, "{} - {} - {}", i + 1, artwork.name, status)?;
        }
        writeln!(console, "\n0 - Return to main menu")?;
        console.prompt()?;

        let Some(choice) = console.read_line()? else {
            return Ok(Flow::Exit);
        };
        if choice == "0" {
            return Ok(Flow::Continue);
        }

        let selected = choice
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=catalog.len()).contains(n));
        let Some(number) = selected else {
            writeln!(
                console,
                "Invalid selection. Enter a number between 1 and {} or 0 to return.",
                catalog.len()
            )?;
            continue;
        };

        let artwork = catalog[number - 1];
        match progress.status(catalog, number - 1) {
            ArtworkStatus::Completed => write_full(app.art.as_ref(), console, &artwork)?,
            ArtworkStatus::InProgress { unlocked, total } if unlocked > 0 => {
                writeln!(
                    console,
                    "\n{} - Progress ({unlocked}/{total} lines):\n",
                    artwork.name
                )?;
                write_partial(app.art.as_ref(), console, &artwork, unlocked)?;
            }
            _ => writeln!(
                console,
                "\n{} is locked. Complete previous artworks to unlock it.",
                artwork.name
            )?,
        }

        // Wait for Enter before redrawing the gallery.
        console.prompt()?;
        if console.read_line()?.is_none() {
            return Ok(Flow::Exit);
        }
    }
}

pub fn status_label(status: ArtworkStatus) -> String {
    match status {
        ArtworkStatus::Completed => "Completed".to_string(),
        ArtworkStatus::InProgress { unlocked, total } => {
            format!("In Progress ({unlocked}/{total} lines)")
        }
        ArtworkStatus::Locked => "Locked".to_string(),
    }
}

/// The first `lines` art lines of `artwork`.
pub fn write_partial(
    art: &dyn ArtProvider,
    out: &mut impl Write,
    artwork: &Artwork,
    lines: usize,
) -> io::Result<()> {
    let Some(content) = load(art, out, artwork)? else {
        return Ok(());
    };
    for line in art_lines(&content).take(lines) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Every art line of `artwork`, under a title with its size.
pub fn write_full(art: &dyn ArtProvider, out: &mut impl Write, artwork: &Artwork) -> io::Result<()> {
    let Some(content) = load(art, out, artwork)? else {
        return Ok(());
    };
    match Dimensions::parse(&content) {
        Some(size) => writeln!(out, "\n{} ({}x{})\n", artwork.name, size.columns, size.rows)?,
        None => writeln!(out, "\n{}\n", artwork.name)?,
    }
    for line in art_lines(&content) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn load(art: &dyn ArtProvider, out: &mut impl Write, artwork: &Artwork) -> io::Result<Option<String>> {
    let content = art.read(artwork.filename);
    if content.is_none() {
        warn!(filename = artwork.filename, "artwork file not found");
        writeln!(out, "Could not load artwork: {}", artwork.filename)?;
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use pomodoro_core::ARTWORKS;
    use std::time::Duration;
    use tempfile::TempDir;

    struct NoArt;

    impl ArtProvider for NoArt {
        fn read(&self, _filename: &str) -> Option<String> {
            None
        }
    }

    #[test]
    fn lists_totals_and_statuses() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir);
        app.usage.add_session(Duration::from_secs(90 * 60), 3).unwrap();
        app.rewards.unlock(2).unwrap();
        let mut console = console("0\n");

        assert_eq!(show(&app, &mut console).unwrap(), Flow::Continue);

        let out = output(console);
        assert!(out.contains("Total worktime: 1 hours, 30 minutes (1.50 hours)"));
        assert!(out.contains("Total pomodoro sessions completed: 3"));
        assert!(out.contains("1 - Mountain Sunrise - In Progress (2/11 lines)"));
        assert!(out.contains("2 - Sailboat - Locked"));
    }

    #[test]
    fn partial_reveal_shows_unlocked_lines_only() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir);
        app.rewards.unlock(2).unwrap();
        let mut console = console("1\n\n0\n");

        show(&app, &mut console).unwrap();

        let out = output(console);
        assert!(out.contains("Mountain Sunrise - Progress (2/11 lines):"));
        let content = app.art.read(ARTWORKS[0].filename).unwrap();
        let lines: Vec<&str> = art_lines(&content).collect();
        assert!(out.contains(lines[1]));
        assert!(!out.contains("DIMENSIONS:"));
    }

    #[test]
    fn completed_artwork_is_fully_revealed() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir);
        app.rewards.unlock(100).unwrap();
        let mut buf = Vec::new();

        write_full(app.art.as_ref(), &mut buf, &ARTWORKS[0]).unwrap();

        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Mountain Sunrise (40x11)"));
        assert_eq!(out.lines().count(), 3 + ARTWORKS[0].art_lines());
    }

    #[test]
    fn locked_and_invalid_selections() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir);
        let mut console = console("3\n\n9\n");

        // Input runs out on the gallery prompt
        assert_eq!(show(&app, &mut console).unwrap(), Flow::Exit);

        let out = output(console);
        assert!(out.contains("Coffee Break is locked."));
        assert!(out.contains("Invalid selection. Enter a number between 1 and 3 or 0 to return."));
    }

    #[test]
    fn missing_art_is_reported() {
        let mut buf = Vec::new();
        write_partial(&NoArt, &mut buf, &ARTWORKS[1], 3).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Could not load artwork: art/sailboat.txt\n"
        );
    }
}
