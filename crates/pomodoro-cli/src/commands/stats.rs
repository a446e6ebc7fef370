use std::io::{self, Write};

use pomodoro_core::storage::DataDir;
use pomodoro_core::UsageStats;

use super::CliResult;

/// `pomodoro --stats`
pub fn run() -> CliResult {
    let data_dir = DataDir::resolve()?;
    let stats = data_dir.usage().load();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Pomodoro usage statistics\n")?;
    write_totals(&mut stdout, &stats)?;
    Ok(())
}

pub fn write_totals(out: &mut impl Write, stats: &UsageStats) -> io::Result<()> {
    let (hours, minutes) = stats.hours_and_minutes();
    writeln!(
        out,
        "Total worktime: {hours} hours, {minutes} minutes ({:.2} hours)",
        stats.total_hours
    )?;
    writeln!(
        out,
        "Total pomodoro sessions completed: {}",
        stats.total_pomodoros
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_split_hours_and_minutes() {
        let stats = UsageStats {
            total_hours: 2.75,
            total_pomodoros: 11,
            last_updated: None,
        };
        let mut buf = Vec::new();
        write_totals(&mut buf, &stats).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Total worktime: 2 hours, 45 minutes (2.75 hours)\n\
             Total pomodoro sessions completed: 11\n"
        );
    }

    #[test]
    fn zero_totals() {
        let mut buf = Vec::new();
        write_totals(&mut buf, &UsageStats::default()).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with("Total worktime: 0 hours, 0 minutes (0.00 hours)"));
    }
}
