use std::io::{self, Write};
use std::path::Path;

use pomodoro_core::storage::DataDir;
use tracing::warn;

use super::CliResult;

/// Where the install script puts the binary.
pub const INSTALL_PATH: &str = "/usr/local/bin/pomodoro";

/// `pomodoro --uninstall`: remove the data directory and explain how to
/// remove the binary, which needs elevated privileges.
pub fn run() -> CliResult {
    let mut stdout = io::stdout().lock();
    match DataDir::resolve() {
        Ok(data_dir) => uninstall(&mut stdout, Path::new(INSTALL_PATH), &data_dir)?,
        Err(e) => {
            warn!(error = %e, "cannot resolve data directory");
            writeln!(stdout, "Uninstalling Pomodoro Timer...")?;
            writeln!(stdout, "Error: Could not determine home directory")?;
        }
    }
    Ok(())
}

fn uninstall(out: &mut impl Write, binary: &Path, data_dir: &DataDir) -> io::Result<()> {
    writeln!(out, "Uninstalling Pomodoro Timer...")?;

    if binary.exists() {
        writeln!(out, "Found binary at {}", binary.display())?;
        writeln!(out, "Note: Removing the binary requires sudo privileges.")?;
        writeln!(out, "Please run: sudo rm {}", binary.display())?;
    } else {
        writeln!(
            out,
            "Binary not found at {} (may already be removed)",
            binary.display()
        )?;
    }

    if data_dir.exists() {
        writeln!(
            out,
            "\nRemoving configuration directory: {}",
            data_dir.path().display()
        )?;
        match data_dir.remove() {
            Ok(_) => writeln!(out, "Configuration removed successfully")?,
            Err(e) => writeln!(out, "Error: Could not remove config directory: {e}")?,
        }
    } else {
        writeln!(out, "\nNo configuration directory found")?;
    }

    writeln!(out, "\nUninstallation complete!")?;
    writeln!(
        out,
        "Don't forget to remove the binary with: sudo rm {}",
        binary.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn removes_existing_data_directory() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = DataDir::at(temp_dir.path().join("data"));
        data_dir.presets().upsert("Deep", 50, 10, 30).unwrap();
        let binary = temp_dir.path().join("pomodoro");
        std::fs::write(&binary, "").unwrap();

        let mut buf = Vec::new();
        uninstall(&mut buf, &binary, &data_dir).unwrap();

        let out = String::from_utf8(buf).unwrap();
        assert!(!data_dir.exists());
        assert!(out.contains("Found binary at"));
        assert!(out.contains("Configuration removed successfully"));
        assert!(out.contains("Uninstallation complete!"));
        // The binary is never removed by us
        assert!(binary.exists());
    }

    #[test]
    fn reports_missing_directory_and_binary() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = DataDir::at(temp_dir.path().join("absent"));

        let mut buf = Vec::new();
        uninstall(&mut buf, &temp_dir.path().join("no-binary"), &data_dir).unwrap();

        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("(may already be removed)"));
        assert!(out.contains("No configuration directory found"));
    }
}
