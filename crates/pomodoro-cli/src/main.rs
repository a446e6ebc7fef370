use clap::error::ErrorKind;
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::CliResult;

#[derive(Parser)]
#[command(
    name = "pomodoro",
    version,
    about = "Pomodoro Timer",
    after_help = "Run without options to start the interactive timer."
)]
struct Cli {
    /// Uninstall the program and remove its data directory
    #[arg(short, long, conflicts_with = "stats")]
    uninstall: bool,

    /// Show total usage statistics
    #[arg(short, long)]
    stats: bool,
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            if let Err(print_err) = e.print() {
                warn!(error = %print_err, "failed to print argument error");
            }
            eprintln!("Use 'pomodoro --help' for usage information");
            std::process::exit(1);
        }
    };

    let result = if cli.uninstall {
        commands::uninstall::run()
    } else if cli.stats {
        commands::stats::run()
    } else {
        run_interactive().await
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never mix with the menu on stdout.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// The menu blocks on stdin, so it runs on a blocking thread while the
/// runtime waits for an interrupt. In-flight session state is not saved.
async fn run_interactive() -> CliResult {
    let menu = tokio::task::spawn_blocking(commands::menu::run);
    tokio::select! {
        result = menu => result?,
        () = wait_for_shutdown() => std::process::exit(0),
    }
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received SIGINT, exiting"),
        () = terminate => info!("received SIGTERM, exiting"),
    }
}
