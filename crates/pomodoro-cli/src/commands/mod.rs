//! Interactive commands and the state they share.

pub mod gallery;
pub mod menu;
pub mod presets;
pub mod session;
pub mod stats;
pub mod uninstall;

use std::io::{self, BufRead, Write};

use pomodoro_core::notify;
use pomodoro_core::rewards::LayeredArt;
use pomodoro_core::storage::DataDir;
use pomodoro_core::{
    ArtProvider, Config, Notifier, PresetFile, RewardTracker, SessionContext, Sleeper,
    ThreadSleeper, UsageTracker,
};
use tracing::{debug, warn};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What the menu should do after a command returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Everything an interactive command needs.
pub struct App {
    pub config: Config,
    pub presets: PresetFile,
    pub usage: UsageTracker,
    pub rewards: RewardTracker,
    pub art: Box<dyn ArtProvider>,
    pub notifier: Box<dyn Notifier>,
    pub sleeper: Box<dyn Sleeper>,
    pub context: SessionContext,
}

impl App {
    /// Open the user's data directory with the platform notifier.
    pub fn open(err: &mut impl Write) -> io::Result<Self> {
        Self::from_resolved(DataDir::resolve(), Box::new(ThreadSleeper), err)
    }

    /// Build the app from a data directory lookup. When the lookup failed the
    /// reason goes to `err` and the app runs on defaults without saving
    /// presets, usage or artwork progress.
    pub fn from_resolved(
        resolved: pomodoro_core::Result<DataDir>,
        sleeper: Box<dyn Sleeper>,
        err: &mut impl Write,
    ) -> io::Result<Self> {
        let data_dir = match resolved {
            Ok(data_dir) => data_dir,
            Err(e) => {
                warn!(error = %e, "running without a data directory");
                writeln!(
                    err,
                    "{e}. Presets, statistics and artwork progress will not be saved."
                )?;
                let config = Config::default();
                let notifier = notify::from_config(config.notifications.enabled);
                return Ok(Self::detached(config, notifier, sleeper));
            }
        };

        let config = Config::load_or_default(&data_dir);
        let notifier = notify::from_config(config.notifications.enabled);
        debug!(
            data_dir = %data_dir.path().display(),
            notifier = notifier.name(),
            "opened app"
        );
        Ok(Self::new(data_dir, config, notifier, sleeper))
    }

    pub fn new(
        data_dir: DataDir,
        config: Config,
        notifier: Box<dyn Notifier>,
        sleeper: Box<dyn Sleeper>,
    ) -> Self {
        Self::with_trackers(
            config,
            data_dir.presets(),
            data_dir.usage(),
            data_dir.rewards(),
            notifier,
            sleeper,
        )
    }

    /// An app whose trackers never touch the disk.
    pub fn detached(
        config: Config,
        notifier: Box<dyn Notifier>,
        sleeper: Box<dyn Sleeper>,
    ) -> Self {
        Self::with_trackers(
            config,
            PresetFile::detached(),
            UsageTracker::detached(),
            RewardTracker::detached(),
            notifier,
            sleeper,
        )
    }

    fn with_trackers(
        config: Config,
        presets: PresetFile,
        usage: UsageTracker,
        rewards: RewardTracker,
        notifier: Box<dyn Notifier>,
        sleeper: Box<dyn Sleeper>,
    ) -> Self {
        let context = SessionContext::from_store(&presets.load(), config.default_plan());
        Self {
            art: Box::new(LayeredArt::standard()),
            config,
            presets,
            usage,
            rewards,
            notifier,
            sleeper,
            context,
        }
    }
}

/// Line-oriented terminal I/O.
///
/// Writes go straight to the output; `Console` implements [`Write`] so the
/// usual `writeln!` works on it.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.output, "\n❯  ")?;
        self.output.flush()
    }

    /// Read one trimmed line. `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Print `question` without a newline and read the answer.
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        self.read_line()
    }
}

impl<R, W: Write> Write for Console<R, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}
