use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use tapr::{
    app_dirs::AppDirs,
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, Runner},
    ui, App, AppControl, RuntimeSettings,
};

/// tiny tap-frequency meter for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Tap the space bar or click the tap area repeatedly and watch elapsed time, tap count and taps per second update live. The first tap starts the session; pause and resume whenever you like."
)]
pub struct Cli {
    /// milliseconds between on-screen refreshes while running
    #[clap(short = 'i', long = "interval", value_name = "MS")]
    interval_ms: Option<u64>,

    /// ignore mouse clicks; tap with the space bar only
    #[clap(long)]
    no_mouse: bool,

    /// keep running when the terminal loses focus
    #[clap(long)]
    no_pause_on_blur: bool,

    /// write the resulting settings back to the config file
    #[clap(long)]
    save_config: bool,

    /// use this config file instead of the default location
    #[clap(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Overlay CLI flags on the persisted config
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(ms) = self.interval_ms {
            cfg.refresh_interval_ms = ms;
        }
        if self.no_mouse {
            cfg.mouse = false;
        }
        if self.no_pause_on_blur {
            cfg.pause_on_focus_lost = false;
        }
        cfg
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = AppDirs::log_dir().and_then(|dir| logging::init(&dir).ok());

    let store = cli.config_store();
    let cfg = cli.apply(store.load());
    if cli.save_config {
        store.save(&cfg)?;
        tracing::info!(path = %store.path().display(), "config saved");
    }
    let settings = RuntimeSettings::from(&cfg);
    tracing::info!(?settings, "starting tapr");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    if settings.mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(SystemClock, settings);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        DisableFocusChange,
        LeaveAlternateScreen,
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("exiting with error: {}", e);
    }
    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<SystemClock>,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new());

    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        let event = runner.step(app.refresh_due_in());
        match app.handle(event) {
            AppControl::Redraw => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
            AppControl::Idle => {}
            AppControl::Quit => break,
        }
    }

    Ok(())
}
