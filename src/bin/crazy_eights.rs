use crazy_eights::config::GameConfig;
use crazy_eights::telemetry;
use crazy_eights::tui::{app::AppState, controller};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Stdout};
use std::path::PathBuf;
use std::time::Duration;

const LOG_FILE_ENV: &str = "CRAZY_EIGHTS_LOG";

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn log_path() -> PathBuf {
    std::env::var_os(LOG_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("crazy-eights.log"))
}

fn main() -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!("crazy-eights TUI requires a real terminal (TTY).");
        println!("Run in Terminal and press q to quit. Version: {}", crazy_eights::VERSION);
        return Ok(());
    }
    let config = GameConfig::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let log = log_path();
    if let Err(err) = telemetry::init_tracing(&log) {
        eprintln!("logging disabled ({}): {err}", log.display());
    }
    tracing::info!(?config, "starting crazy-eights");

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(100);
    let mut app = AppState::new(config);

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
