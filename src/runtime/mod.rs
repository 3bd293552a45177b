use std::env;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings::LoadedSettings { settings, fallback } = settings::load_settings();
    logging::init(&settings.log);
    log::info!("drizzle {} starting", env!("CARGO_PKG_VERSION"));

    let sounds_dir = startup::resolve_sounds_dir(env::args().nth(1), &settings);
    let mut app = startup::build_app(sounds_dir, &settings);
    if let Some(reason) = fallback {
        log::warn!("{reason}");
        app.set_status(reason);
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        log::error!("event loop failed: {e}");
        app.shutdown(std::time::Duration::ZERO);
    }
    log::info!("drizzle exiting");

    run_result
}
