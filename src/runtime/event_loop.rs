use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, InputMode};
use crate::config;
use crate::ui;

/// Main terminal event loop: advances the sleep timer, draws the UI and
/// handles input. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let now = Instant::now();
        app.tick(now);

        terminal.draw(|f| ui::draw(f, app, &settings.ui, now))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
) -> Result<bool, Box<dyn std::error::Error>> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.shutdown(Duration::from_millis(settings.audio.quit_fade_out_ms));
        return Ok(true);
    }

    if app.input_mode == InputMode::CustomTimer {
        match key.code {
            KeyCode::Esc => app.cancel_custom_timer(),
            KeyCode::Enter => app.submit_custom_timer(),
            KeyCode::Backspace => app.pop_timer_char(),
            KeyCode::Char(c) => app.push_timer_char(c),
            _ => {}
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => {
            app.shutdown(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(),
        KeyCode::Char('l') | KeyCode::Char('+') | KeyCode::Right => app.step_volume(true),
        KeyCode::Char('h') | KeyCode::Char('-') | KeyCode::Left => app.step_volume(false),
        KeyCode::Char('p') => app.play(Instant::now()),
        KeyCode::Char('s') => app.stop(),
        KeyCode::Char('t') => app.cycle_preset(),
        KeyCode::Char('x') => app.disarm_timer(),
        KeyCode::Char('c') => app.begin_custom_timer(),
        KeyCode::Char(d @ '1'..='9') => {
            // '1' is the first preset.
            let index = d as usize - '1' as usize;
            app.arm_preset(index);
        }
        _ => {}
    }

    Ok(false)
}
