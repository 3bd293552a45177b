//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, InputMode};
use crate::config::UiSettings;
use crate::mixer::MixerState;

const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("space", "select sound"),
    ("h/l", "volume -/+"),
    ("p", "play"),
    ("s", "stop"),
    ("t", "cycle timer"),
    ("1-9", "timer preset"),
    ("c", "custom timer"),
    ("x", "timer off"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`, or `H:MM:SS` past an hour.
fn format_countdown(d: Duration) -> String {
    let secs = d.as_secs();
    if secs >= 3600 {
        format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else {
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// Ten-cell bar for a 0-100 volume.
fn volume_bar(level: u8) -> String {
    let filled = (usize::from(level.min(100)) + 5) / 10;
    format!("{}{}", "#".repeat(filled), ".".repeat(10 - filled))
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_padded() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

fn status_text(app: &App, now: Instant) -> String {
    let mut parts: Vec<String> = Vec::new();

    let state = match app.mixer.state() {
        MixerState::Idle => "Idle",
        MixerState::Selecting => "Selecting",
        MixerState::Playing => "Playing",
    };
    parts.push(format!(" {state}"));
    parts.push(format!(
        "Selected: {}",
        app.mixer.selection().selected_count()
    ));

    match (app.mixer.armed_minutes(), app.mixer.timer_remaining(now)) {
        (_, Some(left)) => parts.push(format!("Sleep in {}", format_countdown(left))),
        (Some(m), None) => parts.push(format!("Timer: {m} min")),
        (None, None) => parts.push("Timer: off".to_string()),
    }

    if let Some(ref h) = app.playback_handle {
        if let Ok(info) = h.lock() {
            if let Some(err) = &info.last_error {
                parts.push(format!("Audio: {err}"));
            }
        }
    }

    if let Some(dir) = &app.sounds_dir {
        parts.push(format!("Dir: {}", dir));
    }

    if let Some(msg) = &app.status {
        parts.push(msg.clone());
    }

    parts.join(" • ")
}

fn timer_line(app: &App) -> Line<'static> {
    let armed = app.mixer.armed_minutes();
    let mut spans: Vec<Span<'static>> = vec![Span::raw(" ")];

    let off = Span::raw(" off ");
    spans.push(if armed.is_none() { off.reversed() } else { off });

    let mut custom = armed.is_some();
    for (i, m) in app.timer_presets.iter().enumerate() {
        spans.push(Span::raw(" "));
        let label = if i < 9 {
            format!(" {}:{}m ", i + 1, m)
        } else {
            format!(" {}m ", m)
        };
        let span = Span::raw(label);
        if armed == Some(*m) {
            custom = false;
            spans.push(span.reversed());
        } else {
            spans.push(span);
        }
    }

    spans.push(Span::raw(" "));
    let custom_label = match armed {
        Some(m) if custom => Span::raw(format!(" c:{m}m ")).reversed(),
        _ => Span::raw(" c:custom "),
    };
    spans.push(custom_label);

    Line::from(spans)
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" drizzle ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status_par = Paragraph::new(status_text(app, now))
        .block(Block::bordered().padding(left_padded()).title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Sound list
    {
        let catalog = app.mixer.catalog();
        let items: Vec<ListItem> = catalog
            .iter()
            .map(|t| {
                let mark = if app.mixer.is_selected(&t.id) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let live = if app.mixer.is_live(&t.id) { " ~" } else { "" };
                let volume = app.mixer.volume(&t.id);
                let text = format!(
                    "{} {:<24} {} {:>3}%{}",
                    mark,
                    t.title,
                    volume_bar(volume),
                    volume,
                    live
                );
                ListItem::new(text)
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" sounds "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if !catalog.is_empty() {
            state.select(Some(app.selected));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    // Timer presets
    let timer = Paragraph::new(timer_line(app))
        .block(Block::default().borders(Borders::ALL).title(" sleep timer "));
    frame.render_widget(timer, chunks[3]);

    // Custom timer popup (keeps the list visible under it)
    if app.input_mode == InputMode::CustomTimer {
        let popup_area = centered_rect_sized(40, 5, chunks[2]);
        frame.render_widget(Clear, popup_area);

        let text = format!(
            "Minutes (1-{}): {}_",
            app.mixer.max_timer_minutes(),
            app.custom_timer
        );
        let popup = Paragraph::new(text).block(
            Block::default()
                .padding(left_padded())
                .borders(Borders::ALL)
                .title(" custom timer (enter sets, esc cancels) "),
        );
        frame.render_widget(popup, popup_area);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_padded()),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_formats_minutes_and_hours() {
        assert_eq!(format_countdown(Duration::from_secs(0)), "00:00");
        assert_eq!(format_countdown(Duration::from_secs(15 * 60)), "15:00");
        assert_eq!(format_countdown(Duration::from_secs(3599)), "59:59");
        assert_eq!(format_countdown(Duration::from_secs(3600 + 61)), "1:01:01");
    }

    #[test]
    fn volume_bar_rounds_to_tenths() {
        assert_eq!(volume_bar(0), "..........");
        assert_eq!(volume_bar(44), "####......");
        assert_eq!(volume_bar(45), "#####.....");
        assert_eq!(volume_bar(100), "##########");
    }

    #[test]
    fn controls_text_lists_every_binding() {
        let text = controls_text();
        for (k, _) in CONTROLS {
            assert!(text.contains(&format!("[{k}]")));
        }
    }
}
