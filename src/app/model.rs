//! Application model types: `App` and `InputMode`.
//!
//! The `App` struct holds the mixer, the cursor over the catalog and the
//! transient UI state (custom timer entry, status line).

use std::time::{Duration, Instant};

use crate::audio::{AudioService, PlaybackHandle};
use crate::catalog::Track;
use crate::config::Settings;
use crate::error::MixerError;
use crate::mixer::Mixer;

/// Which keys the event loop is currently routing to the app.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a custom timer value.
    CustomTimer,
}

/// The main application model.
pub struct App {
    pub mixer: Mixer<Box<dyn AudioService>>,
    pub selected: usize,
    pub input_mode: InputMode,
    pub custom_timer: String,
    pub timer_presets: Vec<u32>,
    pub volume_step: u8,
    pub status: Option<String>,
    pub playback_handle: Option<PlaybackHandle>,
    pub sounds_dir: Option<String>,
}

impl App {
    /// Create a new `App` around `mixer`, taking UI defaults from `settings`.
    pub fn new(mixer: Mixer<Box<dyn AudioService>>, settings: &Settings) -> Self {
        Self {
            mixer,
            selected: 0,
            input_mode: InputMode::Normal,
            custom_timer: String::new(),
            timer_presets: settings.timer.presets.clone(),
            volume_step: settings.ui.volume_step.max(1),
            status: None,
            playback_handle: None,
            sounds_dir: None,
        }
    }

    /// Attach a `PlaybackHandle` used to observe the audio backend.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    /// Record the sounds directory in the app state.
    pub fn set_sounds_dir(&mut self, dir: String) {
        self.sounds_dir = Some(dir);
    }

    pub fn has_tracks(&self) -> bool {
        !self.mixer.catalog().is_empty()
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.mixer.catalog().tracks().get(self.selected)
    }

    fn selected_id(&self) -> Option<String> {
        self.selected_track().map(|t| t.id.clone())
    }

    pub fn next(&mut self) {
        let len = self.mixer.catalog().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn prev(&mut self) {
        let len = self.mixer.catalog().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    /// Log a mixer error and surface it on the status line.
    fn report(&mut self, context: &str, err: &MixerError) {
        log::warn!("{context}: {err}");
        self.set_status(format!("{context}: {err}"));
    }

    /// Toggle the track under the cursor.
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.mixer.toggle_track(&id) {
            Ok(true) => self.set_status(format!("added {id} (press p to play)")),
            Ok(false) => self.set_status(format!("removed {id}")),
            Err(e) => self.report("toggle", &e),
        }
    }

    /// Raise (`up = true`) or lower the volume of the track under the cursor.
    pub fn step_volume(&mut self, up: bool) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let step = i32::from(self.volume_step);
        let delta = if up { step } else { -step };
        if let Err(e) = self.mixer.adjust_volume(&id, delta) {
            self.report("volume", &e);
        }
    }

    pub fn play(&mut self, now: Instant) {
        match self.mixer.play(now) {
            Ok(()) => {
                let count = self.mixer.session().map(<[String]>::len).unwrap_or(0);
                let msg = match (count, self.mixer.armed_minutes()) {
                    (0, _) => "nothing selected: playing silence".to_string(),
                    (n, Some(m)) => format!("playing {n} sound(s), stopping in {m} min"),
                    (n, None) => format!("playing {n} sound(s)"),
                };
                self.set_status(msg);
            }
            Err(e) => self.report("play", &e),
        }
    }

    pub fn stop(&mut self) {
        self.mixer.stop();
        self.set_status("stopped");
    }

    /// Arm the preset at `index` in `timer_presets`.
    pub fn arm_preset(&mut self, index: usize) {
        let Some(&minutes) = self.timer_presets.get(index) else {
            return;
        };
        match self.mixer.arm_timer(minutes) {
            Ok(()) => self.set_status(format!("timer: {minutes} min (starts on play)")),
            Err(e) => self.report("timer", &e),
        }
    }

    /// Cycle the armed timer: off -> first preset -> ... -> last preset -> off.
    pub fn cycle_preset(&mut self) {
        let next = match self.mixer.armed_minutes() {
            None => Some(0),
            Some(m) => match self.timer_presets.iter().position(|&p| p == m) {
                Some(i) if i + 1 < self.timer_presets.len() => Some(i + 1),
                Some(_) => None,
                // A custom value: restart from the first preset.
                None => Some(0),
            },
        };

        match next {
            Some(i) if i < self.timer_presets.len() => self.arm_preset(i),
            _ => self.disarm_timer(),
        }
    }

    pub fn disarm_timer(&mut self) {
        self.mixer.disarm_timer();
        self.set_status("timer off");
    }

    pub fn begin_custom_timer(&mut self) {
        self.input_mode = InputMode::CustomTimer;
        self.custom_timer.clear();
    }

    pub fn push_timer_char(&mut self, c: char) {
        // Leave room for a sign so "-5" reaches the parser and is refused there.
        if self.custom_timer.len() < 6 && (c.is_ascii_digit() || c == '-') {
            self.custom_timer.push(c);
        }
    }

    pub fn pop_timer_char(&mut self) {
        self.custom_timer.pop();
    }

    pub fn cancel_custom_timer(&mut self) {
        self.input_mode = InputMode::Normal;
        self.custom_timer.clear();
    }

    /// Arm the typed value; invalid input leaves no timer armed.
    pub fn submit_custom_timer(&mut self) {
        self.input_mode = InputMode::Normal;
        let input = std::mem::take(&mut self.custom_timer);
        match self.mixer.arm_timer_input(&input) {
            Ok(m) => self.set_status(format!("timer: {m} min (starts on play)")),
            Err(e) => self.report("timer", &e),
        }
    }

    /// Advance the sleep timer. Returns `true` when it just stopped playback.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.mixer.tick(now) {
            self.set_status("sleep timer elapsed: stopped");
            true
        } else {
            false
        }
    }

    pub fn shutdown(&mut self, fade_out: Duration) {
        self.mixer.shutdown(fade_out);
    }
}
