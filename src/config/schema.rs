use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/drizzle/config.toml` or `~/.config/drizzle/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `DRIZZLE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub timer: TimerSettings,
    pub catalog: CatalogSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume (0-100) used for tracks the user has not adjusted yet.
    pub default_volume: u8,
    /// Fade-out duration when stopping playback (milliseconds).
    /// Set to 0 to stop immediately.
    pub stop_fade_ms: u64,
    /// Fade-out duration when quitting (milliseconds).
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            default_volume: 100,
            stop_fade_ms: 300,
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    /// Preset durations offered by the UI, in minutes.
    pub presets: Vec<u32>,
    /// Timer armed at startup, if any.
    pub default_minutes: Option<u32>,
    /// Upper bound for any armed timer, in minutes.
    pub max_minutes: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            presets: vec![5, 10, 15, 30, 60],
            default_minutes: None,
            max_minutes: 24 * 60,
        }
    }
}

/// One catalog entry declared in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackEntry {
    pub id: String,
    pub title: String,
    /// Absolute, or relative to the sounds directory.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Directory holding the sound files. The first CLI argument wins over this.
    pub sounds_dir: Option<PathBuf>,
    /// Whether the built-in rain/forest/ocean/fire tracks are listed.
    pub builtin: bool,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Extra tracks, listed after the built-ins.
    pub tracks: Vec<TrackEntry>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            sounds_dir: None,
            builtin: true,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            include_hidden: false,
            recursive: true,
            max_depth: None,
            tracks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Volume change per key press.
    pub volume_step: u8,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ drizzle: sounds for sleeping ~ ".to_string(),
            volume_step: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter, e.g. `info` or `drizzle=debug`. `RUST_LOG` overrides it.
    pub level: String,
    /// Log file. The terminal belongs to the UI, so records never go to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
