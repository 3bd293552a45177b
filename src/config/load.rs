use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment variables
/// (prefix `DRIZZLE__`), and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("DRIZZLE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.timer.max_minutes == 0 {
            return Err("timer.max_minutes must be >= 1".to_string());
        }
        if let Some(&bad) = self
            .timer
            .presets
            .iter()
            .find(|&&m| m == 0 || m > self.timer.max_minutes)
        {
            return Err(format!(
                "timer.presets entry {bad} is outside 1..={}",
                self.timer.max_minutes
            ));
        }
        if let Some(m) = self.timer.default_minutes {
            if m == 0 || m > self.timer.max_minutes {
                return Err(format!(
                    "timer.default_minutes {m} is outside 1..={}",
                    self.timer.max_minutes
                ));
            }
        }
        if self.audio.default_volume > 100 {
            return Err("audio.default_volume must be <= 100".to_string());
        }
        if self.ui.volume_step == 0 || self.ui.volume_step > 100 {
            return Err("ui.volume_step must be within 1..=100".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `DRIZZLE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("DRIZZLE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/drizzle/config.toml`
/// or `~/.config/drizzle/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", &[".config"]).map(|d| d.join("drizzle").join("config.toml"))
}

/// Default sounds directory: `$XDG_DATA_HOME/drizzle/sounds` or
/// `~/.local/share/drizzle/sounds`.
pub fn default_sounds_dir() -> Option<PathBuf> {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"]).map(|d| d.join("drizzle").join("sounds"))
}

/// Default log file: `$XDG_STATE_HOME/drizzle/drizzle.log` or
/// `~/.local/state/drizzle/drizzle.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", &[".local", "state"]).map(|d| d.join("drizzle").join("drizzle.log"))
}

fn xdg_dir(var: &str, home_fallback: &[&str]) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        return Some(PathBuf::from(xdg));
    }
    env::var_os("HOME").map(|home| {
        home_fallback
            .iter()
            .fold(PathBuf::from(home), |p, part| p.join(part))
    })
}
