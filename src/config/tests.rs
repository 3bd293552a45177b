use super::load::{default_config_path, default_log_path, default_sounds_dir, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_drizzle_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("DRIZZLE_CONFIG_PATH", "/tmp/drizzle-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/drizzle-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("drizzle")
            .join("config.toml")
    );
}

#[test]
fn default_paths_fall_back_to_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::remove("XDG_DATA_HOME");
    let _g3 = EnvGuard::remove("XDG_STATE_HOME");
    let _g4 = EnvGuard::set("HOME", "/tmp/home-dir");

    let home = PathBuf::from("/tmp/home-dir");
    assert_eq!(
        default_config_path().unwrap(),
        home.join(".config").join("drizzle").join("config.toml")
    );
    assert_eq!(
        default_sounds_dir().unwrap(),
        home.join(".local").join("share").join("drizzle").join("sounds")
    );
    assert_eq!(
        default_log_path().unwrap(),
        home.join(".local")
            .join("state")
            .join("drizzle")
            .join("drizzle.log")
    );
}

#[test]
fn defaults_match_the_stock_presets() {
    let s = Settings::default();
    assert_eq!(s.timer.presets, vec![5, 10, 15, 30, 60]);
    assert_eq!(s.timer.default_minutes, None);
    assert_eq!(s.audio.default_volume, 100);
    assert!(s.catalog.builtin);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
default_volume = 70
stop_fade_ms = 0
quit_fade_out_ms = 123

[timer]
presets = [20, 45]
default_minutes = 45
max_minutes = 90

[catalog]
sounds_dir = "/srv/sounds"
builtin = false
extensions = ["ogg"]
include_hidden = true
recursive = false
max_depth = 2
tracks = [{ id = "wind", title = "Wind", path = "wind.ogg" }]

[ui]
header_text = "hello"
volume_step = 10

[log]
level = "debug"
file = "/tmp/drizzle.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("DRIZZLE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("DRIZZLE__AUDIO__DEFAULT_VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.default_volume, 70);
    assert_eq!(s.audio.stop_fade_ms, 0);
    assert_eq!(s.audio.quit_fade_out_ms, 123);
    assert_eq!(s.timer.presets, vec![20, 45]);
    assert_eq!(s.timer.default_minutes, Some(45));
    assert_eq!(s.timer.max_minutes, 90);
    assert_eq!(s.catalog.sounds_dir, Some(PathBuf::from("/srv/sounds")));
    assert!(!s.catalog.builtin);
    assert_eq!(s.catalog.extensions, vec!["ogg".to_string()]);
    assert!(s.catalog.include_hidden);
    assert!(!s.catalog.recursive);
    assert_eq!(s.catalog.max_depth, Some(2));
    assert_eq!(s.catalog.tracks.len(), 1);
    assert_eq!(s.catalog.tracks[0].id, "wind");
    assert_eq!(s.catalog.tracks[0].path, PathBuf::from("wind.ogg"));
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.volume_step, 10);
    assert_eq!(s.log.level, "debug");
    assert_eq!(s.log.file, Some(PathBuf::from("/tmp/drizzle.log")));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
default_volume = 80
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("DRIZZLE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("DRIZZLE__AUDIO__DEFAULT_VOLUME", "40");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.default_volume, 40);
}

#[test]
fn validate_rejects_presets_outside_the_timer_range() {
    let mut s = Settings::default();
    s.timer.presets = vec![5, 0];
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.timer.max_minutes = 30;
    s.timer.presets = vec![15, 60];
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.timer.default_minutes = Some(0);
    assert!(s.validate().is_err());
}

#[test]
fn validate_rejects_bad_volume_settings() {
    let mut s = Settings::default();
    s.audio.default_volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.volume_step = 0;
    assert!(s.validate().is_err());
}
