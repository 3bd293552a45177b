use std::path::PathBuf;

use crate::app::App;
use crate::audio::{AudioService, NullAudio, RodioPlayer};
use crate::catalog;
use crate::config::{self, Settings};
use crate::mixer::Mixer;

/// Sounds directory: CLI argument, then config, then the XDG data dir.
pub fn resolve_sounds_dir(cli_arg: Option<String>, settings: &Settings) -> PathBuf {
    cli_arg
        .map(PathBuf::from)
        .or_else(|| settings.catalog.sounds_dir.clone())
        .or_else(config::default_sounds_dir)
        .unwrap_or_else(|| PathBuf::from("sounds"))
}

/// Build the catalog, open the audio backend and assemble the app.
///
/// A missing audio device is not fatal: the app runs on the silent backend
/// and says so on the status line.
pub fn build_app(sounds_dir: PathBuf, settings: &Settings) -> App {
    let catalog = catalog::build(&sounds_dir, &settings.catalog);

    let mut warning: Option<String> = None;
    let (service, handle) = match RodioPlayer::spawn(settings.audio.clone()) {
        Ok(player) => {
            let handle = player.playback_handle();
            (Box::new(player) as Box<dyn AudioService>, handle)
        }
        Err(e) => {
            log::warn!("audio output unavailable, running silent: {e}");
            warning = Some(format!("no audio output: {e}"));
            let null = NullAudio::new();
            let handle = null.playback_handle();
            (Box::new(null) as Box<dyn AudioService>, handle)
        }
    };

    let mixer = Mixer::new(
        catalog,
        service,
        settings.audio.default_volume,
        settings.timer.max_minutes,
    );

    let mut app = App::new(mixer, settings);
    app.set_playback_handle(handle);
    app.set_sounds_dir(sounds_dir.display().to_string());

    apply_timer_default(&mut app, settings);

    if let Some(w) = warning {
        app.set_status(w);
    } else if !app.has_tracks() {
        app.set_status("no sounds found");
    }

    app
}

fn apply_timer_default(app: &mut App, settings: &Settings) {
    if let Some(minutes) = settings.timer.default_minutes {
        if let Err(e) = app.mixer.arm_timer(minutes) {
            log::warn!("timer.default_minutes ignored: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins_over_config() {
        let mut settings = Settings::default();
        settings.catalog.sounds_dir = Some(PathBuf::from("/from/config"));

        assert_eq!(
            resolve_sounds_dir(Some("/from/cli".to_string()), &settings),
            PathBuf::from("/from/cli")
        );
        assert_eq!(
            resolve_sounds_dir(None, &settings),
            PathBuf::from("/from/config")
        );
    }
}
