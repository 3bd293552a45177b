use std::path::Path;

use super::model::{SoundSource, Track};

/// `(id, title, file name)` of the tracks shipped with the app, in display order.
pub const BUILTIN_TRACKS: &[(&str, &str, &str)] = &[
    ("rain", "Rain", "rain-sound.mp3"),
    ("forest", "Forest", "forest-ambience.mp3"),
    ("ocean", "Ocean", "ocean-waves.mp3"),
    ("fire", "Campfire", "firewood-burning-sound.mp3"),
];

/// Built-in tracks with their files resolved against `sounds_dir`.
///
/// Files are not checked here; a missing one surfaces as a load failure
/// when the track is played.
pub(super) fn builtin_tracks(sounds_dir: &Path) -> Vec<Track> {
    BUILTIN_TRACKS
        .iter()
        .map(|(id, title, file)| Track {
            id: (*id).to_string(),
            title: (*title).to_string(),
            source: SoundSource::from_path(sounds_dir.join(file)),
        })
        .collect()
}
