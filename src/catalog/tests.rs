use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use super::display::{slug, title_from_stem};
use super::*;
use crate::config::{CatalogSettings, TrackEntry};

fn track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        title: id.to_uppercase(),
        source: SoundSource::from_path(format!("/sounds/{id}.mp3")),
    }
}

#[test]
fn slug_lowercases_and_collapses_separators() {
    assert_eq!(slug("Ocean Waves"), "ocean-waves");
    assert_eq!(slug("rain--sound__01"), "rain-sound-01");
    assert_eq!(slug("  Fire!  "), "fire");
    assert_eq!(slug("???"), "");
}

#[test]
fn title_from_stem_splits_on_separators() {
    assert_eq!(title_from_stem("ocean_waves-night"), "Ocean Waves Night");
    assert_eq!(title_from_stem("rain"), "Rain");
    assert_eq!(title_from_stem("--"), "--");
}

#[test]
fn catalog_refuses_duplicate_ids() {
    let mut catalog = Catalog::new();
    assert!(catalog.insert(track("rain")));
    assert!(catalog.insert(track("ocean")));
    assert!(!catalog.insert(track("rain")));

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.tracks()[1].id, "ocean");
    assert!(catalog.contains("rain"));
    assert!(!catalog.contains("fire"));
    assert!(catalog.contains_path(&PathBuf::from("/sounds/ocean.mp3")));
}

#[test]
fn build_lists_builtins_in_fixed_order() {
    let dir = tempdir().unwrap();
    let catalog = build(dir.path(), &CatalogSettings::default());

    let ids: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["rain", "forest", "ocean", "fire"]);
    assert_eq!(
        catalog.get("ocean").unwrap().source.path(),
        dir.path().join("ocean-waves.mp3")
    );
    assert_eq!(catalog.get("fire").unwrap().title, "Campfire");
}

#[test]
fn build_appends_config_entries_then_scanned_files() {
    let dir = tempdir().unwrap();
    // Same file as the built-in "rain" track: must not be listed twice.
    fs::write(dir.path().join("rain-sound.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("wind.ogg"), b"not real").unwrap();
    fs::write(dir.path().join("crickets.ogg"), b"not real").unwrap();

    let settings = CatalogSettings {
        tracks: vec![
            TrackEntry {
                id: "wind".into(),
                title: "Wind".into(),
                path: PathBuf::from("wind.ogg"),
            },
            TrackEntry {
                id: "rain".into(),
                title: "Another rain".into(),
                path: PathBuf::from("/elsewhere/rain.ogg"),
            },
        ],
        ..CatalogSettings::default()
    };
    let catalog = build(dir.path(), &settings);

    let ids: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["rain", "forest", "ocean", "fire", "wind", "crickets"]);
    assert_eq!(catalog.get("rain").unwrap().title, "Rain");
    assert_eq!(
        catalog.get("wind").unwrap().source.path(),
        dir.path().join("wind.ogg")
    );
}

#[test]
fn build_without_builtins_only_uses_the_directory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("brown-noise.wav"), b"not real").unwrap();

    let settings = CatalogSettings {
        builtin: false,
        ..CatalogSettings::default()
    };
    let catalog = build(dir.path(), &settings);

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.tracks()[0].id, "brown-noise");
    assert_eq!(catalog.tracks()[0].title, "Brown Noise");
}
