use std::path::Path;

use lofty::prelude::{Accessor, TaggedFileExt};
use walkdir::WalkDir;

use crate::config::CatalogSettings;

use super::builtin::builtin_tracks;
use super::display::{slug, title_from_stem};
use super::model::{Catalog, SoundSource, Track};

fn is_audio_file(path: &Path, settings: &CatalogSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Prefer the tag title when the file carries one.
fn tag_title(path: &Path) -> Option<String> {
    let tagged = lofty::read_from_path(path).ok()?;
    let tag = tagged.primary_tag().or_else(|| tagged.first_tag())?;
    let title = tag.title()?;
    let title = title.trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Discover sound files under `dir`, sorted by title (case-insensitive).
///
/// A missing or unreadable directory yields an empty list.
pub fn scan(dir: &Path, settings: &CatalogSettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(path, settings) {
            continue;
        }

        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        let id = slug(stem);
        if id.is_empty() {
            log::warn!("skipping {}: no usable characters for an id", path.display());
            continue;
        }

        let title = tag_title(path).unwrap_or_else(|| title_from_stem(stem));

        tracks.push(Track {
            id,
            title,
            source: SoundSource::from_path(path),
        });
    }

    tracks.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    tracks
}

/// Assemble the catalog: built-ins, then config entries, then scanned files.
///
/// Duplicate ids keep the first entry. Scanned files already referenced by
/// an earlier entry are skipped silently.
pub fn build(sounds_dir: &Path, settings: &CatalogSettings) -> Catalog {
    let mut catalog = Catalog::new();

    let insert = |catalog: &mut Catalog, track: Track| {
        let id = track.id.clone();
        if !catalog.insert(track) {
            log::warn!("duplicate track id `{id}` ignored");
        }
    };

    if settings.builtin {
        for track in builtin_tracks(sounds_dir) {
            insert(&mut catalog, track);
        }
    }

    for entry in &settings.tracks {
        let id = entry.id.trim();
        if id.is_empty() {
            log::warn!("config track `{}` has an empty id; ignored", entry.title);
            continue;
        }
        let path = if entry.path.is_absolute() {
            entry.path.clone()
        } else {
            sounds_dir.join(&entry.path)
        };
        insert(
            &mut catalog,
            Track {
                id: id.to_string(),
                title: entry.title.clone(),
                source: SoundSource::from_path(path),
            },
        );
    }

    for track in scan(sounds_dir, settings) {
        if catalog.contains_path(track.source.path()) {
            continue;
        }
        insert(&mut catalog, track);
    }

    log::info!(
        "catalog ready: {} tracks from {}",
        catalog.len(),
        sounds_dir.display()
    );
    catalog
}
