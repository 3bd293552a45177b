use std::path::{Path, PathBuf};

/// Opaque handle to a track's audio data.
///
/// Resolved once while building the catalog; only the audio backend looks
/// inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundSource {
    path: PathBuf,
}

impl SoundSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub source: SoundSource,
}

/// Ordered, immutable-after-startup list of tracks with unique ids.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `track`, refusing it when its id is already taken.
    pub fn insert(&mut self, track: Track) -> bool {
        if self.contains(&track.id) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    pub fn get(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Whether some track already plays the file at `path`.
    pub fn contains_path(&self, path: &Path) -> bool {
        self.tracks.iter().any(|t| t.source.path() == path)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
