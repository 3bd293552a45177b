use crate::error::AudioError;

use super::AudioService;
use super::types::{PlaybackHandle, SessionTrack};

/// Silent backend: keeps the bookkeeping of a real player without output.
///
/// Used when no audio device is available so the rest of the app keeps
/// working, and as a stand-in backend in tests.
#[derive(Debug, Default)]
pub struct NullAudio {
    loaded: Vec<SessionTrack>,
    playing: bool,
    playback: PlaybackHandle,
}

impl NullAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    #[cfg(test)]
    pub fn loaded(&self) -> &[SessionTrack] {
        &self.loaded
    }

    #[cfg(test)]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn publish(&self) {
        if let Ok(mut info) = self.playback.lock() {
            info.loaded = self.loaded.iter().map(|t| t.id.clone()).collect();
            info.playing = self.playing && !self.loaded.is_empty();
        }
    }
}

impl AudioService for NullAudio {
    fn reset(&mut self) -> Result<(), AudioError> {
        self.loaded.clear();
        self.playing = false;
        self.publish();
        Ok(())
    }

    fn add(&mut self, track: SessionTrack) -> Result<(), AudioError> {
        self.loaded.retain(|t| t.id != track.id);
        self.loaded.push(track);
        self.publish();
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        self.playing = true;
        self.publish();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.loaded.clear();
        self.playing = false;
        self.publish();
        Ok(())
    }

    fn set_volume(&mut self, id: &str, level: u8) -> Result<(), AudioError> {
        if let Some(t) = self.loaded.iter_mut().find(|t| t.id == id) {
            t.volume = level.min(100);
        }
        Ok(())
    }
}
