//! Audio playback service.
//!
//! `AudioService` is the seam between the mixer and whatever actually makes
//! sound. `RodioPlayer` drives a dedicated audio thread through a command
//! channel; `NullAudio` is the silent fallback used when no output device
//! can be opened.

use std::time::Duration;

use crate::error::AudioError;

mod null;
mod player;
mod sink;
mod thread;
mod types;

pub use null::NullAudio;
pub use player::RodioPlayer;
pub use types::{PlaybackHandle, SessionTrack};

/// Operations the mixer needs from a playback backend.
///
/// Calls are made serially from the UI thread. Implementations report
/// failures but never retry on their own.
pub trait AudioService {
    /// Stop and unload every loaded track.
    fn reset(&mut self) -> Result<(), AudioError>;

    /// Load a track into the session, paused, at its configured volume.
    fn add(&mut self, track: SessionTrack) -> Result<(), AudioError>;

    /// Start every loaded track.
    fn play(&mut self) -> Result<(), AudioError>;

    /// Halt playback. Must succeed when nothing is playing.
    fn stop(&mut self) -> Result<(), AudioError>;

    /// Change the volume (0-100) of a loaded track.
    fn set_volume(&mut self, id: &str, level: u8) -> Result<(), AudioError>;

    /// Release the backend, fading out over `fade_out` where supported.
    fn shutdown(&mut self, _fade_out: Duration) {}
}

impl<S: AudioService + ?Sized> AudioService for Box<S> {
    fn reset(&mut self) -> Result<(), AudioError> {
        (**self).reset()
    }

    fn add(&mut self, track: SessionTrack) -> Result<(), AudioError> {
        (**self).add(track)
    }

    fn play(&mut self) -> Result<(), AudioError> {
        (**self).play()
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        (**self).stop()
    }

    fn set_volume(&mut self, id: &str, level: u8) -> Result<(), AudioError> {
        (**self).set_volume(id, level)
    }

    fn shutdown(&mut self, fade_out: Duration) {
        (**self).shutdown(fade_out)
    }
}
