//! Audio-related small types and handles.
//!
//! This module defines the commands understood by the audio thread, the
//! track description handed to a backend and the shared playback info.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use crate::catalog::SoundSource;
use crate::error::AudioError;

/// A catalog track as loaded into a playback session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTrack {
    pub id: String,
    pub title: String,
    pub source: SoundSource,
    /// Repeat forever instead of stopping at the end of the file.
    pub looping: bool,
    /// Volume level, 0-100.
    pub volume: u8,
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Stop and drop every loaded sink.
    Reset,
    /// Load a track, paused. The outcome of opening and decoding the file
    /// is sent back on `ack`.
    Add {
        track: SessionTrack,
        ack: Sender<Result<(), AudioError>>,
    },
    /// Start all loaded sinks.
    Play,
    /// Fade out and drop all loaded sinks.
    Stop,
    /// Change the volume of one loaded track.
    SetVolume { id: String, level: u8 },
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Runtime playback information shared with the UI.
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    /// Ids of the tracks that have a live sink, in load order.
    pub loaded: Vec<String>,
    /// Whether the loaded sinks are currently playing.
    pub playing: bool,
    /// Most recent failure reported by the audio thread.
    pub last_error: Option<String>,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
