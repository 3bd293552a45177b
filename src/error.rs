//! Error types shared by the mixer, the audio backends and timer parsing.
//!
//! None of these are fatal: the front-end logs them and shows a status line,
//! and the mixer always stays in a state where the user can try again.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by an `AudioService` implementation.
#[derive(Debug, Error)]
pub enum AudioError {
    /// No output device could be opened.
    #[error("audio output unavailable: {0}")]
    Unavailable(String),

    /// The audio thread has exited and no longer accepts commands.
    #[error("audio thread is not running")]
    Disconnected,

    /// The sound file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sound file could not be decoded.
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
}

/// Why a typed timer value was not armed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerInputError {
    #[error("no timer value entered")]
    Empty,

    #[error("`{0}` is not a whole number of minutes")]
    NotANumber(String),

    #[error("timer must be at least 1 minute (got {0})")]
    NotPositive(i64),

    #[error("timer cannot exceed {max} minutes (got {minutes})")]
    TooLong { minutes: i64, max: u32 },
}

/// Errors returned by `Mixer` operations.
#[derive(Debug, Error)]
pub enum MixerError {
    /// The id does not name a catalog track.
    #[error("unknown track `{0}`")]
    UnknownTrack(String),

    #[error("invalid timer: {0}")]
    InvalidTimer(#[from] TimerInputError),

    #[error("playback failed: {0}")]
    Playback(#[from] AudioError),
}

pub type Result<T> = std::result::Result<T, MixerError>;
