//! Utilities for creating `rodio` sinks from session tracks.
//!
//! Opening and decoding is split from sink creation so a bad file is
//! reported before anything touches the output device.

use std::fs::File;
use std::io::BufReader;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::AudioError;

use super::types::SessionTrack;

/// Map a 0-100 volume level to a linear sink gain.
pub(super) fn gain(level: u8) -> f32 {
    f32::from(level.min(100)) / 100.0
}

/// Open and decode the file behind `track`.
pub(super) fn open_decoder(track: &SessionTrack) -> Result<Decoder<BufReader<File>>, AudioError> {
    let path = track.source.path();
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Create a paused `Sink` for `track` at the track's volume.
pub(super) fn create_sink(stream: &OutputStream, track: &SessionTrack) -> Result<Sink, AudioError> {
    let decoder = open_decoder(track)?;

    let sink = Sink::connect_new(stream.mixer());
    if track.looping {
        sink.append(decoder.repeat_infinite());
    } else {
        sink.append(decoder);
    }
    sink.set_volume(gain(track.volume));
    sink.pause();
    Ok(sink)
}
