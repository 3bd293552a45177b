//! Playback controller: which sounds are selected, how loud they are, and
//! when playback should stop on its own.
//!
//! `Mixer` is driven from the UI thread. It stages selection and volume
//! changes, loads the selected tracks into an `AudioService` on `play`, and
//! owns the single sleep timer that stops playback after the armed delay.

mod controller;
mod selection;
mod timer;

pub use controller::{Mixer, MixerState};
