use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;
use crate::error::AudioError;

use super::AudioService;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo, SessionTrack};

/// `AudioService` backed by `rodio`, running on its own thread.
pub struct RodioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Option<JoinHandle<()>>,
}

impl RodioPlayer {
    /// Start the audio thread and wait until it has opened the output device.
    pub fn spawn(audio_settings: AudioSettings) -> Result<Self, AudioError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), AudioError>>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(rx, playback_info.clone(), audio_settings, ready_tx);

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = audio_handle.join();
                return Err(e);
            }
            Err(_) => {
                let _ = audio_handle.join();
                return Err(AudioError::Disconnected);
            }
        }

        Ok(Self {
            tx,
            playback: playback_info,
            join: Some(audio_handle),
        })
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), AudioError> {
        self.tx.send(cmd).map_err(|_| AudioError::Disconnected)
    }

    /// Fade out, stop the audio thread and wait for it to exit.
    pub fn quit_softly(&mut self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl AudioService for RodioPlayer {
    fn reset(&mut self) -> Result<(), AudioError> {
        self.send(AudioCmd::Reset)
    }

    /// Blocks until the audio thread has opened and decoded the file, so a
    /// missing or unreadable track is reported here.
    fn add(&mut self, track: SessionTrack) -> Result<(), AudioError> {
        let (ack, reply) = mpsc::channel();
        self.send(AudioCmd::Add { track, ack })?;
        reply.recv().map_err(|_| AudioError::Disconnected)?
    }

    fn play(&mut self) -> Result<(), AudioError> {
        self.send(AudioCmd::Play)
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.send(AudioCmd::Stop)
    }

    fn set_volume(&mut self, id: &str, level: u8) -> Result<(), AudioError> {
        self.send(AudioCmd::SetVolume {
            id: id.to_string(),
            level,
        })
    }

    fn shutdown(&mut self, fade_out: Duration) {
        self.quit_softly(fade_out);
    }
}
