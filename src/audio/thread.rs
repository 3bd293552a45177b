use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};

use crate::config::AudioSettings;
use crate::error::AudioError;

use super::sink::{create_sink, gain};
use super::types::{AudioCmd, PlaybackHandle};

struct LoadedSink {
    id: String,
    looping: bool,
    sink: Sink,
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    audio_settings: AudioSettings,
    ready: Sender<Result<(), AudioError>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let _ = ready.send(Err(AudioError::Unavailable(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut sinks: Vec<LoadedSink> = Vec::new();
        let mut playing = false;

        fn publish(playback_info: &PlaybackHandle, sinks: &[LoadedSink], playing: bool) {
            if let Ok(mut info) = playback_info.lock() {
                info.loaded = sinks.iter().map(|s| s.id.clone()).collect();
                info.playing = playing && !sinks.is_empty();
            }
        }

        fn record_error(playback_info: &PlaybackHandle, err: &AudioError) {
            log::warn!("audio: {err}");
            if let Ok(mut info) = playback_info.lock() {
                info.last_error = Some(err.to_string());
            }
        }

        fn stop_all(sinks: &mut Vec<LoadedSink>) {
            for s in sinks.drain(..) {
                s.sink.stop();
            }
        }

        fn fade_out_sinks(sinks: &[LoadedSink], fade_out_ms: u64) {
            if sinks.is_empty() {
                return;
            }
            if fade_out_ms == 0 {
                for s in sinks {
                    s.sink.set_volume(0.0);
                }
                return;
            }

            let steps: u64 = 20;
            let step_ms = (fade_out_ms / steps).max(1);
            let start: Vec<f32> = sinks.iter().map(|s| s.sink.volume()).collect();
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                for (s, v0) in sinks.iter().zip(&start) {
                    s.sink.set_volume(v0 * (1.0 - t));
                }
                thread::sleep(Duration::from_millis(step_ms));
            }
        }

        loop {
            match rx.recv_timeout(Duration::from_millis(500)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Reset => {
                        stop_all(&mut sinks);
                        playing = false;
                        if let Ok(mut info) = playback_info.lock() {
                            info.last_error = None;
                        }
                        publish(&playback_info, &sinks, playing);
                    }

                    AudioCmd::Add { track, ack } => match create_sink(&stream, &track) {
                        Ok(sink) => {
                            // One sink per id: a re-added track replaces the old one.
                            if let Some(pos) = sinks.iter().position(|s| s.id == track.id) {
                                sinks.remove(pos).sink.stop();
                            }
                            if playing {
                                sink.play();
                            }
                            log::debug!("audio: loaded {} at {}", track.id, track.volume);
                            sinks.push(LoadedSink {
                                id: track.id,
                                looping: track.looping,
                                sink,
                            });
                            publish(&playback_info, &sinks, playing);
                            let _ = ack.send(Ok(()));
                        }
                        Err(e) => {
                            record_error(&playback_info, &e);
                            let _ = ack.send(Err(e));
                        }
                    },

                    AudioCmd::Play => {
                        for s in &sinks {
                            s.sink.play();
                        }
                        playing = true;
                        publish(&playback_info, &sinks, playing);
                    }

                    AudioCmd::Stop => {
                        if playing {
                            fade_out_sinks(&sinks, audio_settings.stop_fade_ms);
                        }
                        stop_all(&mut sinks);
                        playing = false;
                        publish(&playback_info, &sinks, playing);
                    }

                    AudioCmd::SetVolume { id, level } => {
                        match sinks.iter().find(|s| s.id == id) {
                            Some(s) => s.sink.set_volume(gain(level)),
                            None => log::debug!("audio: volume change for unloaded track {id}"),
                        }
                    }

                    AudioCmd::Quit { fade_out_ms } => {
                        if playing {
                            // Fade out gently before stopping.
                            fade_out_sinks(&sinks, fade_out_ms);
                        }
                        stop_all(&mut sinks);
                        // Update shared state so the UI doesn't keep showing Playing.
                        publish(&playback_info, &sinks, false);
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // A looping sink only drains when its decoder gave up mid-stream.
                    let before = sinks.len();
                    sinks.retain(|s| {
                        if !s.sink.empty() {
                            return true;
                        }
                        if s.looping {
                            log::warn!("audio: {} stopped producing samples", s.id);
                        } else {
                            log::debug!("audio: {} finished", s.id);
                        }
                        false
                    });
                    if sinks.len() != before {
                        publish(&playback_info, &sinks, playing);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
