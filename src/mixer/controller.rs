use std::time::{Duration, Instant};

use crate::audio::{AudioService, SessionTrack};
use crate::catalog::Catalog;
use crate::error::{MixerError, Result, TimerInputError};

use super::selection::SelectionState;
use super::timer::{SleepTimer, minutes_to_duration, parse_minutes};

/// Coarse controller state, mostly for display.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MixerState {
    #[default]
    Idle,
    /// Selection or volumes changed since the last stop.
    Selecting,
    Playing,
}

pub struct Mixer<S> {
    catalog: Catalog,
    service: S,
    selection: SelectionState,
    armed_minutes: Option<u32>,
    max_timer_minutes: u32,
    timer: SleepTimer,
    /// Ids loaded by the last successful `play`, in catalog order.
    session: Option<Vec<String>>,
    state: MixerState,
}

impl<S: AudioService> Mixer<S> {
    pub fn new(catalog: Catalog, service: S, default_volume: u8, max_timer_minutes: u32) -> Self {
        Self {
            catalog,
            service,
            selection: SelectionState::new(default_volume),
            armed_minutes: None,
            max_timer_minutes: max_timer_minutes.max(1),
            timer: SleepTimer::new(),
            session: None,
            state: MixerState::Idle,
        }
    }

    fn ensure_known(&self, id: &str) -> Result<()> {
        if self.catalog.contains(id) {
            Ok(())
        } else {
            Err(MixerError::UnknownTrack(id.to_string()))
        }
    }

    fn mark_selecting(&mut self) {
        if self.state == MixerState::Idle {
            self.state = MixerState::Selecting;
        }
    }

    fn cancel_pending(&mut self, reason: &str) {
        if let Some(id) = self.timer.cancel() {
            log::debug!("timer: {id:?} cancelled ({reason})");
        }
    }

    /// Flip whether `id` is part of the mix. Takes effect on the next `play`.
    pub fn toggle_track(&mut self, id: &str) -> Result<bool> {
        self.ensure_known(id)?;
        let selected = self.selection.toggle(id);
        self.mark_selecting();
        log::debug!("mixer: {id} selected={selected}");
        Ok(selected)
    }

    /// Store a volume for `id`, clamped to 0-100, and apply it right away
    /// when the track is playing.
    pub fn set_volume(&mut self, id: &str, level: i32) -> Result<u8> {
        self.ensure_known(id)?;
        let stored = self.selection.set_volume(id, level);

        if self.is_live(id) {
            if let Err(e) = self.service.set_volume(id, stored) {
                log::warn!("mixer: could not apply volume {stored} to {id}: {e}");
            }
        }

        self.mark_selecting();
        Ok(stored)
    }

    /// Move the volume of `id` by `delta`, clamped to 0-100.
    pub fn adjust_volume(&mut self, id: &str, delta: i32) -> Result<u8> {
        self.ensure_known(id)?;
        let current = i32::from(self.selection.volume(id));
        self.set_volume(id, current.saturating_add(delta))
    }

    /// Reload the service with the current selection and start it.
    ///
    /// The service is always reset first, so repeated calls never stack
    /// sessions. Tracks that fail to load are logged and left out. When a
    /// timer is armed, a stop is scheduled `minutes` after `now`.
    pub fn play(&mut self, now: Instant) -> Result<()> {
        self.cancel_pending("new session");
        self.session = None;

        if let Err(e) = self.service.reset() {
            log::warn!("mixer: reset failed: {e}");
            self.state = MixerState::Idle;
            return Err(e.into());
        }

        let mut loaded: Vec<String> = Vec::new();
        for track in self
            .catalog
            .iter()
            .filter(|t| self.selection.is_selected(&t.id))
        {
            let session_track = SessionTrack {
                id: track.id.clone(),
                title: track.title.clone(),
                source: track.source.clone(),
                looping: true,
                volume: self.selection.volume(&track.id),
            };
            match self.service.add(session_track) {
                Ok(()) => loaded.push(track.id.clone()),
                Err(e) => log::warn!("mixer: could not load {}: {e}", track.id),
            }
        }

        if let Err(e) = self.service.play() {
            log::warn!("mixer: play failed: {e}");
            self.state = MixerState::Idle;
            return Err(e.into());
        }

        log::info!("mixer: playing [{}]", loaded.join(", "));
        self.session = Some(loaded);
        self.state = MixerState::Playing;

        if let Some(minutes) = self.armed_minutes {
            let id = self.timer.schedule(now, minutes_to_duration(minutes));
            log::info!("mixer: stopping in {minutes} min ({id:?})");
        }

        Ok(())
    }

    /// Halt playback. Keeps the selection and armed minutes so the same mix
    /// can be replayed; drops any scheduled stop.
    pub fn stop(&mut self) {
        self.cancel_pending("stopped");
        if let Err(e) = self.service.stop() {
            log::warn!("mixer: stop failed: {e}");
        }
        if self.session.take().is_some() {
            log::info!("mixer: stopped");
        }
        self.state = MixerState::Idle;
    }

    /// Arm a timer for the next `play`. Any stop scheduled by an earlier
    /// `play` is cancelled; zero or too-long values leave no timer armed.
    pub fn arm_timer(&mut self, minutes: u32) -> Result<()> {
        self.cancel_pending("timer re-armed");
        self.armed_minutes = None;

        if minutes == 0 {
            return Err(TimerInputError::NotPositive(0).into());
        }
        if minutes > self.max_timer_minutes {
            return Err(TimerInputError::TooLong {
                minutes: i64::from(minutes),
                max: self.max_timer_minutes,
            }
            .into());
        }

        self.armed_minutes = Some(minutes);
        log::debug!("mixer: timer armed for {minutes} min");
        Ok(())
    }

    /// Arm a timer from user-typed text. Anything that is not a positive
    /// whole number within range disarms the timer instead.
    pub fn arm_timer_input(&mut self, input: &str) -> Result<u32> {
        match parse_minutes(input, self.max_timer_minutes) {
            Ok(minutes) => {
                self.arm_timer(minutes)?;
                Ok(minutes)
            }
            Err(e) => {
                self.disarm_timer();
                Err(e.into())
            }
        }
    }

    pub fn disarm_timer(&mut self) {
        self.cancel_pending("timer disarmed");
        self.armed_minutes = None;
    }

    /// Fire the scheduled stop when it is due. Returns `true` on the one
    /// call that stopped playback.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.timer.poll(now) {
            Some(id) => {
                log::info!("mixer: sleep timer {id:?} elapsed");
                self.stop();
                true
            }
            None => false,
        }
    }

    /// Tear down the backend. The mixer is idle afterwards.
    pub fn shutdown(&mut self, fade_out: Duration) {
        self.cancel_pending("shutdown");
        self.service.shutdown(fade_out);
        self.session = None;
        self.state = MixerState::Idle;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn state(&self) -> MixerState {
        self.state
    }

    pub fn armed_minutes(&self) -> Option<u32> {
        self.armed_minutes
    }

    pub fn max_timer_minutes(&self) -> u32 {
        self.max_timer_minutes
    }

    #[cfg(test)]
    pub fn pending_timer(&self) -> Option<super::timer::TimerId> {
        self.timer.pending()
    }

    pub fn timer_remaining(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    /// Ids of the live session, if one is playing.
    pub fn session(&self) -> Option<&[String]> {
        self.session.as_deref()
    }

    pub fn is_live(&self, id: &str) -> bool {
        self.session
            .as_ref()
            .map(|ids| ids.iter().any(|i| i == id))
            .unwrap_or(false)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    pub fn volume(&self, id: &str) -> u8 {
        self.selection.volume(id)
    }

    #[cfg(test)]
    pub fn service(&self) -> &S {
        &self.service
    }
}
