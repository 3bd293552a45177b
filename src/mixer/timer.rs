//! Single-shot, cancellable sleep timer.
//!
//! The timer never runs on its own thread: the event loop polls it with the
//! current instant. Scheduling replaces whatever was pending, so at most one
//! stop can ever fire.

use std::time::{Duration, Instant};

use crate::error::TimerInputError;

const MS_PER_MINUTE: u64 = 60_000;

pub fn minutes_to_duration(minutes: u32) -> Duration {
    Duration::from_millis(u64::from(minutes) * MS_PER_MINUTE)
}

/// Parse a typed timer value. Accepts surrounding whitespace only.
pub fn parse_minutes(input: &str, max: u32) -> Result<u32, TimerInputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimerInputError::Empty);
    }

    let minutes: i64 = trimmed
        .parse()
        .map_err(|_| TimerInputError::NotANumber(trimmed.to_string()))?;

    if minutes <= 0 {
        return Err(TimerInputError::NotPositive(minutes));
    }
    if minutes > i64::from(max) {
        return Err(TimerInputError::TooLong { minutes, max });
    }

    // Bounded by `max` above.
    Ok(minutes as u32)
}

/// Identifies one scheduled stop. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
struct Pending {
    id: TimerId,
    deadline: Instant,
}

#[derive(Debug, Default)]
pub struct SleepTimer {
    next_id: u64,
    pending: Option<Pending>,
}

impl SleepTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a stop `delay` after `now`, cancelling any pending one.
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> TimerId {
        if let Some(old) = self.cancel() {
            log::debug!("timer: {old:?} replaced");
        }

        self.next_id += 1;
        let id = TimerId(self.next_id);
        // Saturate instead of overflowing on absurd delays.
        let deadline = now
            .checked_add(delay)
            .unwrap_or_else(|| now + Duration::from_secs(u64::from(u32::MAX)));
        self.pending = Some(Pending { id, deadline });
        id
    }

    /// Drop the pending stop, returning its id.
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.pending.take().map(|p| p.id)
    }

    /// Fire the pending stop if it is due. A fired stop is cleared, so each
    /// id is returned at most once.
    pub fn poll(&mut self, now: Instant) -> Option<TimerId> {
        match self.pending {
            Some(p) if now >= p.deadline => {
                self.pending = None;
                Some(p.id)
            }
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<TimerId> {
        self.pending.map(|p| p.id)
    }

    /// Time left before the pending stop, zero when overdue.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|p| p.deadline.saturating_duration_since(now))
    }
}
