//! Instance-owned timers and the frame clock.
//!
//! Nothing here spawns or schedules anything: a `Timer` is a deadline owned
//! by whoever needs it, polled from the frame loop with the frame timestamp.
//! Cancelling is clearing the deadline, so a torn-down owner cannot leave a
//! callback behind.

use std::time::Duration;

/// One-shot cancellable deadline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Duration>,
}

impl Timer {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm to fire `after` from `now`. Any pending deadline is replaced, never
    /// duplicated.
    pub fn arm(&mut self, now: Duration, after: Duration) {
        self.deadline = Some(now.saturating_add(after));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Time left before firing, `None` when disarmed.
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_sub(now))
    }

    /// Returns `true` exactly once when `now` reaches the deadline, and
    /// disarms the timer.
    pub fn fire(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Config seconds → `Duration`. Negative and NaN map to zero; values too
/// large for a `Duration` saturate instead of panicking.
pub fn secs(v: f32) -> Duration {
    Duration::try_from_secs_f32(v.max(0.0)).unwrap_or(Duration::MAX)
}

/// Turns frame timestamps into elapsed seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameClock {
    last: Option<Duration>,
    first_frame_dt: f32,
}

impl FrameClock {
    pub fn new(first_frame_dt: f32) -> Self {
        Self {
            last: None,
            first_frame_dt,
        }
    }

    /// Seconds since the previous tick. The very first tick reports
    /// `first_frame_dt`; timestamps that go backwards report 0.
    pub fn tick(&mut self, now: Duration) -> f32 {
        let dt = match self.last {
            Some(last) => now.saturating_sub(last).as_secs_f32(),
            None => self.first_frame_dt,
        };
        self.last = Some(self.last.map_or(now, |last| last.max(now)));
        dt
    }

    /// Make `now` the previous tick, so the next tick measures from here.
    pub fn rebase(&mut self, now: Duration) {
        self.last = Some(now);
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
