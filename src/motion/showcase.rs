//! Showcase: while the cloud sits idle, periodically spotlight one of the
//! heaviest labels for a moment.
//!
//! The pick is random among the top-K ranks. The engine only polls the
//! showcase while nothing holds focus, and any pointer focus preempts it.
//!
//! The next countdown starts when a spotlight fires, so spotlights come every
//! `interval_secs`, or every `hold + resume delay` when that is longer.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::timer::{secs, Timer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub enabled: bool,
    /// Idle time before each spotlight
    pub interval_secs: f32,
    /// How long a spotlight holds focus
    pub hold_secs: f32,
    /// Picks come from ranks `0..top_k`
    pub top_k: usize,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: 3.0,
            hold_secs: 1.5,
            top_k: 10,
        }
    }
}

/// What the engine should do after polling the showcase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowcaseEvent {
    /// Focus the label at this rank
    Spotlight(usize),
    /// Release the spotlight focus
    Release,
}

#[derive(Debug)]
pub struct Showcase {
    cfg: ShowcaseConfig,
    next: Timer,
    hold: Timer,
    rng: StdRng,
}

impl Showcase {
    pub fn new(cfg: ShowcaseConfig, rng: StdRng) -> Self {
        Self {
            cfg,
            next: Timer::new(),
            hold: Timer::new(),
            rng,
        }
    }

    /// Deterministic picks for tests and reproducible demos.
    pub fn seeded(cfg: ShowcaseConfig, seed: u64) -> Self {
        Self::new(cfg, StdRng::seed_from_u64(seed))
    }

    pub fn enabled(&self) -> bool {
        self.cfg.enabled
    }

    /// Whether a spotlight is currently holding focus.
    pub fn is_holding(&self) -> bool {
        self.hold.is_armed()
    }

    /// Start the idle countdown unless one is already running. Called
    /// whenever rotation (re)starts with nothing focused.
    pub fn arm(&mut self, now: Duration) {
        if !self.cfg.enabled || self.next.is_armed() {
            return;
        }
        self.next.arm(now, secs(self.cfg.interval_secs));
    }

    /// Whether the countdown to the next spotlight is running.
    pub fn is_counting(&self) -> bool {
        self.next.is_armed()
    }

    /// Drop the countdown and any hold (pointer focus, new input, teardown).
    pub fn cancel(&mut self) {
        self.next.cancel();
        self.hold.cancel();
    }

    /// Poll timers. `label_count` bounds the pick; an empty set never
    /// spotlights.
    pub fn poll(&mut self, now: Duration, label_count: usize) -> Option<ShowcaseEvent> {
        if !self.cfg.enabled {
            return None;
        }
        if self.hold.fire(now) {
            return Some(ShowcaseEvent::Release);
        }
        if self.next.fire(now) {
            let k = self.cfg.top_k.min(label_count);
            if k == 0 {
                return None;
            }
            let rank = self.rng.gen_range(0..k);
            self.hold.arm(now, secs(self.cfg.hold_secs));
            self.next.arm(now, secs(self.cfg.interval_secs));
            log::trace!("showcase spotlight on rank {}", rank);
            return Some(ShowcaseEvent::Spotlight(rank));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> ShowcaseConfig {
        ShowcaseConfig {
            enabled: true,
            ..ShowcaseConfig::default()
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_disabled_never_fires() {
        let mut s = Showcase::seeded(ShowcaseConfig::default(), 1);
        s.arm(ms(0));
        assert_eq!(s.poll(ms(60_000), 20), None);
    }

    #[test]
    fn test_spotlight_then_release() {
        let mut s = Showcase::seeded(enabled(), 7);
        s.arm(ms(0));
        assert_eq!(s.poll(ms(2999), 20), None);
        let ev = s.poll(ms(3000), 20);
        assert!(matches!(ev, Some(ShowcaseEvent::Spotlight(r)) if r < 10));
        assert!(s.is_holding());
        assert_eq!(s.poll(ms(4000), 20), None);
        assert_eq!(s.poll(ms(4500), 20), Some(ShowcaseEvent::Release));
        assert!(!s.is_holding());
        // The next countdown started with the spotlight
        assert!(s.is_counting());
        assert_eq!(s.poll(ms(5999), 20), None);
        assert!(matches!(s.poll(ms(6000), 20), Some(ShowcaseEvent::Spotlight(_))));
    }

    #[test]
    fn test_arm_keeps_running_countdown() {
        let mut s = Showcase::seeded(enabled(), 4);
        s.arm(ms(0));
        s.arm(ms(2000));
        assert!(matches!(s.poll(ms(3000), 20), Some(ShowcaseEvent::Spotlight(_))));

        s.cancel();
        assert!(!s.is_counting());
        s.arm(ms(10_000));
        assert_eq!(s.poll(ms(12_999), 20), None);
        assert!(matches!(s.poll(ms(13_000), 20), Some(ShowcaseEvent::Spotlight(_))));
    }

    #[test]
    fn test_huge_interval_never_fires() {
        let cfg = ShowcaseConfig {
            interval_secs: 1e20,
            ..enabled()
        };
        let mut s = Showcase::seeded(cfg, 2);
        s.arm(ms(0));
        assert!(s.is_counting());
        assert_eq!(s.poll(ms(3_600_000), 20), None);
    }

    #[test]
    fn test_picks_stay_in_top_k() {
        let mut s = Showcase::seeded(enabled(), 42);
        let mut now = 0;
        for _ in 0..200 {
            s.arm(ms(now));
            now += 3000;
            match s.poll(ms(now), 50) {
                Some(ShowcaseEvent::Spotlight(rank)) => assert!(rank < 10),
                other => panic!("expected spotlight, got {other:?}"),
            }
            now += 1500;
            assert_eq!(s.poll(ms(now), 50), Some(ShowcaseEvent::Release));
        }
    }

    #[test]
    fn test_small_sets_bound_the_pick() {
        let mut s = Showcase::seeded(enabled(), 3);
        for i in 0..20u64 {
            s.arm(ms(i * 10_000));
            if let Some(ShowcaseEvent::Spotlight(rank)) = s.poll(ms(i * 10_000 + 3000), 2) {
                assert!(rank < 2);
            }
            s.cancel();
        }
    }

    #[test]
    fn test_empty_set_never_spotlights() {
        let mut s = Showcase::seeded(enabled(), 3);
        s.arm(ms(0));
        assert_eq!(s.poll(ms(3000), 0), None);
        assert!(!s.is_holding());
    }

    #[test]
    fn test_cancel_clears_hold() {
        let mut s = Showcase::seeded(enabled(), 9);
        s.arm(ms(0));
        s.poll(ms(3000), 5);
        s.cancel();
        assert!(!s.is_holding());
        assert_eq!(s.poll(ms(10_000), 5), None);
    }
}
