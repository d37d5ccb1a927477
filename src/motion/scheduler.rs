//! Idle Rotation Scheduler.
//!
//! ```text
//!   IdleRotating ──focus──▶ FocusedPaused ──release──▶ CooldownBeforeResume
//!        ▲                        ▲                           │    │
//!        │                        └─────────focus─────────────┘    │
//!        └──────────────────── resume timer fires ─────────────────┘
//! ```
//!
//! The angle only moves in `IdleRotating`, by real elapsed time times a
//! constant speed, so rotation speed does not depend on frame rate. Leaving
//! the cooldown re-bases the frame clock, so rotation resumes from exactly
//! the frozen angle.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::timer::{secs, FrameClock, Timer};
use crate::fast_math::{fma, wrap_tau};
use crate::render::projection::RotationState;

/// Rotation speeds and resume delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Longitude speed, rad/s
    pub speed_x: f32,
    /// Latitude speed, rad/s
    pub speed_y: f32,
    /// Quiet period after focus is cleared before rotation resumes
    pub resume_delay_secs: f32,
    /// dt assumed for the very first frame
    pub first_frame_dt: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed_x: 0.2,
            speed_y: 0.1,
            resume_delay_secs: 1.5,
            first_frame_dt: 1.0 / 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPhase {
    IdleRotating,
    FocusedPaused,
    CooldownBeforeResume,
}

/// Owns the rotation angle and the resume timer.
#[derive(Debug, Clone)]
pub struct RotationScheduler {
    cfg: MotionConfig,
    phase: RotationPhase,
    rotation: RotationState,
    resume: Timer,
    clock: FrameClock,
}

impl RotationScheduler {
    pub fn new(cfg: MotionConfig) -> Self {
        let clock = FrameClock::new(cfg.first_frame_dt);
        Self {
            cfg,
            phase: RotationPhase::IdleRotating,
            rotation: RotationState::default(),
            resume: Timer::new(),
            clock,
        }
    }

    pub fn phase(&self) -> RotationPhase {
        self.phase
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    /// Pending resume deadline, if cooling down.
    pub fn resume_deadline(&self) -> Option<Duration> {
        self.resume.deadline()
    }

    /// A label gained focus: freeze rotation (and cancel a pending resume).
    pub fn focus(&mut self, now: Duration) {
        match self.phase {
            RotationPhase::IdleRotating => {
                log::debug!("rotation paused at ({:.3}, {:.3})", self.rotation.angle_x, self.rotation.angle_y);
            }
            RotationPhase::CooldownBeforeResume => {
                log::debug!("resume cancelled by new focus");
            }
            RotationPhase::FocusedPaused => return,
        }
        self.resume.cancel();
        self.phase = RotationPhase::FocusedPaused;
        self.rotation.auto_rotating = false;
        self.clock.rebase(now);
    }

    /// Focus was cleared: start the quiet period before resuming.
    pub fn release(&mut self, now: Duration) {
        if self.phase != RotationPhase::FocusedPaused {
            return;
        }
        self.resume.arm(now, secs(self.cfg.resume_delay_secs));
        self.phase = RotationPhase::CooldownBeforeResume;
        log::debug!("cooldown started, resume in {:.1}s", self.cfg.resume_delay_secs);
    }

    /// Per-frame update. Returns `true` on the frame rotation resumes.
    pub fn advance(&mut self, now: Duration) -> bool {
        match self.phase {
            RotationPhase::IdleRotating => {
                let dt = self.clock.tick(now);
                self.rotation.angle_x = wrap_tau(fma(dt, self.cfg.speed_x, self.rotation.angle_x));
                self.rotation.angle_y = wrap_tau(fma(dt, self.cfg.speed_y, self.rotation.angle_y));
                false
            }
            RotationPhase::FocusedPaused => {
                self.clock.rebase(now);
                false
            }
            RotationPhase::CooldownBeforeResume => {
                self.clock.rebase(now);
                if self.resume.fire(now) {
                    self.phase = RotationPhase::IdleRotating;
                    self.rotation.auto_rotating = true;
                    log::debug!("rotation resumed");
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Drop every pending timer and return to `IdleRotating`, keeping the
    /// current angle.
    pub fn cancel_timers(&mut self) {
        self.resume.cancel();
        self.phase = RotationPhase::IdleRotating;
        self.rotation.auto_rotating = true;
        self.clock.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_starts_idle_rotating() {
        let s = RotationScheduler::new(MotionConfig::default());
        assert_eq!(s.phase(), RotationPhase::IdleRotating);
        assert!(s.rotation().auto_rotating);
    }

    #[test]
    fn test_rotation_tracks_real_time() {
        let mut fast = RotationScheduler::new(MotionConfig::default());
        let mut slow = RotationScheduler::new(MotionConfig::default());

        // Same 1s span at 100fps vs 10fps
        for i in 0..=100 {
            fast.advance(ms(i * 10));
        }
        for i in 0..=10 {
            slow.advance(ms(i * 100));
        }
        let a = fast.rotation();
        let b = slow.rotation();
        assert!((a.angle_x - b.angle_x).abs() < 1e-4);
        assert!((a.angle_y - b.angle_y).abs() < 1e-4);
        // first frame 1/60 + 1s at 0.2 rad/s
        assert!((a.angle_x - (0.2 + 0.2 / 60.0)).abs() < 1e-3);
    }

    #[test]
    fn test_focus_freezes_and_resume_does_not_jump() {
        let mut s = RotationScheduler::new(MotionConfig::default());
        for i in 0..50 {
            s.advance(ms(i * 16));
        }
        s.focus(ms(800));
        let frozen = s.rotation();

        for i in 0..100 {
            s.advance(ms(800 + i * 16));
        }
        assert_eq!(s.rotation().angle_x, frozen.angle_x);

        s.release(ms(2400));
        assert_eq!(s.phase(), RotationPhase::CooldownBeforeResume);
        assert!(!s.advance(ms(3899)));
        assert_eq!(s.rotation().angle_x, frozen.angle_x);

        assert!(s.advance(ms(3900)));
        assert_eq!(s.phase(), RotationPhase::IdleRotating);
        assert_eq!(s.rotation().angle_x, frozen.angle_x);
        assert_eq!(s.rotation().angle_y, frozen.angle_y);

        // The next frame moves by one frame's worth, not by the pause
        s.advance(ms(3916));
        let step = s.rotation().angle_x - frozen.angle_x;
        assert!(step > 0.0 && step < 0.01, "step {step}");
    }

    #[test]
    fn test_refocus_during_cooldown_cancels_resume() {
        let mut s = RotationScheduler::new(MotionConfig::default());
        s.focus(ms(0));
        s.release(ms(100));
        s.focus(ms(500));
        assert_eq!(s.phase(), RotationPhase::FocusedPaused);
        assert_eq!(s.resume_deadline(), None);
        assert!(!s.advance(ms(5000)));
        assert_eq!(s.phase(), RotationPhase::FocusedPaused);
    }

    #[test]
    fn test_release_without_focus_is_noop() {
        let mut s = RotationScheduler::new(MotionConfig::default());
        s.release(ms(10));
        assert_eq!(s.phase(), RotationPhase::IdleRotating);
        assert_eq!(s.resume_deadline(), None);
    }

    #[test]
    fn test_angles_wrap() {
        let cfg = MotionConfig {
            speed_x: 10.0,
            speed_y: 10.0,
            ..MotionConfig::default()
        };
        let mut s = RotationScheduler::new(cfg);
        s.advance(ms(0));
        s.advance(ms(5000));
        let r = s.rotation();
        assert!((0.0..std::f32::consts::TAU).contains(&r.angle_x));
        assert!((0.0..std::f32::consts::TAU).contains(&r.angle_y));
    }

    #[test]
    fn test_huge_resume_delay_stays_in_cooldown() {
        let cfg = MotionConfig {
            resume_delay_secs: 1e20,
            ..MotionConfig::default()
        };
        let mut s = RotationScheduler::new(cfg);
        s.focus(ms(0));
        s.release(ms(100));
        assert_eq!(s.phase(), RotationPhase::CooldownBeforeResume);
        assert!(!s.advance(ms(3_600_000)));
        assert_eq!(s.phase(), RotationPhase::CooldownBeforeResume);
    }

    #[test]
    fn test_cancel_timers() {
        let mut s = RotationScheduler::new(MotionConfig::default());
        s.focus(ms(0));
        s.release(ms(10));
        s.cancel_timers();
        assert_eq!(s.phase(), RotationPhase::IdleRotating);
        assert_eq!(s.resume_deadline(), None);
    }
}
