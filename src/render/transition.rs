//! Transition timing: easing curves and the focus-change tween.
//!
//! Continuous rotation is shown frame-by-frame with no tween. A focus change
//! is a discrete jump in targets, so every label blends from where it was
//! last drawn to its new target over one transition.

use std::time::Duration;

use super::projection::ProjectedPosition;

/// Easing curve mapping linear progress `t ∈ [0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// CSS `ease-out` (`cubic-bezier(0, 0, 0.58, 1)`)
    EaseOut,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`; `y` may overshoot past 1.
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Settles quickly with no overshoot.
    pub const SOFT_OUT: Easing = Easing::CubicBezier(0.22, 1.0, 0.36, 1.0);
    /// Overshoots by ~10% before settling.
    pub const SPRING_OUT: Easing = Easing::CubicBezier(0.34, 1.56, 0.64, 1.0);

    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }

    /// CSS `transition-timing-function` value.
    pub fn css(self) -> String {
        match self {
            Easing::Linear => "linear".into(),
            Easing::EaseOut => "ease-out".into(),
            Easing::CubicBezier(x1, y1, x2, y2) => format!("cubic-bezier({x1}, {y1}, {x2}, {y2})"),
        }
    }
}

/// One component of a cubic Bézier with end points 0 and 1.
#[inline]
fn bezier_component(p1: f32, p2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

#[inline]
fn bezier_slope(p1: f32, p2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// Evaluate a CSS cubic-bezier at progress `x`: solve `bx(t) = x`, return `by(t)`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Newton-Raphson first
    let mut t = x;
    for _ in 0..8 {
        let err = bezier_component(x1, x2, t) - x;
        if err.abs() < 1e-6 {
            return bezier_component(y1, y2, t);
        }
        let slope = bezier_slope(x1, x2, t);
        if slope.abs() < 1e-6 {
            break;
        }
        t -= err / slope;
    }

    // Bisection fallback (x(t) is monotonic for x1, x2 ∈ [0, 1])
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    t = x;
    for _ in 0..32 {
        let v = bezier_component(x1, x2, t);
        if (v - x).abs() < 1e-6 {
            break;
        }
        if v < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }
    bezier_component(y1, y2, t)
}

/// Duration + curve, as a CSS `transition` would express it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration_secs: f32,
    pub easing: Easing,
}

impl Transition {
    pub fn new(duration_secs: f32, easing: Easing) -> Self {
        Self {
            duration_secs,
            easing,
        }
    }

    /// Eased progress `elapsed` seconds into the transition.
    pub fn progress(&self, elapsed_secs: f32) -> f32 {
        if self.duration_secs <= 0.0 {
            return 1.0;
        }
        self.easing.apply(elapsed_secs / self.duration_secs)
    }

    /// CSS shorthand, e.g. `all 0.8s cubic-bezier(0.22, 1, 0.36, 1)`.
    pub fn css(&self) -> String {
        format!("all {}s {}", self.duration_secs, self.easing.css())
    }
}

/// In-flight blend from the last drawn positions to new targets.
#[derive(Debug, Clone)]
pub struct Tween {
    from: Vec<ProjectedPosition>,
    started: Option<Duration>,
    transition: Transition,
}

impl Tween {
    pub fn idle() -> Self {
        Self {
            from: Vec::new(),
            started: None,
            transition: Transition::new(0.0, Easing::Linear),
        }
    }

    /// Start blending from `from` (one entry per layout index).
    pub fn start(&mut self, from: Vec<ProjectedPosition>, now: Duration, transition: Transition) {
        if from.is_empty() {
            self.cancel();
            return;
        }
        log::trace!("tween start: {} labels, {}", from.len(), transition.css());
        self.from = from;
        self.started = Some(now);
        self.transition = transition;
    }

    pub fn cancel(&mut self) {
        self.from.clear();
        self.started = None;
    }

    pub fn is_active(&self) -> bool {
        self.started.is_some()
    }

    /// Blend `targets` in place. Finishes (and goes idle) once the
    /// transition duration has elapsed.
    pub fn apply(&mut self, targets: &mut [ProjectedPosition], now: Duration) {
        let Some(started) = self.started else {
            return;
        };
        if self.from.len() != targets.len() {
            self.cancel();
            return;
        }
        let elapsed = now.saturating_sub(started).as_secs_f32();
        if elapsed >= self.transition.duration_secs {
            self.cancel();
            return;
        }
        let t = self.transition.progress(elapsed);
        for (target, from) in targets.iter_mut().zip(&self.from) {
            *target = from.blend(target, t);
        }
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::idle()
    }
}
