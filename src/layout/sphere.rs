//! Sphere distributor: Fibonacci sphere placement.
//!
//! Rank `i` of `N` goes to latitude `acos(1 - 2i/(N-1))` (pole to pole) and
//! longitude `(i+1) · φ · 2π mod 2π`. The irrational longitude step never
//! repeats, so labels spread evenly without clustering and without any
//! randomness.

use std::f32::consts::FRAC_PI_2;
use std::f64::consts::TAU as TAU64;

use serde::{Deserialize, Serialize};

use crate::fast_math::{fma, GOLDEN_RATIO};

/// Angular position on the unit sphere.
///
/// `phi` is the polar angle from +Y (0 = top pole, π = bottom pole),
/// `theta` the longitude in `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalPosition {
    pub phi: f32,
    pub theta: f32,
}

impl SphericalPosition {
    /// Front-centre slot used for a lone label and for the focused label.
    pub const FRONT: Self = Self {
        phi: FRAC_PI_2,
        theta: 0.0,
    };
}

/// Sphere sizing. Units are screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    /// Radius contributed by each label before clamping
    pub radius_per_label: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Distance multiplier for the lightest label
    pub distance_base: f32,
    /// Extra distance multiplier for the heaviest label
    pub distance_range: f32,
    /// Floor for depth-based visibility so back labels never vanish
    pub min_visibility: f32,
    /// Floor for the perspective scale factor
    pub min_perspective: f32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius_per_label: 2.5,
            radius_min: 150.0,
            radius_max: 180.0,
            distance_base: 0.95,
            distance_range: 0.10,
            min_visibility: 0.15,
            min_perspective: 0.7,
        }
    }
}

/// Sphere radius for `count` labels: grows with the set, clamped.
pub fn sphere_radius(count: usize, cfg: &SphereConfig) -> f32 {
    (count as f32 * cfg.radius_per_label).clamp(cfg.radius_min, cfg.radius_max)
}

/// Distance from the centre for a label with weight ratio `ratio`.
pub fn label_distance(radius: f32, ratio: f32, cfg: &SphereConfig) -> f32 {
    radius * fma(ratio, cfg.distance_range, cfg.distance_base)
}

/// Position of rank `index` among `count` labels.
///
/// `count == 1` maps to [`SphericalPosition::FRONT`]; callers never ask for
/// an index on an empty set.
pub fn fibonacci_position(index: usize, count: usize) -> SphericalPosition {
    if count <= 1 {
        return SphericalPosition::FRONT;
    }
    let y = 1.0 - (index as f64 / (count - 1) as f64) * 2.0;
    let phi = y.clamp(-1.0, 1.0).acos();
    let theta = ((index + 1) as f64 * GOLDEN_RATIO * TAU64).rem_euclid(TAU64);
    SphericalPosition {
        phi: phi as f32,
        theta: theta as f32,
    }
}

/// Positions for every rank of a `count`-label set.
pub fn distribute(count: usize) -> Vec<SphericalPosition> {
    (0..count).map(|i| fibonacci_position(i, count)).collect()
}
