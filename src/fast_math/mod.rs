//! Fast math: small scalar helpers shared by layout and projection.
//!
//! ## Division Exorcism
//! Per-frame code multiplies by pre-computed reciprocals instead of dividing:
//!   deg / 180  →  deg * INV_180
//!
//! ## FMA
//! `a * b + c` in one instruction with a single rounding step. Used for the
//! ratio → size ramps and for tween interpolation.

use std::f32::consts::{PI, TAU};

/// Golden ratio φ = (1 + √5) / 2, the longitude step of the Fibonacci sphere.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

const INV_180: f32 = 1.0 / 180.0;

/// Browser default root font size.
const ROOT_FONT_PX: f32 = 16.0;

/// Fused Multiply-Add: a * b + c
#[inline(always)]
pub fn fma(a: f32, b: f32, c: f32) -> f32 {
    a.mul_add(b, c)
}

/// Linear interpolation using FMA for precision.
/// lerp(a, b, t) = a + t * (b - a) = fma(t, b-a, a)
#[inline(always)]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    fma(t, b - a, a)
}

/// Wrap an angle into `[0, 2π)`.
///
/// `rem_euclid` alone can return exactly `TAU` for tiny negative inputs,
/// so the upper edge is folded back to zero.
#[inline]
pub fn wrap_tau(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Convert degrees to radians using reciprocal multiplication.
#[inline(always)]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * PI * INV_180
}

/// rem → px at the default root font size.
#[inline(always)]
pub fn rem_to_px(rem: f32) -> f32 {
    rem * ROOT_FONT_PX
}
