//! Projection & Focus: spherical layout + rotation + focus → screen transform.
//!
//! Pure functions only. The same style, rotation and focus always give the
//! same `ProjectedPosition`; all mutable state lives in `motion` and
//! `engine`.

use crate::fast_math::{lerp, wrap_tau};
use crate::layout::galaxy::GalaxyConfig;
use crate::layout::sphere::{SphereConfig, SphericalPosition};
use crate::layout::LabelStyle;

/// Stacking slot reserved for the focused label, above any depth-derived
/// index.
pub const FOCUSED_Z_INDEX: i32 = 100_000;

/// Offset added to `round(z)` so depth-derived indices stay positive.
const Z_INDEX_BASE: i32 = 1000;

/// Global sphere rotation. `angle_x` turns longitude (theta), `angle_y`
/// turns latitude (phi). Both live in `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub angle_x: f32,
    pub angle_y: f32,
    pub auto_rotating: bool,
}

impl Default for RotationState {
    fn default() -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            auto_rotating: true,
        }
    }
}

/// Screen transform of one label for one frame. Pixels from the cloud centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPosition {
    pub screen_x: f32,
    pub screen_y: f32,
    /// Signed depth (towards the viewer is positive)
    pub depth: f32,
    pub z_index: i32,
    pub opacity: f32,
    pub scale: f32,
    pub rotate_z_deg: f32,
    pub focused: bool,
}

impl ProjectedPosition {
    /// Interpolate towards `to`. Discrete fields (z-index, focus) snap to `to`.
    pub fn blend(&self, to: &Self, t: f32) -> Self {
        Self {
            screen_x: lerp(self.screen_x, to.screen_x, t),
            screen_y: lerp(self.screen_y, to.screen_y, t),
            depth: lerp(self.depth, to.depth, t),
            z_index: to.z_index,
            opacity: lerp(self.opacity, to.opacity, t).clamp(0.0, 1.0),
            scale: lerp(self.scale, to.scale, t).max(0.0),
            rotate_z_deg: lerp(self.rotate_z_deg, to.rotate_z_deg, t),
            focused: to.focused,
        }
    }

    /// CSS `transform` value for this position.
    pub fn css_transform(&self) -> String {
        format!(
            "translate3d({:.2}px, {:.2}px, {:.2}px) rotateZ({:.1}deg) scale({:.3})",
            self.screen_x, self.screen_y, self.depth, self.rotate_z_deg, self.scale
        )
    }
}

/// Effective angular position of `style` given rotation and focus.
///
/// - focused label → front centre
/// - other labels while focused → longitude shifted by `-θ_focus`
/// - nothing focused → rotation added to (theta, phi)
pub fn effective_position(
    style: &LabelStyle,
    rotation: &RotationState,
    focus: Option<&LabelStyle>,
) -> SphericalPosition {
    match focus {
        Some(f) if f.label == style.label => SphericalPosition::FRONT,
        Some(f) => SphericalPosition {
            phi: style.position.phi,
            theta: wrap_tau(style.position.theta - f.position.theta),
        },
        None => SphericalPosition {
            phi: style.position.phi + rotation.angle_y,
            theta: wrap_tau(style.position.theta + rotation.angle_x),
        },
    }
}

/// Spherical → Cartesian at `distance`: `(x, y, z)`.
pub fn to_cartesian(pos: SphericalPosition, distance: f32) -> (f32, f32, f32) {
    let (sin_phi, cos_phi) = pos.phi.sin_cos();
    let (sin_theta, cos_theta) = pos.theta.sin_cos();
    (
        distance * sin_phi * cos_theta,
        distance * cos_phi,
        distance * sin_phi * sin_theta,
    )
}

/// Depth → visibility in `[min_visibility, 1]`.
pub fn depth_visibility(z: f32, radius: f32, min_visibility: f32) -> f32 {
    let normalized = z / radius;
    ((normalized + 1.0) * 0.5).clamp(min_visibility, 1.0)
}

/// Depth → perspective scale factor, floored at `min_perspective`.
pub fn depth_perspective(z: f32, radius: f32, min_perspective: f32) -> f32 {
    ((z + radius) / (2.0 * radius)).max(min_perspective)
}

/// Depth → stacking index. Monotonic non-decreasing in `z`.
pub fn depth_z_index(z: f32) -> i32 {
    z.round() as i32 + Z_INDEX_BASE
}

/// Project one label of the 3D globe.
pub fn project_sphere(
    style: &LabelStyle,
    radius: f32,
    rotation: &RotationState,
    focus: Option<&LabelStyle>,
    cfg: &SphereConfig,
) -> ProjectedPosition {
    let pos = effective_position(style, rotation, focus);
    let (x, y, z) = to_cartesian(pos, style.distance_from_center);
    let focused = focus.is_some_and(|f| f.label == style.label);

    let visibility = depth_visibility(z, radius, cfg.min_visibility);
    let perspective = depth_perspective(z, radius, cfg.min_perspective);

    ProjectedPosition {
        screen_x: x,
        screen_y: y,
        depth: z,
        z_index: if focused { FOCUSED_Z_INDEX } else { depth_z_index(z) },
        opacity: if focused { 1.0 } else { (visibility * style.opacity).clamp(0.0, 1.0) },
        scale: perspective * style.scale,
        rotate_z_deg: 0.0,
        focused,
    }
}

/// Project one label of the flat galaxy.
pub fn project_galaxy(
    style: &LabelStyle,
    focus: Option<&LabelStyle>,
    cfg: &GalaxyConfig,
) -> ProjectedPosition {
    let (sx, sy) = style.slot;
    let base = ProjectedPosition {
        screen_x: sx,
        screen_y: sy,
        depth: 0.0,
        z_index: 0,
        opacity: style.opacity,
        scale: style.scale,
        rotate_z_deg: 0.0,
        focused: false,
    };

    match focus {
        None => base,
        Some(f) if f.label == style.label => ProjectedPosition {
            z_index: 20,
            opacity: 1.0,
            scale: style.scale * cfg.focused_scale,
            focused: true,
            ..base
        },
        Some(_) => ProjectedPosition {
            screen_x: sx + style.scatter.x,
            screen_y: sy + style.scatter.y,
            z_index: 10,
            rotate_z_deg: style.scatter.rotate_z_deg,
            ..base
        },
    }
}
