//! Galaxy: the flat 2D variant of the cloud.
//!
//! Labels sit in centred, wrapping rows (rank order). When one label is
//! focused the others drift by a small per-label scatter offset and tilt,
//! which is the whole "galaxy" effect.

use serde::{Deserialize, Serialize};

use super::style::VisualStyle;
use crate::fast_math::{fma, rem_to_px};

/// Flow and scatter parameters. Units are screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyConfig {
    pub container_width_px: f32,
    pub gap_px: f32,
    /// Average glyph advance as a fraction of the font size
    pub char_width_em: f32,
    pub line_height_em: f32,
    /// Amplitude of the scatter offset
    pub scatter_px: f32,
    /// Extra scale applied to the focused label
    pub focused_scale: f32,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            container_width_px: 896.0,
            gap_px: 16.0,
            char_width_em: 0.6,
            line_height_em: 1.4,
            scatter_px: 20.0,
            focused_scale: 1.2,
        }
    }
}

/// Where an unfocused label drifts while another label holds focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterOffset {
    pub x: f32,
    pub y: f32,
    pub rotate_z_deg: f32,
}

/// Deterministic scatter from the label text alone.
///
/// `x = sin(len · 0.5) · A`, `y = cos(first_char · 0.1) · A`,
/// `rotate_z = (len mod 5) · 10 − 20` degrees.
pub fn scatter_offset(label: &str, amplitude: f32) -> ScatterOffset {
    let len = label.chars().count();
    let first = label.chars().next().map(|c| c as u32).unwrap_or(0);
    ScatterOffset {
        x: (len as f32 * 0.5).sin() * amplitude,
        y: (first as f32 * 0.1).cos() * amplitude,
        rotate_z_deg: (len % 5) as f32 * 10.0 - 20.0,
    }
}

/// Estimated chip size `(width, height)` in px.
pub fn chip_size(label: &str, style: &VisualStyle, cfg: &GalaxyConfig) -> (f32, f32) {
    let font_px = rem_to_px(style.font_size_rem);
    let pad_h = rem_to_px(style.padding.horizontal_rem);
    let pad_v = rem_to_px(style.padding.vertical_rem);
    let chars = label.chars().count() as f32;
    (
        fma(chars * font_px, cfg.char_width_em, 2.0 * pad_h),
        fma(font_px, cfg.line_height_em, 2.0 * pad_v),
    )
}

/// Centre of each chip, relative to the cloud centre, for chips laid out in
/// order into centred wrapping rows.
pub fn flow_slots(sizes: &[(f32, f32)], cfg: &GalaxyConfig) -> Vec<(f32, f32)> {
    if sizes.is_empty() {
        return Vec::new();
    }

    // Pass 1: break into rows → (first index, end index, row width, row height)
    let mut rows: Vec<(usize, usize, f32, f32)> = Vec::new();
    let mut start = 0;
    let mut width = 0.0f32;
    let mut height = 0.0f32;

    for (i, &(w, h)) in sizes.iter().enumerate() {
        let needed = if i == start { w } else { width + cfg.gap_px + w };
        if i > start && needed > cfg.container_width_px {
            rows.push((start, i, width, height));
            start = i;
            width = w;
            height = h;
        } else {
            width = needed;
            height = height.max(h);
        }
    }
    rows.push((start, sizes.len(), width, height));

    let total_height: f32 = rows.iter().map(|r| r.3).sum::<f32>()
        + cfg.gap_px * (rows.len().saturating_sub(1)) as f32;

    // Pass 2: place rows top to bottom, each centred horizontally
    let mut slots = Vec::with_capacity(sizes.len());
    let mut cursor_y = -total_height * 0.5;

    for &(first, end, row_width, row_height) in &rows {
        let mut cursor_x = -row_width * 0.5;
        let cy = cursor_y + row_height * 0.5;
        for &(w, _) in &sizes[first..end] {
            slots.push((cursor_x + w * 0.5, cy));
            cursor_x += w + cfg.gap_px;
        }
        cursor_y += row_height + cfg.gap_px;
    }

    slots
}
