//! Style Deriver: weight → size, padding, opacity, scale, colour.
//!
//! Every visual ramp is linear in the label's normalized weight ratio `r`:
//! the lightest label sits at `r = 0`, the heaviest at `r = 1`.

use serde::{Deserialize, Serialize};

use super::palette::{Palette, Swatch};
use crate::fast_math::fma;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  StyleConfig
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Ramps for the per-label visual style. Sizes are in rem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub font_base_rem: f32,
    pub font_range_rem: f32,
    pub pad_v_base_rem: f32,
    pub pad_v_range_rem: f32,
    pub pad_h_base_rem: f32,
    pub pad_h_range_rem: f32,
    pub opacity_base: f32,
    pub opacity_range: f32,
    /// Extra scale for the heaviest label (`scale = 1 + r * scale_range`)
    pub scale_range: f32,
    pub palette: Palette,
}

impl StyleConfig {
    /// Keyword globe: 0.8–1.9rem text, 8-colour palette.
    pub fn keyword() -> Self {
        Self {
            font_base_rem: 0.8,
            font_range_rem: 1.1,
            pad_v_base_rem: 0.25,
            pad_v_range_rem: 0.25,
            pad_h_base_rem: 0.5,
            pad_h_range_rem: 0.5,
            opacity_base: 0.7,
            opacity_range: 0.3,
            scale_range: 0.15,
            palette: Palette::keyword(),
        }
    }

    /// Tag galaxy: 0.9–1.8rem text, 6-colour palette.
    pub fn tag() -> Self {
        Self {
            font_base_rem: 0.9,
            font_range_rem: 0.9,
            pad_v_base_rem: 0.3,
            pad_v_range_rem: 0.3,
            pad_h_base_rem: 0.7,
            pad_h_range_rem: 0.5,
            palette: Palette::tag(),
            ..Self::keyword()
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::keyword()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Derived style
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub vertical_rem: f32,
    pub horizontal_rem: f32,
}

/// Weight-derived look of one label, before any placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualStyle {
    pub ratio: f32,
    pub font_size_rem: f32,
    pub padding: Padding,
    pub opacity: f32,
    pub scale: f32,
    pub color: Swatch,
}

/// Normalize `weight` into `[0, 1]` against the set's extremes.
///
/// A zero range (all weights equal, or a single label) yields 0 instead of
/// dividing by zero.
pub fn weight_ratio(weight: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    let range = if range > 0.0 { range } else { 1.0 };
    ((weight - min) / range).clamp(0.0, 1.0)
}

/// Derive the visual style of the label at `rank` with ratio `ratio`.
///
/// Returns `None` only when the palette is empty, which config validation
/// rules out.
pub fn visual_style(cfg: &StyleConfig, rank: usize, label: &str, ratio: f32) -> Option<VisualStyle> {
    let color = cfg.palette.color_for(rank, label)?;
    Some(VisualStyle {
        ratio,
        font_size_rem: fma(ratio, cfg.font_range_rem, cfg.font_base_rem),
        padding: Padding {
            vertical_rem: fma(ratio, cfg.pad_v_range_rem, cfg.pad_v_base_rem),
            horizontal_rem: fma(ratio, cfg.pad_h_range_rem, cfg.pad_h_base_rem),
        },
        opacity: fma(ratio, cfg.opacity_range, cfg.opacity_base).clamp(0.0, 1.0),
        scale: fma(ratio, cfg.scale_range, 1.0),
        color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_scenario() {
        // {A:10, B:5, C:1}
        assert!((weight_ratio(10.0, 1.0, 10.0) - 1.0).abs() < 1e-6);
        assert!((weight_ratio(5.0, 1.0, 10.0) - 4.0 / 9.0).abs() < 1e-6);
        assert!((weight_ratio(1.0, 1.0, 10.0) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_ratio_zero_range() {
        assert_eq!(weight_ratio(5.0, 5.0, 5.0), 0.0);
        assert_eq!(weight_ratio(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_ratio_stays_in_unit_interval() {
        for w in [0.0, 0.5, 3.0, 7.25, 9.99, 10.0] {
            let r = weight_ratio(w, 0.0, 10.0);
            assert!((0.0..=1.0).contains(&r), "ratio {r} for weight {w}");
        }
    }

    #[test]
    fn test_keyword_ramps() {
        let cfg = StyleConfig::keyword();
        let lo = visual_style(&cfg, 20, "c", 0.0).unwrap();
        let hi = visual_style(&cfg, 0, "a", 1.0).unwrap();
        assert!((lo.font_size_rem - 0.8).abs() < 1e-6);
        assert!((hi.font_size_rem - 1.9).abs() < 1e-6);
        assert!((lo.opacity - 0.7).abs() < 1e-6);
        assert!((hi.opacity - 1.0).abs() < 1e-6);
        assert!((hi.scale - 1.15).abs() < 1e-6);
        assert!((hi.padding.horizontal_rem - 1.0).abs() < 1e-6);
        assert!((lo.padding.vertical_rem - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_tag_ramps() {
        let cfg = StyleConfig::tag();
        let hi = visual_style(&cfg, 0, "a", 1.0).unwrap();
        assert!((hi.font_size_rem - 1.8).abs() < 1e-6);
        assert!((hi.padding.vertical_rem - 0.6).abs() < 1e-6);
        assert!((hi.padding.horizontal_rem - 1.2).abs() < 1e-6);
        assert_eq!(hi.color, Swatch::Blue);
    }

    #[test]
    fn test_empty_palette_yields_none() {
        let cfg = StyleConfig {
            palette: Palette::new(Vec::new()),
            ..StyleConfig::keyword()
        };
        assert!(visual_style(&cfg, 0, "a", 0.5).is_none());
    }
}
