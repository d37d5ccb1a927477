//! Per-label layout: style + sphere placement + galaxy slot, derived once per
//! label set.

pub mod galaxy;
pub mod palette;
pub mod sphere;
pub mod style;

use std::collections::HashMap;

use self::galaxy::{chip_size, flow_slots, scatter_offset, GalaxyConfig, ScatterOffset};
use self::palette::Swatch;
use self::sphere::{distribute, label_distance, sphere_radius, SphereConfig, SphericalPosition};
use self::style::{visual_style, weight_ratio, Padding, StyleConfig, VisualStyle};
use crate::error::{CloudError, Result};
use crate::model::LabelSet;

/// Everything derived for one label. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub label: String,
    pub weight: f32,
    pub rank: usize,
    pub ratio: f32,
    pub font_size_rem: f32,
    pub padding: Padding,
    pub opacity: f32,
    pub scale: f32,
    pub color: Swatch,
    pub position: SphericalPosition,
    pub distance_from_center: f32,
    /// Galaxy resting slot (chip centre, px from the cloud centre)
    pub slot: (f32, f32),
    pub scatter: ScatterOffset,
}

impl LabelStyle {
    fn visual(&self) -> VisualStyle {
        VisualStyle {
            ratio: self.ratio,
            font_size_rem: self.font_size_rem,
            padding: self.padding,
            opacity: self.opacity,
            scale: self.scale,
            color: self.color,
        }
    }
}

/// Derived layout of a whole label set.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudLayout {
    styles: Vec<LabelStyle>,
    index: HashMap<String, usize>,
    radius: f32,
    fingerprint: u64,
}

impl CloudLayout {
    /// Run the style deriver, the sphere distributor and the galaxy flow
    /// over `set`, in rank order.
    pub fn build(
        set: &LabelSet,
        style_cfg: &StyleConfig,
        sphere_cfg: &SphereConfig,
        galaxy_cfg: &GalaxyConfig,
    ) -> Result<Self> {
        let n = set.len();
        let radius = sphere_radius(n, sphere_cfg);
        let positions = distribute(n);

        // Empty sets never reach the min/max reduction
        let (min, max) = match (set.min_weight(), set.max_weight()) {
            (Some(min), Some(max)) => (min, max),
            _ => (0.0, 0.0),
        };

        let mut styles = Vec::with_capacity(n);
        for ((rank, entry), position) in set.iter().enumerate().zip(positions) {
            let ratio = weight_ratio(entry.weight, min, max);
            let visual = visual_style(style_cfg, rank, &entry.label, ratio)
                .ok_or_else(|| CloudError::InvalidConfig("palette must not be empty".into()))?;

            styles.push(LabelStyle {
                label: entry.label.clone(),
                weight: entry.weight,
                rank,
                ratio,
                font_size_rem: visual.font_size_rem,
                padding: visual.padding,
                opacity: visual.opacity,
                scale: visual.scale,
                color: visual.color,
                position,
                distance_from_center: label_distance(radius, ratio, sphere_cfg),
                slot: (0.0, 0.0),
                scatter: scatter_offset(&entry.label, galaxy_cfg.scatter_px),
            });
        }

        let sizes: Vec<(f32, f32)> = styles
            .iter()
            .map(|s| chip_size(&s.label, &s.visual(), galaxy_cfg))
            .collect();
        for (style, slot) in styles.iter_mut().zip(flow_slots(&sizes, galaxy_cfg)) {
            style.slot = slot;
        }

        let index = styles
            .iter()
            .enumerate()
            .map(|(i, s)| (s.label.clone(), i))
            .collect();

        log::debug!("derived layout for {} labels (radius {:.1})", n, radius);

        Ok(Self {
            styles,
            index,
            radius,
            fingerprint: set.fingerprint(),
        })
    }

    pub fn styles(&self) -> &[LabelStyle] {
        &self.styles
    }

    pub fn get(&self, label: &str) -> Option<&LabelStyle> {
        self.index.get(label).map(|&i| &self.styles[i])
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Sphere radius used for depth normalization.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Fingerprint of the label set this layout was derived from.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}
